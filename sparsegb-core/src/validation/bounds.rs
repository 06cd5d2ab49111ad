//! Index and dimension validation
//!
//! Pure checks shared by container construction, element access and
//! slicing.

use crate::error::{ErrorKind, Result};
use core::ops::{Bound, Range, RangeBounds};

/// Validate a single index against a dimension
pub const fn check_index(index: usize, bound: usize) -> Result<usize> {
    if index >= bound {
        return Err(ErrorKind::Index);
    }
    Ok(index)
}

/// Infer a dimension from the largest index, `max + 1` (0 when empty)
pub fn infer_dimension(indices: &[usize]) -> Result<usize> {
    match indices.iter().max() {
        Some(&max) => max.checked_add(1).ok_or(ErrorKind::Shape),
        None => Ok(0),
    }
}

/// Validate coordinate sequences for matrix construction
///
/// Returns the `(nrows, ncols)` to use: given dimensions are checked against
/// every index, missing ones are inferred.
pub fn validate_coordinates(
    rows: &[usize],
    cols: &[usize],
    nvalues: usize,
    nrows: Option<usize>,
    ncols: Option<usize>,
) -> Result<(usize, usize)> {
    if rows.len() != cols.len() || rows.len() != nvalues {
        return Err(ErrorKind::Shape);
    }

    let nrows = resolve_dimension(rows, nrows)?;
    let ncols = resolve_dimension(cols, ncols)?;
    Ok((nrows, ncols))
}

/// Check indices against an optional dimension, inferring it when absent
pub fn resolve_dimension(indices: &[usize], given: Option<usize>) -> Result<usize> {
    let inferred = infer_dimension(indices)?;
    match given {
        Some(dim) if inferred > dim => Err(ErrorKind::Shape),
        Some(dim) => Ok(dim),
        None => Ok(inferred),
    }
}

/// Resolve any range expression against a dimension
///
/// The result is a half-open range fully inside `0..bound`.
pub fn resolve_range<R: RangeBounds<usize>>(range: &R, bound: usize) -> Result<Range<usize>> {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.checked_add(1).ok_or(ErrorKind::Index)?,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&e) => e.checked_add(1).ok_or(ErrorKind::Index)?,
        Bound::Excluded(&e) => e,
        Bound::Unbounded => bound,
    };

    if start > end || end > bound {
        return Err(ErrorKind::Index);
    }
    Ok(start..end)
}

/// Number of logical positions in a `nrows x ncols` shape
pub fn checked_positions(nrows: usize, ncols: usize) -> Result<usize> {
    nrows.checked_mul(ncols).ok_or(ErrorKind::Shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_index() {
        assert_eq!(check_index(0, 1), Ok(0));
        assert_eq!(check_index(9, 10), Ok(9));
        assert_eq!(check_index(10, 10), Err(ErrorKind::Index));
        assert_eq!(check_index(0, 0), Err(ErrorKind::Index));
    }

    #[test]
    fn test_validate_coordinates() {
        assert_eq!(
            validate_coordinates(&[0, 1, 2], &[1, 2, 0], 3, None, None),
            Ok((3, 3))
        );
        assert_eq!(
            validate_coordinates(&[2, 2, 2], &[0, 1, 2], 3, None, None),
            Ok((3, 3))
        );
        assert_eq!(
            validate_coordinates(&[0, 1], &[0, 1], 2, Some(3), Some(3)),
            Ok((3, 3))
        );
        assert_eq!(validate_coordinates(&[], &[], 0, None, None), Ok((0, 0)));

        // Mismatched lengths
        assert_eq!(
            validate_coordinates(&[0, 1], &[0], 2, None, None),
            Err(ErrorKind::Shape)
        );
        assert_eq!(
            validate_coordinates(&[0, 1], &[0, 1], 3, None, None),
            Err(ErrorKind::Shape)
        );

        // Index beyond given bound
        assert_eq!(
            validate_coordinates(&[0, 3], &[0, 1], 2, Some(3), None),
            Err(ErrorKind::Shape)
        );
    }

    #[test]
    fn test_resolve_range() {
        assert_eq!(resolve_range(&(..), 3), Ok(0..3));
        assert_eq!(resolve_range(&(1..), 3), Ok(1..3));
        assert_eq!(resolve_range(&(0..=1), 3), Ok(0..2));
        assert_eq!(resolve_range(&(..2), 3), Ok(0..2));
        assert_eq!(resolve_range(&(2..2), 3), Ok(2..2));
        assert_eq!(resolve_range(&(0..4), 3), Err(ErrorKind::Index));
        assert_eq!(resolve_range(&(0..=3), 3), Err(ErrorKind::Index));
    }

    #[test]
    fn test_checked_positions() {
        assert_eq!(checked_positions(10, 10), Ok(100));
        assert_eq!(checked_positions(usize::MAX, 2), Err(ErrorKind::Shape));
    }
}
