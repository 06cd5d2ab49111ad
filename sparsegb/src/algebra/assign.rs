//! Masked, accumulated assignment
//!
//! A [`Descriptor`] decides which positions an assignment may write. Inside
//! the allowed positions the source wins, or is combined with the existing
//! value through the accumulator. Outside them the target is left alone,
//! unless `replace` is set, which clears it.

use super::merge_sorted;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::ops::{BinaryOp, BoundBinary};
use crate::storage::{dispatch, MatrixData, RowStore, VecStore, Value, VectorData};
use crate::vector::Vector;
use hashbrown::HashSet;
use sparsegb_core::validation::checked_positions;
use sparsegb_core::{Element, Scalar};
use std::hash::Hash;
use tracing::debug;

/// A container selecting positions for an assignment
#[derive(Debug, Clone, Copy)]
pub enum Mask<'a> {
    Matrix(&'a Matrix),
    Vector(&'a Vector),
}

impl<'a> From<&'a Matrix> for Mask<'a> {
    fn from(m: &'a Matrix) -> Self {
        Mask::Matrix(m)
    }
}

impl<'a> From<&'a Vector> for Mask<'a> {
    fn from(v: &'a Vector) -> Self {
        Mask::Vector(v)
    }
}

/// Options controlling an assignment
///
/// ```
/// use sparsegb::{BinaryOp, Descriptor, Matrix};
///
/// # fn main() -> sparsegb::Result<()> {
/// let mut m = Matrix::from_lists(&[0, 1, 2], &[0, 1, 2], &[0i64, 1, 2])?;
/// let mask = m.gt(0)?;
/// m.assign_scalar(9, &Descriptor::new().with_mask(&mask))?;
/// assert_eq!(m.to_lists::<i64>()?.2, vec![0, 9, 9]);
///
/// let ones = Matrix::from_lists(&[0, 1, 2], &[0, 1, 2], &[1i64, 1, 1])?;
/// m.assign(&ones, &Descriptor::new().with_accumulate(BinaryOp::PLUS))?;
/// assert_eq!(m.to_lists::<i64>()?.2, vec![1, 10, 10]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Descriptor<'a> {
    mask: Option<Mask<'a>>,
    complement: bool,
    structural: bool,
    replace: bool,
    accumulate: Option<BinaryOp>,
}

impl<'a> Descriptor<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict writes to positions selected by `mask`
    pub fn with_mask(mut self, mask: impl Into<Mask<'a>>) -> Self {
        self.mask = Some(mask.into());
        self
    }

    /// Invert the mask
    pub fn with_complement(mut self) -> Self {
        self.complement = true;
        self
    }

    /// Select by stored position instead of truthy value
    pub fn with_structural(mut self) -> Self {
        self.structural = true;
        self
    }

    /// Clear target entries outside the mask
    pub fn with_replace(mut self) -> Self {
        self.replace = true;
        self
    }

    /// Combine with existing values instead of overwriting
    pub fn with_accumulate(mut self, op: BinaryOp) -> Self {
        self.accumulate = Some(op);
        self
    }
}

/// Positions an assignment may write
struct Allowed<K> {
    selected: Option<HashSet<K>>,
    complement: bool,
}

impl<K: Eq + Hash> Allowed<K> {
    fn contains(&self, key: &K) -> bool {
        match &self.selected {
            Some(set) => set.contains(key) != self.complement,
            None => !self.complement,
        }
    }
}

fn selected_cells<T: Value>(store: &RowStore<T>, structural: bool) -> HashSet<(usize, usize)> {
    store
        .iter()
        .filter(|&(_, _, v)| structural || v.is_nonzero())
        .map(|(r, c, _)| (r, c))
        .collect()
}

fn selected_indices<T: Value>(store: &VecStore<T>, structural: bool) -> HashSet<usize> {
    store
        .iter()
        .filter(|&(_, &v)| structural || v.is_nonzero())
        .map(|(&i, _)| i)
        .collect()
}

/// Merge target and source entries under the assignment rules
fn write_entries<K, T>(
    target: impl Iterator<Item = (K, T)>,
    source: impl Iterator<Item = (K, T)>,
    allowed: &Allowed<K>,
    accumulate: Option<&BoundBinary<T>>,
    replace: bool,
) -> Vec<(K, T)>
where
    K: Ord + Eq + Hash,
    T: Element,
{
    merge_sorted(target, source)
        .filter_map(|(key, old, new)| {
            let value = if allowed.contains(&key) {
                match (old, new, accumulate) {
                    (Some(old), Some(new), Some(acc)) => Some(acc.call(old, new)),
                    (_, Some(new), _) => Some(new),
                    (Some(old), None, Some(_)) => Some(old),
                    _ => None,
                }
            } else if replace {
                None
            } else {
                old
            };
            value.map(|v| (key, v))
        })
        .collect()
}

fn bind_accumulate<T: Element>(desc: &Descriptor<'_>) -> Result<Option<BoundBinary<T>>> {
    desc.accumulate.as_ref().map(|op| op.bind::<T>()).transpose()
}

fn assign_matrix<T: Value>(
    target: &RowStore<T>,
    source: impl Iterator<Item = ((usize, usize), T)>,
    allowed: &Allowed<(usize, usize)>,
    desc: &Descriptor<'_>,
) -> Result<MatrixData> {
    let accumulate = bind_accumulate::<T>(desc)?;
    let entries = write_entries(
        target.iter().map(|(r, c, v)| ((r, c), v)),
        source,
        allowed,
        accumulate.as_ref(),
        desc.replace,
    );
    Ok(T::wrap_matrix(RowStore::from_entries(
        entries.into_iter().map(|((r, c), v)| (r, c, v)),
    )))
}

fn assign_vector<T: Value>(
    target: &VecStore<T>,
    source: impl Iterator<Item = (usize, T)>,
    allowed: &Allowed<usize>,
    desc: &Descriptor<'_>,
) -> Result<VectorData> {
    let accumulate = bind_accumulate::<T>(desc)?;
    let entries = write_entries(
        target.iter().map(|(&i, &v)| (i, v)),
        source,
        allowed,
        accumulate.as_ref(),
        desc.replace,
    );
    Ok(T::wrap_vector(entries.into_iter().collect()))
}

fn assign_from_matrix<T: Value>(
    target: &RowStore<T>,
    source: &Matrix,
    allowed: &Allowed<(usize, usize)>,
    desc: &Descriptor<'_>,
) -> Result<MatrixData> {
    let source = source.store::<T>()?;
    assign_matrix(target, source.iter().map(|(r, c, v)| ((r, c), v)), allowed, desc)
}

/// `positions` must arrive in row-major order
fn assign_matrix_scalar<T: Value>(
    target: &RowStore<T>,
    positions: impl Iterator<Item = (usize, usize)>,
    value: Scalar,
    allowed: &Allowed<(usize, usize)>,
    desc: &Descriptor<'_>,
) -> Result<MatrixData> {
    let value = T::from_scalar(value);
    assign_matrix(target, positions.map(|p| (p, value)), allowed, desc)
}

fn assign_from_vector<T: Value>(
    target: &VecStore<T>,
    source: &Vector,
    allowed: &Allowed<usize>,
    desc: &Descriptor<'_>,
) -> Result<VectorData> {
    let source = source.store::<T>()?;
    assign_vector(target, source.iter().map(|(&i, &v)| (i, v)), allowed, desc)
}

fn assign_vector_scalar<T: Value>(
    target: &VecStore<T>,
    positions: &[usize],
    value: Scalar,
    allowed: &Allowed<usize>,
    desc: &Descriptor<'_>,
) -> Result<VectorData> {
    let value = T::from_scalar(value);
    assign_vector(target, positions.iter().map(|&i| (i, value)), allowed, desc)
}

impl Matrix {
    fn allowed(&self, desc: &Descriptor<'_>) -> Result<Allowed<(usize, usize)>> {
        let selected = match desc.mask {
            None => None,
            Some(Mask::Matrix(mask)) => {
                if mask.shape() != self.shape() {
                    return Err(Error::dimension("mask", self.shape(), mask.shape()));
                }
                Some(dispatch!(mask.data(), MatrixData, s => selected_cells(s, desc.structural)))
            }
            Some(Mask::Vector(_)) => {
                return Err(Error::Type("a matrix assignment needs a matrix mask".into()));
            }
        };
        Ok(Allowed {
            selected,
            complement: desc.complement,
        })
    }

    /// Assign a same-shaped matrix through a descriptor
    ///
    /// In allowed positions where `source` has no entry, the target entry
    /// is deleted unless an accumulator is set.
    pub fn assign(&mut self, source: &Matrix, desc: &Descriptor<'_>) -> Result<()> {
        if source.shape() != self.shape() {
            return Err(Error::dimension("assign", self.shape(), source.shape()));
        }
        let allowed = self.allowed(desc)?;
        let data = dispatch!(self.data(), MatrixData, s => assign_from_matrix(s, source, &allowed, desc))?;
        debug!(shape = ?self.shape(), source = source.nvals(), nvals = data.nvals(), "assign");
        self.set_data(data);
        Ok(())
    }

    /// Write `value` into every allowed position
    pub fn assign_scalar(&mut self, value: impl Into<Scalar>, desc: &Descriptor<'_>) -> Result<()> {
        let value = value.into();
        if value.domain() != self.domain() {
            return Err(Error::domain_mismatch(self.domain(), value.domain()));
        }
        let allowed = self.allowed(desc)?;
        let (nrows, ncols) = self.shape();
        let data = match &allowed.selected {
            Some(set) if !allowed.complement => {
                let mut positions: Vec<(usize, usize)> = set.iter().copied().collect();
                positions.sort_unstable();
                dispatch!(self.data(), MatrixData, s => assign_matrix_scalar(s, positions.iter().copied(), value, &allowed, desc))?
            }
            _ => {
                let total = checked_positions(nrows, ncols)
                    .map_err(|_| Error::Shape(format!("{nrows}x{ncols} positions overflow usize")))?;
                debug!(total, "assign scalar over every allowed position");
                // Row-major generation is already sorted
                let positions = (0..nrows)
                    .flat_map(move |r| (0..ncols).map(move |c| (r, c)))
                    .filter(|p| allowed.contains(p));
                dispatch!(self.data(), MatrixData, s => assign_matrix_scalar(s, positions, value, &allowed, desc))?
            }
        };
        debug!(shape = ?self.shape(), nvals = data.nvals(), "assign scalar");
        self.set_data(data);
        Ok(())
    }
}

impl Vector {
    fn allowed(&self, desc: &Descriptor<'_>) -> Result<Allowed<usize>> {
        let selected = match desc.mask {
            None => None,
            Some(Mask::Vector(mask)) => {
                if mask.size() != self.size() {
                    return Err(Error::dimension("mask", (self.size(), 1), (mask.size(), 1)));
                }
                Some(dispatch!(mask.data(), VectorData, s => selected_indices(s, desc.structural)))
            }
            Some(Mask::Matrix(_)) => {
                return Err(Error::Type("a vector assignment needs a vector mask".into()));
            }
        };
        Ok(Allowed {
            selected,
            complement: desc.complement,
        })
    }

    pub fn assign(&mut self, source: &Vector, desc: &Descriptor<'_>) -> Result<()> {
        if source.size() != self.size() {
            return Err(Error::dimension("assign", (self.size(), 1), (source.size(), 1)));
        }
        let allowed = self.allowed(desc)?;
        let data = dispatch!(self.data(), VectorData, s => assign_from_vector(s, source, &allowed, desc))?;
        self.set_data(data);
        Ok(())
    }

    pub fn assign_scalar(&mut self, value: impl Into<Scalar>, desc: &Descriptor<'_>) -> Result<()> {
        let value = value.into();
        if value.domain() != self.domain() {
            return Err(Error::domain_mismatch(self.domain(), value.domain()));
        }
        let allowed = self.allowed(desc)?;
        let positions: Vec<usize> = (0..self.size()).filter(|i| allowed.contains(i)).collect();
        let data = dispatch!(self.data(), VectorData, s => assign_vector_scalar(s, &positions, value, &allowed, desc))?;
        self.set_data(data);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparsegb_core::{Domain, ErrorKind};

    fn diag(values: &[i64]) -> Matrix {
        let idx: Vec<usize> = (0..values.len()).collect();
        Matrix::from_lists(&idx, &idx, values).unwrap()
    }

    #[test]
    fn test_value_mask_scalar() {
        let mut m = diag(&[0, 1, 2]);
        let mask = m.gt(0).unwrap();
        m.assign_scalar(9, &Descriptor::new().with_mask(&mask)).unwrap();
        assert_eq!(m, diag(&[0, 9, 9]));
    }

    #[test]
    fn test_structural_and_complement() {
        let mut m = diag(&[0, 1, 2]);
        let mask = m.dup();
        m.assign_scalar(5, &Descriptor::new().with_mask(&mask).with_structural())
            .unwrap();
        assert_eq!(m, diag(&[5, 5, 5]));

        let mut m = Matrix::new(Domain::Int64, 2, 2);
        let mask = Matrix::from_coordinates(&[0], &[0], &[true], Some(2), Some(2)).unwrap();
        m.assign_scalar(1, &Descriptor::new().with_mask(&mask).with_complement())
            .unwrap();
        assert_eq!(m.nvals(), 3);
        assert_eq!(m.extract_element(0, 0).unwrap(), None);
    }

    #[test]
    fn test_unmasked_scalar_fills_everything() {
        let mut m = Matrix::new(Domain::Bool, 2, 3);
        m.assign_scalar(true, &Descriptor::new()).unwrap();
        assert_eq!(m.nvals(), 6);
    }

    #[test]
    fn test_complemented_scalar_merges_with_existing_entries() {
        let mut m = diag(&[1, 2, 3]);
        let mask = Matrix::from_coordinates(&[1], &[1], &[true], Some(3), Some(3)).unwrap();
        m.assign_scalar(4, &Descriptor::new().with_mask(&mask).with_complement())
            .unwrap();
        assert_eq!(m.nvals(), 9);
        assert_eq!(m.get(1, 1).unwrap(), Scalar::Int64(2));
        assert_eq!(m.get(0, 0).unwrap(), Scalar::Int64(4));
        assert_eq!(m.get(2, 1).unwrap(), Scalar::Int64(4));
    }

    #[test]
    fn test_scalar_over_unaddressable_shape() {
        let mut m = Matrix::new(Domain::Int64, usize::MAX, 2);
        let err = m.assign_scalar(1, &Descriptor::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
        assert_eq!(m.nvals(), 0);
    }

    #[test]
    fn test_assign_matrix_overwrites_and_deletes() {
        let mut m = diag(&[1, 2, 3]);
        let source = Matrix::from_coordinates(&[0], &[1], &[7i64], Some(3), Some(3)).unwrap();
        m.assign(&source, &Descriptor::new()).unwrap();
        assert_eq!(m, source);
    }

    #[test]
    fn test_accumulate_and_replace() {
        let mut m = diag(&[1, 2, 3]);
        let source = diag(&[10, 10, 10]);
        let mask = Matrix::from_coordinates(&[0, 1], &[0, 1], &[true, true], Some(3), Some(3)).unwrap();

        let desc = Descriptor::new()
            .with_mask(&mask)
            .with_accumulate(BinaryOp::PLUS);
        m.assign(&source, &desc).unwrap();
        assert_eq!(m, diag(&[11, 12, 3]));

        let desc = Descriptor::new().with_mask(&mask).with_replace();
        m.assign(&source, &desc).unwrap();
        assert_eq!(m.to_lists::<i64>().unwrap(), (vec![0, 1], vec![0, 1], vec![10, 10]));
    }

    #[test]
    fn test_validation_precedes_mutation() {
        let mut m = diag(&[1, 2, 3]);
        let before = m.dup();
        assert_eq!(
            m.assign(&diag(&[1, 2]), &Descriptor::new()).unwrap_err().kind(),
            ErrorKind::Dimension
        );
        assert_eq!(
            m.assign_scalar(1.0, &Descriptor::new()).unwrap_err().kind(),
            ErrorKind::Type
        );
        let bad_mask = diag(&[1, 1]);
        assert_eq!(
            m.assign_scalar(1, &Descriptor::new().with_mask(&bad_mask)).unwrap_err().kind(),
            ErrorKind::Dimension
        );
        let f = Matrix::new(Domain::Fp64, 3, 3);
        assert_eq!(m.assign(&f, &Descriptor::new()).unwrap_err().kind(), ErrorKind::Type);
        assert_eq!(m, before);
    }

    #[test]
    fn test_vector_assign() {
        let mut v = Vector::from_values(&[1i64, 0, 3]);
        let mask = v.ne_scalar(0).unwrap();
        v.assign_scalar(-1, &Descriptor::new().with_mask(&mask).with_complement())
            .unwrap();
        assert_eq!(v.to_lists::<i64>().unwrap(), (vec![0, 1, 2], vec![1, -1, 3]));

        let other = Vector::from_coordinates(&[2], &[5i64], Some(3)).unwrap();
        v.assign(&other, &Descriptor::new().with_accumulate(BinaryOp::TIMES))
            .unwrap();
        assert_eq!(v.get(2).unwrap(), Scalar::Int64(15));
        assert_eq!(v.nvals(), 3);

        let matrix_mask = diag(&[1, 1, 1]);
        assert_eq!(
            v.assign(&other, &Descriptor::new().with_mask(&matrix_mask)).unwrap_err().kind(),
            ErrorKind::Type
        );
    }
}
