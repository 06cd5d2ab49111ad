//! Slicing and region assignment
//!
//! Selectors accept a single index or any Rust range. Ranges are half-open
//! as usual; a range reaching past the dimension is an index error rather
//! than being clipped.

use crate::error::{check_index, Error, Result};
use crate::matrix::Matrix;
use crate::storage::{dispatch, MatrixData, RowStore, Value};
use crate::vector::Vector;
use sparsegb_core::validation::resolve_range;
use sparsegb_core::Scalar;
use std::ops::{Bound, Range, RangeBounds, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

/// One axis of a slice: a single index or a range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Index(usize),
    Range(Bound<usize>, Bound<usize>),
}

impl From<usize> for Selector {
    fn from(index: usize) -> Self {
        Selector::Index(index)
    }
}

macro_rules! range_selector {
    ($($range:ty),*) => {
        $(
            impl From<$range> for Selector {
                fn from(range: $range) -> Self {
                    Selector::Range(range.start_bound().cloned(), range.end_bound().cloned())
                }
            }
        )*
    };
}

range_selector!(
    Range<usize>,
    RangeInclusive<usize>,
    RangeFrom<usize>,
    RangeTo<usize>,
    RangeToInclusive<usize>,
    RangeFull
);

/// Resolve a range against a dimension, reporting the offending end
pub(crate) fn resolve<R: RangeBounds<usize>>(range: &R, bound: usize) -> Result<Range<usize>> {
    resolve_range(range, bound).map_err(|_| {
        let index = match range.end_bound() {
            Bound::Included(&e) | Bound::Excluded(&e) => e,
            Bound::Unbounded => match range.start_bound() {
                Bound::Included(&s) | Bound::Excluded(&s) => s,
                Bound::Unbounded => bound,
            },
        };
        Error::Index { index, bound }
    })
}

/// Result of [`Matrix::extract`], shaped by the selectors
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    Element(Scalar),
    Vector(Vector),
    Matrix(Matrix),
}

impl Extracted {
    pub fn into_scalar(self) -> Option<Scalar> {
        match self {
            Extracted::Element(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_vector(self) -> Option<Vector> {
        match self {
            Extracted::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_matrix(self) -> Option<Matrix> {
        match self {
            Extracted::Matrix(m) => Some(m),
            _ => None,
        }
    }
}

fn submatrix_store<T: Value>(store: &RowStore<T>, rows: &Range<usize>, cols: &Range<usize>) -> MatrixData {
    let kept = store
        .rows()
        .filter(|(r, _)| rows.contains(*r))
        .flat_map(|(&r, entries)| {
            entries
                .range(cols.clone())
                .map(move |(&c, &v)| (r - rows.start, c - cols.start, v))
        });
    T::wrap_matrix(RowStore::from_entries(kept))
}

fn replace_row<T: Value>(store: &mut RowStore<T>, row: usize, source: &Vector) -> Result<()> {
    let entries = source.store::<T>()?.clone();
    store.replace_row(row, entries);
    Ok(())
}

fn replace_col<T: Value>(store: &mut RowStore<T>, col: usize, source: &Vector) -> Result<()> {
    let entries = source.store::<T>()?;
    store.retain(|_, c, _| c != col);
    for (&row, &value) in entries {
        store.insert(row, col, value);
    }
    Ok(())
}

fn replace_region<T: Value>(
    store: &mut RowStore<T>,
    rows: &Range<usize>,
    cols: &Range<usize>,
    source: &Matrix,
) -> Result<()> {
    let entries = source.store::<T>()?;
    store.retain(|r, c, _| !(rows.contains(&r) && cols.contains(&c)));
    for (r, c, value) in entries.iter() {
        store.insert(r + rows.start, c + cols.start, value);
    }
    Ok(())
}

impl Matrix {
    /// Slice the matrix
    ///
    /// Two indices give an element, an index and a range give a row or
    /// column vector, and two ranges give a re-indexed sub-matrix.
    pub fn extract(&self, rows: impl Into<Selector>, cols: impl Into<Selector>) -> Result<Extracted> {
        match (rows.into(), cols.into()) {
            (Selector::Index(i), Selector::Index(j)) => self.get(i, j).map(Extracted::Element),
            (Selector::Index(i), Selector::Range(start, end)) => {
                self.extract_row(i)?.extract((start, end)).map(Extracted::Vector)
            }
            (Selector::Range(start, end), Selector::Index(j)) => {
                self.extract_col(j)?.extract((start, end)).map(Extracted::Vector)
            }
            (Selector::Range(rs, re), Selector::Range(cs, ce)) => {
                self.submatrix((rs, re), (cs, ce)).map(Extracted::Matrix)
            }
        }
    }

    /// Row `i` as a vector
    pub fn row(&self, i: usize) -> Result<Vector> {
        self.extract_row(i)
    }

    /// Re-indexed copy of a rectangular region
    pub fn submatrix<R, C>(&self, rows: R, cols: C) -> Result<Matrix>
    where
        R: RangeBounds<usize>,
        C: RangeBounds<usize>,
    {
        let rows = resolve(&rows, self.nrows())?;
        let cols = resolve(&cols, self.ncols())?;
        if rows.len() == self.nrows() && cols.len() == self.ncols() {
            return Ok(self.dup());
        }
        let data = dispatch!(self.data(), MatrixData, s => submatrix_store(s, &rows, &cols));
        Ok(Matrix::from_data(rows.len(), cols.len(), data))
    }

    /// Replace row `i` with the entries of `source`
    pub fn assign_row(&mut self, i: usize, source: &Vector) -> Result<()> {
        check_index(i, self.nrows())?;
        if source.size() != self.ncols() {
            return Err(Error::dimension("assign_row", (1, self.ncols()), (1, source.size())));
        }
        let mut data = self.data().clone();
        dispatch!(&mut data, MatrixData, s => replace_row(s, i, source))?;
        self.set_data(data);
        Ok(())
    }

    /// Replace column `j` with the entries of `source`
    pub fn assign_col(&mut self, j: usize, source: &Vector) -> Result<()> {
        check_index(j, self.ncols())?;
        if source.size() != self.nrows() {
            return Err(Error::dimension("assign_col", (self.nrows(), 1), (source.size(), 1)));
        }
        let mut data = self.data().clone();
        dispatch!(&mut data, MatrixData, s => replace_col(s, j, source))?;
        self.set_data(data);
        Ok(())
    }

    /// Replace a rectangular region with the entries of `source`
    ///
    /// Stored entries in the region that `source` does not cover are
    /// deleted. `assign_submatrix(.., .., &src)` copies `src` wholesale.
    pub fn assign_submatrix<R, C>(&mut self, rows: R, cols: C, source: &Matrix) -> Result<()>
    where
        R: RangeBounds<usize>,
        C: RangeBounds<usize>,
    {
        let rows = resolve(&rows, self.nrows())?;
        let cols = resolve(&cols, self.ncols())?;
        if (rows.len(), cols.len()) != source.shape() {
            return Err(Error::dimension(
                "assign_submatrix",
                (rows.len(), cols.len()),
                source.shape(),
            ));
        }
        let mut data = self.data().clone();
        dispatch!(&mut data, MatrixData, s => replace_region(s, &rows, &cols, source))?;
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
    fn test_extract_shapes() {
        let m = diag(&[0, 1, 2]);
        assert_eq!(m.extract(1usize, 1usize).unwrap(), Extracted::Element(Scalar::Int64(1)));

        let row = m.extract(1usize, ..).unwrap().into_vector().unwrap();
        assert_eq!(row.size(), 3);
        assert_eq!(row.to_lists::<i64>().unwrap(), (vec![1], vec![1]));

        let col = m.extract(.., 2usize).unwrap().into_vector().unwrap();
        assert_eq!(col.to_lists::<i64>().unwrap(), (vec![2], vec![2]));

        let whole = m.extract(.., ..).unwrap().into_matrix().unwrap();
        assert_eq!(whole, m);
    }

    #[test]
    fn test_submatrix_reindexes() {
        let m = diag(&[0, 1, 2]);
        let sub = m.extract(1usize..3, 1usize..3).unwrap().into_matrix().unwrap();
        assert_eq!(sub.shape(), (2, 2));
        assert_eq!(sub.to_lists::<i64>().unwrap(), (vec![0, 1], vec![0, 1], vec![1, 2]));

        let sub = m.submatrix(0..=1, 1..).unwrap();
        assert_eq!(sub.shape(), (2, 2));
        assert_eq!(sub.to_lists::<i64>().unwrap(), (vec![1], vec![0], vec![1]));
    }

    #[test]
    fn test_out_of_range_selectors() {
        let m = diag(&[0, 1, 2]);
        assert_eq!(m.extract(3usize, ..).unwrap_err().kind(), ErrorKind::Index);
        assert_eq!(m.extract(0usize..4, ..).unwrap_err().kind(), ErrorKind::Index);
        assert_eq!(m.extract(.., 1usize..=3).unwrap_err().kind(), ErrorKind::Index);
    }

    #[test]
    fn test_assign_row() {
        let mut m = diag(&[0, 1, 2]);
        m.assign_row(2, &Vector::from_values(&[6i64, 6, 6])).unwrap();
        assert_eq!(m.to_lists::<i64>().unwrap(), (vec![0, 1, 2, 2, 2], vec![0, 1, 0, 1, 2], vec![0, 1, 6, 6, 6]));

        let err = m.assign_row(0, &Vector::from_values(&[1i64, 2])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimension);
        let err = m.assign_row(0, &Vector::from_values(&[1.0, 2.0, 3.0])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(m.nvals(), 5);
    }

    #[test]
    fn test_assign_col_replaces_column() {
        let mut m = diag(&[1, 2, 3]);
        let col = Vector::from_coordinates(&[0], &[9i64], Some(3)).unwrap();
        m.assign_col(1, &col).unwrap();
        assert_eq!(m.get(0, 1).unwrap(), Scalar::Int64(9));
        assert_eq!(m.extract_element(1, 1).unwrap(), None);
        assert_eq!(m.nvals(), 3);
    }

    #[test]
    fn test_assign_submatrix() {
        let mut m = Matrix::new(Domain::Int64, 4, 4);
        m.set(1, 1, 5).unwrap();
        m.set(3, 3, 7).unwrap();
        let src = Matrix::from_lists(&[0, 1], &[1, 0], &[1i64, 2]).unwrap();
        m.assign_submatrix(1..3, 1..3, &src).unwrap();
        assert_eq!(m.to_lists::<i64>().unwrap(), (vec![1, 2, 3], vec![2, 1, 3], vec![1, 2, 7]));

        let copy = diag(&[4, 4, 4, 4]);
        m.assign_submatrix(.., .., &copy).unwrap();
        assert_eq!(m, copy);

        let err = m.assign_submatrix(0..1, 0..2, &copy).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Dimension);
    }
}
