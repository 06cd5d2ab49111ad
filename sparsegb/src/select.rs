//! Value comparison and structural selection
//!
//! Comparisons produce boolean containers with the receiver's structure:
//! only stored entries are compared, so structural zeros never appear in
//! the result even when `0 <cmp> value` would hold. Selection keeps the
//! stored entries matching a [`SelectOp`].

use crate::algebra::merge_sorted;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::storage::{dispatch, MatrixData, RowStore, VecStore, Value, VectorData};
use crate::vector::Vector;
use sparsegb_core::{Comparator, Element, Scalar, SelectOp};
use tracing::debug;

/// Threshold in the receiver's domain, typecast like any other operand
fn threshold<T: Element>(value: Scalar) -> T {
    T::from_scalar(value.cast(T::DOMAIN))
}

fn compare_store<T: Value>(store: &RowStore<T>, cmp: Comparator, value: Scalar) -> RowStore<bool> {
    let t = threshold::<T>(value);
    store.map(|v| T::compare(cmp, v, t))
}

fn compare_vec<T: Value>(store: &VecStore<T>, cmp: Comparator, value: Scalar) -> VecStore<bool> {
    let t = threshold::<T>(value);
    store.iter().map(|(&i, &v)| (i, T::compare(cmp, v, t))).collect()
}

fn compare_matrices<T: Value>(left: &RowStore<T>, right: &Matrix, cmp: Comparator) -> Result<RowStore<bool>> {
    let right = right.store::<T>()?;
    let both = merge_sorted(
        left.iter().map(|(r, c, v)| ((r, c), v)),
        right.iter().map(|(r, c, v)| ((r, c), v)),
    )
    .filter_map(|((r, c), x, y)| Some((r, c, T::compare(cmp, x?, y?))));
    Ok(RowStore::from_entries(both))
}

fn compare_vectors<T: Value>(left: &VecStore<T>, right: &Vector, cmp: Comparator) -> Result<VecStore<bool>> {
    let right = right.store::<T>()?;
    Ok(merge_sorted(
        left.iter().map(|(&i, &v)| (i, v)),
        right.iter().map(|(&i, &v)| (i, v)),
    )
    .filter_map(|(i, x, y)| Some((i, T::compare(cmp, x?, y?))))
    .collect())
}

/// Whether an entry passes a selection predicate
fn keeps<T: Element>(op: &SelectOp, threshold: Option<T>, row: usize, col: usize, value: T) -> bool {
    if !op.keeps_position(row, col) {
        return false;
    }
    match (op, threshold) {
        (SelectOp::NonZero, _) => value.is_nonzero(),
        (SelectOp::Value(cmp, _), Some(t)) => T::compare(*cmp, value, t),
        (SelectOp::Value(..), None) => false,
        _ => true,
    }
}

fn op_threshold<T: Element>(op: &SelectOp) -> Option<T> {
    match op {
        SelectOp::Value(_, value) => Some(threshold::<T>(*value)),
        _ => None,
    }
}

fn select_store<T: Value>(store: &RowStore<T>, op: &SelectOp) -> MatrixData {
    let t = op_threshold::<T>(op);
    T::wrap_matrix(store.filter_map(|r, c, v| keeps(op, t, r, c, v).then_some(v)))
}

fn select_positions<T: Value>(store: &RowStore<T>, op: &SelectOp) -> MatrixData {
    T::wrap_matrix(store.filter_map(|r, c, v| keeps(op, None, r, c, v).then_some(v)))
}

fn nonzero_vec<T: Value>(store: &VecStore<T>) -> VectorData {
    T::wrap_vector(
        store
            .iter()
            .filter(|&(_, &v)| v.is_nonzero())
            .map(|(&i, &v)| (i, v))
            .collect(),
    )
}

fn select_vec<T: Value>(store: &VecStore<T>, op: &SelectOp) -> VectorData {
    let t = op_threshold::<T>(op);
    T::wrap_vector(
        store
            .iter()
            .filter(|&(&i, &v)| keeps(op, t, i, 0, v))
            .map(|(&i, &v)| (i, v))
            .collect(),
    )
}

impl Matrix {
    /// Compare every stored entry against a scalar cast to this matrix's domain
    pub fn compare_scalar(&self, cmp: Comparator, value: impl Into<Scalar>) -> Result<Matrix> {
        let value = value.into();
        let store = dispatch!(self.data(), MatrixData, s => compare_store(s, cmp, value));
        Ok(Matrix::from_store(self.nrows(), self.ncols(), store))
    }

    /// Compare entries stored in both matrices
    pub fn compare(&self, cmp: Comparator, other: &Matrix) -> Result<Matrix> {
        if self.shape() != other.shape() {
            return Err(Error::dimension("compare", self.shape(), other.shape()));
        }
        let store = dispatch!(self.data(), MatrixData, s => compare_matrices(s, other, cmp))?;
        Ok(Matrix::from_store(self.nrows(), self.ncols(), store))
    }

    pub fn gt(&self, value: impl Into<Scalar>) -> Result<Matrix> {
        self.compare_scalar(Comparator::Gt, value)
    }

    pub fn ge(&self, value: impl Into<Scalar>) -> Result<Matrix> {
        self.compare_scalar(Comparator::Ge, value)
    }

    pub fn lt(&self, value: impl Into<Scalar>) -> Result<Matrix> {
        self.compare_scalar(Comparator::Lt, value)
    }

    pub fn le(&self, value: impl Into<Scalar>) -> Result<Matrix> {
        self.compare_scalar(Comparator::Le, value)
    }

    pub fn eq_scalar(&self, value: impl Into<Scalar>) -> Result<Matrix> {
        self.compare_scalar(Comparator::Eq, value)
    }

    pub fn ne_scalar(&self, value: impl Into<Scalar>) -> Result<Matrix> {
        self.compare_scalar(Comparator::Ne, value)
    }

    /// Keep the stored entries matching `op`
    pub fn select(&self, op: SelectOp) -> Result<Matrix> {
        let data = dispatch!(self.data(), MatrixData, s => select_store(s, &op));
        let result = Matrix::from_data(self.nrows(), self.ncols(), data);
        debug!(op = ?op, nvals = self.nvals(), kept = result.nvals(), "select");
        Ok(result)
    }

    /// Parse a selection token and apply it
    ///
    /// ```
    /// use sparsegb::{Matrix, Scalar};
    ///
    /// # fn main() -> sparsegb::Result<()> {
    /// let m = Matrix::from_lists(&[0, 1, 2], &[0, 1, 2], &[0i64, 0, 3])?;
    /// let kept = m.select_str("!=", Some(Scalar::Int64(0)))?;
    /// assert_eq!(kept.to_lists::<i64>()?, (vec![2], vec![2], vec![3]));
    /// assert_eq!(m.select_str(">0", None)?, kept);
    /// # Ok(())
    /// # }
    /// ```
    pub fn select_str(&self, token: &str, thunk: Option<Scalar>) -> Result<Matrix> {
        let op = SelectOp::parse(token, thunk)
            .map_err(|kind| Error::parse_failure(kind, format!("invalid selection {token:?} with {thunk:?}")))?;
        self.select(op)
    }

    fn positional(&self, op: SelectOp) -> Matrix {
        let data = dispatch!(self.data(), MatrixData, s => select_positions(s, &op));
        Matrix::from_data(self.nrows(), self.ncols(), data)
    }

    /// Lower triangle, including the diagonal
    pub fn tril(&self) -> Matrix {
        self.positional(SelectOp::Tril(0))
    }

    /// Upper triangle, including the diagonal
    pub fn triu(&self) -> Matrix {
        self.positional(SelectOp::Triu(0))
    }

    pub fn diag(&self) -> Matrix {
        self.positional(SelectOp::Diag(0))
    }

    pub fn offdiag(&self) -> Matrix {
        self.positional(SelectOp::OffDiag(0))
    }

    /// Drop stored entries equal to the domain zero
    pub fn nonzero(&self) -> Matrix {
        self.positional(SelectOp::NonZero)
    }
}

impl Vector {
    pub fn compare_scalar(&self, cmp: Comparator, value: impl Into<Scalar>) -> Result<Vector> {
        let value = value.into();
        let store = dispatch!(self.data(), VectorData, s => compare_vec(s, cmp, value));
        Ok(Vector::from_store(self.size(), store))
    }

    pub fn compare(&self, cmp: Comparator, other: &Vector) -> Result<Vector> {
        if self.size() != other.size() {
            return Err(Error::dimension("compare", (self.size(), 1), (other.size(), 1)));
        }
        let store = dispatch!(self.data(), VectorData, s => compare_vectors(s, other, cmp))?;
        Ok(Vector::from_store(self.size(), store))
    }

    pub fn gt(&self, value: impl Into<Scalar>) -> Result<Vector> {
        self.compare_scalar(Comparator::Gt, value)
    }

    pub fn ge(&self, value: impl Into<Scalar>) -> Result<Vector> {
        self.compare_scalar(Comparator::Ge, value)
    }

    pub fn lt(&self, value: impl Into<Scalar>) -> Result<Vector> {
        self.compare_scalar(Comparator::Lt, value)
    }

    pub fn le(&self, value: impl Into<Scalar>) -> Result<Vector> {
        self.compare_scalar(Comparator::Le, value)
    }

    pub fn eq_scalar(&self, value: impl Into<Scalar>) -> Result<Vector> {
        self.compare_scalar(Comparator::Eq, value)
    }

    pub fn ne_scalar(&self, value: impl Into<Scalar>) -> Result<Vector> {
        self.compare_scalar(Comparator::Ne, value)
    }

    /// Keep the stored entries matching `op`, treating the vector as a column
    pub fn select(&self, op: SelectOp) -> Result<Vector> {
        let data = dispatch!(self.data(), VectorData, s => select_vec(s, &op));
        Ok(Vector::from_data(self.size(), data))
    }

    pub fn select_str(&self, token: &str, thunk: Option<Scalar>) -> Result<Vector> {
        let op = SelectOp::parse(token, thunk)
            .map_err(|kind| Error::parse_failure(kind, format!("invalid selection {token:?} with {thunk:?}")))?;
        self.select(op)
    }

    pub fn nonzero(&self) -> Vector {
        let data = dispatch!(self.data(), VectorData, s => nonzero_vec(s));
        Vector::from_data(self.size(), data)
    }
}
