//! Element-wise addition and multiplication
//!
//! `eadd` combines over the union of both structures, `emult` over the
//! intersection. Entries present on only one side of an `eadd` are copied
//! unchanged.

use super::merge_sorted;
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::ops::BinaryOp;
use crate::storage::{dispatch, MatrixData, RowStore, VecStore, Value, VectorData};
use crate::vector::Vector;
use std::ops::{Add, Mul};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Structure {
    Union,
    Intersection,
}

impl Structure {
    fn name(self) -> &'static str {
        match self {
            Structure::Union => "eadd",
            Structure::Intersection => "emult",
        }
    }
}

fn combine<K: Ord, T: Copy>(
    left: impl Iterator<Item = (K, T)>,
    right: impl Iterator<Item = (K, T)>,
    structure: Structure,
    op: impl Fn(T, T) -> T,
) -> impl Iterator<Item = (K, T)> {
    merge_sorted(left, right).filter_map(move |(k, x, y)| match (x, y, structure) {
        (Some(x), Some(y), _) => Some((k, op(x, y))),
        (Some(v), None, Structure::Union) | (None, Some(v), Structure::Union) => Some((k, v)),
        _ => None,
    })
}

fn combine_matrix<T: Value>(
    left: &RowStore<T>,
    right: &Matrix,
    op: &BinaryOp,
    structure: Structure,
) -> Result<MatrixData> {
    let right = right.store::<T>()?;
    let op = op.bind::<T>()?;
    let entries = combine(
        left.iter().map(|(r, c, v)| ((r, c), v)),
        right.iter().map(|(r, c, v)| ((r, c), v)),
        structure,
        |x, y| op.call(x, y),
    );
    Ok(T::wrap_matrix(RowStore::from_entries(
        entries.map(|((r, c), v)| (r, c, v)),
    )))
}

fn combine_vector<T: Value>(
    left: &VecStore<T>,
    right: &Vector,
    op: &BinaryOp,
    structure: Structure,
) -> Result<VectorData> {
    let right = right.store::<T>()?;
    let op = op.bind::<T>()?;
    let entries = combine(
        left.iter().map(|(&i, &v)| (i, v)),
        right.iter().map(|(&i, &v)| (i, v)),
        structure,
        |x, y| op.call(x, y),
    );
    Ok(T::wrap_vector(entries.collect()))
}

impl Matrix {
    fn elementwise(&self, other: &Matrix, op: &BinaryOp, structure: Structure) -> Result<Matrix> {
        if self.shape() != other.shape() {
            return Err(Error::dimension(structure.name(), self.shape(), other.shape()));
        }
        let data = dispatch!(self.data(), MatrixData, s => combine_matrix(s, other, op, structure))?;
        let result = Matrix::from_data(self.nrows(), self.ncols(), data);
        debug!(
            op = structure.name(),
            binary = %op.name(),
            left = self.nvals(),
            right = other.nvals(),
            result = result.nvals(),
            "element-wise"
        );
        Ok(result)
    }

    /// Element-wise addition with `plus`
    pub fn eadd(&self, other: &Matrix) -> Result<Matrix> {
        self.eadd_with(other, &BinaryOp::PLUS)
    }

    /// Union of both structures, combining overlaps with `op`
    pub fn eadd_with(&self, other: &Matrix, op: &BinaryOp) -> Result<Matrix> {
        self.elementwise(other, op, Structure::Union)
    }

    /// In-place `eadd_with`
    pub fn eadd_assign(&mut self, other: &Matrix, op: &BinaryOp) -> Result<()> {
        let result = self.eadd_with(other, op)?;
        self.set_data(result.into_data());
        Ok(())
    }

    /// Element-wise multiplication with `times`
    pub fn emult(&self, other: &Matrix) -> Result<Matrix> {
        self.emult_with(other, &BinaryOp::TIMES)
    }

    /// Intersection of both structures, combined with `op`
    pub fn emult_with(&self, other: &Matrix, op: &BinaryOp) -> Result<Matrix> {
        self.elementwise(other, op, Structure::Intersection)
    }

    /// In-place `emult_with`
    pub fn emult_assign(&mut self, other: &Matrix, op: &BinaryOp) -> Result<()> {
        let result = self.emult_with(other, op)?;
        self.set_data(result.into_data());
        Ok(())
    }
}

impl Vector {
    fn elementwise(&self, other: &Vector, op: &BinaryOp, structure: Structure) -> Result<Vector> {
        if self.size() != other.size() {
            return Err(Error::dimension(
                structure.name(),
                (self.size(), 1),
                (other.size(), 1),
            ));
        }
        let data = dispatch!(self.data(), VectorData, s => combine_vector(s, other, op, structure))?;
        Ok(Vector::from_data(self.size(), data))
    }

    pub fn eadd(&self, other: &Vector) -> Result<Vector> {
        self.eadd_with(other, &BinaryOp::PLUS)
    }

    pub fn eadd_with(&self, other: &Vector, op: &BinaryOp) -> Result<Vector> {
        self.elementwise(other, op, Structure::Union)
    }

    pub fn eadd_assign(&mut self, other: &Vector, op: &BinaryOp) -> Result<()> {
        let result = self.eadd_with(other, op)?;
        self.set_data(result.into_data());
        Ok(())
    }

    pub fn emult(&self, other: &Vector) -> Result<Vector> {
        self.emult_with(other, &BinaryOp::TIMES)
    }

    pub fn emult_with(&self, other: &Vector, op: &BinaryOp) -> Result<Vector> {
        self.elementwise(other, op, Structure::Intersection)
    }

    pub fn emult_assign(&mut self, other: &Vector, op: &BinaryOp) -> Result<()> {
        let result = self.emult_with(other, op)?;
        self.set_data(result.into_data());
        Ok(())
    }
}

impl Add for &Matrix {
    type Output = Result<Matrix>;

    fn add(self, rhs: Self) -> Result<Matrix> {
        self.eadd(rhs)
    }
}

impl Mul for &Matrix {
    type Output = Result<Matrix>;

    fn mul(self, rhs: Self) -> Result<Matrix> {
        self.emult(rhs)
    }
}

impl Add for &Vector {
    type Output = Result<Vector>;

    fn add(self, rhs: Self) -> Result<Vector> {
        self.eadd(rhs)
    }
}

impl Mul for &Vector {
    type Output = Result<Vector>;

    fn mul(self, rhs: Self) -> Result<Vector> {
        self.emult(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparsegb_core::{Domain, ErrorKind, Scalar};

    fn diag(values: &[i64]) -> Matrix {
        let idx: Vec<usize> = (0..values.len()).collect();
        Matrix::from_lists(&idx, &idx, values).unwrap()
    }

    #[test]
    fn test_eadd_diagonal() {
        let values: Vec<i64> = (0..10).collect();
        let m = diag(&values);
        let sum = m.eadd(&m).unwrap();
        let doubled: Vec<i64> = values.iter().map(|v| v * 2).collect();
        assert_eq!(sum, diag(&doubled));

        let mut in_place = m.dup();
        in_place.eadd_assign(&m, &BinaryOp::PLUS).unwrap();
        assert_eq!(in_place, sum);
        assert_eq!((&m + &m).unwrap(), sum);
    }

    #[test]
    fn test_union_and_intersection_sizes() {
        let a = Matrix::from_lists(&[0, 1, 2], &[1, 2, 0], &[1i64, 2, 3]).unwrap();
        let b = Matrix::from_lists(&[0, 1, 2], &[1, 1, 2], &[10i64, 20, 30]).unwrap();

        let union = a.eadd(&b).unwrap();
        assert!(union.nvals() >= a.nvals().max(b.nvals()));
        assert_eq!(union.nvals(), 5);
        assert_eq!(union.get(0, 1).unwrap(), Scalar::Int64(11));
        assert_eq!(union.get(1, 2).unwrap(), Scalar::Int64(2));

        let product = a.emult(&b).unwrap();
        assert!(product.nvals() <= a.nvals().min(b.nvals()));
        assert_eq!(product.to_lists::<i64>().unwrap(), (vec![0], vec![1], vec![10]));
        assert_eq!((&a * &b).unwrap(), product);
    }

    #[test]
    fn test_custom_operator() {
        let a = diag(&[1, 2, 3]);
        let b = diag(&[5, 5, 5]);
        let diff = a.eadd_with(&b, &BinaryOp::MINUS).unwrap();
        assert_eq!(diff, diag(&[-4, -3, -2]));

        let absdiff = BinaryOp::custom("absdiff", |x: i64, y: i64| (x - y).abs());
        let mut m = a.dup();
        m.emult_assign(&b, &absdiff).unwrap();
        assert_eq!(m, diag(&[4, 3, 2]));
    }

    #[test]
    fn test_mismatches() {
        let a = diag(&[1, 2, 3]);
        let b = diag(&[1, 2]);
        assert_eq!(a.eadd(&b).unwrap_err().kind(), ErrorKind::Dimension);

        let f = Matrix::new(Domain::Fp64, 3, 3);
        assert_eq!(a.emult(&f).unwrap_err().kind(), ErrorKind::Type);
        let pinned = BinaryOp::pinned(sparsegb_core::BinaryKind::Plus, Domain::Fp64);
        assert_eq!(a.eadd_with(&a, &pinned).unwrap_err().kind(), ErrorKind::Type);
    }

    #[test]
    fn test_vector_elementwise() {
        let u = Vector::from_lists(&[0, 2], &[1.0, 2.0]).unwrap();
        let v = Vector::from_coordinates(&[2], &[0.5], Some(3)).unwrap();
        let sum = (&u + &v).unwrap();
        assert_eq!(sum.to_lists::<f64>().unwrap(), (vec![0, 2], vec![1.0, 2.5]));
        let product = (&u * &v).unwrap();
        assert_eq!(product.to_lists::<f64>().unwrap(), (vec![2], vec![1.0]));

        let mut w = u.dup();
        w.eadd_assign(&v, &BinaryOp::MAX).unwrap();
        assert_eq!(w.get(2).unwrap(), Scalar::Fp64(2.0));
        assert_eq!(u.eadd(&Vector::new(Domain::Fp64, 4)).unwrap_err().kind(), ErrorKind::Dimension);
    }
}
