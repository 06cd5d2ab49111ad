//! Entry-wise transforms, transposition and typecasts
//!
//! Transforms visit stored entries only; structural zeros stay absent.

use crate::error::Result;
use crate::matrix::Matrix;
use crate::ops::UnaryOp;
use crate::storage::{dispatch, map_stores, MatrixData, RowStore, VecStore, Value, VectorData};
use crate::vector::Vector;
use sparsegb_core::{Domain, Element, UnaryKind};
use std::ops::{Neg, Not};

fn apply_store<T: Value>(store: &RowStore<T>, op: &UnaryOp) -> Result<MatrixData> {
    let op = op.bind::<T>()?;
    Ok(T::wrap_matrix(store.map(|x| op.call(x))))
}

fn apply_vec<T: Value>(store: &VecStore<T>, op: &UnaryOp) -> Result<VectorData> {
    let op = op.bind::<T>()?;
    Ok(T::wrap_vector(store.iter().map(|(&i, &x)| (i, op.call(x))).collect()))
}

fn cast_value<T: Element, U: Element>(x: T) -> U {
    U::from_scalar(x.into_scalar())
}

fn cast_matrix(data: &MatrixData, domain: Domain) -> MatrixData {
    match domain {
        Domain::Bool => MatrixData::Bool(dispatch!(data, MatrixData, s => s.map(cast_value))),
        Domain::Int64 => MatrixData::Int64(dispatch!(data, MatrixData, s => s.map(cast_value))),
        Domain::Fp64 => MatrixData::Fp64(dispatch!(data, MatrixData, s => s.map(cast_value))),
    }
}

fn cast_vector(data: &VectorData, domain: Domain) -> VectorData {
    fn convert<T: Element, U: Element>(store: &VecStore<T>) -> VecStore<U> {
        store.iter().map(|(&i, &x)| (i, cast_value(x))).collect()
    }
    match domain {
        Domain::Bool => VectorData::Bool(dispatch!(data, VectorData, s => convert(s))),
        Domain::Int64 => VectorData::Int64(dispatch!(data, VectorData, s => convert(s))),
        Domain::Fp64 => VectorData::Fp64(dispatch!(data, VectorData, s => convert(s))),
    }
}

impl Matrix {
    /// Swap rows and columns
    pub fn transpose(&self) -> Matrix {
        let data = map_stores!(self.data(), MatrixData, s => s.transpose());
        Matrix::from_data(self.ncols(), self.nrows(), data)
    }

    /// Apply a unary operator to every stored entry
    pub fn apply(&self, op: &UnaryOp) -> Result<Matrix> {
        let data = dispatch!(self.data(), MatrixData, s => apply_store(s, op))?;
        Ok(Matrix::from_data(self.nrows(), self.ncols(), data))
    }

    /// Apply a closure to every stored entry of a `T` matrix
    pub fn apply_fn<T: Value>(&self, f: impl Fn(T) -> T) -> Result<Matrix> {
        let store = self.store::<T>()?.map(f);
        Ok(Matrix::from_store(self.nrows(), self.ncols(), store))
    }

    fn apply_builtin(&self, kind: UnaryKind) -> Matrix {
        let data = map_stores!(self.data(), MatrixData, s => s.map(|x| Element::unary(kind, x)));
        Matrix::from_data(self.nrows(), self.ncols(), data)
    }

    /// Boolean matrix with `true` at every stored position
    pub fn pattern(&self) -> Matrix {
        let store = dispatch!(self.data(), MatrixData, s => s.map(|_| true));
        Matrix::from_store(self.nrows(), self.ncols(), store)
    }

    /// Typecast copy in another domain
    pub fn cast(&self, domain: Domain) -> Matrix {
        let mut result = Matrix::from_data(self.nrows(), self.ncols(), cast_matrix(self.data(), domain));
        result.set_format_options(self.format_options());
        result
    }

    /// Additive inverse of every entry
    pub fn neg(&self) -> Matrix {
        self.apply_builtin(UnaryKind::AInv)
    }

    pub fn abs(&self) -> Matrix {
        self.apply_builtin(UnaryKind::Abs)
    }

    /// Multiplicative inverse of every entry
    ///
    /// Division by zero follows the domain: floats give infinity, integers
    /// saturate, booleans give `true`.
    pub fn minv(&self) -> Matrix {
        self.apply_builtin(UnaryKind::MInv)
    }
}

impl Vector {
    pub fn apply(&self, op: &UnaryOp) -> Result<Vector> {
        let data = dispatch!(self.data(), VectorData, s => apply_vec(s, op))?;
        Ok(Vector::from_data(self.size(), data))
    }

    pub fn apply_fn<T: Value>(&self, f: impl Fn(T) -> T) -> Result<Vector> {
        let store: VecStore<T> = self.store::<T>()?.iter().map(|(&i, &x)| (i, f(x))).collect();
        Ok(Vector::from_store(self.size(), store))
    }

    fn apply_builtin(&self, kind: UnaryKind) -> Vector {
        let data = map_stores!(self.data(), VectorData, s => s
            .iter()
            .map(|(&i, &x)| (i, Element::unary(kind, x)))
            .collect());
        Vector::from_data(self.size(), data)
    }

    pub fn pattern(&self) -> Vector {
        let store: VecStore<bool> = dispatch!(self.data(), VectorData, s => s.keys().map(|&i| (i, true)).collect());
        Vector::from_store(self.size(), store)
    }

    pub fn cast(&self, domain: Domain) -> Vector {
        Vector::from_data(self.size(), cast_vector(self.data(), domain))
    }

    pub fn neg(&self) -> Vector {
        self.apply_builtin(UnaryKind::AInv)
    }

    pub fn abs(&self) -> Vector {
        self.apply_builtin(UnaryKind::Abs)
    }

    pub fn minv(&self) -> Vector {
        self.apply_builtin(UnaryKind::MInv)
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Matrix {
        Matrix::neg(self)
    }
}

impl Not for &Matrix {
    type Output = Matrix;

    fn not(self) -> Matrix {
        self.minv()
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::neg(self)
    }
}

impl Not for &Vector {
    type Output = Vector;

    fn not(self) -> Vector {
        self.minv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparsegb_core::{ErrorKind, Scalar};

    fn diag_f(values: &[f64]) -> Matrix {
        let idx: Vec<usize> = (0..values.len()).collect();
        Matrix::from_lists(&idx, &idx, values).unwrap()
    }

    #[test]
    fn test_transpose() {
        let m = Matrix::from_coordinates(&[0, 1], &[2, 0], &[1i64, 2], Some(2), Some(3)).unwrap();
        let t = m.transpose();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.get(2, 0).unwrap(), Scalar::Int64(1));
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_minv_float() {
        let m = diag_f(&[0.0, 1.0, 2.0]);
        let inv = !&m;
        assert_eq!(inv, diag_f(&[f64::INFINITY, 1.0, 0.5]));
    }

    #[test]
    fn test_minv_int_never_fails() {
        let m = Matrix::from_lists(&[0, 1], &[0, 1], &[0i64, -1]).unwrap();
        let inv = m.minv();
        assert_eq!(inv.get(0, 0).unwrap(), Scalar::Int64(i64::MAX));
        assert_eq!(inv.get(1, 1).unwrap(), Scalar::Int64(-1));
    }

    #[test]
    fn test_neg_abs_apply() {
        let m = diag_f(&[-1.5, 2.0]);
        assert_eq!(-&m, diag_f(&[1.5, -2.0]));
        assert_eq!(m.abs(), diag_f(&[1.5, 2.0]));
        assert_eq!(m.apply(&UnaryOp::ONE).unwrap(), diag_f(&[1.0, 1.0]));

        let squared = m.apply_fn(|x: f64| x * x).unwrap();
        assert_eq!(squared, diag_f(&[2.25, 4.0]));
        assert_eq!(m.apply_fn(|x: i64| x).unwrap_err().kind(), ErrorKind::Type);

        let halve = UnaryOp::custom("halve", |x: f64| x / 2.0);
        assert_eq!(m.apply(&halve).unwrap(), diag_f(&[-0.75, 1.0]));
    }

    #[test]
    fn test_pattern_and_cast() {
        let m = diag_f(&[0.0, 2.7]);
        let p = m.pattern();
        assert_eq!(p.domain(), Domain::Bool);
        assert_eq!(p.nvals(), 2);
        assert_eq!(p.get(0, 0).unwrap(), Scalar::Bool(true));

        let i = m.cast(Domain::Int64);
        assert_eq!(i.to_lists::<i64>().unwrap().2, vec![0, 2]);
        let b = m.cast(Domain::Bool);
        assert_eq!(b.to_lists::<bool>().unwrap().2, vec![false, true]);
    }

    #[test]
    fn test_vector_transforms() {
        let v = Vector::from_lists(&[0, 2], &[4i64, -2]).unwrap();
        assert_eq!((-&v).to_lists::<i64>().unwrap().1, vec![-4, 2]);
        assert_eq!(v.abs().to_lists::<i64>().unwrap().1, vec![4, 2]);
        assert_eq!((!&v).to_lists::<i64>().unwrap().1, vec![0, 0]);
        assert_eq!(v.apply_fn(|x: i64| x + 1).unwrap().get(2).unwrap(), Scalar::Int64(-1));
        assert_eq!(v.apply(&UnaryOp::LNOT).unwrap().get(0).unwrap(), Scalar::Int64(0));
        assert_eq!(v.pattern().nvals(), 2);
        assert_eq!(v.cast(Domain::Fp64).get(2).unwrap(), Scalar::Fp64(-2.0));
    }
}
