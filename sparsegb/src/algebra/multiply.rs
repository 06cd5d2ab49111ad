//! Semiring products and the Kronecker product
//!
//! `mxm` is a row-by-row Gustavson product: each output row is accumulated
//! in a hash map keyed by column, so only positions with at least one
//! contributing pair appear in the result. Rows are independent and are
//! computed on the rayon pool once the left operand has enough of them.
//! The semiring is resolved on the calling thread before any row work.

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::ops::{current_semiring, BinaryOp, BoundSemiring, Semiring};
use crate::storage::{dispatch, MatrixData, RowStore, VecStore, Value, VectorData};
use crate::vector::Vector;
use hashbrown::HashMap;
use rayon::prelude::*;
use sparsegb_core::format::PARALLEL_ROW_THRESHOLD;
use sparsegb_core::{Element, Scalar};
use tracing::debug;

/// Right-hand side of [`Matrix::matmul`]
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Matrix(&'a Matrix),
    Vector(&'a Vector),
    Scalar(Scalar),
}

impl<'a> From<&'a Matrix> for Operand<'a> {
    fn from(m: &'a Matrix) -> Self {
        Operand::Matrix(m)
    }
}

impl<'a> From<&'a Vector> for Operand<'a> {
    fn from(v: &'a Vector) -> Self {
        Operand::Vector(v)
    }
}

impl From<Scalar> for Operand<'_> {
    fn from(s: Scalar) -> Self {
        Operand::Scalar(s)
    }
}

/// Result of [`Matrix::matmul`]
#[derive(Debug, Clone, PartialEq)]
pub enum Product {
    Matrix(Matrix),
    Vector(Vector),
}

impl Product {
    pub fn into_matrix(self) -> Option<Matrix> {
        match self {
            Product::Matrix(m) => Some(m),
            Product::Vector(_) => None,
        }
    }

    pub fn into_vector(self) -> Option<Vector> {
        match self {
            Product::Vector(v) => Some(v),
            Product::Matrix(_) => None,
        }
    }
}

/// One output row of `A * B`
fn row_product<T: Element>(row: &VecStore<T>, b: &RowStore<T>, semiring: &BoundSemiring<T>) -> VecStore<T> {
    let mut acc: HashMap<usize, T> = HashMap::new();
    for (&k, &a_ik) in row {
        let Some(b_row) = b.row(k) else { continue };
        for (&j, &b_kj) in b_row {
            let product = semiring.multiply(a_ik, b_kj);
            acc.entry(j)
                .and_modify(|sum| *sum = semiring.add(*sum, product))
                .or_insert(product);
        }
    }
    acc.into_iter().collect()
}

/// Dot product of a row with a vector, `None` when no pair contributes
fn row_dot<T: Element>(row: &VecStore<T>, v: &VecStore<T>, semiring: &BoundSemiring<T>) -> Option<T> {
    row.iter()
        .filter_map(|(j, &a_ij)| v.get(j).map(|&v_j| semiring.multiply(a_ij, v_j)))
        .reduce(|sum, product| semiring.add(sum, product))
}

/// Map every non-empty row, on the rayon pool for large inputs
pub(crate) fn map_rows<T, U, F>(store: &RowStore<T>, f: F) -> Vec<(usize, U)>
where
    T: Element,
    U: Send,
    F: Fn(&VecStore<T>) -> Option<U> + Sync,
{
    if store.nonempty_rows() >= PARALLEL_ROW_THRESHOLD {
        let rows: Vec<(&usize, &VecStore<T>)> = store.rows().collect();
        rows.into_par_iter()
            .filter_map(|(&i, row)| f(row).map(|u| (i, u)))
            .collect()
    } else {
        store
            .rows()
            .filter_map(|(&i, row)| f(row).map(|u| (i, u)))
            .collect()
    }
}

fn mxm_store<T: Value>(a: &RowStore<T>, b: &Matrix, semiring: &Semiring) -> Result<MatrixData> {
    let b = b.store::<T>()?;
    let semiring = semiring.bind::<T>()?;
    let rows = map_rows(a, |row| Some(row_product(row, b, &semiring)));
    Ok(T::wrap_matrix(RowStore::from_rows(rows)))
}

fn mxv_store<T: Value>(a: &RowStore<T>, v: &Vector, semiring: &Semiring) -> Result<VectorData> {
    let v = v.store::<T>()?;
    let semiring = semiring.bind::<T>()?;
    let entries = map_rows(a, |row| row_dot(row, v, &semiring));
    Ok(T::wrap_vector(entries.into_iter().collect()))
}

fn vxm_store<T: Value>(u: &VecStore<T>, a: &Matrix, semiring: &Semiring) -> Result<VectorData> {
    let a = a.store::<T>()?;
    let semiring = semiring.bind::<T>()?;
    let mut acc: HashMap<usize, T> = HashMap::new();
    for (&k, &u_k) in u {
        let Some(row) = a.row(k) else { continue };
        for (&j, &a_kj) in row {
            let product = semiring.multiply(u_k, a_kj);
            acc.entry(j)
                .and_modify(|sum| *sum = semiring.add(*sum, product))
                .or_insert(product);
        }
    }
    Ok(T::wrap_vector(acc.into_iter().collect()))
}

fn kron_store<T: Value>(a: &RowStore<T>, b: &Matrix, op: &BinaryOp) -> Result<MatrixData> {
    let (bn, bm) = b.shape();
    let b = b.store::<T>()?;
    let op = op.bind::<T>()?;
    let op = &op;
    let entries = a.iter().flat_map(|(i, j, x)| {
        b.iter()
            .map(move |(k, l, y)| (i * bn + k, j * bm + l, op.call(x, y)))
    });
    Ok(T::wrap_matrix(RowStore::from_entries(entries)))
}

impl Matrix {
    /// Matrix product under the current semiring
    pub fn mxm(&self, other: &Matrix) -> Result<Matrix> {
        self.mxm_with(other, &current_semiring())
    }

    /// Matrix product under an explicit semiring
    pub fn mxm_with(&self, other: &Matrix, semiring: &Semiring) -> Result<Matrix> {
        if self.ncols() != other.nrows() {
            return Err(Error::dimension("mxm", self.shape(), other.shape()));
        }
        let data = dispatch!(self.data(), MatrixData, s => mxm_store(s, other, semiring))?;
        let result = Matrix::from_data(self.nrows(), other.ncols(), data);
        debug!(
            semiring = semiring.name(),
            left = ?self.shape(),
            right = ?other.shape(),
            nvals = result.nvals(),
            "mxm"
        );
        Ok(result)
    }

    /// Replace `self` with `self * other` under the current semiring
    pub fn mxm_assign(&mut self, other: &Matrix) -> Result<()> {
        let mut result = self.mxm(other)?;
        result.set_format_options(self.format_options());
        *self = result;
        Ok(())
    }

    /// Matrix-vector product under the current semiring
    pub fn mxv(&self, v: &Vector) -> Result<Vector> {
        self.mxv_with(v, &current_semiring())
    }

    pub fn mxv_with(&self, v: &Vector, semiring: &Semiring) -> Result<Vector> {
        if self.ncols() != v.size() {
            return Err(Error::dimension("mxv", self.shape(), (v.size(), 1)));
        }
        let data = dispatch!(self.data(), MatrixData, s => mxv_store(s, v, semiring))?;
        debug!(semiring = semiring.name(), left = ?self.shape(), size = v.size(), "mxv");
        Ok(Vector::from_data(self.nrows(), data))
    }

    /// Multiply by a matrix or vector operand
    ///
    /// Scalars are not valid operands of a semiring product.
    pub fn matmul<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<Product> {
        match rhs.into() {
            Operand::Matrix(m) => self.mxm(m).map(Product::Matrix),
            Operand::Vector(v) => self.mxv(v).map(Product::Vector),
            Operand::Scalar(s) => Err(Error::Type(format!(
                "cannot multiply a matrix by scalar {s}, use apply or eadd"
            ))),
        }
    }

    /// Kronecker product with `times`
    pub fn kron(&self, other: &Matrix) -> Result<Matrix> {
        self.kron_with(other, &BinaryOp::TIMES)
    }

    /// Kronecker product combining entry pairs with `op`
    pub fn kron_with(&self, other: &Matrix, op: &BinaryOp) -> Result<Matrix> {
        let shape_error = || Error::Shape(format!("kron of {:?} and {:?} overflows", self.shape(), other.shape()));
        let nrows = self.nrows().checked_mul(other.nrows()).ok_or_else(shape_error)?;
        let ncols = self.ncols().checked_mul(other.ncols()).ok_or_else(shape_error)?;
        let data = dispatch!(self.data(), MatrixData, s => kron_store(s, other, op))?;
        Ok(Matrix::from_data(nrows, ncols, data))
    }
}

impl Vector {
    /// Vector-matrix product `u' * A` under the current semiring
    pub fn vxm(&self, a: &Matrix) -> Result<Vector> {
        self.vxm_with(a, &current_semiring())
    }

    pub fn vxm_with(&self, a: &Matrix, semiring: &Semiring) -> Result<Vector> {
        if self.size() != a.nrows() {
            return Err(Error::dimension("vxm", (1, self.size()), a.shape()));
        }
        let data = dispatch!(self.data(), VectorData, s => vxm_store(s, a, semiring))?;
        debug!(semiring = semiring.name(), size = self.size(), right = ?a.shape(), "vxm");
        Ok(Vector::from_data(a.ncols(), data))
    }
}
