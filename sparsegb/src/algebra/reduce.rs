//! Reductions to scalars and to per-row vectors
//!
//! Whole-container reductions fold sequentially in storage order. Per-row
//! reductions fold each row sequentially, so floating-point results do not
//! depend on whether rows were spread over the thread pool.

use super::multiply::map_rows;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::ops::Monoid;
use crate::storage::{dispatch, MatrixData, RowStore, Value, VectorData};
use crate::vector::Vector;
use sparsegb_core::Scalar;

fn fold<T: Value>(values: impl Iterator<Item = T>, monoid: &Monoid) -> Result<Scalar> {
    Ok(monoid.bind::<T>()?.fold(values).into_scalar())
}

fn reduce_rows<T: Value>(store: &RowStore<T>, monoid: &Monoid) -> Result<VectorData> {
    let monoid = monoid.bind::<T>()?;
    let rows = map_rows(store, |row| Some(monoid.fold(row.values().copied())));
    Ok(T::wrap_vector(rows.into_iter().collect()))
}

impl Matrix {
    /// Fold every stored value with `monoid`; empty matrices give its identity
    pub fn reduce(&self, monoid: &Monoid) -> Result<Scalar> {
        dispatch!(self.data(), MatrixData, s => fold(s.iter().map(|(_, _, v)| v), monoid))
    }

    /// Logical or of a boolean matrix
    pub fn reduce_bool(&self) -> Result<bool> {
        let store = self.store::<bool>()?;
        Ok(Monoid::LOR.bind::<bool>()?.fold(store.iter().map(|(_, _, v)| v)))
    }

    /// Sum of an integer matrix
    pub fn reduce_int(&self) -> Result<i64> {
        let store = self.store::<i64>()?;
        Ok(Monoid::PLUS.bind::<i64>()?.fold(store.iter().map(|(_, _, v)| v)))
    }

    /// Sum of a floating-point matrix
    pub fn reduce_float(&self) -> Result<f64> {
        let store = self.store::<f64>()?;
        Ok(Monoid::PLUS.bind::<f64>()?.fold(store.iter().map(|(_, _, v)| v)))
    }

    /// Row sums as a vector of length `nrows`
    pub fn reduce_vector(&self) -> Result<Vector> {
        self.reduce_vector_with(&Monoid::PLUS)
    }

    /// Fold each row with `monoid`; rows without entries stay empty
    pub fn reduce_vector_with(&self, monoid: &Monoid) -> Result<Vector> {
        let data = dispatch!(self.data(), MatrixData, s => reduce_rows(s, monoid))?;
        Ok(Vector::from_data(self.nrows(), data))
    }
}

impl Vector {
    pub fn reduce(&self, monoid: &Monoid) -> Result<Scalar> {
        dispatch!(self.data(), VectorData, s => fold(s.values().copied(), monoid))
    }

    pub fn reduce_bool(&self) -> Result<bool> {
        let store = self.store::<bool>()?;
        Ok(Monoid::LOR.bind::<bool>()?.fold(store.values().copied()))
    }

    pub fn reduce_int(&self) -> Result<i64> {
        let store = self.store::<i64>()?;
        Ok(Monoid::PLUS.bind::<i64>()?.fold(store.values().copied()))
    }

    pub fn reduce_float(&self) -> Result<f64> {
        let store = self.store::<f64>()?;
        Ok(Monoid::PLUS.bind::<f64>()?.fold(store.values().copied()))
    }
}
