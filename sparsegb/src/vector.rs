//! Sparse vector container

use crate::error::{check_index, Error, Result};
use crate::index::resolve;
use crate::matrix::Matrix;
use crate::storage::{dispatch, map_stores, RowStore, VecStore, Value, VectorData};
use sparsegb_core::validation::resolve_dimension;
use sparsegb_core::{Domain, Element, Scalar, SparseContainer};
use std::fmt;
use std::ops::RangeBounds;

/// A sparse vector over one scalar domain
#[derive(Debug, Clone)]
pub struct Vector {
    size: usize,
    data: VectorData,
}

impl Vector {
    /// Create an empty vector of length `size`
    pub fn new(domain: Domain, size: usize) -> Self {
        Self::from_data(size, VectorData::empty(domain))
    }

    pub(crate) fn from_data(size: usize, data: VectorData) -> Self {
        Self { size, data }
    }

    pub(crate) fn from_store<T: Value>(size: usize, store: VecStore<T>) -> Self {
        Self::from_data(size, T::wrap_vector(store))
    }

    /// Build from parallel index and value slices, last duplicate wins
    pub fn from_coordinates<T: Value>(indices: &[usize], values: &[T], size: Option<usize>) -> Result<Self> {
        if indices.len() != values.len() {
            return Err(Error::Shape(format!(
                "{} indices and {} values",
                indices.len(),
                values.len()
            )));
        }
        let size = resolve_dimension(indices, size)
            .map_err(|_| Error::Shape(format!("indices exceed vector size {size:?}")))?;
        let store = indices.iter().copied().zip(values.iter().copied()).collect();
        Ok(Self::from_store(size, store))
    }

    /// Build from coordinates with the size inferred
    pub fn from_lists<T: Value>(indices: &[usize], values: &[T]) -> Result<Self> {
        Self::from_coordinates(indices, values, None)
    }

    /// Dense vector holding every value
    pub fn from_values<T: Value>(values: &[T]) -> Self {
        Self::from_store(values.len(), values.iter().copied().enumerate().collect())
    }

    pub fn dup(&self) -> Self {
        self.clone()
    }

    pub fn domain(&self) -> Domain {
        self.data.domain()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn nvals(&self) -> usize {
        self.data.nvals()
    }

    pub fn len(&self) -> usize {
        self.nvals()
    }

    pub fn is_empty(&self) -> bool {
        self.nvals() == 0
    }

    pub(crate) fn data(&self) -> &VectorData {
        &self.data
    }

    pub(crate) fn into_data(self) -> VectorData {
        self.data
    }

    pub(crate) fn set_data(&mut self, data: VectorData) {
        self.data = data;
    }

    pub(crate) fn store<T: Value>(&self) -> Result<&VecStore<T>> {
        T::vector_store(&self.data).ok_or_else(|| Error::domain_mismatch(T::DOMAIN, self.domain()))
    }

    /// Value at `index`, or the domain's zero
    pub fn get(&self, index: usize) -> Result<Scalar> {
        Ok(self
            .extract_element(index)?
            .unwrap_or(Scalar::zero(self.domain())))
    }

    /// Stored value at `index`, `None` for a structural zero
    pub fn extract_element(&self, index: usize) -> Result<Option<Scalar>> {
        check_index(index, self.size)?;
        Ok(dispatch!(&self.data, VectorData, s => s.get(&index).map(|v| v.into_scalar())))
    }

    pub fn set(&mut self, index: usize, value: impl Into<Scalar>) -> Result<()> {
        let value = value.into();
        check_index(index, self.size)?;
        if value.domain() != self.domain() {
            return Err(Error::domain_mismatch(self.domain(), value.domain()));
        }
        dispatch!(&mut self.data, VectorData, s => {
            s.insert(index, Element::from_scalar(value));
        });
        Ok(())
    }

    pub fn remove_element(&mut self, index: usize) -> Result<Option<Scalar>> {
        check_index(index, self.size)?;
        Ok(dispatch!(&mut self.data, VectorData, s => s.remove(&index).map(|v| v.into_scalar())))
    }

    pub fn clear(&mut self) {
        dispatch!(&mut self.data, VectorData, s => s.clear());
    }

    /// Change the length, dropping entries past the new end
    pub fn resize(&mut self, size: usize) {
        if size < self.size {
            dispatch!(&mut self.data, VectorData, s => s.retain(|&i, _| i < size));
        }
        self.size = size;
    }

    pub fn to_coordinates(&self) -> (Vec<usize>, Vec<Scalar>) {
        self.iter().unzip()
    }

    pub fn to_lists<T: Value>(&self) -> Result<(Vec<usize>, Vec<T>)> {
        Ok(self.store::<T>()?.iter().map(|(&i, &v)| (i, v)).unzip())
    }

    /// Iterate stored entries in index order
    pub fn iter(&self) -> Box<dyn Iterator<Item = (usize, Scalar)> + '_> {
        dispatch!(&self.data, VectorData, s => Box::new(s.iter().map(|(&i, v)| (i, v.into_scalar()))))
    }

    /// Entries in `range`, re-indexed from zero
    pub fn extract<R: RangeBounds<usize>>(&self, range: R) -> Result<Vector> {
        let range = resolve(&range, self.size)?;
        let start = range.start;
        let data = map_stores!(&self.data, VectorData, s => s
            .range(range.clone())
            .map(|(&i, &v)| (i - start, v))
            .collect());
        Ok(Vector::from_data(range.len(), data))
    }

    pub fn iseq(&self, other: &Vector) -> bool {
        self.size == other.size && self.data == other.data
    }

    /// View as a `1 x size` matrix
    pub fn to_row_matrix(&self) -> Matrix {
        let data = dispatch!(&self.data, VectorData, s => Value::wrap_matrix(RowStore::from_rows([(0, s.clone())])));
        Matrix::from_data(1, self.size, data)
    }

    /// View as a `size x 1` matrix
    pub fn to_col_matrix(&self) -> Matrix {
        let data = dispatch!(&self.data, VectorData, s => Value::wrap_matrix(RowStore::from_entries(s.iter().map(|(&i, &v)| (i, 0, v)))));
        Matrix::from_data(self.size, 1, data)
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        self.iseq(other)
    }
}

impl SparseContainer for Vector {
    fn domain(&self) -> Domain {
        self.data.domain()
    }

    fn dimensions(&self) -> (usize, usize) {
        (self.size, 1)
    }

    fn nvals(&self) -> usize {
        self.data.nvals()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Vector ({} : {}:{})>",
            self.size,
            self.nvals(),
            self.domain().short_name()
        )
    }
}
