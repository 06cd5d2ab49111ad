//! Sparse matrix container
//!
//! A [`Matrix`] owns domain-tagged row storage plus its format options.
//! Element access dispatches over the storage enum once per call; bulk
//! operations in [`crate::algebra`] dispatch once and then run typed loops.

use crate::error::{check_index, Error, Result};
use crate::options::FormatOptions;
use crate::storage::{dispatch, MatrixData, RowStore, Value};
use crate::vector::Vector;
use sparsegb_core::validation::validate_coordinates;
use sparsegb_core::{Domain, Element, Layout, Scalar, SparseContainer};
use std::fmt;
use tracing::debug;

/// A sparse matrix over one scalar domain
#[derive(Debug, Clone)]
pub struct Matrix {
    nrows: usize,
    ncols: usize,
    data: MatrixData,
    options: FormatOptions,
}

impl Matrix {
    /// Create an empty `nrows x ncols` matrix
    ///
    /// Zero dimensions are valid; such a matrix can be grown with
    /// [`Matrix::resize`].
    pub fn new(domain: Domain, nrows: usize, ncols: usize) -> Self {
        Self::from_data(nrows, ncols, MatrixData::empty(domain))
    }

    pub(crate) fn from_data(nrows: usize, ncols: usize, data: MatrixData) -> Self {
        Self {
            nrows,
            ncols,
            data,
            options: FormatOptions::default(),
        }
    }

    pub(crate) fn from_store<T: Value>(nrows: usize, ncols: usize, store: RowStore<T>) -> Self {
        Self::from_data(nrows, ncols, T::wrap_matrix(store))
    }

    /// Build from parallel coordinate and value slices
    ///
    /// Missing dimensions are inferred as the largest index plus one. When a
    /// coordinate repeats, the last value wins.
    pub fn from_coordinates<T: Value>(
        rows: &[usize],
        cols: &[usize],
        values: &[T],
        nrows: Option<usize>,
        ncols: Option<usize>,
    ) -> Result<Self> {
        let (nrows, ncols) = validate_coordinates(rows, cols, values.len(), nrows, ncols).map_err(|_| {
            Error::Shape(format!(
                "{} rows, {} cols and {} values do not describe a {:?}x{:?} matrix",
                rows.len(),
                cols.len(),
                values.len(),
                nrows,
                ncols
            ))
        })?;

        let store = RowStore::from_entries(
            rows.iter()
                .zip(cols)
                .zip(values)
                .map(|((&row, &col), &value)| (row, col, value)),
        );
        debug!(nrows, ncols, nvals = store.nvals(), domain = %T::DOMAIN, "matrix from coordinates");
        Ok(Self::from_store(nrows, ncols, store))
    }

    /// Build from coordinates with both dimensions inferred
    pub fn from_lists<T: Value>(rows: &[usize], cols: &[usize], values: &[T]) -> Result<Self> {
        Self::from_coordinates(rows, cols, values, None, None)
    }

    /// Deep copy, including format options
    pub fn dup(&self) -> Self {
        self.clone()
    }

    pub fn domain(&self) -> Domain {
        self.data.domain()
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// `(nrows, ncols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Number of stored entries
    pub fn nvals(&self) -> usize {
        self.data.nvals()
    }

    /// Alias for [`Matrix::nvals`]
    pub fn len(&self) -> usize {
        self.nvals()
    }

    pub fn is_empty(&self) -> bool {
        self.nvals() == 0
    }

    pub(crate) fn data(&self) -> &MatrixData {
        &self.data
    }

    pub(crate) fn into_data(self) -> MatrixData {
        self.data
    }

    /// Replace the contents, keeping dimensions and options
    pub(crate) fn set_data(&mut self, data: MatrixData) {
        self.data = data;
    }

    pub(crate) fn store<T: Value>(&self) -> Result<&RowStore<T>> {
        T::matrix_store(&self.data).ok_or_else(|| Error::domain_mismatch(T::DOMAIN, self.domain()))
    }

    fn check_position(&self, row: usize, col: usize) -> Result<()> {
        check_index(row, self.nrows)?;
        check_index(col, self.ncols)?;
        Ok(())
    }

    /// Value at a position, or the domain's zero when nothing is stored
    pub fn get(&self, row: usize, col: usize) -> Result<Scalar> {
        Ok(self
            .extract_element(row, col)?
            .unwrap_or(Scalar::zero(self.domain())))
    }

    /// Stored value at a position, `None` for a structural zero
    pub fn extract_element(&self, row: usize, col: usize) -> Result<Option<Scalar>> {
        self.check_position(row, col)?;
        Ok(dispatch!(&self.data, MatrixData, s => s.get(row, col).map(Element::into_scalar)))
    }

    /// Insert or overwrite one entry
    pub fn set(&mut self, row: usize, col: usize, value: impl Into<Scalar>) -> Result<()> {
        let value = value.into();
        self.check_position(row, col)?;
        if value.domain() != self.domain() {
            return Err(Error::domain_mismatch(self.domain(), value.domain()));
        }
        dispatch!(&mut self.data, MatrixData, s => {
            s.insert(row, col, Element::from_scalar(value));
        });
        Ok(())
    }

    /// Delete a stored entry, returning its value
    pub fn remove_element(&mut self, row: usize, col: usize) -> Result<Option<Scalar>> {
        self.check_position(row, col)?;
        Ok(dispatch!(&mut self.data, MatrixData, s => s.remove(row, col).map(Element::into_scalar)))
    }

    /// Remove every entry, keeping the dimensions
    pub fn clear(&mut self) {
        dispatch!(&mut self.data, MatrixData, s => s.clear());
    }

    /// Change the dimensions, dropping entries that fall outside
    pub fn resize(&mut self, nrows: usize, ncols: usize) {
        if nrows < self.nrows || ncols < self.ncols {
            dispatch!(&mut self.data, MatrixData, s => s.retain(|r, c, _| r < nrows && c < ncols));
        }
        self.nrows = nrows;
        self.ncols = ncols;
    }

    /// Row `i` as a vector of length `ncols`
    pub fn extract_row(&self, i: usize) -> Result<Vector> {
        check_index(i, self.nrows)?;
        let data = dispatch!(&self.data, MatrixData, s => Value::wrap_vector(s.row(i).cloned().unwrap_or_default()));
        Ok(Vector::from_data(self.ncols, data))
    }

    /// Column `j` as a vector of length `nrows`
    pub fn extract_col(&self, j: usize) -> Result<Vector> {
        check_index(j, self.ncols)?;
        let data = dispatch!(&self.data, MatrixData, s => Value::wrap_vector(s.column(j)));
        Ok(Vector::from_data(self.nrows, data))
    }

    /// Coordinates and values in row-major, column-ascending order
    pub fn to_coordinates(&self) -> (Vec<usize>, Vec<usize>, Vec<Scalar>) {
        let mut rows = Vec::with_capacity(self.nvals());
        let mut cols = Vec::with_capacity(self.nvals());
        let mut values = Vec::with_capacity(self.nvals());
        for (row, col, value) in self.iter() {
            rows.push(row);
            cols.push(col);
            values.push(value);
        }
        (rows, cols, values)
    }

    /// Typed form of [`Matrix::to_coordinates`]
    pub fn to_lists<T: Value>(&self) -> Result<(Vec<usize>, Vec<usize>, Vec<T>)> {
        let store = self.store::<T>()?;
        let mut rows = Vec::with_capacity(store.nvals());
        let mut cols = Vec::with_capacity(store.nvals());
        let mut values = Vec::with_capacity(store.nvals());
        for (row, col, value) in store.iter() {
            rows.push(row);
            cols.push(col);
            values.push(value);
        }
        Ok((rows, cols, values))
    }

    /// Iterate stored entries in row-major order
    pub fn iter(&self) -> Box<dyn Iterator<Item = (usize, usize, Scalar)> + '_> {
        dispatch!(&self.data, MatrixData, s => Box::new(s.iter().map(|(r, c, v)| (r, c, v.into_scalar()))))
    }

    /// Exact equality of domain, shape, structure and values
    pub fn iseq(&self, other: &Matrix) -> bool {
        self.shape() == other.shape() && self.data == other.data
    }

    /// Current format options
    pub fn format_options(&self) -> FormatOptions {
        self.options
    }

    pub fn set_format_options(&mut self, options: FormatOptions) {
        self.options = options;
    }

    pub fn layout(&self) -> Layout {
        self.options.layout
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.options.layout = layout;
    }

    pub fn hyper_switch(&self) -> f64 {
        self.options.hyper_switch
    }

    pub fn set_hyper_switch(&mut self, hyper_switch: f64) {
        self.options.hyper_switch = hyper_switch;
    }

    /// Whether storage counts as hypersparse under the current options
    pub fn is_hypersparse(&self) -> bool {
        let (nonempty, vdim) = match self.options.layout {
            Layout::ByRow => (dispatch!(&self.data, MatrixData, s => s.nonempty_rows()), self.nrows),
            Layout::ByCol => (dispatch!(&self.data, MatrixData, s => s.nonempty_cols()), self.ncols),
        };
        self.options.is_hypersparse(nonempty, vdim)
    }

    /// `(hyper_switch, layout, is_hypersparse)`
    pub fn options(&self) -> (f64, Layout, bool) {
        (self.hyper_switch(), self.layout(), self.is_hypersparse())
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.iseq(other)
    }
}

impl SparseContainer for Matrix {
    fn domain(&self) -> Domain {
        self.data.domain()
    }

    fn dimensions(&self) -> (usize, usize) {
        self.shape()
    }

    fn nvals(&self) -> usize {
        self.data.nvals()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Matrix ({}x{} : {}:{})>",
            self.nrows,
            self.ncols,
            self.nvals(),
            self.domain().short_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparsegb_core::format::ALWAYS_HYPER;
    use sparsegb_core::ErrorKind;

    fn diag(values: &[i64]) -> Matrix {
        let idx: Vec<usize> = (0..values.len()).collect();
        Matrix::from_lists(&idx, &idx, values).unwrap()
    }

    #[test]
    fn test_new_and_set() {
        let mut m = Matrix::new(Domain::Int64, 10, 10);
        assert_eq!(m.shape(), (10, 10));
        assert!(m.is_empty());
        m.set(3, 3, 3).unwrap();
        assert_eq!(m.nvals(), 1);
        assert_eq!(m.get(3, 3).unwrap(), Scalar::Int64(3));
        assert_eq!(m.get(3, 4).unwrap(), Scalar::Int64(0));
        assert_eq!(m.extract_element(3, 4).unwrap(), None);
        assert_eq!(m.nvals(), 1);

        assert_eq!(m.set(10, 0, 1).unwrap_err().kind(), ErrorKind::Index);
        assert_eq!(m.set(0, 0, 1.5).unwrap_err().kind(), ErrorKind::Type);
    }

    #[test]
    fn test_from_coordinates() {
        let m = Matrix::from_coordinates(&[0, 1, 2], &[0, 1, 2], &[0i64, 1, 2], Some(3), Some(3)).unwrap();
        assert_eq!(m.nvals(), 3);
        assert_eq!(m.shape(), (3, 3));

        let err = Matrix::from_coordinates(&[0, 1], &[0, 1, 2], &[0i64, 1, 2], None, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
        let err = Matrix::from_coordinates(&[0, 5], &[0, 1], &[1i64, 2], Some(3), Some(3)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);

        let empty = Matrix::from_lists::<f64>(&[], &[], &[]).unwrap();
        assert_eq!(empty.shape(), (0, 0));
    }

    #[test]
    fn test_duplicates_last_wins() {
        let m = Matrix::from_lists(&[0, 0], &[1, 1], &[1i64, 7]).unwrap();
        assert_eq!(m.nvals(), 1);
        assert_eq!(m.get(0, 1).unwrap(), Scalar::Int64(7));
    }

    #[test]
    fn test_coordinates_round_trip() {
        let m = Matrix::from_lists(&[2, 0, 1], &[0, 2, 1], &[4.0, 2.0, 3.0]).unwrap();
        let (rows, cols, values) = m.to_lists::<f64>().unwrap();
        assert_eq!(rows, vec![0, 1, 2]);
        assert_eq!(cols, vec![2, 1, 0]);
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
        let rebuilt = Matrix::from_coordinates(&rows, &cols, &values, Some(3), Some(3)).unwrap();
        assert_eq!(rebuilt, m);
        assert!(m.to_lists::<i64>().is_err());

        let (_, _, scalars) = m.to_coordinates();
        assert_eq!(scalars[0], Scalar::Fp64(2.0));
    }

    #[test]
    fn test_remove_clear_resize() {
        let mut m = diag(&[1, 2, 3, 4]);
        assert_eq!(m.remove_element(1, 1).unwrap(), Some(Scalar::Int64(2)));
        assert_eq!(m.remove_element(1, 1).unwrap(), None);
        m.resize(2, 2);
        assert_eq!(m.nvals(), 1);
        m.resize(8, 8);
        assert_eq!(m.shape(), (8, 8));
        m.set(7, 7, 1).unwrap();
        m.clear();
        assert!(m.is_empty());
        assert_eq!(m.shape(), (8, 8));
    }

    #[test]
    fn test_rows_and_columns() {
        let m = Matrix::from_lists(&[0, 0, 1], &[0, 2, 2], &[1i64, 2, 3]).unwrap();
        let row = m.extract_row(0).unwrap();
        assert_eq!(row.size(), 3);
        assert_eq!(row.to_lists::<i64>().unwrap(), (vec![0, 2], vec![1, 2]));
        let col = m.extract_col(2).unwrap();
        assert_eq!(col.size(), 2);
        assert_eq!(col.to_lists::<i64>().unwrap(), (vec![0, 1], vec![2, 3]));
        assert_eq!(m.extract_row(5).unwrap_err().kind(), ErrorKind::Index);
    }

    #[test]
    fn test_dup_is_independent() {
        let mut m = diag(&[1, 2]);
        m.set_layout(Layout::ByCol);
        let copy = m.dup();
        m.set(0, 1, 9).unwrap();
        assert_eq!(copy.nvals(), 2);
        assert_eq!(copy.layout(), Layout::ByCol);
        assert_ne!(copy, m);
    }

    #[test]
    fn test_display() {
        assert_eq!(diag(&[2, 3, 4]).to_string(), "<Matrix (3x3 : 3:INT64)>");
    }

    #[test]
    fn test_format_options() {
        let mut m = diag(&[1, 2, 3]);
        assert_eq!(m.layout(), Layout::ByRow);
        assert!(!m.is_hypersparse());
        m.set_hyper_switch(ALWAYS_HYPER);
        m.set_layout(Layout::ByCol);
        assert_eq!(m.options(), (1.0, Layout::ByCol, true));
        assert_eq!(m.density(), 3.0 / 9.0);
    }
}
