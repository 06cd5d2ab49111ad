//! Sparse storage backing matrices and vectors
//!
//! Matrices keep a hypersparse row map: only non-empty rows are present,
//! each holding its entries ordered by column. Vectors are a single ordered
//! map from index to value. Both give `O(log n)` element access and iterate
//! in canonical (row, then column) order.

use sparsegb_core::{Domain, Element};
use std::collections::{btree_map, BTreeMap, BTreeSet};

/// Entries of a vector, or of one matrix row, keyed by index
pub type VecStore<T> = BTreeMap<usize, T>;

/// Row-major hypersparse matrix storage
#[derive(Debug, Clone, PartialEq)]
pub struct RowStore<T> {
    rows: BTreeMap<usize, VecStore<T>>,
    nvals: usize,
}

impl<T> Default for RowStore<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            nvals: 0,
        }
    }
}

impl<T: Copy> RowStore<T> {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(row, col, value)` entries; later duplicates overwrite
    pub fn from_entries<I: IntoIterator<Item = (usize, usize, T)>>(entries: I) -> Self {
        let mut store = Self::new();
        for (row, col, value) in entries {
            store.insert(row, col, value);
        }
        store
    }

    /// Build from whole rows, skipping empty ones
    pub fn from_rows<I: IntoIterator<Item = (usize, VecStore<T>)>>(rows: I) -> Self {
        let rows: BTreeMap<usize, VecStore<T>> =
            rows.into_iter().filter(|(_, row)| !row.is_empty()).collect();
        let nvals = rows.values().map(BTreeMap::len).sum();
        Self { rows, nvals }
    }

    /// Number of stored entries
    pub fn nvals(&self) -> usize {
        self.nvals
    }

    /// Number of rows holding at least one entry
    pub fn nonempty_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns holding at least one entry
    pub fn nonempty_cols(&self) -> usize {
        self.rows
            .values()
            .flat_map(|row| row.keys().copied())
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.rows.get(&row).and_then(|r| r.get(&col)).copied()
    }

    /// Insert or overwrite an entry, returning the previous value
    pub fn insert(&mut self, row: usize, col: usize, value: T) -> Option<T> {
        let previous = self.rows.entry(row).or_default().insert(col, value);
        if previous.is_none() {
            self.nvals += 1;
        }
        previous
    }

    /// Remove an entry, returning its value
    pub fn remove(&mut self, row: usize, col: usize) -> Option<T> {
        let entries = self.rows.get_mut(&row)?;
        let previous = entries.remove(&col);
        if entries.is_empty() {
            self.rows.remove(&row);
        }
        if previous.is_some() {
            self.nvals -= 1;
        }
        previous
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.nvals = 0;
    }

    /// Entries of one row, if it holds any
    pub fn row(&self, row: usize) -> Option<&VecStore<T>> {
        self.rows.get(&row)
    }

    /// Non-empty rows in ascending order
    pub fn rows(&self) -> btree_map::Iter<'_, usize, VecStore<T>> {
        self.rows.iter()
    }

    /// Replace one row wholesale
    pub fn replace_row(&mut self, row: usize, entries: VecStore<T>) {
        let removed = self.rows.remove(&row).map_or(0, |r| r.len());
        self.nvals = self.nvals - removed + entries.len();
        if !entries.is_empty() {
            self.rows.insert(row, entries);
        }
    }

    /// All entries in row-major, column-ascending order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        self.rows
            .iter()
            .flat_map(|(&row, entries)| entries.iter().map(move |(&col, &value)| (row, col, value)))
    }

    /// Entries of one column keyed by row
    pub fn column(&self, col: usize) -> VecStore<T> {
        self.rows
            .iter()
            .filter_map(|(&row, entries)| entries.get(&col).map(|&value| (row, value)))
            .collect()
    }

    /// Keep only entries for which the predicate holds
    pub fn retain<F: FnMut(usize, usize, T) -> bool>(&mut self, mut keep: F) {
        let mut nvals = 0;
        self.rows.retain(|&row, entries| {
            entries.retain(|&col, value| keep(row, col, *value));
            nvals += entries.len();
            !entries.is_empty()
        });
        self.nvals = nvals;
    }

    /// Transform every stored value, keeping the structure
    pub fn map<U: Copy, F: Fn(T) -> U>(&self, f: F) -> RowStore<U> {
        RowStore {
            rows: self
                .rows
                .iter()
                .map(|(&row, entries)| (row, entries.iter().map(|(&col, &v)| (col, f(v))).collect()))
                .collect(),
            nvals: self.nvals,
        }
    }

    /// Keep and transform entries selected by position and value
    pub fn filter_map<U: Copy, F: Fn(usize, usize, T) -> Option<U>>(&self, f: F) -> RowStore<U> {
        RowStore::from_rows(self.rows.iter().map(|(&row, entries)| {
            let kept = entries
                .iter()
                .filter_map(|(&col, &value)| f(row, col, value).map(|u| (col, u)))
                .collect();
            (row, kept)
        }))
    }

    /// Swap rows and columns
    pub fn transpose(&self) -> Self {
        let mut rows: BTreeMap<usize, VecStore<T>> = BTreeMap::new();
        for (row, col, value) in self.iter() {
            rows.entry(col).or_default().insert(row, value);
        }
        Self {
            rows,
            nvals: self.nvals,
        }
    }
}

/// Element types that can back a container
///
/// Bridges the typed storage to the domain-tagged container enums. The
/// methods are an implementation detail of the container types.
pub trait Value: Element {
    #[doc(hidden)]
    fn wrap_matrix(store: RowStore<Self>) -> MatrixData;
    #[doc(hidden)]
    fn matrix_store(data: &MatrixData) -> Option<&RowStore<Self>>;
    #[doc(hidden)]
    fn wrap_vector(store: VecStore<Self>) -> VectorData;
    #[doc(hidden)]
    fn vector_store(data: &VectorData) -> Option<&VecStore<Self>>;
}

macro_rules! impl_value {
    ($ty:ty, $variant:ident) => {
        impl Value for $ty {
            fn wrap_matrix(store: RowStore<Self>) -> MatrixData {
                MatrixData::$variant(store)
            }

            fn matrix_store(data: &MatrixData) -> Option<&RowStore<Self>> {
                match data {
                    MatrixData::$variant(store) => Some(store),
                    _ => None,
                }
            }

            fn wrap_vector(store: VecStore<Self>) -> VectorData {
                VectorData::$variant(store)
            }

            fn vector_store(data: &VectorData) -> Option<&VecStore<Self>> {
                match data {
                    VectorData::$variant(store) => Some(store),
                    _ => None,
                }
            }
        }
    };
}

impl_value!(bool, Bool);
impl_value!(i64, Int64);
impl_value!(f64, Fp64);

/// Domain-tagged matrix storage
#[doc(hidden)]
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixData {
    Bool(RowStore<bool>),
    Int64(RowStore<i64>),
    Fp64(RowStore<f64>),
}

/// Domain-tagged vector storage
#[doc(hidden)]
#[derive(Debug, Clone, PartialEq)]
pub enum VectorData {
    Bool(VecStore<bool>),
    Int64(VecStore<i64>),
    Fp64(VecStore<f64>),
}

/// Run a generic expression against whichever typed store is present
macro_rules! dispatch {
    ($data:expr, $kind:ident, $store:ident => $body:expr) => {
        match $data {
            $kind::Bool($store) => $body,
            $kind::Int64($store) => $body,
            $kind::Fp64($store) => $body,
        }
    };
}

/// Like `dispatch!`, re-wrapping the resulting store in the same variant
macro_rules! map_stores {
    ($data:expr, $kind:ident, $store:ident => $body:expr) => {
        match $data {
            $kind::Bool($store) => $kind::Bool($body),
            $kind::Int64($store) => $kind::Int64($body),
            $kind::Fp64($store) => $kind::Fp64($body),
        }
    };
}

pub(crate) use dispatch;
pub(crate) use map_stores;

impl MatrixData {
    /// Empty storage of a domain
    pub fn empty(domain: Domain) -> Self {
        match domain {
            Domain::Bool => MatrixData::Bool(RowStore::new()),
            Domain::Int64 => MatrixData::Int64(RowStore::new()),
            Domain::Fp64 => MatrixData::Fp64(RowStore::new()),
        }
    }

    pub fn domain(&self) -> Domain {
        match self {
            MatrixData::Bool(_) => Domain::Bool,
            MatrixData::Int64(_) => Domain::Int64,
            MatrixData::Fp64(_) => Domain::Fp64,
        }
    }

    pub fn nvals(&self) -> usize {
        dispatch!(self, MatrixData, s => s.nvals())
    }
}

impl VectorData {
    /// Empty storage of a domain
    pub fn empty(domain: Domain) -> Self {
        match domain {
            Domain::Bool => VectorData::Bool(VecStore::new()),
            Domain::Int64 => VectorData::Int64(VecStore::new()),
            Domain::Fp64 => VectorData::Fp64(VecStore::new()),
        }
    }

    pub fn domain(&self) -> Domain {
        match self {
            VectorData::Bool(_) => Domain::Bool,
            VectorData::Int64(_) => Domain::Int64,
            VectorData::Fp64(_) => Domain::Fp64,
        }
    }

    pub fn nvals(&self) -> usize {
        dispatch!(self, VectorData, s => s.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrite_remove() {
        let mut store = RowStore::new();
        assert_eq!(store.insert(3, 3, 3i64), None);
        assert_eq!(store.insert(3, 3, 4), Some(3));
        assert_eq!(store.insert(0, 5, 1), None);
        assert_eq!(store.nvals(), 2);
        assert_eq!(store.get(3, 3), Some(4));
        assert_eq!(store.get(3, 4), None);

        assert_eq!(store.remove(3, 3), Some(4));
        assert_eq!(store.remove(3, 3), None);
        assert_eq!(store.nvals(), 1);
        assert_eq!(store.nonempty_rows(), 1);
    }

    #[test]
    fn test_canonical_order() {
        let store = RowStore::from_entries(vec![(2, 0, 1i64), (0, 2, 2), (0, 1, 3), (1, 1, 4)]);
        let entries: Vec<_> = store.iter().collect();
        assert_eq!(entries, vec![(0, 1, 3), (0, 2, 2), (1, 1, 4), (2, 0, 1)]);
    }

    #[test]
    fn test_retain_and_columns() {
        let mut store = RowStore::from_entries((0..4).map(|i| (i, i, i as i64)));
        assert_eq!(store.nonempty_cols(), 4);
        store.retain(|row, _, _| row < 2);
        assert_eq!(store.nvals(), 2);
        assert_eq!(store.nonempty_rows(), 2);
        assert_eq!(store.column(1).into_iter().collect::<Vec<_>>(), vec![(1, 1)]);
    }

    #[test]
    fn test_replace_row_and_transpose() {
        let mut store = RowStore::from_entries(vec![(0, 0, 1.0), (1, 0, 2.0), (1, 1, 3.0)]);
        store.replace_row(1, VecStore::from([(2, 5.0)]));
        assert_eq!(store.nvals(), 2);
        store.replace_row(0, VecStore::new());
        assert_eq!(store.nvals(), 1);
        assert_eq!(store.nonempty_rows(), 1);

        let t = store.transpose();
        assert_eq!(t.get(2, 1), Some(5.0));
        assert_eq!(t.transpose(), store);
    }

    #[test]
    fn test_tagged_storage() {
        let data = i64::wrap_matrix(RowStore::from_entries(vec![(0, 0, 1)]));
        assert_eq!(data.domain(), Domain::Int64);
        assert_eq!(data.nvals(), 1);
        assert!(i64::matrix_store(&data).is_some());
        assert!(f64::matrix_store(&data).is_none());
        assert_eq!(VectorData::empty(Domain::Bool).domain(), Domain::Bool);
    }
}
