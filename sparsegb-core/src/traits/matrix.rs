//! Shape and sparsity introspection shared by all containers

use crate::domain::Domain;

/// Common introspection for sparse containers
///
/// Vectors report their shape as `(size, 1)`.
pub trait SparseContainer {
    /// Scalar domain of the stored values
    fn domain(&self) -> Domain;

    /// Logical dimensions as `(rows, cols)`
    fn dimensions(&self) -> (usize, usize);

    /// Number of explicitly stored entries
    fn nvals(&self) -> usize;

    /// Alias for [`SparseContainer::nvals`]
    fn len(&self) -> usize {
        self.nvals()
    }

    /// Whether no entries are stored
    fn is_empty(&self) -> bool {
        self.nvals() == 0
    }

    /// Fraction of logical positions that hold a stored entry
    fn density(&self) -> f64 {
        let (rows, cols) = self.dimensions();
        let total = rows as f64 * cols as f64;
        if total == 0.0 {
            0.0
        } else {
            self.nvals() as f64 / total
        }
    }
}
