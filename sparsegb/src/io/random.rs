//! Random matrix construction

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::storage::RowStore;
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use sparsegb_core::validation::checked_positions;
use sparsegb_core::Domain;
use tracing::debug;

impl Matrix {
    /// Create an `nrows x ncols` matrix with exactly `nvals` random entries
    ///
    /// Coordinates are distinct and drawn uniformly. Booleans are uniform,
    /// integers uniform in `0..=i64::MAX` and floats uniform in `[0, 1)`.
    /// The same `seed` always yields the same matrix; `None` seeds from
    /// the operating system.
    ///
    /// ```
    /// use sparsegb::{Domain, Matrix};
    ///
    /// let m = Matrix::from_random(Domain::Int64, 10, 10, 5, Some(7)).unwrap();
    /// assert_eq!((m.nrows(), m.ncols(), m.nvals()), (10, 10, 5));
    /// ```
    pub fn from_random(
        domain: Domain,
        nrows: usize,
        ncols: usize,
        nvals: usize,
        seed: Option<u64>,
    ) -> Result<Matrix> {
        let positions = checked_positions(nrows, ncols)
            .map_err(|_| Error::Shape(format!("{nrows}x{ncols} has too many positions")))?;
        if nvals > positions {
            return Err(Error::Shape(format!(
                "cannot place {nvals} entries in a {nrows}x{ncols} matrix"
            )));
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let picked = index::sample(&mut rng, positions, nvals).into_vec();
        let coords = picked.into_iter().map(|p| (p / ncols, p % ncols));

        let matrix = match domain {
            Domain::Bool => {
                let store = RowStore::from_entries(coords.map(|(r, c)| (r, c, rng.gen::<bool>())));
                Matrix::from_store(nrows, ncols, store)
            }
            Domain::Int64 => {
                let store =
                    RowStore::from_entries(coords.map(|(r, c)| (r, c, rng.gen_range(0..=i64::MAX))));
                Matrix::from_store(nrows, ncols, store)
            }
            Domain::Fp64 => {
                let store = RowStore::from_entries(coords.map(|(r, c)| (r, c, rng.gen::<f64>())));
                Matrix::from_store(nrows, ncols, store)
            }
        };

        debug!(nrows, ncols, nvals, %domain, seeded = seed.is_some(), "random matrix");
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparsegb_core::{ErrorKind, Scalar};

    #[test]
    fn test_exact_count_and_shape() {
        let m = Matrix::from_random(Domain::Int64, 10, 10, 5, Some(42)).unwrap();
        assert_eq!(m.shape(), (10, 10));
        assert_eq!(m.nvals(), 5);
        assert_eq!(m.domain(), Domain::Int64);
        assert!(m.iter().all(|(_, _, v)| matches!(v, Scalar::Int64(i) if i >= 0)));
    }

    #[test]
    fn test_full_and_empty() {
        let full = Matrix::from_random(Domain::Fp64, 3, 4, 12, Some(1)).unwrap();
        assert_eq!(full.nvals(), 12);
        assert!(full
            .iter()
            .all(|(_, _, v)| matches!(v, Scalar::Fp64(x) if (0.0..1.0).contains(&x))));

        let empty = Matrix::from_random(Domain::Bool, 0, 5, 0, Some(1)).unwrap();
        assert_eq!(empty.nvals(), 0);
    }

    #[test]
    fn test_seed_is_deterministic() {
        let a = Matrix::from_random(Domain::Fp64, 50, 40, 100, Some(9)).unwrap();
        let b = Matrix::from_random(Domain::Fp64, 50, 40, 100, Some(9)).unwrap();
        assert!(a.iseq(&b));

        let unseeded = Matrix::from_random(Domain::Bool, 8, 8, 10, None).unwrap();
        assert_eq!(unseeded.nvals(), 10);
    }

    #[test]
    fn test_too_many_values() {
        let err = Matrix::from_random(Domain::Int64, 2, 2, 5, Some(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Shape);
    }
}
