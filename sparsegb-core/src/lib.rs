#![no_std]

//! sparsegb core - scalar domains, operator kinds and exchange-format definitions
//!
//! This crate holds the pure definitions shared by the `sparsegb` engine:
//! the closed set of scalar domains and their per-domain operator semantics,
//! selection predicates, error categories and the textual exchange-format
//! headers. It performs no I/O and needs no allocator.

pub mod domain;
pub mod error;
pub mod format;
pub mod ops;
pub mod scalar;
pub mod traits;
pub mod validation;

pub use domain::Domain;
pub use error::{ErrorKind, Result};
pub use format::{Layout, MmField, MmHeader, MmSymmetry};
pub use ops::{BinaryKind, Comparator, SelectOp, UnaryKind};
pub use scalar::Scalar;
pub use traits::{Element, SparseContainer};
