//! sparsegb - GraphBLAS-style sparse linear algebra
//!
//! This library provides sparse matrices and vectors over boolean, integer
//! and floating-point domains, with matrix multiplication, element-wise
//! operations, reductions and masked assignment generalized over semirings.
//!
//! ## Architecture
//!
//! sparsegb follows a definition/implementation separation:
//!
//! - **sparsegb-core**: domains, scalars, operator kinds, exchange-format
//!   banners and pure parsing helpers (`no_std`)
//! - **sparsegb**: containers, operator objects, the algebra engine and
//!   exchange-format I/O
//!
//! ## Quick Start
//!
//! ```rust
//! use sparsegb::{Matrix, Semiring};
//!
//! fn example() -> sparsegb::Result<()> {
//!     let a = Matrix::from_lists(&[0, 1, 2], &[1, 2, 0], &[1i64, 2, 3])?;
//!     let b = Matrix::from_lists(&[0, 1, 2], &[1, 2, 0], &[4i64, 5, 6])?;
//!
//!     // Ordinary product
//!     let c = a.mxm(&b)?;
//!     assert_eq!(c.nvals(), 3);
//!
//!     // The same product under min_plus, scoped to this block
//!     {
//!         let _scope = Semiring::MIN_PLUS.scoped();
//!         let shortest = a.mxm(&b)?;
//!         assert_eq!(shortest.get(0, 2)?, sparsegb::Scalar::Int64(6));
//!     }
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - **Semirings**: built-in and closure-defined operators, looked up by
//!   name through an [`OperatorRegistry`]
//! - **Masks and accumulators**: [`Descriptor`]-driven assignment
//! - **Row parallelism**: large products and row reductions run on rayon
//! - **Exchange formats**: Matrix Market and tab-separated triples
//! - **serde**: optional derives for domains, scalars and format options

// Re-export core definitions
pub use sparsegb_core::{
    // Domains and values
    Domain, Scalar, Element, SparseContainer,
    // Operator kinds
    BinaryKind, Comparator, SelectOp, UnaryKind,
    // Formats
    Layout, MmField, MmHeader, MmSymmetry,
    // Error categories
    ErrorKind,
};
pub use sparsegb_core::format::constants::{
    ALWAYS_HYPER, DEFAULT_HYPER_SWITCH, NEVER_HYPER, PARALLEL_ROW_THRESHOLD,
};

// Implementation modules
pub mod algebra;
pub mod error;
pub mod index;
pub mod io;
pub mod matrix;
pub mod ops;
pub mod options;
mod select;
#[doc(hidden)]
pub mod storage;
pub mod vector;

// Public exports
pub use algebra::{Descriptor, Mask, Operand, Product};
pub use error::{Error, Result};
pub use index::{Extracted, Selector};
pub use io::{read_mm, read_tsv, write_mm, write_tsv};
pub use matrix::Matrix;
pub use ops::{
    current_semiring, with_semiring, BinaryOp, BoundBinary, BoundMonoid, BoundSemiring,
    BoundUnary, Monoid, OperatorRegistry, Semiring, SemiringScope, UnaryOp,
};
pub use options::FormatOptions;
pub use storage::Value;
pub use vector::Vector;
