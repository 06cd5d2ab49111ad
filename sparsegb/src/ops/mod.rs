//! Operator library
//!
//! Unary and binary operators are tagged variants: a builtin kind that is
//! resolved against the operand domain when applied, or a user closure
//! pinned to the domain of its argument type. Monoids and semirings are
//! built from binary operators. Before an algebra routine touches any data
//! it *binds* the operator to the container's element type, which is where
//! domain mismatches are reported.

mod binary;
mod context;
mod monoid;
mod registry;
mod semiring;
mod unary;

pub use binary::{BinaryOp, BoundBinary};
pub use context::{current_semiring, with_semiring, SemiringScope};
pub use monoid::{BoundMonoid, Monoid};
pub use registry::OperatorRegistry;
pub use semiring::{BoundSemiring, Semiring};
pub use unary::{BoundUnary, UnaryOp};

use crate::error::{Error, Result};
use sparsegb_core::Domain;

/// Check that an operator pinned to `pinned` may be applied to `domain`
pub(crate) fn check_pinned(name: &str, pinned: Option<Domain>, domain: Domain) -> Result<()> {
    match pinned {
        Some(d) if d != domain => Err(Error::Type(format!(
            "operator {name} is defined on {d}, cannot apply to {domain}"
        ))),
        _ => Ok(()),
    }
}
