//! Storage layout hints and exchange-format definitions
//!
//! Nothing here performs I/O: the types describe layouts and the textual
//! headers used by the exchange formats.

pub mod constants;
pub mod header;

pub use constants::*;
pub use header::{MmField, MmHeader, MmSymmetry};

/// Physical layout hint for a matrix
///
/// The hint is observable but never changes logical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layout {
    /// Row-major (compressed sparse row)
    #[default]
    ByRow,
    /// Column-major (compressed sparse column)
    ByCol,
}

impl core::fmt::Display for Layout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Layout::ByRow => write!(f, "BY_ROW"),
            Layout::ByCol => write!(f, "BY_COL"),
        }
    }
}
