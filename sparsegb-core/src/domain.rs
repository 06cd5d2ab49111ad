//! Scalar domains supported by sparse containers
//!
//! The set of domains is closed: every container picks exactly one at
//! construction time and keeps it for its whole life.

use crate::error::{ErrorKind, Result};

/// Scalar domain of a container or operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Domain {
    /// Boolean values
    Bool,
    /// 64-bit signed integers
    Int64,
    /// 64-bit IEEE floating point
    Fp64,
}

impl Domain {
    /// Every supported domain
    pub const ALL: [Domain; 3] = [Domain::Bool, Domain::Int64, Domain::Fp64];

    /// GraphBLAS type tag written to exchange files
    pub const fn type_tag(&self) -> &'static str {
        match self {
            Domain::Bool => "GrB_BOOL",
            Domain::Int64 => "GrB_INT64",
            Domain::Fp64 => "GrB_FP64",
        }
    }

    /// Parse a GraphBLAS type tag
    pub fn from_type_tag(tag: &str) -> Result<Self> {
        match tag {
            "GrB_BOOL" => Ok(Domain::Bool),
            "GrB_INT64" => Ok(Domain::Int64),
            "GrB_FP64" => Ok(Domain::Fp64),
            _ => Err(ErrorKind::Format),
        }
    }

    /// Lowercase suffix used in operator names (`plus_int64`)
    pub const fn suffix(&self) -> &'static str {
        match self {
            Domain::Bool => "bool",
            Domain::Int64 => "int64",
            Domain::Fp64 => "fp64",
        }
    }

    /// Resolve an operator-name suffix
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Domain::ALL.into_iter().find(|d| d.suffix() == suffix)
    }

    /// Short uppercase name used in container summaries
    pub const fn short_name(&self) -> &'static str {
        match self {
            Domain::Bool => "BOOL",
            Domain::Int64 => "INT64",
            Domain::Fp64 => "FP64",
        }
    }
}

impl core::fmt::Display for Domain {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn test_type_tags() {
        for domain in Domain::ALL {
            assert_eq!(Domain::from_type_tag(domain.type_tag()), Ok(domain));
        }
        assert_eq!(Domain::from_type_tag("GrB_UINT8"), Err(ErrorKind::Format));
        assert_eq!(Domain::from_type_tag(""), Err(ErrorKind::Format));
    }

    #[test]
    fn test_suffix_and_display() {
        assert_eq!(Domain::from_suffix("int64"), Some(Domain::Int64));
        assert_eq!(Domain::from_suffix("fp32"), None);
        assert_eq!(Domain::Fp64.to_string(), "fp64");
        assert_eq!(Domain::Bool.short_name(), "BOOL");
    }
}
