//! Matrix Market banner line
//!
//! Only the `matrix coordinate` object/format pair is supported, with
//! integer, real or pattern values.

use crate::domain::Domain;
use crate::error::{ErrorKind, Result};
use crate::format::constants::MM_BANNER;

/// Value field declared in the banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmField {
    Integer,
    Real,
    /// No values are stored; every entry is `true`
    Pattern,
}

impl MmField {
    /// Keyword as written in the banner
    pub const fn keyword(&self) -> &'static str {
        match self {
            MmField::Integer => "integer",
            MmField::Real => "real",
            MmField::Pattern => "pattern",
        }
    }

    /// Domain used when no GraphBLAS type line is present
    pub const fn default_domain(&self) -> Domain {
        match self {
            MmField::Integer => Domain::Int64,
            MmField::Real => Domain::Fp64,
            MmField::Pattern => Domain::Bool,
        }
    }

    /// Field written for values of a domain
    pub const fn for_domain(domain: Domain) -> Self {
        match domain {
            Domain::Bool | Domain::Int64 => MmField::Integer,
            Domain::Fp64 => MmField::Real,
        }
    }
}

/// Symmetry declared in the banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MmSymmetry {
    General,
    /// Only one triangle is stored; `A(j,i) = A(i,j)`
    Symmetric,
    /// Only the strict lower triangle is stored; `A(j,i) = -A(i,j)`
    SkewSymmetric,
}

impl MmSymmetry {
    /// Keyword as written in the banner
    pub const fn keyword(&self) -> &'static str {
        match self {
            MmSymmetry::General => "general",
            MmSymmetry::Symmetric => "symmetric",
            MmSymmetry::SkewSymmetric => "skew-symmetric",
        }
    }
}

/// Parsed `%%MatrixMarket` banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MmHeader {
    pub field: MmField,
    pub symmetry: MmSymmetry,
}

impl MmHeader {
    /// Create a banner for the given field and symmetry
    pub const fn new(field: MmField, symmetry: MmSymmetry) -> Self {
        Self { field, symmetry }
    }

    /// Parse a banner line
    ///
    /// Keywords are matched case-insensitively, as the format allows.
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        if words.next() != Some(MM_BANNER) {
            return Err(ErrorKind::Format);
        }

        let object = words.next().ok_or(ErrorKind::Format)?;
        let format = words.next().ok_or(ErrorKind::Format)?;
        let field = words.next().ok_or(ErrorKind::Format)?;
        let symmetry = words.next().ok_or(ErrorKind::Format)?;
        if words.next().is_some() {
            return Err(ErrorKind::Format);
        }

        if !object.eq_ignore_ascii_case("matrix") || !format.eq_ignore_ascii_case("coordinate") {
            return Err(ErrorKind::Format);
        }

        let field = [MmField::Integer, MmField::Real, MmField::Pattern]
            .into_iter()
            .find(|f| field.eq_ignore_ascii_case(f.keyword()))
            .ok_or(ErrorKind::Format)?;
        let symmetry = [
            MmSymmetry::General,
            MmSymmetry::Symmetric,
            MmSymmetry::SkewSymmetric,
        ]
        .into_iter()
        .find(|s| symmetry.eq_ignore_ascii_case(s.keyword()))
        .ok_or(ErrorKind::Format)?;

        if field == MmField::Pattern && symmetry == MmSymmetry::SkewSymmetric {
            return Err(ErrorKind::Format);
        }

        Ok(Self { field, symmetry })
    }
}

impl core::fmt::Display for MmHeader {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{MM_BANNER} matrix coordinate {} {}",
            self.field.keyword(),
            self.symmetry.keyword()
        )
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn test_parse_banner() {
        let header = MmHeader::parse("%%MatrixMarket matrix coordinate integer symmetric").unwrap();
        assert_eq!(header.field, MmField::Integer);
        assert_eq!(header.symmetry, MmSymmetry::Symmetric);

        let header = MmHeader::parse("%%MatrixMarket MATRIX Coordinate Real General").unwrap();
        assert_eq!(header.field, MmField::Real);
        assert_eq!(header.symmetry, MmSymmetry::General);

        let header = MmHeader::parse("%%MatrixMarket matrix coordinate pattern general").unwrap();
        assert_eq!(header.field.default_domain(), Domain::Bool);
    }

    #[test]
    fn test_reject_unsupported_banners() {
        assert_eq!(
            MmHeader::parse("%%MatrixMarket matrix array real general"),
            Err(ErrorKind::Format)
        );
        assert_eq!(
            MmHeader::parse("%%MatrixMarket matrix coordinate complex hermitian"),
            Err(ErrorKind::Format)
        );
        assert_eq!(
            MmHeader::parse("%MatrixMarket matrix coordinate real general"),
            Err(ErrorKind::Format)
        );
        assert_eq!(
            MmHeader::parse("%%MatrixMarket matrix coordinate real"),
            Err(ErrorKind::Format)
        );
        assert_eq!(
            MmHeader::parse("%%MatrixMarket matrix coordinate pattern skew-symmetric"),
            Err(ErrorKind::Format)
        );
    }

    #[test]
    fn test_banner_display() {
        let header = MmHeader::new(MmField::for_domain(Domain::Int64), MmSymmetry::Symmetric);
        assert_eq!(
            header.to_string(),
            "%%MatrixMarket matrix coordinate integer symmetric"
        );
    }
}
