//! Tagged scalar values

use crate::domain::Domain;
use crate::error::{ErrorKind, Result};

/// A single value of one of the supported domains
///
/// Used for element access, broadcast operands and reductions. Integer and
/// float literals convert into it (`3` becomes `Int64`, `3.0` becomes `Fp64`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scalar {
    Bool(bool),
    Int64(i64),
    Fp64(f64),
}

impl Scalar {
    /// Domain of the value
    pub const fn domain(&self) -> Domain {
        match self {
            Scalar::Bool(_) => Domain::Bool,
            Scalar::Int64(_) => Domain::Int64,
            Scalar::Fp64(_) => Domain::Fp64,
        }
    }

    /// Additive identity (implicit zero) of a domain
    pub const fn zero(domain: Domain) -> Self {
        match domain {
            Domain::Bool => Scalar::Bool(false),
            Domain::Int64 => Scalar::Int64(0),
            Domain::Fp64 => Scalar::Fp64(0.0),
        }
    }

    /// Multiplicative identity of a domain
    pub const fn one(domain: Domain) -> Self {
        match domain {
            Domain::Bool => Scalar::Bool(true),
            Domain::Int64 => Scalar::Int64(1),
            Domain::Fp64 => Scalar::Fp64(1.0),
        }
    }

    /// Typecast into another domain
    ///
    /// Nonzero values become `true`, booleans become `1`/`0`, floats are
    /// truncated and saturated into integers with NaN mapping to `0`.
    pub fn cast(self, domain: Domain) -> Self {
        match (self, domain) {
            (Scalar::Bool(b), Domain::Bool) => Scalar::Bool(b),
            (Scalar::Bool(b), Domain::Int64) => Scalar::Int64(b as i64),
            (Scalar::Bool(b), Domain::Fp64) => Scalar::Fp64(if b { 1.0 } else { 0.0 }),
            (Scalar::Int64(i), Domain::Bool) => Scalar::Bool(i != 0),
            (Scalar::Int64(i), Domain::Int64) => Scalar::Int64(i),
            (Scalar::Int64(i), Domain::Fp64) => Scalar::Fp64(i as f64),
            (Scalar::Fp64(x), Domain::Bool) => Scalar::Bool(x != 0.0),
            (Scalar::Fp64(x), Domain::Int64) => Scalar::Int64(x as i64),
            (Scalar::Fp64(x), Domain::Fp64) => Scalar::Fp64(x),
        }
    }

    /// Whether the value is nonzero (mask semantics)
    pub fn is_truthy(&self) -> bool {
        match *self {
            Scalar::Bool(b) => b,
            Scalar::Int64(i) => i != 0,
            Scalar::Fp64(x) => x != 0.0,
        }
    }

    /// The value as `bool`, if the domain is `Bool`
    pub const fn as_bool(&self) -> Option<bool> {
        match *self {
            Scalar::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// The value as `i64`, if the domain is `Int64`
    pub const fn as_i64(&self) -> Option<i64> {
        match *self {
            Scalar::Int64(i) => Some(i),
            _ => None,
        }
    }

    /// The value as `f64`, if the domain is `Fp64`
    pub const fn as_f64(&self) -> Option<f64> {
        match *self {
            Scalar::Fp64(x) => Some(x),
            _ => None,
        }
    }

    /// Parse a textual value of the given domain
    ///
    /// Booleans accept `true`/`false` and any integer (nonzero is `true`).
    pub fn parse(domain: Domain, text: &str) -> Result<Self> {
        let text = text.trim();
        match domain {
            Domain::Bool => match text {
                "true" => Ok(Scalar::Bool(true)),
                "false" => Ok(Scalar::Bool(false)),
                _ => text
                    .parse::<i64>()
                    .map(|i| Scalar::Bool(i != 0))
                    .map_err(|_| ErrorKind::Format),
            },
            Domain::Int64 => text
                .parse::<i64>()
                .map(Scalar::Int64)
                .map_err(|_| ErrorKind::Format),
            Domain::Fp64 => text
                .parse::<f64>()
                .map(Scalar::Fp64)
                .map_err(|_| ErrorKind::Format),
        }
    }

    /// Parse a threshold literal, preferring integers over floats
    pub fn parse_literal(text: &str) -> Result<Self> {
        let text = text.trim();
        match text {
            "true" => return Ok(Scalar::Bool(true)),
            "false" => return Ok(Scalar::Bool(false)),
            _ => {}
        }
        if let Ok(i) = text.parse::<i64>() {
            return Ok(Scalar::Int64(i));
        }
        text.parse::<f64>()
            .map(Scalar::Fp64)
            .map_err(|_| ErrorKind::Format)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int64(value as i64)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int64(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Fp64(value)
    }
}

impl core::fmt::Display for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int64(i) => write!(f, "{i}"),
            Scalar::Fp64(x) => write!(f, "{x}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_rules() {
        assert_eq!(Scalar::Int64(3).cast(Domain::Bool), Scalar::Bool(true));
        assert_eq!(Scalar::Int64(0).cast(Domain::Bool), Scalar::Bool(false));
        assert_eq!(Scalar::Bool(true).cast(Domain::Int64), Scalar::Int64(1));
        assert_eq!(Scalar::Fp64(2.9).cast(Domain::Int64), Scalar::Int64(2));
        assert_eq!(Scalar::Fp64(f64::NAN).cast(Domain::Int64), Scalar::Int64(0));
        assert_eq!(
            Scalar::Fp64(f64::INFINITY).cast(Domain::Int64),
            Scalar::Int64(i64::MAX)
        );
        assert_eq!(Scalar::Int64(-4).cast(Domain::Fp64), Scalar::Fp64(-4.0));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Scalar::parse(Domain::Int64, " 42 "), Ok(Scalar::Int64(42)));
        assert_eq!(Scalar::parse(Domain::Bool, "0"), Ok(Scalar::Bool(false)));
        assert_eq!(Scalar::parse(Domain::Bool, "true"), Ok(Scalar::Bool(true)));
        assert_eq!(Scalar::parse(Domain::Fp64, "0.5"), Ok(Scalar::Fp64(0.5)));
        assert_eq!(
            Scalar::parse(Domain::Fp64, "inf"),
            Ok(Scalar::Fp64(f64::INFINITY))
        );
        assert_eq!(Scalar::parse(Domain::Int64, "1.5"), Err(ErrorKind::Format));
        assert_eq!(Scalar::parse(Domain::Int64, "abc"), Err(ErrorKind::Format));
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(Scalar::parse_literal("5"), Ok(Scalar::Int64(5)));
        assert_eq!(Scalar::parse_literal("-0.25"), Ok(Scalar::Fp64(-0.25)));
        assert_eq!(Scalar::parse_literal("false"), Ok(Scalar::Bool(false)));
        assert_eq!(Scalar::parse_literal(""), Err(ErrorKind::Format));
    }

    #[test]
    fn test_literal_conversions() {
        assert_eq!(Scalar::from(3), Scalar::Int64(3));
        assert_eq!(Scalar::from(3.5), Scalar::Fp64(3.5));
        assert_eq!(Scalar::from(true).domain(), Domain::Bool);
        assert!(Scalar::Fp64(0.1).is_truthy());
        assert!(!Scalar::Int64(0).is_truthy());
    }
}
