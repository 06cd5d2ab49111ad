//! Error types for sparsegb

use sparsegb_core::{Domain, ErrorKind};
use thiserror::Error;

/// Result type alias using sparsegb's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by container, algebra and exchange operations
///
/// Every variant maps onto one [`ErrorKind`] category via [`Error::kind`].
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed coordinate triples or inconsistent lengths
    #[error("ShapeError: {0}")]
    Shape(String),

    /// Incompatible operand shapes
    #[error("DimensionError: {op} on {left:?} and {right:?}")]
    Dimension {
        /// Operation that detected the mismatch
        op: &'static str,
        /// Shape of the left operand or target
        left: (usize, usize),
        /// Shape of the right operand or source
        right: (usize, usize),
    },

    /// Element or slice access out of range
    #[error("IndexError: index {index} out of bounds for dimension of size {bound}")]
    Index {
        /// The offending index
        index: usize,
        /// Size of the dimension
        bound: usize,
    },

    /// Domain mismatch or unsupported operand
    #[error("TypeError: {0}")]
    Type(String),

    /// Malformed or unrecognized exchange-format input
    #[error("FormatError at line {line}: {reason}")]
    Format {
        /// 1-based line number, 0 when not tied to a line
        line: usize,
        /// What was wrong with the input
        reason: String,
    },

    /// Underlying reader or writer failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Category of the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Shape(_) => ErrorKind::Shape,
            Error::Dimension { .. } => ErrorKind::Dimension,
            Error::Index { .. } => ErrorKind::Index,
            Error::Type(_) => ErrorKind::Type,
            Error::Format { .. } | Error::Io(_) => ErrorKind::Format,
        }
    }

    pub(crate) fn domain_mismatch(expected: Domain, found: Domain) -> Self {
        Error::Type(format!("expected domain {expected}, found {found}"))
    }

    pub(crate) fn dimension(op: &'static str, left: (usize, usize), right: (usize, usize)) -> Self {
        Error::Dimension { op, left, right }
    }

    pub(crate) fn format(line: usize, reason: impl Into<String>) -> Self {
        Error::Format {
            line,
            reason: reason.into(),
        }
    }

    /// Attach context to a category reported by a selection or format parser
    ///
    /// Parsers only report `Type` or `Format`; anything else is a caller bug
    /// and is kept as a format error so the context survives.
    pub(crate) fn parse_failure(kind: ErrorKind, context: impl Into<String>) -> Self {
        match kind {
            ErrorKind::Type => Error::Type(context.into()),
            _ => Error::format(0, context),
        }
    }
}

/// Map an index check into an [`Error::Index`] carrying the offending values
pub(crate) fn check_index(index: usize, bound: usize) -> Result<usize> {
    sparsegb_core::validation::check_index(index, bound).map_err(|_| Error::Index { index, bound })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(Error::Shape("x".into()).kind(), ErrorKind::Shape);
        assert_eq!(
            Error::dimension("mxm", (2, 3), (2, 3)).kind(),
            ErrorKind::Dimension
        );
        assert_eq!(Error::Index { index: 3, bound: 3 }.kind(), ErrorKind::Index);
        assert_eq!(
            Error::domain_mismatch(Domain::Int64, Domain::Fp64).kind(),
            ErrorKind::Type
        );
        assert_eq!(Error::format(4, "bad").kind(), ErrorKind::Format);
        assert_eq!(
            Error::parse_failure(ErrorKind::Type, "unknown operator").kind(),
            ErrorKind::Type
        );
    }

    #[test]
    fn test_parse_failure_keeps_context() {
        let err = Error::parse_failure(ErrorKind::Type, "comparator \"<\" needs a threshold");
        assert_eq!(err.to_string(), "TypeError: comparator \"<\" needs a threshold");
        let err = Error::parse_failure(ErrorKind::Format, "invalid selection \"~=\"");
        assert_eq!(err.to_string(), "FormatError at line 0: invalid selection \"~=\"");
        let err = Error::parse_failure(ErrorKind::Index, "selection offset");
        assert!(err.to_string().contains("selection offset"));
    }

    #[test]
    fn test_messages() {
        let err = Error::Index { index: 10, bound: 10 };
        assert_eq!(
            err.to_string(),
            "IndexError: index 10 out of bounds for dimension of size 10"
        );
        let err = Error::format(3, "unknown type tag");
        assert_eq!(err.to_string(), "FormatError at line 3: unknown type tag");
        assert_eq!(check_index(2, 3).unwrap(), 2);
        assert!(matches!(
            check_index(3, 3),
            Err(Error::Index { index: 3, bound: 3 })
        ));
    }
}
