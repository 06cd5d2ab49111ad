//! Error categories for sparse container operations

/// Category of a failed sparse operation
///
/// The pure helpers in this crate report one of these directly; the
/// `sparsegb` crate wraps them with context while keeping the category
/// queryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed coordinate triples or inconsistent sequence lengths
    Shape,
    /// Incompatible operand shapes in a binary or multiply operation
    Dimension,
    /// Element or slice access out of range
    Index,
    /// Domain mismatch between operands, or an unsupported operand
    Type,
    /// Malformed or unrecognized exchange-format input
    Format,
}

impl ErrorKind {
    /// Name of the category as reported to callers
    pub const fn name(&self) -> &'static str {
        match self {
            ErrorKind::Shape => "ShapeError",
            ErrorKind::Dimension => "DimensionError",
            ErrorKind::Index => "IndexError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Format => "FormatError",
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result type for core helpers
pub type Result<T> = core::result::Result<T, ErrorKind>;
