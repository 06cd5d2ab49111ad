//! Builtin operator kinds
//!
//! These are domain-polymorphic descriptions of the builtin operators. The
//! per-domain semantics live in [`crate::Element`] implementations.

use crate::scalar::Scalar;

/// Builtin unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryKind {
    /// `z = x`
    Identity,
    /// Additive inverse, `z = -x`
    AInv,
    /// Multiplicative inverse, `z = 1 / x`
    MInv,
    /// Absolute value
    Abs,
    /// Logical negation, `z = !(x != 0)`
    LNot,
    /// `z = 1`
    One,
}

impl UnaryKind {
    /// Every builtin unary operator
    pub const ALL: [UnaryKind; 6] = [
        UnaryKind::Identity,
        UnaryKind::AInv,
        UnaryKind::MInv,
        UnaryKind::Abs,
        UnaryKind::LNot,
        UnaryKind::One,
    ];

    /// Registry name of the operator
    pub const fn name(&self) -> &'static str {
        match self {
            UnaryKind::Identity => "identity",
            UnaryKind::AInv => "ainv",
            UnaryKind::MInv => "minv",
            UnaryKind::Abs => "abs",
            UnaryKind::LNot => "lnot",
            UnaryKind::One => "one",
        }
    }
}

/// Builtin binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryKind {
    First,
    Second,
    Pair,
    Plus,
    Minus,
    RMinus,
    Times,
    Div,
    RDiv,
    Min,
    Max,
    LOr,
    LAnd,
    LXor,
}

impl BinaryKind {
    /// Every builtin binary operator
    pub const ALL: [BinaryKind; 14] = [
        BinaryKind::First,
        BinaryKind::Second,
        BinaryKind::Pair,
        BinaryKind::Plus,
        BinaryKind::Minus,
        BinaryKind::RMinus,
        BinaryKind::Times,
        BinaryKind::Div,
        BinaryKind::RDiv,
        BinaryKind::Min,
        BinaryKind::Max,
        BinaryKind::LOr,
        BinaryKind::LAnd,
        BinaryKind::LXor,
    ];

    /// Registry name of the operator
    pub const fn name(&self) -> &'static str {
        match self {
            BinaryKind::First => "first",
            BinaryKind::Second => "second",
            BinaryKind::Pair => "pair",
            BinaryKind::Plus => "plus",
            BinaryKind::Minus => "minus",
            BinaryKind::RMinus => "rminus",
            BinaryKind::Times => "times",
            BinaryKind::Div => "div",
            BinaryKind::RDiv => "rdiv",
            BinaryKind::Min => "min",
            BinaryKind::Max => "max",
            BinaryKind::LOr => "lor",
            BinaryKind::LAnd => "land",
            BinaryKind::LXor => "lxor",
        }
    }

    /// Whether the operator forms a monoid with a builtin identity
    pub const fn is_monoid(&self) -> bool {
        matches!(
            self,
            BinaryKind::Plus
                | BinaryKind::Times
                | BinaryKind::Min
                | BinaryKind::Max
                | BinaryKind::LOr
                | BinaryKind::LAnd
                | BinaryKind::LXor
        )
    }
}

/// Relational operators producing booleans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Comparator {
    /// Every comparator, two-character tokens first so prefix parsing is greedy
    pub const ALL: [Comparator; 6] = [
        Comparator::Eq,
        Comparator::Ne,
        Comparator::Ge,
        Comparator::Le,
        Comparator::Gt,
        Comparator::Lt,
    ];

    /// Token used in selection strings
    pub const fn symbol(&self) -> &'static str {
        match self {
            Comparator::Eq => "==",
            Comparator::Ne => "!=",
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
            Comparator::Lt => "<",
            Comparator::Le => "<=",
        }
    }

    /// Evaluate the comparator on two ordered values
    #[inline]
    pub fn test<T: PartialOrd>(&self, x: T, y: T) -> bool {
        match self {
            Comparator::Eq => x == y,
            Comparator::Ne => x != y,
            Comparator::Gt => x > y,
            Comparator::Ge => x >= y,
            Comparator::Lt => x < y,
            Comparator::Le => x <= y,
        }
    }
}

impl core::fmt::Display for Comparator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Structural and value predicates for `select`
///
/// The `i64` offset on the triangular and diagonal predicates follows the
/// usual convention: `0` is the main diagonal, positive values move above it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectOp {
    /// Entries whose value is not the domain zero
    NonZero,
    /// Entries on diagonal `k`
    Diag(i64),
    /// Entries off diagonal `k`
    OffDiag(i64),
    /// Entries on or below diagonal `k`
    Tril(i64),
    /// Entries on or above diagonal `k`
    Triu(i64),
    /// Entries whose value satisfies `value <cmp> threshold`
    Value(Comparator, Scalar),
}

impl SelectOp {
    /// Parse a selection token, see [`crate::validation::parse_select`]
    pub fn parse(token: &str, thunk: Option<Scalar>) -> crate::Result<Self> {
        crate::validation::parse_select(token, thunk)
    }

    /// Check the positional part of the predicate
    ///
    /// Value predicates accept every position.
    pub fn keeps_position(&self, row: usize, col: usize) -> bool {
        let offset = col as i128 - row as i128;
        match self {
            SelectOp::Diag(k) => offset == *k as i128,
            SelectOp::OffDiag(k) => offset != *k as i128,
            SelectOp::Tril(k) => offset <= *k as i128,
            SelectOp::Triu(k) => offset >= *k as i128,
            SelectOp::NonZero | SelectOp::Value(..) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparator_test() {
        assert!(Comparator::Gt.test(6, 5));
        assert!(!Comparator::Gt.test(5, 5));
        assert!(Comparator::Ge.test(5, 5));
        assert!(Comparator::Ne.test(1.0, 2.0));
        assert!(Comparator::Le.test(false, true));
    }

    #[test]
    fn test_select_positions() {
        assert!(SelectOp::Tril(0).keeps_position(2, 1));
        assert!(!SelectOp::Tril(0).keeps_position(1, 2));
        assert!(SelectOp::Triu(0).keeps_position(1, 1));
        assert!(SelectOp::Triu(1).keeps_position(0, 1));
        assert!(!SelectOp::Triu(1).keeps_position(1, 1));
        assert!(SelectOp::Diag(0).keeps_position(4, 4));
        assert!(SelectOp::OffDiag(0).keeps_position(0, 1));
        assert!(SelectOp::NonZero.keeps_position(3, 0));
    }

    #[test]
    fn test_monoid_kinds() {
        assert!(BinaryKind::Plus.is_monoid());
        assert!(BinaryKind::LXor.is_monoid());
        assert!(!BinaryKind::Minus.is_monoid());
        assert!(!BinaryKind::First.is_monoid());
    }
}
