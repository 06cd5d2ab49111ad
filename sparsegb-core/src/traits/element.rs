//! Value types that can be stored in sparse containers
//!
//! This module defines the trait constraining container element types and
//! fixes the per-domain meaning of every builtin operator.

use crate::domain::Domain;
use crate::ops::{BinaryKind, Comparator, UnaryKind};
use crate::scalar::Scalar;

/// Trait for types that can be stored as container elements
///
/// Implemented for exactly one Rust type per [`Domain`]: `bool`, `i64` and
/// `f64`.
pub trait Element: Copy + PartialEq + PartialOrd + core::fmt::Debug + Send + Sync + 'static {
    /// Domain this type represents
    const DOMAIN: Domain;

    /// Additive identity, also the implicit value of unstored entries
    fn zero() -> Self;

    /// Multiplicative identity
    fn one() -> Self;

    /// Smallest representable value (identity of `max`)
    fn min_value() -> Self;

    /// Largest representable value (identity of `min`)
    fn max_value() -> Self;

    /// Typecast a scalar of any domain into this type
    fn from_scalar(value: Scalar) -> Self;

    /// Wrap the value as a tagged scalar
    fn into_scalar(self) -> Scalar;

    /// Boolean view of the value (`x != 0`)
    fn is_nonzero(self) -> bool;

    /// `true`/`false` as `1`/`0` of this type
    fn from_bool(value: bool) -> Self;

    /// Evaluate a builtin unary operator
    fn unary(kind: UnaryKind, x: Self) -> Self;

    /// Evaluate a builtin binary operator
    fn binary(kind: BinaryKind, x: Self, y: Self) -> Self;

    /// Identity element of a builtin monoid, `None` if the kind is not one
    fn identity(kind: BinaryKind) -> Option<Self> {
        match kind {
            BinaryKind::Plus | BinaryKind::LOr | BinaryKind::LXor => Some(Self::zero()),
            BinaryKind::Times | BinaryKind::LAnd => Some(Self::one()),
            BinaryKind::Min => Some(Self::max_value()),
            BinaryKind::Max => Some(Self::min_value()),
            _ => None,
        }
    }

    /// Evaluate a comparator
    #[inline]
    fn compare(cmp: Comparator, x: Self, y: Self) -> bool {
        cmp.test(x, y)
    }
}

impl Element for bool {
    const DOMAIN: Domain = Domain::Bool;

    fn zero() -> Self {
        false
    }

    fn one() -> Self {
        true
    }

    fn min_value() -> Self {
        false
    }

    fn max_value() -> Self {
        true
    }

    fn from_scalar(value: Scalar) -> Self {
        value.is_truthy()
    }

    fn into_scalar(self) -> Scalar {
        Scalar::Bool(self)
    }

    fn is_nonzero(self) -> bool {
        self
    }

    fn from_bool(value: bool) -> Self {
        value
    }

    #[inline]
    fn unary(kind: UnaryKind, x: Self) -> Self {
        match kind {
            UnaryKind::Identity | UnaryKind::AInv | UnaryKind::Abs => x,
            UnaryKind::MInv | UnaryKind::One => true,
            UnaryKind::LNot => !x,
        }
    }

    #[inline]
    fn binary(kind: BinaryKind, x: Self, y: Self) -> Self {
        match kind {
            BinaryKind::First | BinaryKind::Div => x,
            BinaryKind::Second | BinaryKind::RDiv => y,
            BinaryKind::Pair => true,
            BinaryKind::Plus | BinaryKind::Max | BinaryKind::LOr => x || y,
            BinaryKind::Times | BinaryKind::Min | BinaryKind::LAnd => x && y,
            BinaryKind::Minus | BinaryKind::RMinus | BinaryKind::LXor => x != y,
        }
    }
}

/// Integer division with the GraphBLAS convention for a zero divisor
#[inline]
fn int_div(x: i64, y: i64) -> i64 {
    if y == 0 {
        match x.signum() {
            1 => i64::MAX,
            -1 => i64::MIN,
            _ => 0,
        }
    } else {
        x.wrapping_div(y)
    }
}

impl Element for i64 {
    const DOMAIN: Domain = Domain::Int64;

    fn zero() -> Self {
        0
    }

    fn one() -> Self {
        1
    }

    fn min_value() -> Self {
        i64::MIN
    }

    fn max_value() -> Self {
        i64::MAX
    }

    fn from_scalar(value: Scalar) -> Self {
        match value.cast(Domain::Int64) {
            Scalar::Int64(i) => i,
            _ => 0,
        }
    }

    fn into_scalar(self) -> Scalar {
        Scalar::Int64(self)
    }

    fn is_nonzero(self) -> bool {
        self != 0
    }

    fn from_bool(value: bool) -> Self {
        value as i64
    }

    #[inline]
    fn unary(kind: UnaryKind, x: Self) -> Self {
        match kind {
            UnaryKind::Identity => x,
            UnaryKind::AInv => x.wrapping_neg(),
            UnaryKind::MInv => int_div(1, x),
            UnaryKind::Abs => x.wrapping_abs(),
            UnaryKind::LNot => (x == 0) as i64,
            UnaryKind::One => 1,
        }
    }

    #[inline]
    fn binary(kind: BinaryKind, x: Self, y: Self) -> Self {
        match kind {
            BinaryKind::First => x,
            BinaryKind::Second => y,
            BinaryKind::Pair => 1,
            BinaryKind::Plus => x.wrapping_add(y),
            BinaryKind::Minus => x.wrapping_sub(y),
            BinaryKind::RMinus => y.wrapping_sub(x),
            BinaryKind::Times => x.wrapping_mul(y),
            BinaryKind::Div => int_div(x, y),
            BinaryKind::RDiv => int_div(y, x),
            BinaryKind::Min => x.min(y),
            BinaryKind::Max => x.max(y),
            BinaryKind::LOr => (x != 0 || y != 0) as i64,
            BinaryKind::LAnd => (x != 0 && y != 0) as i64,
            BinaryKind::LXor => ((x != 0) != (y != 0)) as i64,
        }
    }
}

impl Element for f64 {
    const DOMAIN: Domain = Domain::Fp64;

    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn min_value() -> Self {
        f64::NEG_INFINITY
    }

    fn max_value() -> Self {
        f64::INFINITY
    }

    fn from_scalar(value: Scalar) -> Self {
        match value.cast(Domain::Fp64) {
            Scalar::Fp64(x) => x,
            _ => 0.0,
        }
    }

    fn into_scalar(self) -> Scalar {
        Scalar::Fp64(self)
    }

    fn is_nonzero(self) -> bool {
        self != 0.0
    }

    fn from_bool(value: bool) -> Self {
        if value {
            1.0
        } else {
            0.0
        }
    }

    #[inline]
    fn unary(kind: UnaryKind, x: Self) -> Self {
        match kind {
            UnaryKind::Identity => x,
            UnaryKind::AInv => -x,
            UnaryKind::MInv => 1.0 / x,
            UnaryKind::Abs => {
                if x < 0.0 {
                    -x
                } else {
                    x
                }
            }
            UnaryKind::LNot => Self::from_bool(x == 0.0),
            UnaryKind::One => 1.0,
        }
    }

    #[inline]
    fn binary(kind: BinaryKind, x: Self, y: Self) -> Self {
        match kind {
            BinaryKind::First => x,
            BinaryKind::Second => y,
            BinaryKind::Pair => 1.0,
            BinaryKind::Plus => x + y,
            BinaryKind::Minus => x - y,
            BinaryKind::RMinus => y - x,
            BinaryKind::Times => x * y,
            BinaryKind::Div => x / y,
            BinaryKind::RDiv => y / x,
            BinaryKind::Min => x.min(y),
            BinaryKind::Max => x.max(y),
            BinaryKind::LOr => Self::from_bool(x != 0.0 || y != 0.0),
            BinaryKind::LAnd => Self::from_bool(x != 0.0 && y != 0.0),
            BinaryKind::LXor => Self::from_bool((x != 0.0) != (y != 0.0)),
        }
    }
}
