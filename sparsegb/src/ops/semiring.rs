use super::binary::{BinaryOp, BoundBinary};
use super::monoid::{BoundMonoid, Monoid};
use crate::error::Result;
use sparsegb_core::{BinaryKind, Domain, Element};
use std::borrow::Cow;

/// An additive monoid paired with a multiplicative operator
#[derive(Debug, Clone)]
pub struct Semiring {
    name: Cow<'static, str>,
    add: Monoid,
    multiply: BinaryOp,
}

const fn builtin(name: &'static str, add: BinaryKind, multiply: BinaryKind) -> Semiring {
    Semiring {
        name: Cow::Borrowed(name),
        add: Monoid::builtin(add),
        multiply: BinaryOp::builtin(multiply),
    }
}

impl Semiring {
    /// Conventional arithmetic, the default semiring
    pub const PLUS_TIMES: Semiring = builtin("plus_times", BinaryKind::Plus, BinaryKind::Times);
    pub const PLUS_PLUS: Semiring = builtin("plus_plus", BinaryKind::Plus, BinaryKind::Plus);
    pub const PLUS_MIN: Semiring = builtin("plus_min", BinaryKind::Plus, BinaryKind::Min);
    /// Tropical semiring for shortest paths
    pub const MIN_PLUS: Semiring = builtin("min_plus", BinaryKind::Min, BinaryKind::Plus);
    pub const MAX_PLUS: Semiring = builtin("max_plus", BinaryKind::Max, BinaryKind::Plus);
    pub const MIN_TIMES: Semiring = builtin("min_times", BinaryKind::Min, BinaryKind::Times);
    pub const MAX_TIMES: Semiring = builtin("max_times", BinaryKind::Max, BinaryKind::Times);
    pub const PLUS_FIRST: Semiring = builtin("plus_first", BinaryKind::Plus, BinaryKind::First);
    pub const PLUS_SECOND: Semiring = builtin("plus_second", BinaryKind::Plus, BinaryKind::Second);
    pub const MIN_FIRST: Semiring = builtin("min_first", BinaryKind::Min, BinaryKind::First);
    pub const MAX_SECOND: Semiring = builtin("max_second", BinaryKind::Max, BinaryKind::Second);
    /// Boolean reachability
    pub const LOR_LAND: Semiring = builtin("lor_land", BinaryKind::LOr, BinaryKind::LAnd);
    pub const LAND_LOR: Semiring = builtin("land_lor", BinaryKind::LAnd, BinaryKind::LOr);
    pub const LXOR_LAND: Semiring = builtin("lxor_land", BinaryKind::LXor, BinaryKind::LAnd);

    /// Every builtin semiring
    pub const BUILTINS: [Semiring; 14] = [
        Semiring::PLUS_TIMES,
        Semiring::PLUS_PLUS,
        Semiring::PLUS_MIN,
        Semiring::MIN_PLUS,
        Semiring::MAX_PLUS,
        Semiring::MIN_TIMES,
        Semiring::MAX_TIMES,
        Semiring::PLUS_FIRST,
        Semiring::PLUS_SECOND,
        Semiring::MIN_FIRST,
        Semiring::MAX_SECOND,
        Semiring::LOR_LAND,
        Semiring::LAND_LOR,
        Semiring::LXOR_LAND,
    ];

    pub fn new(name: impl Into<Cow<'static, str>>, add: Monoid, multiply: BinaryOp) -> Self {
        Semiring {
            name: name.into(),
            add,
            multiply,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add(&self) -> &Monoid {
        &self.add
    }

    pub fn multiply(&self) -> &BinaryOp {
        &self.multiply
    }

    /// Domain the semiring is pinned to, if any
    pub fn domain(&self) -> Option<Domain> {
        self.add.domain().or(self.multiply.domain())
    }

    /// Copy of this semiring with both operators pinned to `domain`
    pub fn pinned(&self, domain: Domain) -> Self {
        let pin = |op: &BinaryOp| match op.kind() {
            Some(kind) => BinaryOp::pinned(kind, domain),
            None => op.clone(),
        };
        let add = Monoid::new(pin(self.add.op())).unwrap_or_else(|_| self.add.clone());
        Semiring {
            name: Cow::Owned(format!("{}_{}", self.name, domain.suffix())),
            add,
            multiply: pin(&self.multiply),
        }
    }

    /// Resolve the semiring for element type `T`
    pub fn bind<T: Element>(&self) -> Result<BoundSemiring<T>> {
        Ok(BoundSemiring {
            add: self.add.bind::<T>()?,
            multiply: self.multiply.bind::<T>()?,
        })
    }
}

/// A semiring resolved for one element type
#[derive(Clone)]
pub struct BoundSemiring<T> {
    add: BoundMonoid<T>,
    multiply: BoundBinary<T>,
}

impl<T: Element> BoundSemiring<T> {
    #[inline]
    pub fn add(&self, x: T, y: T) -> T {
        self.add.combine(x, y)
    }

    #[inline]
    pub fn multiply(&self, x: T, y: T) -> T {
        self.multiply.call(x, y)
    }

    #[inline]
    pub fn zero(&self) -> T {
        self.add.identity()
    }
}
