use super::binary::{BinaryOp, BoundBinary};
use crate::error::{Error, Result};
use sparsegb_core::{BinaryKind, Domain, Element, Scalar};
use std::borrow::Cow;

/// An associative binary operator with an identity
///
/// Builtin monoids take their identity from the operand domain when bound;
/// custom monoids carry an explicit identity scalar.
#[derive(Debug, Clone)]
pub struct Monoid {
    op: BinaryOp,
    identity: Option<Scalar>,
}

impl Monoid {
    pub const PLUS: Monoid = Monoid::builtin(BinaryKind::Plus);
    pub const TIMES: Monoid = Monoid::builtin(BinaryKind::Times);
    pub const MIN: Monoid = Monoid::builtin(BinaryKind::Min);
    pub const MAX: Monoid = Monoid::builtin(BinaryKind::Max);
    pub const LOR: Monoid = Monoid::builtin(BinaryKind::LOr);
    pub const LAND: Monoid = Monoid::builtin(BinaryKind::LAnd);
    pub const LXOR: Monoid = Monoid::builtin(BinaryKind::LXor);

    pub(crate) const fn builtin(kind: BinaryKind) -> Self {
        Monoid {
            op: BinaryOp::builtin(kind),
            identity: None,
        }
    }

    /// Monoid over a builtin operator with a known identity
    pub fn new(op: BinaryOp) -> Result<Self> {
        match op.kind() {
            Some(kind) if kind.is_monoid() => Ok(Monoid { op, identity: None }),
            _ => Err(Error::Type(format!(
                "{} has no builtin identity, use Monoid::custom",
                op.name()
            ))),
        }
    }

    /// Monoid with an explicit identity
    pub fn custom(op: BinaryOp, identity: impl Into<Scalar>) -> Result<Self> {
        let identity = identity.into();
        if let Some(domain) = op.domain() {
            if domain != identity.domain() {
                return Err(Error::domain_mismatch(domain, identity.domain()));
            }
        }
        Ok(Monoid {
            op,
            identity: Some(identity),
        })
    }

    pub fn name(&self) -> Cow<'static, str> {
        self.op.name()
    }

    pub fn op(&self) -> &BinaryOp {
        &self.op
    }

    pub fn domain(&self) -> Option<Domain> {
        self.op.domain().or(self.identity.map(|s| s.domain()))
    }

    /// Identity for a given domain
    pub fn identity(&self, domain: Domain) -> Result<Scalar> {
        match domain {
            Domain::Bool => self.bind::<bool>().map(|m| m.identity().into_scalar()),
            Domain::Int64 => self.bind::<i64>().map(|m| m.identity().into_scalar()),
            Domain::Fp64 => self.bind::<f64>().map(|m| m.identity().into_scalar()),
        }
    }

    /// Resolve the monoid for element type `T`
    pub fn bind<T: Element>(&self) -> Result<BoundMonoid<T>> {
        let op = self.op.bind::<T>()?;
        let identity = match self.identity {
            Some(scalar) if scalar.domain() == T::DOMAIN => T::from_scalar(scalar),
            Some(scalar) => return Err(Error::domain_mismatch(T::DOMAIN, scalar.domain())),
            None => self
                .op
                .kind()
                .and_then(T::identity)
                .ok_or_else(|| Error::Type(format!("monoid {} has no identity", self.name())))?,
        };
        Ok(BoundMonoid { op, identity })
    }
}

/// A monoid resolved for one element type
#[derive(Clone)]
pub struct BoundMonoid<T> {
    op: BoundBinary<T>,
    identity: T,
}

impl<T: Element> BoundMonoid<T> {
    #[inline]
    pub fn identity(&self) -> T {
        self.identity
    }

    #[inline]
    pub fn combine(&self, x: T, y: T) -> T {
        self.op.call(x, y)
    }

    /// Left fold starting from the identity
    pub fn fold<I: IntoIterator<Item = T>>(&self, values: I) -> T {
        values
            .into_iter()
            .fold(self.identity, |acc, x| self.op.call(acc, x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_identities() {
        assert_eq!(Monoid::PLUS.bind::<i64>().unwrap().identity(), 0);
        assert_eq!(Monoid::TIMES.bind::<f64>().unwrap().identity(), 1.0);
        assert_eq!(Monoid::MIN.bind::<i64>().unwrap().identity(), i64::MAX);
        assert!(!Monoid::LOR.bind::<bool>().unwrap().identity());
        assert_eq!(Monoid::MAX.identity(Domain::Fp64).unwrap(), Scalar::Fp64(f64::NEG_INFINITY));
    }

    #[test]
    fn test_fold() {
        let plus = Monoid::PLUS.bind::<i64>().unwrap();
        assert_eq!(plus.fold([1, 2, 3]), 6);
        assert_eq!(plus.fold(std::iter::empty()), 0);
    }

    #[test]
    fn test_non_monoid_ops_rejected() {
        assert!(Monoid::new(BinaryOp::MINUS).is_err());
        assert!(Monoid::new(BinaryOp::MAX).is_ok());

        let gcd = BinaryOp::custom("gcd", |mut a: i64, mut b: i64| {
            while b != 0 {
                let t = a % b;
                a = b;
                b = t;
            }
            a.abs()
        });
        assert!(Monoid::custom(gcd.clone(), 0.5).is_err());
        let monoid = Monoid::custom(gcd, 0i64).unwrap();
        assert_eq!(monoid.bind::<i64>().unwrap().fold([12, 18, 30]), 6);
    }
}
