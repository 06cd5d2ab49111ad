use super::check_pinned;
use crate::error::{Error, Result};
use crate::storage::Value;
use sparsegb_core::{BinaryKind, Domain, Element};
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type BinaryFn<T> = Arc<dyn Fn(T, T) -> T + Send + Sync>;

/// A binary operator, builtin or user supplied
#[derive(Clone)]
pub enum BinaryOp {
    /// Builtin kind, optionally pinned to one domain
    Builtin {
        kind: BinaryKind,
        domain: Option<Domain>,
    },
    /// User closure over one element type
    Custom {
        name: Cow<'static, str>,
        domain: Domain,
        func: Arc<dyn Any + Send + Sync>,
    },
}

impl BinaryOp {
    pub const FIRST: BinaryOp = BinaryOp::builtin(BinaryKind::First);
    pub const SECOND: BinaryOp = BinaryOp::builtin(BinaryKind::Second);
    pub const PAIR: BinaryOp = BinaryOp::builtin(BinaryKind::Pair);
    pub const PLUS: BinaryOp = BinaryOp::builtin(BinaryKind::Plus);
    pub const MINUS: BinaryOp = BinaryOp::builtin(BinaryKind::Minus);
    pub const RMINUS: BinaryOp = BinaryOp::builtin(BinaryKind::RMinus);
    pub const TIMES: BinaryOp = BinaryOp::builtin(BinaryKind::Times);
    pub const DIV: BinaryOp = BinaryOp::builtin(BinaryKind::Div);
    pub const RDIV: BinaryOp = BinaryOp::builtin(BinaryKind::RDiv);
    pub const MIN: BinaryOp = BinaryOp::builtin(BinaryKind::Min);
    pub const MAX: BinaryOp = BinaryOp::builtin(BinaryKind::Max);
    pub const LOR: BinaryOp = BinaryOp::builtin(BinaryKind::LOr);
    pub const LAND: BinaryOp = BinaryOp::builtin(BinaryKind::LAnd);
    pub const LXOR: BinaryOp = BinaryOp::builtin(BinaryKind::LXor);

    /// Domain-polymorphic builtin
    pub const fn builtin(kind: BinaryKind) -> Self {
        BinaryOp::Builtin { kind, domain: None }
    }

    /// Builtin restricted to one domain, e.g. `plus_int64`
    pub const fn pinned(kind: BinaryKind, domain: Domain) -> Self {
        BinaryOp::Builtin {
            kind,
            domain: Some(domain),
        }
    }

    /// Wrap a closure as an operator on `T`'s domain
    pub fn custom<T, F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        T: Value,
        F: Fn(T, T) -> T + Send + Sync + 'static,
    {
        let func: BinaryFn<T> = Arc::new(func);
        BinaryOp::Custom {
            name: name.into(),
            domain: T::DOMAIN,
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> Cow<'static, str> {
        match self {
            BinaryOp::Builtin { kind, domain: None } => Cow::Borrowed(kind.name()),
            BinaryOp::Builtin {
                kind,
                domain: Some(d),
            } => Cow::Owned(format!("{}_{}", kind.name(), d.suffix())),
            BinaryOp::Custom { name, .. } => name.clone(),
        }
    }

    /// Domain the operator is pinned to, `None` for polymorphic builtins
    pub fn domain(&self) -> Option<Domain> {
        match self {
            BinaryOp::Builtin { domain, .. } => *domain,
            BinaryOp::Custom { domain, .. } => Some(*domain),
        }
    }

    /// Builtin kind, `None` for closures
    pub fn kind(&self) -> Option<BinaryKind> {
        match self {
            BinaryOp::Builtin { kind, .. } => Some(*kind),
            BinaryOp::Custom { .. } => None,
        }
    }

    /// Resolve the operator for element type `T`
    pub fn bind<T: Element>(&self) -> Result<BoundBinary<T>> {
        check_pinned(&self.name(), self.domain(), T::DOMAIN)?;
        match self {
            BinaryOp::Builtin { kind, .. } => Ok(BoundBinary::Builtin(*kind)),
            BinaryOp::Custom { name, func, .. } => func
                .downcast_ref::<BinaryFn<T>>()
                .map(|f| BoundBinary::Custom(Arc::clone(f)))
                .ok_or_else(|| Error::Type(format!("operator {name} cannot apply to {}", T::DOMAIN))),
        }
    }
}

impl fmt::Debug for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BinaryOp({})", self.name())
    }
}

/// A binary operator resolved for one element type
#[derive(Clone)]
pub enum BoundBinary<T> {
    Builtin(BinaryKind),
    Custom(BinaryFn<T>),
}

impl<T: Element> BoundBinary<T> {
    #[inline]
    pub fn call(&self, x: T, y: T) -> T {
        match self {
            BoundBinary::Builtin(kind) => T::binary(*kind, x, y),
            BoundBinary::Custom(f) => f(x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_semantics_follow_domain() {
        assert_eq!(BinaryOp::PLUS.bind::<i64>().unwrap().call(2, 3), 5);
        assert!(BinaryOp::PLUS.bind::<bool>().unwrap().call(true, false));
        assert_eq!(BinaryOp::RMINUS.bind::<f64>().unwrap().call(1.0, 4.0), 3.0);
        assert_eq!(BinaryOp::DIV.bind::<i64>().unwrap().call(-1, 0), i64::MIN);
    }

    #[test]
    fn test_custom_closure() {
        let hypot = BinaryOp::custom("hypot", |x: f64, y: f64| (x * x + y * y).sqrt());
        assert_eq!(hypot.name(), "hypot");
        assert_eq!(hypot.kind(), None);
        assert_eq!(hypot.bind::<f64>().unwrap().call(3.0, 4.0), 5.0);
        assert!(hypot.bind::<i64>().is_err());
    }

    #[test]
    fn test_pinned_name() {
        let op = BinaryOp::pinned(BinaryKind::LOr, Domain::Bool);
        assert_eq!(op.name(), "lor_bool");
        assert_eq!(op.domain(), Some(Domain::Bool));
        assert!(op.bind::<i64>().is_err());
    }
}
