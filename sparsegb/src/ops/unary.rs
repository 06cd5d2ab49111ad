use super::check_pinned;
use crate::error::{Error, Result};
use crate::storage::Value;
use sparsegb_core::{Domain, Element, UnaryKind};
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type UnaryFn<T> = Arc<dyn Fn(T) -> T + Send + Sync>;

/// A unary operator, builtin or user supplied
#[derive(Clone)]
pub enum UnaryOp {
    /// Builtin kind, optionally pinned to one domain
    Builtin {
        kind: UnaryKind,
        domain: Option<Domain>,
    },
    /// User closure over one element type
    Custom {
        name: Cow<'static, str>,
        domain: Domain,
        func: Arc<dyn Any + Send + Sync>,
    },
}

impl UnaryOp {
    pub const IDENTITY: UnaryOp = UnaryOp::builtin(UnaryKind::Identity);
    pub const AINV: UnaryOp = UnaryOp::builtin(UnaryKind::AInv);
    pub const MINV: UnaryOp = UnaryOp::builtin(UnaryKind::MInv);
    pub const ABS: UnaryOp = UnaryOp::builtin(UnaryKind::Abs);
    pub const LNOT: UnaryOp = UnaryOp::builtin(UnaryKind::LNot);
    pub const ONE: UnaryOp = UnaryOp::builtin(UnaryKind::One);

    /// Domain-polymorphic builtin
    pub const fn builtin(kind: UnaryKind) -> Self {
        UnaryOp::Builtin { kind, domain: None }
    }

    /// Builtin restricted to one domain, e.g. `ainv_int64`
    pub const fn pinned(kind: UnaryKind, domain: Domain) -> Self {
        UnaryOp::Builtin {
            kind,
            domain: Some(domain),
        }
    }

    /// Wrap a closure as an operator on `T`'s domain
    pub fn custom<T, F>(name: impl Into<Cow<'static, str>>, func: F) -> Self
    where
        T: Value,
        F: Fn(T) -> T + Send + Sync + 'static,
    {
        let func: UnaryFn<T> = Arc::new(func);
        UnaryOp::Custom {
            name: name.into(),
            domain: T::DOMAIN,
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> Cow<'static, str> {
        match self {
            UnaryOp::Builtin { kind, domain: None } => Cow::Borrowed(kind.name()),
            UnaryOp::Builtin {
                kind,
                domain: Some(d),
            } => Cow::Owned(format!("{}_{}", kind.name(), d.suffix())),
            UnaryOp::Custom { name, .. } => name.clone(),
        }
    }

    /// Domain the operator is pinned to, `None` for polymorphic builtins
    pub fn domain(&self) -> Option<Domain> {
        match self {
            UnaryOp::Builtin { domain, .. } => *domain,
            UnaryOp::Custom { domain, .. } => Some(*domain),
        }
    }

    /// Resolve the operator for element type `T`
    pub fn bind<T: Element>(&self) -> Result<BoundUnary<T>> {
        check_pinned(&self.name(), self.domain(), T::DOMAIN)?;
        match self {
            UnaryOp::Builtin { kind, .. } => Ok(BoundUnary::Builtin(*kind)),
            UnaryOp::Custom { name, func, .. } => func
                .downcast_ref::<UnaryFn<T>>()
                .map(|f| BoundUnary::Custom(Arc::clone(f)))
                .ok_or_else(|| Error::Type(format!("operator {name} cannot apply to {}", T::DOMAIN))),
        }
    }
}

impl fmt::Debug for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnaryOp({})", self.name())
    }
}

/// A unary operator resolved for one element type
#[derive(Clone)]
pub enum BoundUnary<T> {
    Builtin(UnaryKind),
    Custom(UnaryFn<T>),
}

impl<T: Element> BoundUnary<T> {
    #[inline]
    pub fn call(&self, x: T) -> T {
        match self {
            BoundUnary::Builtin(kind) => T::unary(*kind, x),
            BoundUnary::Custom(f) => f(x),
        }
    }
}
