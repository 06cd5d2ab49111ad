//! Named operator lookup
//!
//! Names follow the GraphBLAS convention: `plus` is the polymorphic
//! builtin and `plus_int64` the same operator pinned to a domain.

use super::{BinaryOp, Monoid, Semiring, UnaryOp};
use crate::error::{Error, Result};
use hashbrown::HashMap;
use sparsegb_core::{BinaryKind, Domain, UnaryKind};
use tracing::debug;

/// Registry of unary and binary operators, monoids and semirings
#[derive(Debug, Clone)]
pub struct OperatorRegistry {
    unary: HashMap<String, UnaryOp>,
    binary: HashMap<String, BinaryOp>,
    monoids: HashMap<String, Monoid>,
    semirings: HashMap<String, Semiring>,
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Look up `name` for `domain`, preferring the pinned `name_suffix` entry
fn resolve<'a, V>(
    table: &'a HashMap<String, V>,
    what: &str,
    name: &str,
    domain: Option<Domain>,
    pinned_to: impl Fn(&V) -> Option<Domain>,
) -> Result<&'a V> {
    let pinned = domain.and_then(|d| table.get(format!("{name}_{}", d.suffix()).as_str()));
    let found = pinned.or_else(|| {
        table
            .get(name)
            .filter(|&op| match (domain, pinned_to(op)) {
                (Some(d), Some(p)) => d == p,
                _ => true,
            })
    });
    found.ok_or_else(|| match domain {
        Some(d) => Error::Type(format!("unknown {what} {name} for {d}")),
        None => Error::Type(format!("unknown {what} {name}")),
    })
}

impl OperatorRegistry {
    /// Registry without any operators
    pub fn empty() -> Self {
        Self {
            unary: HashMap::new(),
            binary: HashMap::new(),
            monoids: HashMap::new(),
            semirings: HashMap::new(),
        }
    }

    /// Registry holding every builtin, polymorphic and pinned per domain
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        for kind in UnaryKind::ALL {
            registry.register_unary(UnaryOp::builtin(kind));
            for domain in Domain::ALL {
                registry.register_unary(UnaryOp::pinned(kind, domain));
            }
        }
        for kind in BinaryKind::ALL {
            registry.register_binary(BinaryOp::builtin(kind));
            for domain in Domain::ALL {
                let op = BinaryOp::pinned(kind, domain);
                if kind.is_monoid() {
                    if let Ok(monoid) = Monoid::new(op.clone()) {
                        registry.register_monoid(monoid);
                    }
                }
                registry.register_binary(op);
            }
            if kind.is_monoid() {
                registry.register_monoid(Monoid::builtin(kind));
            }
        }
        for semiring in Semiring::BUILTINS {
            for domain in Domain::ALL {
                registry.register_semiring(semiring.pinned(domain));
            }
            registry.register_semiring(semiring);
        }
        debug!(
            unary = registry.unary.len(),
            binary = registry.binary.len(),
            monoids = registry.monoids.len(),
            semirings = registry.semirings.len(),
            "operator registry populated"
        );
        registry
    }

    /// Register under the operator's name, replacing any previous entry
    pub fn register_unary(&mut self, op: UnaryOp) {
        self.unary.insert(op.name().into_owned(), op);
    }

    pub fn register_binary(&mut self, op: BinaryOp) {
        self.binary.insert(op.name().into_owned(), op);
    }

    pub fn register_monoid(&mut self, monoid: Monoid) {
        self.monoids.insert(monoid.name().into_owned(), monoid);
    }

    pub fn register_semiring(&mut self, semiring: Semiring) {
        self.semirings.insert(semiring.name().to_string(), semiring);
    }

    /// Find a unary operator, optionally for a specific domain
    pub fn unary(&self, name: &str, domain: Option<Domain>) -> Result<UnaryOp> {
        resolve(&self.unary, "unary operator", name, domain, UnaryOp::domain).cloned()
    }

    pub fn binary(&self, name: &str, domain: Option<Domain>) -> Result<BinaryOp> {
        resolve(&self.binary, "binary operator", name, domain, BinaryOp::domain).cloned()
    }

    pub fn monoid(&self, name: &str, domain: Option<Domain>) -> Result<Monoid> {
        resolve(&self.monoids, "monoid", name, domain, Monoid::domain).cloned()
    }

    pub fn semiring(&self, name: &str, domain: Option<Domain>) -> Result<Semiring> {
        resolve(&self.semirings, "semiring", name, domain, Semiring::domain).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sparsegb_core::ErrorKind;

    #[test]
    fn test_builtin_lookup() {
        let registry = OperatorRegistry::with_builtins();
        assert_eq!(registry.binary("plus", None).unwrap().name(), "plus");
        assert_eq!(
            registry.binary("plus", Some(Domain::Int64)).unwrap().name(),
            "plus_int64"
        );
        assert_eq!(
            registry.binary("plus_int64", None).unwrap().domain(),
            Some(Domain::Int64)
        );
        assert_eq!(registry.unary("ainv_fp64", None).unwrap().name(), "ainv_fp64");
        assert_eq!(registry.monoid("min", Some(Domain::Fp64)).unwrap().name(), "min_fp64");
        assert_eq!(registry.semiring("plus_times", None).unwrap().name(), "plus_times");
        assert_eq!(
            registry.semiring("lor_land", Some(Domain::Bool)).unwrap().name(),
            "lor_land_bool"
        );
        assert!(registry.semiring("lor_land_bool", None).unwrap().bind::<bool>().is_ok());
    }

    #[test]
    fn test_unknown_operator_is_type_error() {
        let registry = OperatorRegistry::default();
        let err = registry.binary("frobnicate", None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert!(err.to_string().contains("unknown binary operator frobnicate"));
        assert!(registry.monoid("minus", None).is_err());
    }

    #[test]
    fn test_register_custom() {
        let mut registry = OperatorRegistry::empty();
        registry.register_binary(BinaryOp::custom("absdiff", |x: i64, y: i64| (x - y).abs()));
        let op = registry.binary("absdiff", Some(Domain::Int64)).unwrap();
        assert_eq!(op.bind::<i64>().unwrap().call(2, 7), 5);
        assert!(registry.binary("absdiff", Some(Domain::Fp64)).is_err());
    }
}
