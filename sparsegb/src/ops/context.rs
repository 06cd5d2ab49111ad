//! Thread-scoped current semiring
//!
//! Operations that multiply without an explicit semiring use the innermost
//! semiring pushed on this thread, or `plus_times` when none is active.

use super::semiring::Semiring;
use std::cell::RefCell;
use std::marker::PhantomData;
use tracing::trace;

thread_local! {
    static SEMIRING_STACK: RefCell<Vec<Semiring>> = const { RefCell::new(Vec::new()) };
}

/// Guard restoring the previous semiring when dropped
///
/// Tied to the thread that created it.
#[must_use = "the semiring is popped as soon as the scope guard is dropped"]
pub struct SemiringScope {
    depth: usize,
    _thread_bound: PhantomData<*const ()>,
}

impl Semiring {
    /// Make this the current semiring until the guard is dropped
    pub fn scoped(&self) -> SemiringScope {
        let depth = SEMIRING_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push(self.clone());
            stack.len() - 1
        });
        trace!(semiring = self.name(), depth, "push semiring");
        SemiringScope {
            depth,
            _thread_bound: PhantomData,
        }
    }
}

impl Drop for SemiringScope {
    fn drop(&mut self) {
        SEMIRING_STACK.with(|stack| stack.borrow_mut().truncate(self.depth));
        trace!(depth = self.depth, "pop semiring");
    }
}

/// Run `f` with `semiring` as the current semiring
pub fn with_semiring<R>(semiring: &Semiring, f: impl FnOnce() -> R) -> R {
    let _scope = semiring.scoped();
    f()
}

/// The innermost active semiring on this thread
pub fn current_semiring() -> Semiring {
    SEMIRING_STACK.with(|stack| stack.borrow().last().cloned().unwrap_or(Semiring::PLUS_TIMES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_plus_times() {
        assert_eq!(current_semiring().name(), "plus_times");
    }

    #[test]
    fn test_nested_scopes_restore() {
        {
            let _outer = Semiring::MIN_PLUS.scoped();
            assert_eq!(current_semiring().name(), "min_plus");
            {
                let _inner = Semiring::LOR_LAND.scoped();
                assert_eq!(current_semiring().name(), "lor_land");
            }
            assert_eq!(current_semiring().name(), "min_plus");
        }
        assert_eq!(current_semiring().name(), "plus_times");
    }

    #[test]
    fn test_closure_form_and_unwinding() {
        let name = with_semiring(&Semiring::MAX_PLUS, || current_semiring().name().to_string());
        assert_eq!(name, "max_plus");

        let result = std::panic::catch_unwind(|| {
            with_semiring(&Semiring::PLUS_PLUS, || panic!("boom"));
        });
        assert!(result.is_err());
        assert_eq!(current_semiring().name(), "plus_times");
    }

    #[test]
    fn test_threads_do_not_share_scopes() {
        let _scope = Semiring::MIN_PLUS.scoped();
        let other = std::thread::spawn(|| current_semiring().name().to_string())
            .join()
            .unwrap();
        assert_eq!(other, "plus_times");
        assert_eq!(current_semiring().name(), "min_plus");
    }
}
