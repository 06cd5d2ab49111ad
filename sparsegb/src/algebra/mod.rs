//! Algebra engine
//!
//! Every routine validates shapes and binds its operators to the operand
//! domain before touching storage, then dispatches once on the storage
//! enum into a typed kernel. Results are freshly allocated; the `_assign`
//! forms replace the receiver's contents only after the result is built.

mod apply;
mod assign;
mod elementwise;
mod multiply;
mod reduce;

pub use assign::{Descriptor, Mask};
pub use multiply::{Operand, Product};

use std::cmp::Ordering;
use std::iter::Peekable;

/// Two key-ordered entry streams walked in lockstep
///
/// Yields each key once with the value from either side, or both.
pub(crate) struct MergeSorted<I: Iterator, J: Iterator> {
    left: Peekable<I>,
    right: Peekable<J>,
}

pub(crate) fn merge_sorted<I, J>(left: I, right: J) -> MergeSorted<I::IntoIter, J::IntoIter>
where
    I: IntoIterator,
    J: IntoIterator,
{
    MergeSorted {
        left: left.into_iter().peekable(),
        right: right.into_iter().peekable(),
    }
}

impl<K, T, I, J> Iterator for MergeSorted<I, J>
where
    K: Ord,
    I: Iterator<Item = (K, T)>,
    J: Iterator<Item = (K, T)>,
{
    type Item = (K, Option<T>, Option<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let order = match (self.left.peek(), self.right.peek()) {
            (Some((l, _)), Some((r, _))) => l.cmp(r),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => return None,
        };
        match order {
            Ordering::Less => self.left.next().map(|(k, x)| (k, Some(x), None)),
            Ordering::Greater => self.right.next().map(|(k, y)| (k, None, Some(y))),
            Ordering::Equal => {
                let (k, x) = self.left.next()?;
                let y = self.right.next().map(|(_, y)| y);
                Some((k, Some(x), y))
            }
        }
    }
}
