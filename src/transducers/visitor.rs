use super::{Hole, Transducer};
use crate::Sequence;

/// The source of a [`Visitor`], as seen by its inner transducer.
///
/// Every element produced through a tap has already been handed to the
/// visitor's downstream.
pub struct Tap<'a, T> {
    source: &'a mut dyn FnMut(&mut dyn FnMut(T) -> bool),
}

impl<T> Sequence for Tap<'_, T> {
    type Item = T;

    fn produce(&mut self, visit: &mut dyn FnMut(T) -> bool) {
        (self.source)(visit)
    }
}

/// Runs a transducer for its side effects and passes the source through
/// unchanged.
///
/// Each traversal applies a fresh clone of the inner transducer to a [`Tap`]
/// of the source and drains its output. Every source element goes downstream
/// first and then into the tap. Production stops once either side asks to
/// stop, so a truncating inner transducer such as `take` also truncates the
/// passed-through sequence.
#[derive(Debug, Clone)]
pub struct Visitor<S, X> {
    seq: S,
    tx: X,
}

/// Create a transducer that feeds every element through `tx` as a side
/// effect, then emits the element itself.
///
/// ```rust
/// use seqflow::prelude::*;
/// use std::cell::Cell;
///
/// let total = Cell::new(0);
/// let seq = values([1, 2, 3]).visitor(map(|x: i32| total.set(total.get() + x)));
/// assert_eq!(collect(seq), vec![1, 2, 3]);
/// assert_eq!(total.get(), 6);
/// ```
pub fn visitor<X>(tx: X) -> Visitor<Hole, X> {
    Visitor { seq: Hole, tx }
}

impl<S, X> Sequence for Visitor<S, X>
where
    S: Sequence,
    S::Item: Clone,
    X: for<'a> Transducer<Tap<'a, S::Item>> + Clone,
{
    type Item = S::Item;

    fn produce(&mut self, visit: &mut dyn FnMut(S::Item) -> bool) {
        let seq = &mut self.seq;
        let mut source = |inner: &mut dyn FnMut(S::Item) -> bool| {
            seq.produce(&mut |item: S::Item| {
                let more = visit(item.clone());
                inner(item) && more
            })
        };
        let tap = Tap {
            source: &mut source,
        };
        Transducer::apply(self.tx.clone(), tap).produce(&mut |_| true);
    }
}

impl<S, X> Transducer<S> for Visitor<Hole, X>
where
    S: Sequence,
    S::Item: Clone,
    X: for<'a> Transducer<Tap<'a, S::Item>> + Clone,
{
    type Output = Visitor<S, X>;

    fn apply(self, seq: S) -> Visitor<S, X> {
        Visitor { seq, tx: self.tx }
    }
}
