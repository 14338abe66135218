use super::{Hole, Transducer};
use crate::Sequence;

/// Transforms each element of the wrapped sequence.
///
/// Preserves element count and order.
#[derive(Debug, Clone)]
pub struct Map<S, F> {
    seq: S,
    f: F,
}

/// Create a transducer that applies `f` to every element.
pub fn map<F>(f: F) -> Map<Hole, F> {
    Map { seq: Hole, f }
}

impl<S, F, U> Sequence for Map<S, F>
where
    S: Sequence,
    F: FnMut(S::Item) -> U,
{
    type Item = U;

    fn produce(&mut self, visit: &mut dyn FnMut(U) -> bool) {
        let f = &mut self.f;
        self.seq.produce(&mut |item| visit(f(item)))
    }
}

impl<S, F, U> Transducer<S> for Map<Hole, F>
where
    S: Sequence,
    F: FnMut(S::Item) -> U,
{
    type Output = Map<S, F>;

    fn apply(self, seq: S) -> Map<S, F> {
        Map { seq, f: self.f }
    }
}

/// Keeps the elements matching a predicate.
///
/// Rejected elements are skipped without stopping upstream.
#[derive(Debug, Clone)]
pub struct Filter<S, P> {
    seq: S,
    predicate: P,
}

/// Create a transducer that keeps elements for which `predicate` holds.
pub fn filter<P>(predicate: P) -> Filter<Hole, P> {
    Filter {
        seq: Hole,
        predicate,
    }
}

impl<S, P> Sequence for Filter<S, P>
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn produce(&mut self, visit: &mut dyn FnMut(S::Item) -> bool) {
        let predicate = &mut self.predicate;
        self.seq.produce(&mut |item| if predicate(&item) { visit(item) } else { true })
    }
}

impl<S, P> Transducer<S> for Filter<Hole, P>
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool,
{
    type Output = Filter<S, P>;

    fn apply(self, seq: S) -> Filter<S, P> {
        Filter {
            seq,
            predicate: self.predicate,
        }
    }
}

/// Runs a side effect on each element, then forwards it unchanged.
#[derive(Debug, Clone)]
pub struct Each<S, F> {
    seq: S,
    f: F,
}

/// Create a transducer that calls `f` on every element strictly before the
/// element is passed downstream.
pub fn each<F>(f: F) -> Each<Hole, F> {
    Each { seq: Hole, f }
}

impl<S, F> Sequence for Each<S, F>
where
    S: Sequence,
    F: FnMut(&S::Item),
{
    type Item = S::Item;

    fn produce(&mut self, visit: &mut dyn FnMut(S::Item) -> bool) {
        let f = &mut self.f;
        self.seq.produce(&mut |item| {
            f(&item);
            visit(item)
        })
    }
}

impl<S, F> Transducer<S> for Each<Hole, F>
where
    S: Sequence,
    F: FnMut(&S::Item),
{
    type Output = Each<S, F>;

    fn apply(self, seq: S) -> Each<S, F> {
        Each { seq, f: self.f }
    }
}
