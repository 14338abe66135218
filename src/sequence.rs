//! Core trait for push-style sequences.
//!
//! This module defines the [`Sequence`] trait, the building block every other
//! part of this crate is written against. A [`Sequence`] describes how to
//! produce zero or more values in order by repeatedly calling a visitor.
//!
//! # The Sequence Trait
//!
//! [`Sequence`] has a single required method, [`produce`](Sequence::produce):
//! - The visitor is called once per element, in order
//! - Returning `true` from the visitor asks for the next element
//! - Returning `false` stops production immediately; the producer must not
//!   compute or visit anything further
//!
//! # Examples
//!
//! ```rust
//! use seqflow::prelude::*;
//!
//! let mut seen = Vec::new();
//! values([1, 2, 3, 4]).produce(&mut |x| {
//!     seen.push(x);
//!     x < 2
//! });
//! assert_eq!(seen, vec![1, 2]);
//! ```

use std::{hash::Hash, ops::Sub, time::Duration, time::Instant};

use crate::{
    build::Once,
    transducers::{
        self, Append, Clock, Debounce, Dedup, Delta, Each, Enumerate, Every, Filter, Fuse, Map,
        MonotonicClock, Skip, SkipWhile, Take, TakeWhile, Tap, Transducer, Unique, Visitor,
        WriteTo, Zip,
    },
};

/// A lazy, push-style producer of an ordered stream of values.
///
/// Production is driven entirely by the caller: nothing happens until
/// [`produce`](Sequence::produce) is called, and a visitor returning `false`
/// ends production. Unless documented otherwise a sequence may be produced
/// any number of times; per-traversal state lives inside `produce`.
///
/// ```rust
/// use seqflow::prelude::*;
///
/// let doubled = values([1, 2, 3]).map(|x| x * 2);
/// assert_eq!(collect(doubled), vec![2, 4, 6]);
/// ```
pub trait Sequence {
    /// Type of the produced elements
    type Item;

    /// Call `visit` once per element until it returns `false` or the
    /// elements run out.
    fn produce(&mut self, visit: &mut dyn FnMut(Self::Item) -> bool);

    /// Feed this sequence through a transducer.
    fn apply<T>(self, transducer: T) -> T::Output
    where
        Self: Sized,
        T: Transducer<Self>,
    {
        transducer.apply(self)
    }

    fn boxed<'a>(self) -> Box<dyn Sequence<Item = Self::Item> + 'a>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }

    /// Transform each element.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> U,
    {
        transducers::map(f).apply(self)
    }

    /// Keep only the elements matching `p`.
    fn filter<P>(self, p: P) -> Filter<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        transducers::filter(p).apply(self)
    }

    /// Call `f` on each element before passing it through unchanged.
    fn each<F>(self, f: F) -> Each<Self, F>
    where
        Self: Sized,
        F: FnMut(&Self::Item),
    {
        transducers::each(f).apply(self)
    }

    /// Run `tx` over this sequence for its side effects while passing every
    /// element through unchanged.
    fn visitor<X>(self, tx: X) -> Visitor<Self, X>
    where
        Self: Sized,
        Self::Item: Clone,
        X: for<'a> Transducer<Tap<'a, Self::Item>> + Clone,
    {
        transducers::visitor(tx).apply(self)
    }

    /// Write each byte chunk to `writer`, emitting the outcome of each write.
    fn write_to<W>(self, writer: W) -> WriteTo<Self, W>
    where
        Self: Sized,
        Self::Item: AsRef<[u8]>,
        W: std::io::Write,
    {
        transducers::write(writer).apply(self)
    }

    /// Emit the first `count` elements.
    fn take(self, count: usize) -> Take<Self>
    where
        Self: Sized,
    {
        transducers::take(count).apply(self)
    }

    /// Emit elements while `p` holds.
    fn take_while<P>(self, p: P) -> TakeWhile<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        transducers::take_while(p).apply(self)
    }

    /// Suppress the first `count` elements.
    fn skip(self, count: usize) -> Skip<Self>
    where
        Self: Sized,
    {
        transducers::skip(count).apply(self)
    }

    /// Suppress the leading run of elements matching `p`.
    fn skip_while<P>(self, p: P) -> SkipWhile<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        transducers::skip_while(p).apply(self)
    }

    /// Emit `next` after this sequence, unless the consumer stopped early.
    fn append<B>(self, next: B) -> Append<Self, B>
    where
        Self: Sized,
        B: Sequence<Item = Self::Item>,
    {
        transducers::append(next).apply(self)
    }

    /// Emit `value` before the elements of this sequence.
    fn push_front(self, value: Self::Item) -> Append<Once<Self::Item>, Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        transducers::push_front(value).apply(self)
    }

    /// Emit `value` after the elements of this sequence.
    fn push_back(self, value: Self::Item) -> Append<Self, Once<Self::Item>>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        transducers::push_back(value).apply(self)
    }

    /// Drop elements arriving less than `period` after the last emitted one.
    fn debounce(self, period: Duration) -> Debounce<Self, MonotonicClock>
    where
        Self: Sized,
    {
        transducers::debounce(period).apply(self)
    }

    /// [`debounce`](Sequence::debounce) measured against a custom clock.
    fn debounce_with<C>(self, period: Duration, clock: C) -> Debounce<Self, C>
    where
        Self: Sized,
        C: Clock,
    {
        transducers::debounce_with(period, clock).apply(self)
    }

    /// Collapse runs of equal adjacent elements.
    fn dedup(self) -> Dedup<Self>
    where
        Self: Sized + Send,
        Self::Item: PartialEq + Clone + Send,
    {
        transducers::dedup().apply(self)
    }

    /// Suppress every element equal to one already emitted.
    fn unique(self) -> Unique<Self>
    where
        Self: Sized,
        Self::Item: Eq + Hash + Clone,
    {
        transducers::unique().apply(self)
    }

    /// Emit the difference between each element and the one before it.
    fn delta(self) -> Delta<Self>
    where
        Self: Sized,
        Self::Item: Sub + Clone,
    {
        transducers::delta().apply(self)
    }

    /// [`delta`](Sequence::delta) over timestamps.
    fn time_delta(self) -> Delta<Self>
    where
        Self: Sized + Sequence<Item = Instant>,
    {
        transducers::time_delta().apply(self)
    }

    /// Pair each element with its zero-based index.
    fn enumerate(self) -> Enumerate<Self>
    where
        Self: Sized,
    {
        transducers::enumerate().apply(self)
    }

    /// Emit every `n`th element.
    fn every(self, n: usize) -> Every<Self>
    where
        Self: Sized,
    {
        transducers::every(n).apply(self)
    }

    /// Unwrap `Some` elements, stopping at the first `None`.
    fn fuse<T>(self) -> Fuse<Self>
    where
        Self: Sized + Sequence<Item = Option<T>>,
    {
        transducers::fuse().apply(self)
    }

    /// Pair each element with the next element of `other`.
    fn zip<B>(self, other: B) -> Zip<Self, B>
    where
        Self: Sized,
        B: Sequence + Send,
        B::Item: Send,
    {
        transducers::zip(other).apply(self)
    }
}

impl<S> Sequence for &'_ mut S
where
    S: Sequence + ?Sized,
{
    type Item = S::Item;

    fn produce(&mut self, visit: &mut dyn FnMut(Self::Item) -> bool) {
        (**self).produce(visit)
    }
}

impl<S> Sequence for Box<S>
where
    S: Sequence + ?Sized,
{
    type Item = S::Item;

    fn produce(&mut self, visit: &mut dyn FnMut(Self::Item) -> bool) {
        (**self).produce(visit)
    }
}

impl<S> Sequence for Option<S>
where
    S: Sequence,
{
    type Item = S::Item;

    fn produce(&mut self, visit: &mut dyn FnMut(Self::Item) -> bool) {
        if let Some(seq) = self {
            seq.produce(visit)
        }
    }
}

impl<L, R> Sequence for either::Either<L, R>
where
    L: Sequence,
    R: Sequence<Item = L::Item>,
{
    type Item = L::Item;

    fn produce(&mut self, visit: &mut dyn FnMut(Self::Item) -> bool) {
        match self {
            either::Either::Left(l) => l.produce(visit),
            either::Either::Right(r) => r.produce(visit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build::values, reducers::collect};
    use either::Either;

    #[test]
    fn test_visitor_false_stops_production() {
        let mut visited = Vec::new();
        values([1, 2, 3, 4, 5]).produce(&mut |x| {
            visited.push(x);
            x != 3
        });
        assert_eq!(visited, vec![1, 2, 3]);
    }

    #[test]
    fn test_sequence_can_be_produced_twice() {
        let mut seq = values([1, 2, 3]).map(|x| x * 10);
        assert_eq!(collect(&mut seq), vec![10, 20, 30]);
        assert_eq!(collect(&mut seq), vec![10, 20, 30]);
    }

    #[test]
    fn test_boxed_sequence_forwards() {
        let seq = values([1, 2, 3]).filter(|x| x % 2 == 1).boxed();
        assert_eq!(collect(seq), vec![1, 3]);
    }

    #[test]
    fn test_option_none_is_empty() {
        let none: Option<crate::build::Values<i32>> = None;
        assert!(collect(none).is_empty());
        assert_eq!(collect(Some(values([7]))), vec![7]);
    }

    #[test]
    fn test_either_picks_one_side() {
        let pick = |left: bool| {
            if left {
                Either::Left(values([1, 2]))
            } else {
                Either::Right(values([3, 4]).map(|x| x * 2))
            }
        };
        assert_eq!(collect(pick(true)), vec![1, 2]);
        assert_eq!(collect(pick(false)), vec![6, 8]);
    }

    #[test]
    fn test_stop_propagates_through_nested_producers() {
        let mut upstream = 0;
        let seq = crate::build::naturals()
            .each(|_| upstream += 1)
            .map(|x| x * 2)
            .filter(|x| x % 3 == 0)
            .take(2);
        assert_eq!(collect(seq), vec![0, 6]);
        assert_eq!(upstream, 4);
    }
}
