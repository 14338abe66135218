//! Composable sequence-to-sequence transformations.
//!
//! A [`Transducer`] maps one [`Sequence`] to another. Every adapter in this
//! module comes in two shapes sharing one struct:
//!
//! - **unapplied**, with a [`Hole`] where the source goes, as returned by the
//!   free functions ([`map`], [`take`], ...). These are transducers and can
//!   be composed with [`chain`] before any source exists.
//! - **applied**, with a real source, as returned by [`Transducer::apply`] or
//!   the matching [`Sequence`] method. These are sequences.
//!
//! ```rust
//! use seqflow::prelude::*;
//!
//! let first_odd_squares = chain(filter(|x: &u64| x % 2 == 1), map(|x: u64| x * x));
//! let seq = first_odd_squares.apply(naturals()).take(3);
//! assert_eq!(collect(seq), vec![1, 9, 25]);
//! ```
//!
//! State such as counters or seen-sets is created inside each
//! [`produce`](Sequence::produce) call, so re-traversing an applied adapter
//! starts from scratch.

mod append;
mod chain;
mod debounce;
mod dedup;
mod delta;
mod fuse;
mod index;
mod map;
mod take;
mod visitor;
mod write;
mod zip;

pub use append::{append, push_back, push_front, Append, PushFront};
pub use chain::{chain, chain3, chain4, identity, Chain, Identity};
pub use debounce::{debounce, debounce_with, Clock, Debounce, MonotonicClock};
pub use dedup::{dedup, unique, Dedup, Unique};
pub use delta::{delta, time_delta, Delta};
pub use fuse::{fuse, Fuse};
pub use index::{enumerate, every, Enumerate, Every};
pub use map::{each, filter, map, Each, Filter, Map};
pub use take::{skip, skip_while, take, take_while, Skip, SkipWhile, Take, TakeWhile};
pub use visitor::{visitor, Tap, Visitor};
pub use write::{write, WriteTo};
pub use zip::{zip, Zip};

use crate::Sequence;

/// Placeholder source of an unapplied adapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hole;

/// A pure mapping from one [`Sequence`] to another.
///
/// Closures `FnOnce(S) -> O` returning a sequence are transducers too.
pub trait Transducer<S: Sequence> {
    type Output: Sequence;

    fn apply(self, seq: S) -> Self::Output;
}

impl<S, O, F> Transducer<S> for F
where
    S: Sequence,
    O: Sequence,
    F: FnOnce(S) -> O,
{
    type Output = O;

    fn apply(self, seq: S) -> O {
        self(seq)
    }
}
