//! Terminal consumers of sequences.
//!
//! A reducer drains a [`Sequence`] into a single value. Each one takes its
//! sequence by value; pass `&mut seq` to keep the sequence around for another
//! traversal. Reducers that can decide early ([`first`], [`index`], [`any`],
//! [`all`]) stop upstream as soon as the answer is known.
//!
//! ```rust
//! use seqflow::prelude::*;
//!
//! let mut seq = values([3, 1, 4, 1, 5]);
//! assert_eq!(max(&mut seq), Some(5));
//! assert_eq!(length(&mut seq), 5);
//! assert_eq!(reduce(&mut seq, 0, |x, acc| x + acc), 14);
//! ```

use std::hash::Hash;

use indexmap::IndexMap;
use num_traits::ToPrimitive;

use crate::Sequence;

/// Faults of reducers computing over the element values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReduceError {
    /// The sequence produced no elements.
    #[error("cannot average an empty sequence")]
    Empty,
    /// An element has no `f64` representation.
    #[error("element is not representable as f64")]
    NotRepresentable,
}

/// Gather every element into a `Vec`, in order.
pub fn collect<S: Sequence>(mut seq: S) -> Vec<S::Item> {
    let mut items = Vec::new();
    seq.produce(&mut |item| {
        items.push(item);
        true
    });
    items
}

/// Left fold: `f(x, acc)` is called for every element, starting from `seed`.
///
/// The accumulator is moved into `f` and back, with `A::default()` standing
/// in for the duration of the call.
pub fn reduce<S, A, F>(mut seq: S, seed: A, mut f: F) -> A
where
    S: Sequence,
    A: Default,
    F: FnMut(S::Item, A) -> A,
{
    let mut acc = seed;
    seq.produce(&mut |item| {
        acc = f(item, std::mem::take(&mut acc));
        true
    });
    acc
}

/// The first element, or `T::default()` for an empty sequence.
pub fn first<S>(mut seq: S) -> S::Item
where
    S: Sequence,
    S::Item: Default,
{
    let mut found = None;
    seq.produce(&mut |item| {
        found = Some(item);
        false
    });
    found.unwrap_or_default()
}

/// The last element, or `T::default()` for an empty sequence.
pub fn last<S>(mut seq: S) -> S::Item
where
    S: Sequence,
    S::Item: Default,
{
    let mut found = None;
    seq.produce(&mut |item| {
        found = Some(item);
        true
    });
    found.unwrap_or_default()
}

/// The element at zero-based position `at`, if the sequence is long enough.
pub fn index<S: Sequence>(mut seq: S, at: usize) -> Option<S::Item> {
    let mut position = 0;
    let mut found = None;
    seq.produce(&mut |item| {
        if position == at {
            found = Some(item);
            return false;
        }
        position += 1;
        true
    });
    found
}

/// Number of elements.
pub fn length<S: Sequence>(mut seq: S) -> usize {
    let mut count = 0;
    seq.produce(&mut |_| {
        count += 1;
        true
    });
    count
}

/// The greatest element. Of several equal maxima the last one wins.
pub fn max<S>(seq: S) -> Option<S::Item>
where
    S: Sequence,
    S::Item: Ord,
{
    reduce(seq, None, |item, best| match best {
        Some(best) if best > item => Some(best),
        _ => Some(item),
    })
}

/// The smallest element. Of several equal minima the first one wins.
pub fn min<S>(seq: S) -> Option<S::Item>
where
    S: Sequence,
    S::Item: Ord,
{
    reduce(seq, None, |item, best| match best {
        Some(best) if best <= item => Some(best),
        _ => Some(item),
    })
}

/// Arithmetic mean of the elements as `f64`.
///
/// Stops at the first element that cannot be converted.
pub fn average<S>(mut seq: S) -> Result<f64, ReduceError>
where
    S: Sequence,
    S::Item: ToPrimitive,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    let mut representable = true;
    seq.produce(&mut |item| match item.to_f64() {
        Some(value) => {
            sum += value;
            count += 1;
            true
        }
        None => {
            representable = false;
            false
        }
    });
    if !representable {
        return Err(ReduceError::NotRepresentable);
    }
    if count == 0 {
        return Err(ReduceError::Empty);
    }
    Ok(sum / count as f64)
}

/// Occurrence count of each distinct element, in first-seen order.
pub fn frequency<S>(mut seq: S) -> IndexMap<S::Item, usize>
where
    S: Sequence,
    S::Item: Eq + Hash,
{
    let mut counts = IndexMap::new();
    seq.produce(&mut |item| {
        *counts.entry(item).or_insert(0) += 1;
        true
    });
    counts
}

/// Whether some element satisfies `predicate`. Stops at the first match.
pub fn any<S, P>(mut seq: S, mut predicate: P) -> bool
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool,
{
    let mut matched = false;
    seq.produce(&mut |item| {
        matched = predicate(&item);
        !matched
    });
    matched
}

/// Whether every element satisfies `predicate`. Stops at the first miss, and
/// is `true` for an empty sequence.
pub fn all<S, P>(mut seq: S, mut predicate: P) -> bool
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool,
{
    let mut holds = true;
    seq.produce(&mut |item| {
        holds = predicate(&item);
        holds
    });
    holds
}

/// Drain the sequence, calling `f` on every element.
pub fn for_each<S, F>(mut seq: S, mut f: F)
where
    S: Sequence,
    F: FnMut(S::Item),
{
    seq.produce(&mut |item| {
        f(item);
        true
    })
}
