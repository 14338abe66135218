//! Sequences of key/value pairs.
//!
//! A [`KeyedSequence`] produces `(key, value)` pairs through a two-argument
//! visitor. Keys are unique per emission, not necessarily across a whole
//! traversal. Keyed sequences convert to and from plain sequences of
//! [`Pair`]:
//!
//! ```rust
//! use seqflow::prelude::*;
//!
//! let indexed = values(["a", "b"]).enumerate().pairs();
//! let pairs = collect(indexed);
//! assert_eq!(pairs[1], Pair::new(1, "b"));
//!
//! let mut keys = Vec::new();
//! keyed(values(pairs)).produce_keyed(&mut |k, _| {
//!     keys.push(k);
//!     true
//! });
//! assert_eq!(keys, vec![0, 1]);
//! ```

use crate::Sequence;

/// A key together with its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pair<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Pair<K, V> {
    pub const fn new(key: K, value: V) -> Self {
        Pair { key, value }
    }

    pub fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Pair<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Pair { key, value }
    }
}

impl<K, V> From<Pair<K, V>> for (K, V) {
    fn from(pair: Pair<K, V>) -> Self {
        pair.into_tuple()
    }
}

/// A push-style producer of key/value pairs.
pub trait KeyedSequence {
    type Key;
    type Value;

    /// Call `visit` once per pair until it returns `false` or the pairs run
    /// out.
    fn produce_keyed(&mut self, visit: &mut dyn FnMut(Self::Key, Self::Value) -> bool);

    /// View this keyed sequence as a plain sequence of [`Pair`]s.
    fn pairs(self) -> Pairs<Self>
    where
        Self: Sized,
    {
        Pairs(self)
    }
}

/// Plain [`Sequence`] view of a [`KeyedSequence`], created by
/// [`KeyedSequence::pairs`].
#[derive(Debug, Clone)]
pub struct Pairs<S>(S);

impl<S> Sequence for Pairs<S>
where
    S: KeyedSequence,
{
    type Item = Pair<S::Key, S::Value>;

    fn produce(&mut self, visit: &mut dyn FnMut(Self::Item) -> bool) {
        self.0.produce_keyed(&mut |key, value| visit(Pair { key, value }))
    }
}

/// [`KeyedSequence`] view of a sequence of [`Pair`]s, created by [`keyed`].
#[derive(Debug, Clone)]
pub struct Keyed<S>(S);

/// Turn a sequence of [`Pair`]s into a [`KeyedSequence`].
pub fn keyed<S, K, V>(seq: S) -> Keyed<S>
where
    S: Sequence<Item = Pair<K, V>>,
{
    Keyed(seq)
}

impl<S, K, V> KeyedSequence for Keyed<S>
where
    S: Sequence<Item = Pair<K, V>>,
{
    type Key = K;
    type Value = V;

    fn produce_keyed(&mut self, visit: &mut dyn FnMut(K, V) -> bool) {
        self.0.produce(&mut |pair| visit(pair.key, pair.value))
    }
}

impl<S> Sequence for Keyed<S>
where
    S: Sequence,
{
    type Item = S::Item;

    fn produce(&mut self, visit: &mut dyn FnMut(Self::Item) -> bool) {
        self.0.produce(visit)
    }
}
