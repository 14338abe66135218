use std::marker::PhantomData;

use crate::Sequence;

/// Yields clones of an owned vector's elements.
///
/// Created by [`values`]. Re-producible: every traversal starts from the
/// first element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Values<T> {
    items: Vec<T>,
}

/// Create a sequence over the elements of a collection.
///
/// ```rust
/// use seqflow::prelude::*;
///
/// let seq = values(vec![1, 2, 3]);
/// assert_eq!(collect(seq), vec![1, 2, 3]);
/// ```
pub fn values<T, I>(items: I) -> Values<T>
where
    I: IntoIterator<Item = T>,
{
    Values {
        items: items.into_iter().collect(),
    }
}

impl<T> Values<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Clone> Sequence for Values<T> {
    type Item = T;

    fn produce(&mut self, visit: &mut dyn FnMut(T) -> bool) {
        for item in &self.items {
            if !visit(item.clone()) {
                return;
            }
        }
    }
}

/// Yields references into a borrowed slice. Created by [`from_slice`].
#[derive(Debug, Clone, Copy)]
pub struct FromSlice<'a, T> {
    items: &'a [T],
}

/// Create a sequence of references over a slice.
pub fn from_slice<T>(items: &[T]) -> FromSlice<'_, T> {
    FromSlice { items }
}

impl<'a, T> Sequence for FromSlice<'a, T> {
    type Item = &'a T;

    fn produce(&mut self, visit: &mut dyn FnMut(&'a T) -> bool) {
        for item in self.items {
            if !visit(item) {
                return;
            }
        }
    }
}

/// Yields the items of a cloneable iterable. Created by [`from_iter`].
#[derive(Debug, Clone)]
pub struct FromIter<I> {
    iter: I,
}

/// Create a sequence from anything that can be iterated more than once.
///
/// Each traversal iterates a fresh clone, so ranges and iterator chains can
/// be produced repeatedly.
///
/// ```rust
/// use seqflow::prelude::*;
///
/// let mut evens = from_iter((0..10).step_by(2));
/// assert_eq!(collect(&mut evens), vec![0, 2, 4, 6, 8]);
/// assert_eq!(length(&mut evens), 5);
/// ```
pub fn from_iter<I>(iter: I) -> FromIter<I>
where
    I: IntoIterator + Clone,
{
    FromIter { iter }
}

impl<I> Sequence for FromIter<I>
where
    I: IntoIterator + Clone,
{
    type Item = I::Item;

    fn produce(&mut self, visit: &mut dyn FnMut(I::Item) -> bool) {
        for item in self.iter.clone() {
            if !visit(item) {
                return;
            }
        }
    }
}

/// Yields a single value. Created by [`once`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Once<T>(T);

/// Create a sequence that yields `value` exactly once per traversal.
pub fn once<T: Clone>(value: T) -> Once<T> {
    Once(value)
}

impl<T: Clone> Sequence for Once<T> {
    type Item = T;

    fn produce(&mut self, visit: &mut dyn FnMut(T) -> bool) {
        visit(self.0.clone());
    }
}

/// Yields nothing. Created by [`empty`].
pub struct Empty<T>(PhantomData<fn() -> T>);

impl<T> Clone for Empty<T> {
    fn clone(&self) -> Self {
        Empty(PhantomData)
    }
}

impl<T> std::fmt::Debug for Empty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Empty")
    }
}

/// Create a sequence with no elements.
pub fn empty<T>() -> Empty<T> {
    Empty(PhantomData)
}

impl<T> Sequence for Empty<T> {
    type Item = T;

    fn produce(&mut self, _visit: &mut dyn FnMut(T) -> bool) {}
}
