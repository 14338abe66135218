use super::{Hole, Transducer};
use crate::{
    build::{once, Once},
    Sequence,
};

/// Emits a sequence followed by a second one.
#[derive(Debug, Clone)]
pub struct Append<S, B> {
    seq: S,
    next: B,
}

/// Create a transducer that emits `next` after the source.
///
/// `next` is produced only when the source ran to completion. If downstream
/// stopped the source early, `next` is never touched.
pub fn append<B>(next: B) -> Append<Hole, B> {
    Append { seq: Hole, next }
}

/// Create a transducer that emits `value` after the source.
pub fn push_back<T: Clone>(value: T) -> Append<Hole, Once<T>> {
    append(once(value))
}

/// Transducer emitting a value ahead of the source. Created by
/// [`push_front`].
#[derive(Debug, Clone)]
pub struct PushFront<T> {
    value: T,
}

/// Create a transducer that emits `value` before the source.
pub fn push_front<T: Clone>(value: T) -> PushFront<T> {
    PushFront { value }
}

impl<S, B> Sequence for Append<S, B>
where
    S: Sequence,
    B: Sequence<Item = S::Item>,
{
    type Item = S::Item;

    fn produce(&mut self, visit: &mut dyn FnMut(S::Item) -> bool) {
        let mut stopped = false;
        self.seq.produce(&mut |item| {
            stopped = !visit(item);
            !stopped
        });
        if !stopped {
            self.next.produce(visit)
        }
    }
}

impl<S, B> Transducer<S> for Append<Hole, B>
where
    S: Sequence,
    B: Sequence<Item = S::Item>,
{
    type Output = Append<S, B>;

    fn apply(self, seq: S) -> Append<S, B> {
        Append {
            seq,
            next: self.next,
        }
    }
}

impl<S, T> Transducer<S> for PushFront<T>
where
    S: Sequence<Item = T>,
    T: Clone,
{
    type Output = Append<Once<T>, S>;

    fn apply(self, seq: S) -> Append<Once<T>, S> {
        Append {
            seq: once(self.value),
            next: seq,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build::{naturals, values},
        reducers::collect,
    };

    #[test]
    fn test_append_emits_both_in_order() {
        let seq = values([1, 2]).append(values([3, 4]));
        assert_eq!(collect(seq), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_append_skipped_after_early_stop() {
        let mut touched = false;
        let tail = values([100]).each(|_| touched = true);
        let seq = values([1, 2, 3]).append(tail).take(2);
        assert_eq!(collect(seq), vec![1, 2]);
        assert!(!touched);
    }

    #[test]
    fn test_append_stop_inside_second_part() {
        let seq = values([1]).append(naturals().map(|x| x as i32 + 10)).take(3);
        assert_eq!(collect(seq), vec![1, 10, 11]);
    }

    #[test]
    fn test_push_front_and_back() {
        let seq = values([2, 3]).push_front(1).push_back(4);
        assert_eq!(collect(seq), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_push_front_as_transducer() {
        let seq = push_front(0).apply(values([1, 2]));
        assert_eq!(collect(seq), vec![0, 1, 2]);
    }
}
