use super::{Hole, Transducer};
use crate::{KeyedSequence, Sequence};

/// Pairs elements with their zero-based position.
///
/// Usable both as a plain sequence of `(usize, T)` tuples and as a
/// [`KeyedSequence`] keyed by position.
#[derive(Debug, Clone)]
pub struct Enumerate<S> {
    seq: S,
}

pub fn enumerate() -> Enumerate<Hole> {
    Enumerate { seq: Hole }
}

impl<S: Sequence> KeyedSequence for Enumerate<S> {
    type Key = usize;
    type Value = S::Item;

    fn produce_keyed(&mut self, visit: &mut dyn FnMut(usize, S::Item) -> bool) {
        let mut index = 0;
        self.seq.produce(&mut |item| {
            let at = index;
            index += 1;
            visit(at, item)
        })
    }
}

impl<S: Sequence> Sequence for Enumerate<S> {
    type Item = (usize, S::Item);

    fn produce(&mut self, visit: &mut dyn FnMut(Self::Item) -> bool) {
        self.produce_keyed(&mut |index, item| visit((index, item)))
    }
}

impl<S: Sequence> Transducer<S> for Enumerate<Hole> {
    type Output = Enumerate<S>;

    fn apply(self, seq: S) -> Enumerate<S> {
        Enumerate { seq }
    }
}

/// Samples every `n`th element.
#[derive(Debug, Clone)]
pub struct Every<S> {
    seq: S,
    n: usize,
}

/// Create a transducer emitting the elements at one-based positions `n`,
/// `2n`, `3n` and so on. `every(0)` emits nothing and never touches upstream.
pub fn every(n: usize) -> Every<Hole> {
    Every { seq: Hole, n }
}

impl<S: Sequence> Sequence for Every<S> {
    type Item = S::Item;

    fn produce(&mut self, visit: &mut dyn FnMut(S::Item) -> bool) {
        let n = self.n;
        if n == 0 {
            return;
        }
        let mut position = 0;
        self.seq.produce(&mut |item| {
            position += 1;
            if position % n == 0 {
                visit(item)
            } else {
                true
            }
        })
    }
}

impl<S: Sequence> Transducer<S> for Every<Hole> {
    type Output = Every<S>;

    fn apply(self, seq: S) -> Every<S> {
        Every { seq, n: self.n }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build::{naturals, values},
        keyed::Pair,
        reducers::collect,
    };

    #[test]
    fn test_enumerate_tuples() {
        let seq = values(['a', 'b', 'c']).enumerate();
        assert_eq!(collect(seq), vec![(0, 'a'), (1, 'b'), (2, 'c')]);
    }

    #[test]
    fn test_enumerate_as_keyed() {
        let seq = values(["x", "y"]).enumerate().pairs();
        assert_eq!(collect(seq), vec![Pair::new(0, "x"), Pair::new(1, "y")]);
    }

    #[test]
    fn test_enumerate_restarts_each_traversal() {
        let mut seq = values([9, 9]).enumerate();
        assert_eq!(collect(&mut seq), vec![(0, 9), (1, 9)]);
        assert_eq!(collect(&mut seq), vec![(0, 9), (1, 9)]);
    }

    #[test]
    fn test_every_nth_one_based() {
        let seq = naturals().skip(1).every(3).take(3);
        assert_eq!(collect(seq), vec![3, 6, 9]);
    }

    #[test]
    fn test_every_one_passes_all() {
        assert_eq!(collect(values([1, 2, 3]).every(1)), vec![1, 2, 3]);
    }

    #[test]
    fn test_every_zero_is_empty() {
        let mut touched = false;
        let seq = values([1, 2, 3]).each(|_| touched = true).every(0);
        assert!(collect(seq).is_empty());
        assert!(!touched);
    }
}
