use super::{Hole, Transducer};
use crate::Sequence;

/// Emits a leading number of elements, then stops upstream.
#[derive(Debug, Clone)]
pub struct Take<S> {
    seq: S,
    count: usize,
}

/// Create a transducer that emits the first `count` elements.
///
/// Upstream is asked to stop right after the last wanted element, so no
/// element beyond it is ever computed. `take(0)` never touches upstream.
pub fn take(count: usize) -> Take<Hole> {
    Take { seq: Hole, count }
}

impl<S: Sequence> Sequence for Take<S> {
    type Item = S::Item;

    fn produce(&mut self, visit: &mut dyn FnMut(S::Item) -> bool) {
        let mut remaining = self.count;
        if remaining == 0 {
            return;
        }
        self.seq.produce(&mut |item| {
            remaining -= 1;
            visit(item) && remaining > 0
        })
    }
}

impl<S: Sequence> Transducer<S> for Take<Hole> {
    type Output = Take<S>;

    fn apply(self, seq: S) -> Take<S> {
        Take {
            seq,
            count: self.count,
        }
    }
}

/// Emits elements while a predicate holds.
#[derive(Debug, Clone)]
pub struct TakeWhile<S, P> {
    seq: S,
    predicate: P,
}

/// Create a transducer that emits elements until `predicate` first fails.
///
/// The failing element is not emitted and upstream is stopped on it.
pub fn take_while<P>(predicate: P) -> TakeWhile<Hole, P> {
    TakeWhile {
        seq: Hole,
        predicate,
    }
}

impl<S, P> Sequence for TakeWhile<S, P>
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn produce(&mut self, visit: &mut dyn FnMut(S::Item) -> bool) {
        let predicate = &mut self.predicate;
        self.seq.produce(&mut |item| predicate(&item) && visit(item))
    }
}

impl<S, P> Transducer<S> for TakeWhile<Hole, P>
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool,
{
    type Output = TakeWhile<S, P>;

    fn apply(self, seq: S) -> TakeWhile<S, P> {
        TakeWhile {
            seq,
            predicate: self.predicate,
        }
    }
}

/// Suppresses a leading number of elements.
#[derive(Debug, Clone)]
pub struct Skip<S> {
    seq: S,
    count: usize,
}

/// Create a transducer that drops the first `count` elements and passes the
/// rest through.
pub fn skip(count: usize) -> Skip<Hole> {
    Skip { seq: Hole, count }
}

impl<S: Sequence> Sequence for Skip<S> {
    type Item = S::Item;

    fn produce(&mut self, visit: &mut dyn FnMut(S::Item) -> bool) {
        let mut remaining = self.count;
        self.seq.produce(&mut |item| {
            if remaining > 0 {
                remaining -= 1;
                true
            } else {
                visit(item)
            }
        })
    }
}

impl<S: Sequence> Transducer<S> for Skip<Hole> {
    type Output = Skip<S>;

    fn apply(self, seq: S) -> Skip<S> {
        Skip {
            seq,
            count: self.count,
        }
    }
}

/// Suppresses the leading run of elements matching a predicate.
#[derive(Debug, Clone)]
pub struct SkipWhile<S, P> {
    seq: S,
    predicate: P,
}

/// Create a transducer that drops elements while `predicate` holds.
///
/// Once an element fails the predicate, it and everything after it pass
/// through, including later elements that would match.
pub fn skip_while<P>(predicate: P) -> SkipWhile<Hole, P> {
    SkipWhile {
        seq: Hole,
        predicate,
    }
}

impl<S, P> Sequence for SkipWhile<S, P>
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool,
{
    type Item = S::Item;

    fn produce(&mut self, visit: &mut dyn FnMut(S::Item) -> bool) {
        let predicate = &mut self.predicate;
        let mut skipping = true;
        self.seq.produce(&mut |item| {
            if skipping && predicate(&item) {
                return true;
            }
            skipping = false;
            visit(item)
        })
    }
}

impl<S, P> Transducer<S> for SkipWhile<Hole, P>
where
    S: Sequence,
    P: FnMut(&S::Item) -> bool,
{
    type Output = SkipWhile<S, P>;

    fn apply(self, seq: S) -> SkipWhile<S, P> {
        SkipWhile {
            seq,
            predicate: self.predicate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build::{generate, naturals, values},
        reducers::collect,
    };

    #[test]
    fn test_take_does_not_look_ahead() {
        let mut computed = 0;
        let seq = generate(|| {
            computed += 1;
            computed
        })
        .take(3);
        assert_eq!(collect(seq), vec![1, 2, 3]);
        assert_eq!(computed, 3);
    }

    #[test]
    fn test_take_zero_never_touches_upstream() {
        let mut computed = 0;
        let seq = generate(|| {
            computed += 1;
            computed
        })
        .take(0);
        assert!(collect(seq).is_empty());
        assert_eq!(computed, 0);
    }

    #[test]
    fn test_take_more_than_available() {
        assert_eq!(collect(values([1, 2]).take(10)), vec![1, 2]);
    }

    #[test]
    fn test_take_while_excludes_failing_element() {
        let mut seen = Vec::new();
        let seq = naturals().each(|x| seen.push(*x)).take_while(|x| *x < 3);
        assert_eq!(collect(seq), vec![0, 1, 2]);
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_skip_passes_remainder() {
        assert_eq!(collect(values([1, 2, 3, 4]).skip(2)), vec![3, 4]);
        assert!(collect(values([1, 2]).skip(5)).is_empty());
    }

    #[test]
    fn test_skip_while_only_drops_leading_run() {
        let seq = values([1, 1, 5, 1, 7]).skip_while(|x| *x == 1);
        assert_eq!(collect(seq), vec![5, 1, 7]);
    }

    #[test]
    fn test_take_state_resets_per_traversal() {
        let mut seq = values([1, 2, 3]).take(2);
        assert_eq!(collect(&mut seq), vec![1, 2]);
        assert_eq!(collect(&mut seq), vec![1, 2]);
    }
}
