use std::ops::Sub;

use super::{Hole, Transducer};
use crate::Sequence;

/// Emits the difference between consecutive elements.
///
/// The first element only seeds the comparison and is never emitted, so a
/// source of `n` elements yields `n - 1` deltas.
#[derive(Debug, Clone)]
pub struct Delta<S> {
    seq: S,
}

/// Create a transducer emitting `x[i] - x[i - 1]`.
pub fn delta() -> Delta<Hole> {
    Delta { seq: Hole }
}

/// Create a transducer turning timestamps into the
/// [`Duration`](std::time::Duration) elapsed between them.
pub fn time_delta() -> Delta<Hole> {
    delta()
}

impl<S> Sequence for Delta<S>
where
    S: Sequence,
    S::Item: Sub + Clone,
{
    type Item = <S::Item as Sub>::Output;

    fn produce(&mut self, visit: &mut dyn FnMut(Self::Item) -> bool) {
        let mut previous: Option<S::Item> = None;
        self.seq.produce(&mut |item| match previous.replace(item.clone()) {
            Some(prev) => visit(item - prev),
            None => true,
        })
    }
}

impl<S> Transducer<S> for Delta<Hole>
where
    S: Sequence,
    S::Item: Sub + Clone,
{
    type Output = Delta<S>;

    fn apply(self, seq: S) -> Delta<S> {
        Delta { seq }
    }
}
