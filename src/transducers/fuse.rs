use super::{Hole, Transducer};
use crate::Sequence;

/// Unwraps a sequence of options up to its first `None`.
#[derive(Debug, Clone)]
pub struct Fuse<S> {
    seq: S,
}

/// Create a transducer that emits the contents of `Some` elements and stops
/// upstream at the first `None`.
pub fn fuse() -> Fuse<Hole> {
    Fuse { seq: Hole }
}

impl<S, T> Sequence for Fuse<S>
where
    S: Sequence<Item = Option<T>>,
{
    type Item = T;

    fn produce(&mut self, visit: &mut dyn FnMut(T) -> bool) {
        self.seq.produce(&mut |item| match item {
            Some(value) => visit(value),
            None => false,
        })
    }
}

impl<S, T> Transducer<S> for Fuse<Hole>
where
    S: Sequence<Item = Option<T>>,
{
    type Output = Fuse<S>;

    fn apply(self, seq: S) -> Fuse<S> {
        Fuse { seq }
    }
}
