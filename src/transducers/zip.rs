use std::thread;

use super::{Hole, Transducer};
use crate::{
    pull::{pull_scoped_with, PullConfig},
    KeyedSequence, Sequence,
};

/// Walks two sequences in lockstep.
///
/// The source drives production; `other` is pulled one element at a time
/// through a scoped [`PullHandle`](crate::pull::PullHandle). Production ends
/// as soon as either side runs out. A panic in `other` is raised again in the
/// traversing thread; a worker that cannot be started counts as `other`
/// running out.
#[derive(Debug, Clone)]
pub struct Zip<S, B> {
    seq: S,
    other: B,
    config: PullConfig,
}

/// Create a transducer pairing each source element with the next element of
/// `other`.
pub fn zip<B>(other: B) -> Zip<Hole, B> {
    Zip {
        seq: Hole,
        other,
        config: PullConfig::default(),
    }
}

impl<S, B> Zip<S, B> {
    /// Configure the worker thread that pulls `other`.
    pub fn with_pull_config(mut self, config: PullConfig) -> Self {
        self.config = config;
        self
    }
}

impl<S, B> KeyedSequence for Zip<S, B>
where
    S: Sequence,
    B: Sequence + Send,
    B::Item: Send,
{
    type Key = S::Item;
    type Value = B::Item;

    fn produce_keyed(&mut self, visit: &mut dyn FnMut(S::Item, B::Item) -> bool) {
        let seq = &mut self.seq;
        let other = &mut self.other;
        let config = &self.config;
        thread::scope(|scope| {
            let mut handle = pull_scoped_with(scope, other, config);
            seq.produce(&mut |item| match handle.next_or_resume("zip") {
                Some(paired) => visit(item, paired),
                None => false,
            });
            handle.stop();
        })
    }
}

impl<S, B> Sequence for Zip<S, B>
where
    S: Sequence,
    B: Sequence + Send,
    B::Item: Send,
{
    type Item = (S::Item, B::Item);

    fn produce(&mut self, visit: &mut dyn FnMut(Self::Item) -> bool) {
        self.produce_keyed(&mut |a, b| visit((a, b)))
    }
}

impl<S, B> Transducer<S> for Zip<Hole, B>
where
    S: Sequence,
    B: Sequence + Send,
    B::Item: Send,
{
    type Output = Zip<S, B>;

    fn apply(self, seq: S) -> Zip<S, B> {
        Zip {
            seq,
            other: self.other,
            config: self.config,
        }
    }
}
