use std::{collections::HashSet, hash::Hash, thread};

use super::{Hole, Transducer};
use crate::{
    pull::{pull_scoped_with, PullConfig},
    Sequence,
};

/// Collapses runs of equal adjacent elements into their first element.
///
/// The source is drained through a scoped [`PullHandle`](crate::pull::PullHandle)
/// so each element can be compared against its predecessor before being
/// passed on. The worker lives only for one traversal.
///
/// A panic in the source is raised again in the traversing thread. If the
/// worker cannot be started the traversal simply ends.
#[derive(Debug, Clone)]
pub struct Dedup<S> {
    seq: S,
    config: PullConfig,
}

/// Create a transducer that drops elements equal to the one right before
/// them. Non-adjacent repeats are kept.
pub fn dedup() -> Dedup<Hole> {
    Dedup {
        seq: Hole,
        config: PullConfig::default(),
    }
}

impl<S> Dedup<S> {
    /// Configure the worker thread that drains the source.
    pub fn with_pull_config(mut self, config: PullConfig) -> Self {
        self.config = config;
        self
    }
}

impl<S> Sequence for Dedup<S>
where
    S: Sequence + Send,
    S::Item: PartialEq + Clone + Send,
{
    type Item = S::Item;

    fn produce(&mut self, visit: &mut dyn FnMut(S::Item) -> bool) {
        let seq = &mut self.seq;
        let config = &self.config;
        thread::scope(|scope| {
            let mut handle = pull_scoped_with(scope, seq, config);
            let mut previous: Option<S::Item> = None;
            while let Some(item) = handle.next_or_resume("dedup") {
                if previous.as_ref() == Some(&item) {
                    continue;
                }
                previous = Some(item.clone());
                if !visit(item) {
                    break;
                }
            }
            handle.stop();
        })
    }
}

impl<S> Transducer<S> for Dedup<Hole>
where
    S: Sequence + Send,
    S::Item: PartialEq + Clone + Send,
{
    type Output = Dedup<S>;

    fn apply(self, seq: S) -> Dedup<S> {
        Dedup {
            seq,
            config: self.config,
        }
    }
}

/// Suppresses every element equal to one emitted earlier in the traversal.
///
/// Remembers everything it has emitted, so memory grows with the number of
/// distinct elements.
#[derive(Debug, Clone)]
pub struct Unique<S> {
    seq: S,
}

/// Create a transducer that emits only the first occurrence of each value.
pub fn unique() -> Unique<Hole> {
    Unique { seq: Hole }
}

impl<S> Sequence for Unique<S>
where
    S: Sequence,
    S::Item: Eq + Hash + Clone,
{
    type Item = S::Item;

    fn produce(&mut self, visit: &mut dyn FnMut(S::Item) -> bool) {
        let mut seen = HashSet::new();
        self.seq.produce(&mut |item| {
            if seen.insert(item.clone()) {
                visit(item)
            } else {
                true
            }
        })
    }
}

impl<S> Transducer<S> for Unique<Hole>
where
    S: Sequence,
    S::Item: Eq + Hash + Clone,
{
    type Output = Unique<S>;

    fn apply(self, seq: S) -> Unique<S> {
        Unique { seq }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        build::{from_slice, generate, naturals, values},
        reducers::collect,
    };

    #[test]
    fn test_dedup_collapses_adjacent_runs() {
        let seq = values([1, 1, 2, 2, 2, 3, 1]).dedup();
        assert_eq!(collect(seq), vec![1, 2, 3, 1]);
    }

    #[test]
    fn test_dedup_empty_source() {
        let seq = values(Vec::<i32>::new()).dedup();
        assert!(collect(seq).is_empty());
    }

    #[test]
    fn test_dedup_stops_infinite_source() {
        let seq = naturals().map(|x| x / 3).dedup().take(4);
        assert_eq!(collect(seq), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_dedup_over_borrowed_source() {
        let words = vec!["a", "a", "b"];
        let seq = from_slice(&words).dedup();
        assert_eq!(collect(seq), vec![&"a", &"b"]);
    }

    #[test]
    fn test_dedup_can_be_traversed_again() {
        let mut seq = values([5, 5, 6]).dedup();
        assert_eq!(collect(&mut seq), vec![5, 6]);
        assert_eq!(collect(&mut seq), vec![5, 6]);
    }

    #[test]
    fn test_dedup_worker_takes_pull_config() {
        let config = PullConfig {
            thread_name: "dedup-worker".to_string(),
        };
        let seq = dedup()
            .with_pull_config(config)
            .apply(generate(|| thread::current().name().map(str::to_string)).take(3));
        assert_eq!(collect(seq), vec![Some("dedup-worker".to_string())]);
    }

    #[test]
    #[should_panic(expected = "dedup source panicked")]
    fn test_dedup_resumes_source_panic() {
        let mut n = 0;
        let seq = generate(move || {
            n += 1;
            if n == 3 {
                panic!("broken source");
            }
            n
        })
        .dedup();
        collect(seq);
    }

    #[test]
    fn test_unique_drops_any_repeat() {
        let seq = values([1, 2, 1, 3, 2]).unique();
        assert_eq!(collect(seq), vec![1, 2, 3]);
    }

    #[test]
    fn test_unique_state_is_per_traversal() {
        let mut seq = values(["x", "y", "x"]).unique();
        assert_eq!(collect(&mut seq), vec!["x", "y"]);
        assert_eq!(collect(&mut seq), vec!["x", "y"]);
    }
}
