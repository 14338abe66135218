//! Generator-style infinite producers.
//!
//! Every sequence here runs until its visitor returns `false`, so they are
//! meant to be bounded downstream (`take`, `take_while`, `any`, ...).

use std::{
    thread,
    time::{Duration, Instant},
};

use crate::Sequence;

/// Repeats a value forever. Created by [`forever`].
#[derive(Debug, Clone)]
pub struct Forever<T>(T);

/// Create an infinite sequence of clones of `value`.
pub fn forever<T: Clone>(value: T) -> Forever<T> {
    Forever(value)
}

impl<T: Clone> Sequence for Forever<T> {
    type Item = T;

    fn produce(&mut self, visit: &mut dyn FnMut(T) -> bool) {
        while visit(self.0.clone()) {}
    }
}

/// Calls a function for every element. Created by [`generate`].
#[derive(Debug, Clone)]
pub struct Generate<F>(F);

/// Create an infinite sequence of the values returned by `f`.
///
/// ```rust
/// use seqflow::prelude::*;
///
/// let mut n = 1;
/// let powers = generate(move || {
///     n *= 2;
///     n
/// });
/// assert_eq!(collect(powers.take(4)), vec![2, 4, 8, 16]);
/// ```
pub fn generate<T, F>(f: F) -> Generate<F>
where
    F: FnMut() -> T,
{
    Generate(f)
}

impl<T, F> Sequence for Generate<F>
where
    F: FnMut() -> T,
{
    type Item = T;

    fn produce(&mut self, visit: &mut dyn FnMut(T) -> bool) {
        while visit((self.0)()) {}
    }
}

/// The non-negative integers in ascending order. Created by [`naturals`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Naturals;

/// Create the infinite sequence `0, 1, 2, ...`.
///
/// ```rust
/// use seqflow::prelude::*;
///
/// assert_eq!(collect(naturals().take(3)), vec![0, 1, 2]);
/// ```
pub fn naturals() -> Naturals {
    Naturals
}

impl Sequence for Naturals {
    type Item = u64;

    fn produce(&mut self, visit: &mut dyn FnMut(u64) -> bool) {
        let mut n = 0u64;
        while visit(n) {
            n = n.wrapping_add(1);
        }
    }
}

/// Picks random elements forever. Created by [`shuffle`] or
/// [`shuffle_seeded`].
#[derive(Debug, Clone)]
pub struct Shuffle<T> {
    pick: Vec<T>,
    seed: Option<u64>,
}

/// Create an infinite sequence of random picks from `pick`.
///
/// An empty `pick` yields nothing.
pub fn shuffle<T: Clone>(pick: Vec<T>) -> Shuffle<T> {
    Shuffle { pick, seed: None }
}

/// [`shuffle`] with a fixed seed; every traversal repeats the same picks.
pub fn shuffle_seeded<T: Clone>(pick: Vec<T>, seed: u64) -> Shuffle<T> {
    Shuffle {
        pick,
        seed: Some(seed),
    }
}

impl<T: Clone> Sequence for Shuffle<T> {
    type Item = T;

    fn produce(&mut self, visit: &mut dyn FnMut(T) -> bool) {
        if self.pick.is_empty() {
            return;
        }
        let mut rng = match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        while visit(self.pick[rng.usize(..self.pick.len())].clone()) {}
    }
}

/// Yields the current time once per period. Created by [`ticker`].
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    period: Duration,
}

/// Create an infinite sequence that sleeps `period` before each element and
/// yields the instant it woke up.
pub fn ticker(period: Duration) -> Ticker {
    Ticker { period }
}

impl Sequence for Ticker {
    type Item = Instant;

    fn produce(&mut self, visit: &mut dyn FnMut(Instant) -> bool) {
        loop {
            thread::sleep(self.period);
            if !visit(Instant::now()) {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducers::{all, collect};

    #[test]
    fn test_forever_is_bounded_by_take() {
        assert_eq!(collect(forever('z').take(3)), vec!['z', 'z', 'z']);
    }

    #[test]
    fn test_generate_stops_calling_after_stop() {
        let mut calls = 0;
        let seq = generate(|| {
            calls += 1;
            calls
        });
        assert_eq!(collect(seq.take(2)), vec![1, 2]);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_naturals_start_at_zero() {
        assert_eq!(collect(naturals().skip(5).take(2)), vec![5, 6]);
    }

    #[test]
    fn test_shuffle_only_picks_members() {
        let pick = vec![3, 5, 7];
        assert!(all(shuffle(pick.clone()).take(50), |x| pick.contains(x)));
        assert!(collect(shuffle(Vec::<i32>::new()).take(3)).is_empty());
    }

    #[test]
    fn test_shuffle_seeded_is_repeatable() {
        let mut seq = shuffle_seeded(vec![1, 2, 3, 4], 42);
        let first = collect((&mut seq).take(10));
        let second = collect((&mut seq).take(10));
        assert_eq!(first, second);
    }

    #[test]
    fn test_ticker_yields_increasing_instants() {
        let ticks = collect(ticker(Duration::from_millis(1)).take(3));
        assert_eq!(ticks.len(), 3);
        assert!(ticks.windows(2).all(|w| w[0] <= w[1]));
    }
}
