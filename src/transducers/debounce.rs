use std::time::{Duration, Instant};

use super::{Hole, Transducer};
use crate::Sequence;

/// Source of monotonic timestamps for [`Debounce`].
///
/// Any `FnMut() -> Instant` closure is a clock, which lets tests script the
/// passage of time.
pub trait Clock {
    fn now(&mut self) -> Instant;
}

/// The system monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&mut self) -> Instant {
        Instant::now()
    }
}

impl<F> Clock for F
where
    F: FnMut() -> Instant,
{
    fn now(&mut self) -> Instant {
        self()
    }
}

/// Rate-limits a sequence to one element per period.
#[derive(Debug, Clone)]
pub struct Debounce<S, C> {
    seq: S,
    period: Duration,
    clock: C,
}

/// Create a transducer that drops elements arriving less than `period` after
/// the previously emitted element. The first element always passes.
pub fn debounce(period: Duration) -> Debounce<Hole, MonotonicClock> {
    debounce_with(period, MonotonicClock)
}

/// [`debounce`] with timestamps taken from `clock`.
pub fn debounce_with<C: Clock>(period: Duration, clock: C) -> Debounce<Hole, C> {
    Debounce {
        seq: Hole,
        period,
        clock,
    }
}

impl<S, C> Sequence for Debounce<S, C>
where
    S: Sequence,
    C: Clock,
{
    type Item = S::Item;

    fn produce(&mut self, visit: &mut dyn FnMut(S::Item) -> bool) {
        let clock = &mut self.clock;
        let period = self.period;
        let mut last: Option<Instant> = None;
        self.seq.produce(&mut |item| {
            let now = clock.now();
            match last {
                Some(at) if now.saturating_duration_since(at) < period => true,
                _ => {
                    last = Some(now);
                    visit(item)
                }
            }
        })
    }
}

impl<S, C> Transducer<S> for Debounce<Hole, C>
where
    S: Sequence,
    C: Clock,
{
    type Output = Debounce<S, C>;

    fn apply(self, seq: S) -> Debounce<S, C> {
        Debounce {
            seq,
            period: self.period,
            clock: self.clock,
        }
    }
}
