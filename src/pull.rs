//! Push-to-pull bridge for sequences.
//!
//! [`Sequence::produce`] pushes elements at a visitor; a [`PullHandle`] turns
//! that around so elements can be requested one at a time. The sequence runs
//! on a dedicated worker thread which, after producing each element, suspends
//! until the next request arrives.
//!
//! Worker and caller meet on two zero-capacity channels: a request travels
//! from [`next`](Iterator::next) to the worker, the element travels back. The
//! worker does nothing before the first request, so opening a handle is lazy.
//!
//! # Examples
//!
//! ```rust
//! use seqflow::prelude::*;
//!
//! let mut handle = pull(values([1, 2, 3]));
//! assert_eq!(handle.next(), Some(1));
//! assert_eq!(handle.next(), Some(2));
//! handle.stop();
//! assert_eq!(handle.next(), None);
//! ```
//!
//! Sources that borrow from the caller can be pulled inside a thread scope:
//!
//! ```rust
//! use seqflow::prelude::*;
//!
//! let data = vec![10, 20, 30];
//! let firsts = std::thread::scope(|scope| {
//!     let mut handle = pull_scoped(scope, from_slice(&data));
//!     (handle.next().copied(), handle.next().copied())
//! });
//! assert_eq!(firsts, (Some(10), Some(20)));
//! ```

use std::{
    sync::mpsc::{self, Receiver, SyncSender},
    thread::{self, JoinHandle, Scope, ScopedJoinHandle},
};

use crate::Sequence;

/// Default name for pull worker threads.
pub const DEFAULT_PULL_THREAD_NAME: &str = "seqflow-pull";

/// Settings for the worker thread behind a [`PullHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullConfig {
    pub thread_name: String,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            thread_name: DEFAULT_PULL_THREAD_NAME.to_string(),
        }
    }
}

/// Faults observed by [`PullHandle::try_next`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PullError {
    /// The sequence panicked on the worker thread.
    #[error("sequence panicked on the pull worker thread")]
    ProducerPanicked,
    /// The worker thread could not be started.
    #[error("failed to spawn pull worker thread: {0}")]
    Spawn(String),
}

enum Worker<'scope> {
    Owned(JoinHandle<()>),
    Scoped(ScopedJoinHandle<'scope, ()>),
}

impl Worker<'_> {
    fn join(self) -> thread::Result<()> {
        match self {
            Worker::Owned(handle) => handle.join(),
            Worker::Scoped(handle) => handle.join(),
        }
    }
}

enum PullState<'scope, T> {
    Open {
        request: SyncSender<()>,
        response: Receiver<T>,
        worker: Worker<'scope>,
    },
    Finished,
    Faulted(PullError),
}

impl<'scope, T> PullState<'scope, T> {
    fn take(&mut self) -> Self {
        std::mem::replace(self, PullState::Finished)
    }
}

/// Pull-style handle over a [`Sequence`] running on its own thread.
///
/// Created by [`pull`], [`pull_with`] or [`pull_scoped`]. Elements are
/// requested through [`Iterator::next`]; `None` means the sequence is
/// exhausted, was stopped, or faulted. Once `None` has been returned every
/// further call returns `None` without blocking.
///
/// The handle owns at most one worker thread. [`stop`](PullHandle::stop)
/// (also run on drop) unblocks the suspended worker, lets the sequence unwind
/// and joins the thread.
pub struct PullHandle<'scope, T> {
    state: PullState<'scope, T>,
}

impl<'scope, T> PullHandle<'scope, T> {
    fn spawned(
        worker: std::io::Result<Worker<'scope>>,
        request: SyncSender<()>,
        response: Receiver<T>,
    ) -> Self {
        let state = match worker {
            Ok(worker) => PullState::Open {
                request,
                response,
                worker,
            },
            Err(err) => {
                tracing::error!(error = %err, "failed to spawn pull worker");
                PullState::Faulted(PullError::Spawn(err.to_string()))
            }
        };
        Self { state }
    }

    /// Request the next element, reporting worker faults.
    ///
    /// Returns `Ok(None)` once the sequence is exhausted or the handle was
    /// stopped, and `Err` on every call after a fault was observed.
    pub fn try_next(&mut self) -> Result<Option<T>, PullError> {
        match self.state.take() {
            PullState::Open {
                request,
                response,
                worker,
            } => {
                if request.send(()).is_ok() {
                    if let Ok(item) = response.recv() {
                        self.state = PullState::Open {
                            request,
                            response,
                            worker,
                        };
                        return Ok(Some(item));
                    }
                }
                drop(request);
                drop(response);
                self.finish(worker);
                self.try_next()
            }
            PullState::Faulted(err) => {
                self.state = PullState::Faulted(err.clone());
                Err(err)
            }
            PullState::Finished => Ok(None),
        }
    }

    /// Release the worker thread.
    ///
    /// Safe to call any number of times. A worker suspended between elements
    /// sees its visitor return `false`, so the sequence stops and releases
    /// whatever it opened before the thread is joined.
    pub fn stop(&mut self) {
        match self.state.take() {
            PullState::Open {
                request,
                response,
                worker,
            } => {
                drop(request);
                drop(response);
                tracing::debug!("pull handle stopped");
                self.finish(worker);
            }
            other => self.state = other,
        }
    }

    /// Whether the handle can still yield elements.
    pub fn is_open(&self) -> bool {
        matches!(self.state, PullState::Open { .. })
    }

    fn finish(&mut self, worker: Worker<'scope>) {
        self.state = match worker.join() {
            Ok(()) => PullState::Finished,
            Err(_) => {
                tracing::warn!("sequence panicked on the pull worker thread");
                PullState::Faulted(PullError::ProducerPanicked)
            }
        };
    }
}

impl<T> PullHandle<'_, T> {
    /// Next element for an adapter that consumes the handle internally.
    ///
    /// A panic of the sequence is raised again on the calling thread, since
    /// it came from user code. A worker that could not be started ends the
    /// traversal the way [`next`](Iterator::next) does.
    pub(crate) fn next_or_resume(&mut self, role: &str) -> Option<T> {
        settle(self.try_next(), role)
    }
}

fn settle<T>(pulled: Result<Option<T>, PullError>, role: &str) -> Option<T> {
    match pulled {
        Ok(item) => item,
        Err(PullError::ProducerPanicked) => panic!("{role} source panicked"),
        Err(PullError::Spawn(err)) => {
            tracing::error!(role, error = %err, "{role} source unavailable");
            None
        }
    }
}

impl<T> Iterator for PullHandle<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.try_next().ok().flatten()
    }
}

impl<T> Drop for PullHandle<'_, T> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<T> std::fmt::Debug for PullHandle<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            PullState::Open { .. } => "open",
            PullState::Finished => "finished",
            PullState::Faulted(_) => "faulted",
        };
        f.debug_struct("PullHandle").field("state", &state).finish()
    }
}

fn work<S: Sequence>(mut seq: S, requests: Receiver<()>, responses: SyncSender<S::Item>) {
    tracing::trace!("pull worker started");
    // Nothing is produced until the first element is requested.
    if requests.recv().is_err() {
        return;
    }
    seq.produce(&mut |item| {
        if responses.send(item).is_err() {
            return false;
        }
        requests.recv().is_ok()
    });
    tracing::trace!("pull worker finished");
}

/// Open a [`PullHandle`] over `seq` with the default [`PullConfig`].
pub fn pull<S>(seq: S) -> PullHandle<'static, S::Item>
where
    S: Sequence + Send + 'static,
    S::Item: Send + 'static,
{
    pull_with(seq, &PullConfig::default())
}

/// Open a [`PullHandle`] over `seq`.
pub fn pull_with<S>(seq: S, config: &PullConfig) -> PullHandle<'static, S::Item>
where
    S: Sequence + Send + 'static,
    S::Item: Send + 'static,
{
    let (request, requests) = mpsc::sync_channel(0);
    let (responses, response) = mpsc::sync_channel(0);
    let worker = thread::Builder::new()
        .name(config.thread_name.clone())
        .spawn(move || work(seq, requests, responses))
        .map(Worker::Owned);
    PullHandle::spawned(worker, request, response)
}

/// Open a [`PullHandle`] whose worker lives in `scope`, so `seq` may borrow
/// from the enclosing stack frame.
pub fn pull_scoped<'scope, 'env, S>(
    scope: &'scope Scope<'scope, 'env>,
    seq: S,
) -> PullHandle<'scope, S::Item>
where
    S: Sequence + Send + 'scope,
    S::Item: Send + 'scope,
{
    pull_scoped_with(scope, seq, &PullConfig::default())
}

/// [`pull_scoped`] with an explicit [`PullConfig`].
pub fn pull_scoped_with<'scope, 'env, S>(
    scope: &'scope Scope<'scope, 'env>,
    seq: S,
    config: &PullConfig,
) -> PullHandle<'scope, S::Item>
where
    S: Sequence + Send + 'scope,
    S::Item: Send + 'scope,
{
    let (request, requests) = mpsc::sync_channel(0);
    let (responses, response) = mpsc::sync_channel(0);
    let worker = thread::Builder::new()
        .name(config.thread_name.clone())
        .spawn_scoped(scope, move || work(seq, requests, responses))
        .map(Worker::Scoped);
    PullHandle::spawned(worker, request, response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{generate, naturals, values};
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    #[test]
    fn test_pull_three_elements_then_none() {
        let mut handle = pull(values([1, 2, 3]));
        assert_eq!(handle.next(), Some(1));
        assert_eq!(handle.next(), Some(2));
        assert_eq!(handle.next(), Some(3));
        assert_eq!(handle.next(), None);
        assert_eq!(handle.next(), None);
        assert!(!handle.is_open());
    }

    #[test]
    fn test_stop_is_idempotent_and_final() {
        let mut handle = pull(naturals());
        assert_eq!(handle.next(), Some(0));
        handle.stop();
        handle.stop();
        assert_eq!(handle.next(), None);
        assert_eq!(handle.try_next(), Ok(None));
    }

    #[test]
    fn test_stop_before_first_next() {
        let produced = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&produced);
        let mut handle = pull(generate(move || counter.fetch_add(1, Ordering::SeqCst)));
        handle.stop();
        assert_eq!(handle.next(), None);
        assert_eq!(produced.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_worker_suspends_between_requests() {
        let produced = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&produced);
        let mut handle = pull(generate(move || counter.fetch_add(1, Ordering::SeqCst) + 1));
        assert_eq!(handle.next(), Some(1));
        assert_eq!(handle.next(), Some(2));
        drop(handle);
        assert_eq!(produced.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_panicking_producer_degrades_to_none() {
        let mut handle = pull(generate({
            let mut n = 0;
            move || {
                n += 1;
                if n == 2 {
                    panic!("boom");
                }
                n
            }
        }));
        assert_eq!(handle.next(), Some(1));
        assert_eq!(handle.next(), None);
        assert_eq!(handle.try_next(), Err(PullError::ProducerPanicked));
    }

    #[test]
    fn test_iterator_adapters_work_on_handle() {
        let handle = pull(naturals());
        let firsts: Vec<u64> = handle.take(4).collect();
        assert_eq!(firsts, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_pull_with_names_the_worker() {
        let config = PullConfig {
            thread_name: "custom-pull".to_string(),
        };
        let mut handle = pull_with(
            generate(|| thread::current().name().map(str::to_string)),
            &config,
        );
        assert_eq!(handle.next(), Some(Some("custom-pull".to_string())));
    }

    #[test]
    fn test_pull_scoped_with_names_the_worker() {
        let config = PullConfig {
            thread_name: "scoped-pull".to_string(),
        };
        let name = thread::scope(|scope| {
            let mut handle = pull_scoped_with(
                scope,
                generate(|| thread::current().name().map(str::to_string)),
                &config,
            );
            handle.next().flatten()
        });
        assert_eq!(name.as_deref(), Some("scoped-pull"));
    }

    #[test]
    fn test_settle_ends_on_spawn_failure() {
        let pulled: Result<Option<u8>, _> = Err(PullError::Spawn("no threads".to_string()));
        assert_eq!(settle(pulled, "dedup"), None);
        assert_eq!(settle(Ok(Some(3)), "dedup"), Some(3));
        assert_eq!(settle::<u8>(Ok(None), "dedup"), None);
    }

    #[test]
    #[should_panic(expected = "zip source panicked")]
    fn test_settle_resumes_producer_panic() {
        settle::<u8>(Err(PullError::ProducerPanicked), "zip");
    }
}
