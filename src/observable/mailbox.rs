//! Shared state behind every clone of an [`Observable`](super::Observable).
//!
//! Updates are numbered: the initial value is update 0 and every accepted
//! `set` takes the next number. Pending updates wait in a bounded queue of
//! entries until every registered cursor has moved past them. A cursor is the
//! position of one traversal, i.e. the number of the next update it wants.

use std::{collections::HashMap, collections::VecDeque, sync::Arc};

use parking_lot::{Condvar, Mutex};

use super::{ObservableError, SharedError};

pub(crate) struct Shared<T> {
    pub(crate) name: String,
    pub(crate) capacity: usize,
    /// Last value accepted by `set`. Also serializes setters.
    latest: Mutex<T>,
    state: Mutex<State<T>>,
    /// Signalled when an entry is enqueued or the cell closes.
    changed: Condvar,
    /// Signalled when an entry is delivered or the cell closes.
    drained: Condvar,
}

struct State<T> {
    current: T,
    published: u64,
    error: Option<SharedError>,
    entries: VecDeque<T>,
    /// Update number of `entries[0]`.
    head: u64,
    cursors: HashMap<u64, u64>,
    next_cursor: u64,
    closed: bool,
}

impl<T> State<T> {
    fn tail(&self) -> u64 {
        self.head + self.entries.len() as u64
    }

    /// Drop entries every cursor has moved past. Without cursors nobody is
    /// left to deliver the pending entries, so the newest one is published.
    fn trim(&mut self) {
        let Some(oldest) = self.cursors.values().copied().min() else {
            let tail = self.tail();
            if let Some(newest) = self.entries.pop_back() {
                if tail - 1 > self.published {
                    self.current = newest;
                    self.published = tail - 1;
                }
            }
            self.entries.clear();
            self.head = tail;
            return;
        };
        while self.head < oldest && self.entries.pop_front().is_some() {
            self.head += 1;
        }
    }
}

impl<T: Clone + PartialEq> Shared<T> {
    pub(crate) fn new(initial: T, capacity: usize, name: String) -> Self {
        Shared {
            name,
            capacity: capacity.max(1),
            latest: Mutex::new(initial.clone()),
            state: Mutex::new(State {
                current: initial,
                published: 0,
                error: None,
                entries: VecDeque::new(),
                head: 1,
                cursors: HashMap::new(),
                next_cursor: 0,
                closed: false,
            }),
            changed: Condvar::new(),
            drained: Condvar::new(),
        }
    }

    pub(crate) fn set(&self, value: T) -> Result<(), ObservableError> {
        let mut latest = self.latest.lock();
        let mut state = self.state.lock();
        if state.closed {
            tracing::debug!(observable = %self.name, "set rejected on closed observable");
            return Err(ObservableError::Closed);
        }
        if *latest == value {
            return Ok(());
        }
        loop {
            if state.closed {
                tracing::debug!(observable = %self.name, "set rejected on closed observable");
                return Err(ObservableError::Closed);
            }
            if state.cursors.is_empty() {
                // Nothing pending once the last cursor is gone.
                state.current = value.clone();
                state.published = state.head;
                state.head += 1;
                break;
            }
            if state.entries.len() < self.capacity {
                state.entries.push_back(value.clone());
                tracing::trace!(
                    observable = %self.name,
                    update = state.tail() - 1,
                    pending = state.entries.len(),
                    "update enqueued"
                );
                self.changed.notify_all();
                break;
            }
            self.drained.wait(&mut state);
        }
        *latest = value;
        Ok(())
    }

    pub(crate) fn get(&self) -> (T, Option<SharedError>) {
        let state = self.state.lock();
        (state.current.clone(), state.error.clone())
    }

    pub(crate) fn error(&self) -> Option<SharedError> {
        self.state.lock().error.clone()
    }

    pub(crate) fn fail(&self, err: SharedError) {
        self.state.lock().error = Some(err);
    }

    pub(crate) fn close(&self) {
        let mut state = self.state.lock();
        if !state.closed {
            state.closed = true;
            tracing::debug!(observable = %self.name, "observable closed");
        }
        self.changed.notify_all();
        self.drained.notify_all();
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.state.lock().closed
    }
}

impl<T> Shared<T> {
    /// Wake every waiting cursor so it re-checks its cancellation flag.
    pub(crate) fn wake_all(&self) {
        let _state = self.state.lock();
        self.changed.notify_all();
    }
}

/// Position of one traversal. Unregisters itself on drop.
pub(crate) struct Cursor<T> {
    shared: Arc<Shared<T>>,
    id: u64,
}

impl<T: Clone> Cursor<T> {
    /// Register a new cursor positioned right after the current value, which
    /// is returned alongside it.
    pub(crate) fn register(shared: &Arc<Shared<T>>) -> (Self, T) {
        let mut state = shared.state.lock();
        let id = state.next_cursor;
        state.next_cursor += 1;
        let start = state.published + 1;
        state.cursors.insert(id, start);
        let current = state.current.clone();
        drop(state);
        let cursor = Cursor {
            shared: Arc::clone(shared),
            id,
        };
        (cursor, current)
    }

    /// Block until the next update for this cursor is available.
    ///
    /// Returns `None` once `cancelled` reports true, or once the cell is
    /// closed and every entry queued for this cursor has been delivered.
    pub(crate) fn next(&self, cancelled: &dyn Fn() -> bool) -> Option<T> {
        let shared = &*self.shared;
        let mut state = shared.state.lock();
        loop {
            if cancelled() {
                return None;
            }
            let want = *state.cursors.get(&self.id)?;
            if want < state.tail() {
                let value = state.entries[(want - state.head) as usize].clone();
                state.cursors.insert(self.id, want + 1);
                if want > state.published {
                    state.current = value.clone();
                    state.published = want;
                }
                state.trim();
                tracing::trace!(observable = %shared.name, update = want, "update delivered");
                shared.drained.notify_all();
                return Some(value);
            }
            if state.closed {
                return None;
            }
            shared.changed.wait(&mut state);
        }
    }
}

impl<T> Drop for Cursor<T> {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        state.cursors.remove(&self.id);
        state.trim();
        self.shared.drained.notify_all();
    }
}
