use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::JoinHandle,
};

use super::{mailbox::Shared, ObservableError};

/// Something a cancelled subscriber may be parked on.
pub(crate) trait Wake: Send + Sync {
    fn wake(&self);
}

impl<T: Send> Wake for Shared<T> {
    fn wake(&self) {
        self.wake_all()
    }
}

/// Handle to a subscriber thread started by
/// [`Observable::subscribe`](super::Observable::subscribe).
///
/// Dropping the handle cancels the subscription without waiting for the
/// thread; use [`join`](Subscription::join) to wait for it.
#[must_use = "dropping a Subscription cancels it"]
pub struct Subscription {
    cancelled: Arc<AtomicBool>,
    cell: Arc<dyn Wake>,
    handle: Option<JoinHandle<()>>,
    observable: String,
}

impl Subscription {
    pub(crate) fn new(
        cancelled: Arc<AtomicBool>,
        cell: Arc<dyn Wake>,
        handle: JoinHandle<()>,
        observable: String,
    ) -> Self {
        Subscription {
            cancelled,
            cell,
            handle: Some(handle),
            observable,
        }
    }

    /// Ask the subscriber to stop. Takes effect before the next delivery;
    /// a callback already running is not interrupted.
    pub fn close(&self) {
        if !self.cancelled.swap(true, Ordering::AcqRel) {
            tracing::debug!(observable = %self.observable, "unsubscribed");
        }
        self.cell.wake();
    }

    pub fn is_closed(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Whether the subscriber thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the subscriber thread to exit.
    ///
    /// Without a prior [`close`](Subscription::close) this blocks until the
    /// observable itself is closed and drained.
    pub fn join(mut self) -> Result<(), ObservableError> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        handle.join().map_err(|_| {
            tracing::warn!(observable = %self.observable, "subscriber callback panicked");
            ObservableError::SubscriberPanicked
        })
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.close();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("observable", &self.observable)
            .field("closed", &self.is_closed())
            .field("finished", &self.is_finished())
            .finish()
    }
}
