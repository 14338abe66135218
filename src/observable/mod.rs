//! A thread-safe broadcast cell that is also a sequence of its own updates.
//!
//! An [`Observable`] holds a current value. Any clone of the handle may
//! [`set`](Observable::set) a new one; setting a value equal to the last
//! accepted one does nothing. Every traversal of the cell (as a [`Sequence`],
//! or through [`subscribe`](Observable::subscribe)) starts with the current
//! value and then receives each later update in order.
//!
//! Updates wait in a bounded mailbox until every active traversal has seen
//! them. A setter facing a full mailbox blocks until a traversal catches up.
//! With no traversal active, `set` publishes at once.
//!
//! ```rust
//! use seqflow::prelude::*;
//! use std::sync::mpsc;
//!
//! let cell = observe(0);
//! let (tx, rx) = mpsc::channel();
//! let subscription = cell.subscribe(move |v| tx.send(v).unwrap()).unwrap();
//!
//! cell.set(1).unwrap();
//! cell.set(1).unwrap();
//! cell.set(2).unwrap();
//! cell.close();
//!
//! subscription.join().unwrap();
//! assert_eq!(rx.iter().collect::<Vec<_>>(), vec![0, 1, 2]);
//! ```

mod mailbox;
mod subscription;

pub use subscription::Subscription;

use std::{
    error::Error,
    fmt, io,
    sync::{atomic::AtomicBool, atomic::Ordering, Arc},
    thread,
};

use mailbox::{Cursor, Shared};

use crate::Sequence;

/// Mailbox capacity used by [`observe`] and [`promise`].
pub const DEFAULT_MAILBOX_CAPACITY: usize = 5;

/// Name used for threads and log fields when none is configured.
pub const DEFAULT_OBSERVABLE_NAME: &str = "observable";

/// Error stored in an observable's sticky error slot.
pub type SharedError = Arc<dyn Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum ObservableError {
    /// The observable was closed before the update could be accepted.
    #[error("observable is closed")]
    Closed,
    /// A background thread could not be started.
    #[error("failed to spawn {role} thread")]
    Spawn {
        role: &'static str,
        #[source]
        source: io::Error,
    },
    /// A subscriber callback panicked.
    #[error("subscriber callback panicked")]
    SubscriberPanicked,
}

/// Configures an [`Observable`] before creation.
///
/// ```rust
/// use seqflow::prelude::*;
///
/// let cell = ObservableBuilder::new().capacity(1).name("temperature").build(20);
/// assert_eq!(cell.capacity(), 1);
/// assert_eq!(cell.name(), "temperature");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableBuilder {
    capacity: usize,
    name: String,
}

impl Default for ObservableBuilder {
    fn default() -> Self {
        ObservableBuilder {
            capacity: DEFAULT_MAILBOX_CAPACITY,
            name: DEFAULT_OBSERVABLE_NAME.to_string(),
        }
    }
}

impl ObservableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of pending updates. Values below 1 are raised to 1.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Prefix for thread names and the `observable` field of log events.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn build<T: Clone + PartialEq>(self, initial: T) -> Observable<T> {
        tracing::debug!(observable = %self.name, capacity = self.capacity, "observable created");
        Observable {
            shared: Arc::new(Shared::new(initial, self.capacity, self.name)),
        }
    }

    /// Build a cell holding `T::default()` and publish the result of `f`
    /// from a background thread.
    pub fn promise<T, F>(self, f: F) -> Result<Observable<T>, ObservableError>
    where
        T: Clone + PartialEq + Default + Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        self.try_promise(move || Ok::<T, std::convert::Infallible>(f()))
    }

    /// Like [`promise`](ObservableBuilder::promise), but an `Err` from `f` is
    /// recorded in the sticky error slot instead of publishing a value.
    pub fn try_promise<T, E, F>(self, f: F) -> Result<Observable<T>, ObservableError>
    where
        T: Clone + PartialEq + Default + Send + 'static,
        E: Error + Send + Sync + 'static,
        F: FnOnce() -> Result<T, E> + Send + 'static,
    {
        let cell = self.build(T::default());
        let target = cell.clone();
        thread::Builder::new()
            .name(format!("{}-promise", cell.name()))
            .spawn(move || match f() {
                Ok(value) => {
                    if let Err(err) = target.set(value) {
                        tracing::debug!(
                            observable = %target.name(),
                            error = %err,
                            "promise result dropped"
                        );
                    }
                }
                Err(err) => {
                    tracing::warn!(observable = %target.name(), error = %err, "promise failed");
                    target.fail(Arc::new(err));
                }
            })
            .map_err(|source| ObservableError::Spawn {
                role: "promise",
                source,
            })?;
        Ok(cell)
    }
}

/// Handle to a shared broadcast cell. Cloning is cheap and every clone
/// refers to the same cell.
pub struct Observable<T> {
    shared: Arc<Shared<T>>,
}

/// Create an observable holding `initial`, with the default configuration.
pub fn observe<T: Clone + PartialEq>(initial: T) -> Observable<T> {
    ObservableBuilder::default().build(initial)
}

/// Create an observable holding `T::default()` that receives the result of
/// `f`, computed on a background thread.
pub fn promise<T, F>(f: F) -> Result<Observable<T>, ObservableError>
where
    T: Clone + PartialEq + Default + Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    ObservableBuilder::default().promise(f)
}

/// [`promise`] for fallible computations. See
/// [`ObservableBuilder::try_promise`].
pub fn try_promise<T, E, F>(f: F) -> Result<Observable<T>, ObservableError>
where
    T: Clone + PartialEq + Default + Send + 'static,
    E: Error + Send + Sync + 'static,
    F: FnOnce() -> Result<T, E> + Send + 'static,
{
    ObservableBuilder::default().try_promise(f)
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Observable {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("name", &self.shared.name)
            .field("capacity", &self.shared.capacity)
            .finish_non_exhaustive()
    }
}

impl<T: Clone + PartialEq> Observable<T> {
    /// Offer a new value.
    ///
    /// Fails with [`ObservableError::Closed`] once the cell is closed,
    /// including for setters blocked at the time of closing. Otherwise does
    /// nothing if `value` equals the last accepted value, or queues the
    /// update for every active traversal, blocking while the mailbox is full.
    pub fn set(&self, value: T) -> Result<(), ObservableError> {
        self.shared.set(value)
    }

    /// The last published value together with the sticky error, if any.
    pub fn get(&self) -> (T, Option<SharedError>) {
        self.shared.get()
    }

    pub fn error(&self) -> Option<SharedError> {
        self.shared.error()
    }

    pub fn is_ok(&self) -> bool {
        self.error().is_none()
    }

    /// Record `err` in the sticky error slot, replacing any previous error.
    pub fn fail(&self, err: SharedError) {
        self.shared.fail(err)
    }

    /// Stop accepting updates. Traversals deliver what is already queued and
    /// then end. Idempotent.
    pub fn close(&self) {
        self.shared.close()
    }

    pub fn is_closed(&self) -> bool {
        self.shared.is_closed()
    }

    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }
}

impl<T> Observable<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    /// Call `f` with the current value and then with every later update, on
    /// a dedicated thread.
    ///
    /// The starting point is fixed before this returns: updates set after the
    /// call are always delivered. The thread ends when the returned
    /// [`Subscription`] is closed or dropped, or when the cell is closed and
    /// drained.
    pub fn subscribe<F>(&self, mut f: F) -> Result<Subscription, ObservableError>
    where
        F: FnMut(T) + Send + 'static,
    {
        let (cursor, current) = Cursor::register(&self.shared);
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let handle = thread::Builder::new()
            .name(format!("{}-subscriber", self.shared.name))
            .spawn(move || {
                let is_cancelled = || flag.load(Ordering::Acquire);
                if is_cancelled() {
                    return;
                }
                f(current);
                while let Some(value) = cursor.next(&is_cancelled) {
                    f(value);
                }
            })
            .map_err(|source| ObservableError::Spawn {
                role: "subscriber",
                source,
            })?;
        tracing::debug!(observable = %self.shared.name, "subscribed");
        Ok(Subscription::new(
            cancelled,
            self.shared.clone(),
            handle,
            self.shared.name.clone(),
        ))
    }
}

impl<T: Clone + PartialEq> Sequence for Observable<T> {
    type Item = T;

    /// Yields the current value, then every update until `visit` returns
    /// `false` or the cell is closed and drained. Blocks between updates.
    fn produce(&mut self, visit: &mut dyn FnMut(T) -> bool) {
        let (cursor, current) = Cursor::register(&self.shared);
        if !visit(current) {
            return;
        }
        while let Some(value) = cursor.next(&|| false) {
            if !visit(value) {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducers::collect;
    use std::{sync::mpsc, time::Duration};

    const WAIT: Duration = Duration::from_secs(5);

    #[test]
    fn test_subscriber_sees_initial_updates_then_end() {
        let cell = observe(0);
        let (tx, rx) = mpsc::channel();
        let sub = cell.subscribe(move |v| tx.send(v).unwrap()).unwrap();
        assert_eq!(rx.recv_timeout(WAIT), Ok(0));

        cell.set(1).unwrap();
        assert_eq!(rx.recv_timeout(WAIT), Ok(1));

        cell.set(1).unwrap();
        cell.set(2).unwrap();
        cell.close();
        assert_eq!(rx.recv_timeout(WAIT), Ok(2));

        sub.join().unwrap();
        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_set_after_close_fails_fast() {
        let cell = observe("a");
        cell.close();
        cell.close();
        assert!(matches!(cell.set("b"), Err(ObservableError::Closed)));
        assert!(matches!(cell.set("a"), Err(ObservableError::Closed)));
        assert_eq!(cell.get().0, "a");
    }

    #[test]
    fn test_set_without_traversal_publishes() {
        let cell = observe(1);
        cell.set(2).unwrap();
        cell.set(3).unwrap();
        assert_eq!(cell.get().0, 3);
        assert!(cell.is_ok());
    }

    #[test]
    fn test_sequence_traversal_stops_on_false() {
        let cell = observe(7);
        assert_eq!(collect(cell.clone().take(1)), vec![7]);
        cell.set(8).unwrap();
        assert_eq!(cell.get().0, 8);
    }

    #[test]
    fn test_closed_cell_yields_current_only() {
        let cell = observe(4);
        cell.close();
        assert_eq!(collect(cell.clone()), vec![4]);
    }

    #[test]
    fn test_full_mailbox_blocks_setter() {
        let cell = ObservableBuilder::new().capacity(1).build(0);
        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        let (seen_tx, seen_rx) = mpsc::channel();
        let sub = cell
            .subscribe(move |v| {
                seen_tx.send(v).unwrap();
                let _ = gate_rx.recv();
            })
            .unwrap();
        assert_eq!(seen_rx.recv_timeout(WAIT), Ok(0));

        cell.set(1).unwrap();
        let setter = thread::spawn({
            let cell = cell.clone();
            move || cell.set(2)
        });
        thread::sleep(Duration::from_millis(50));
        assert!(!setter.is_finished());

        gate_tx.send(()).unwrap();
        assert_eq!(seen_rx.recv_timeout(WAIT), Ok(1));
        assert!(setter.join().unwrap().is_ok());

        drop(gate_tx);
        assert_eq!(seen_rx.recv_timeout(WAIT), Ok(2));
        cell.close();
        sub.join().unwrap();
    }

    #[test]
    fn test_close_wakes_blocked_setter() {
        let cell = ObservableBuilder::new().capacity(1).build(0);
        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        let (seen_tx, seen_rx) = mpsc::channel();
        let sub = cell
            .subscribe(move |v| {
                seen_tx.send(v).unwrap();
                let _ = gate_rx.recv();
            })
            .unwrap();
        assert_eq!(seen_rx.recv_timeout(WAIT), Ok(0));

        cell.set(1).unwrap();
        let setter = thread::spawn({
            let cell = cell.clone();
            move || cell.set(2)
        });
        thread::sleep(Duration::from_millis(50));
        cell.close();
        assert!(matches!(
            setter.join().unwrap(),
            Err(ObservableError::Closed)
        ));

        drop(gate_tx);
        sub.join().unwrap();
        assert_eq!(seen_rx.iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_dropping_subscription_cancels() {
        let cell = observe(0);
        let (tx, rx) = mpsc::channel();
        let sub = cell.subscribe(move |v| tx.send(v).unwrap()).unwrap();
        assert_eq!(rx.recv_timeout(WAIT), Ok(0));
        drop(sub);
        // The callback owns the sender; the channel disconnects once the
        // subscriber thread has exited.
        assert!(matches!(
            rx.recv_timeout(WAIT),
            Err(mpsc::RecvTimeoutError::Disconnected)
        ));
        assert!(!cell.is_closed());
    }

    #[test]
    fn test_panicking_subscriber_reported_on_join() {
        let cell = observe(0);
        let sub = cell.subscribe(|_| panic!("subscriber failed")).unwrap();
        assert!(matches!(sub.join(), Err(ObservableError::SubscriberPanicked)));
        cell.set(1).unwrap();
        assert_eq!(cell.get().0, 1);
    }

    #[test]
    fn test_promise_publishes_result() {
        let cell = promise(|| 42).unwrap();
        let settled = collect(cell.clone().skip_while(|v| *v == 0).take(1));
        assert_eq!(settled, vec![42]);
        assert_eq!(cell.get().0, 42);
    }

    #[test]
    fn test_try_promise_records_error() {
        let cell = try_promise(|| Err::<u32, _>(io::Error::other("unreachable host"))).unwrap();
        for _ in 0..500 {
            if !cell.is_ok() {
                break;
            }
            thread::sleep(Duration::from_millis(10));
        }
        let (value, err) = cell.get();
        assert_eq!(value, 0);
        assert_eq!(err.map(|e| e.to_string()), Some("unreachable host".to_string()));
    }

    #[test]
    fn test_fail_sets_sticky_error() {
        let cell = observe(1);
        cell.fail(Arc::new(io::Error::other("bad")));
        assert!(!cell.is_ok());
        cell.set(2).unwrap();
        assert!(cell.error().is_some());
    }
}
