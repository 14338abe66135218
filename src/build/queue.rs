use std::sync::mpsc::Receiver;

use crate::Sequence;

/// Drains an [`mpsc::Receiver`](std::sync::mpsc::Receiver). Created by
/// [`queue`].
///
/// **Single-shot**: the first traversal takes ownership of the receiver and
/// drops it when production ends, whether the senders disconnected or the
/// visitor stopped. Senders then observe a disconnected channel. Later
/// traversals yield nothing.
#[derive(Debug)]
pub struct Queue<T> {
    receiver: Option<Receiver<T>>,
}

/// Create a single-shot sequence that yields values from a channel until all
/// senders hang up.
///
/// ```rust
/// use seqflow::prelude::*;
/// use std::sync::mpsc;
///
/// let (tx, rx) = mpsc::channel();
/// for n in 0..3 {
///     tx.send(n).unwrap();
/// }
/// drop(tx);
/// assert_eq!(collect(queue(rx)), vec![0, 1, 2]);
/// ```
pub fn queue<T>(receiver: Receiver<T>) -> Queue<T> {
    Queue {
        receiver: Some(receiver),
    }
}

impl<T> Sequence for Queue<T> {
    type Item = T;

    fn produce(&mut self, visit: &mut dyn FnMut(T) -> bool) {
        let Some(receiver) = self.receiver.take() else {
            return;
        };
        for item in receiver.iter() {
            if !visit(item) {
                break;
            }
        }
    }
}
