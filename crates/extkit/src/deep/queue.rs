//! Channel-backed queue handle

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::trace;

use super::{DeepClone, Identity, Kind};

/// A cloneable handle to a FIFO channel that owns both of its ends.
///
/// Every clone of a `Queue` sends into and receives from the same channel,
/// so a queue behaves like a shared reference. A queue of capacity 0 is a
/// rendezvous queue: a send blocks until another thread receives.
///
/// Duplication yields an empty queue with the same capacity. Items in
/// flight belong to whoever is sending and receiving on the source, and
/// are never touched.
///
/// ```
/// use extkit::{deep_clone, Queue};
///
/// let x = Queue::bounded(3);
/// x.try_send(42).unwrap();
///
/// let y = deep_clone(&x);
/// assert_eq!(y.capacity(), Some(3));
/// assert_eq!(y.len(), 0);
/// assert_eq!(x.len(), 1);
/// ```
pub struct Queue<T> {
    chan: Arc<Channel<T>>,
}

struct Channel<T> {
    tx: flume::Sender<T>,
    rx: flume::Receiver<T>,
}

impl<T> Queue<T> {
    /// Create a queue buffering at most `capacity` items
    pub fn bounded(capacity: usize) -> Self {
        let (tx, rx) = flume::bounded(capacity);
        Self::from_parts(tx, rx)
    }

    /// Create a queue without a buffer limit
    pub fn unbounded() -> Self {
        let (tx, rx) = flume::unbounded();
        Self::from_parts(tx, rx)
    }

    fn from_parts(tx: flume::Sender<T>, rx: flume::Receiver<T>) -> Self {
        Self {
            chan: Arc::new(Channel { tx, rx }),
        }
    }

    /// Buffer size, `None` for an unbounded queue
    pub fn capacity(&self) -> Option<usize> {
        self.chan.tx.capacity()
    }

    /// Number of buffered items
    pub fn len(&self) -> usize {
        self.chan.rx.len()
    }

    /// Whether no items are buffered
    pub fn is_empty(&self) -> bool {
        self.chan.rx.is_empty()
    }

    /// Send an item, blocking while the buffer is full.
    ///
    /// The queue holds its own receiver, so this only fails if the
    /// channel has been torn down underneath it.
    pub fn send(&self, item: T) -> Result<(), flume::SendError<T>> {
        self.chan.tx.send(item)
    }

    /// Send an item without blocking
    pub fn try_send(&self, item: T) -> Result<(), flume::TrySendError<T>> {
        self.chan.tx.try_send(item)
    }

    /// Receive the next item, blocking until one is available
    pub fn recv(&self) -> Option<T> {
        self.chan.rx.recv().ok()
    }

    /// Receive the next item if one is buffered or being offered
    pub fn try_recv(&self) -> Option<T> {
        self.chan.rx.try_recv().ok()
    }

    /// Receive the next item, giving up after `timeout`
    pub fn recv_timeout(&self, timeout: Duration) -> Option<T> {
        self.chan.rx.recv_timeout(timeout).ok()
    }

    /// Whether both handles refer to the same channel
    pub fn same_queue(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.chan, &other.chan)
    }
}

impl<T> Clone for Queue<T> {
    fn clone(&self) -> Self {
        Self {
            chan: Arc::clone(&self.chan),
        }
    }
}

impl<T> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue")
            .field("capacity", &self.capacity())
            .field("len", &self.len())
            .finish()
    }
}

impl<T> DeepClone for Queue<T> {
    fn deep_clone(&self) -> Self {
        let capacity = self.capacity();
        trace!("deep_clone: queue capacity {capacity:?}");
        match capacity {
            Some(capacity) => Self::bounded(capacity),
            None => Self::unbounded(),
        }
    }
}

impl<T> Identity for Queue<T> {
    fn kind(&self) -> Kind {
        Kind::Queue
    }

    fn storage(&self) -> Option<*const ()> {
        Some(Arc::as_ptr(&self.chan).cast())
    }
}
