//! Volume change notification.
//!
//! Every subscriber owns a [`ChangeReceiver`] backed by its own channel. The
//! volume pushes the coordinate of each value-changing write to all live
//! subscribers, in write order; consumers drain their receiver once per tick.

use crossbeam_channel::{Receiver, Sender, TryIter};

use crate::coord::GridCoord;

/// Sending side of the change notification: one channel per subscriber.
#[derive(Debug, Default)]
pub struct ChangeFeed {
    subscribers: Vec<Sender<GridCoord>>,
}

impl ChangeFeed {
    /// Creates a feed with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new subscriber and returns its receiving end.
    pub fn subscribe(&mut self) -> ChangeReceiver {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        ChangeReceiver { rx }
    }

    /// Delivers `coord` to every subscriber. Subscribers whose receiver was
    /// dropped are removed.
    pub fn notify(&mut self, coord: GridCoord) {
        self.subscribers.retain(|tx| tx.send(coord).is_ok());
    }

    /// Returns the number of registered subscribers.
    ///
    /// Dropped receivers are only pruned on the next [`notify`](Self::notify).
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Receiving side of a volume subscription.
#[derive(Debug)]
pub struct ChangeReceiver {
    rx: Receiver<GridCoord>,
}

impl ChangeReceiver {
    /// Takes every pending coordinate, oldest first, without blocking.
    pub fn drain(&self) -> TryIter<'_, GridCoord> {
        self.rx.try_iter()
    }

    /// Returns the number of pending notifications.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Returns `true` if no notifications are pending.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
