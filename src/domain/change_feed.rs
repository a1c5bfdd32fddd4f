//! Snapshot change feeds for document collections.
//!
//! Each restaurant's collection gets its own `watch` channel. Writers
//! publish the whole collection after every change and subscribers always
//! see a total replacement, never a diff. Only the latest snapshot is kept,
//! so a slow subscriber skips intermediate states.

use std::collections::HashMap;
use tokio::sync::watch;

use super::RestaurantId;

pub struct ChangeFeed<T> {
    senders: HashMap<RestaurantId, watch::Sender<Vec<T>>>,
}

impl<T> Default for ChangeFeed<T> {
    fn default() -> Self {
        Self {
            senders: HashMap::new(),
        }
    }
}

impl<T: Clone> ChangeFeed<T> {
    /// Replaces the snapshot seen by every subscriber of `restaurant_id`.
    pub fn publish(&mut self, restaurant_id: &RestaurantId, snapshot: Vec<T>) {
        match self.senders.get(restaurant_id) {
            Some(sender) => {
                sender.send_replace(snapshot);
            }
            None => {
                let (sender, _) = watch::channel(snapshot);
                self.senders.insert(restaurant_id.clone(), sender);
            }
        }
    }

    /// Publishes a collection re-read after a committed write. A failed
    /// re-read is logged and leaves subscribers on their last snapshot; the
    /// write itself has already succeeded.
    pub fn publish_reread<E: std::fmt::Display>(
        &mut self,
        restaurant_id: &RestaurantId,
        reread: Result<Vec<T>, E>,
    ) {
        match reread {
            Ok(snapshot) => self.publish(restaurant_id, snapshot),
            Err(e) => {
                tracing::error!(error = %e, "Error re-reading collection to publish")
            }
        }
    }

    /// Subscribes to `restaurant_id`. `current` seeds the channel when no
    /// snapshot has been published yet.
    pub fn subscribe(
        &mut self,
        restaurant_id: &RestaurantId,
        current: impl FnOnce() -> Vec<T>,
    ) -> Subscription<T> {
        let sender = self
            .senders
            .entry(restaurant_id.clone())
            .or_insert_with(|| watch::channel(current()).0);
        Subscription::new(sender.subscribe())
    }

    pub fn subscriber_count(&self, restaurant_id: &RestaurantId) -> usize {
        self.senders
            .get(restaurant_id)
            .map_or(0, |sender| sender.receiver_count())
    }
}

/// A live subscription to one collection. Dropping it, or calling
/// [`Subscription::unsubscribe`], stops delivery.
pub struct Subscription<T> {
    receiver: watch::Receiver<Vec<T>>,
    delivered_initial: bool,
}

impl<T: Clone> Subscription<T> {
    fn new(receiver: watch::Receiver<Vec<T>>) -> Self {
        Self {
            receiver,
            delivered_initial: false,
        }
    }

    /// Waits for the next snapshot. The first call returns the snapshot
    /// current at subscription time straight away. Returns `None` once the
    /// feed has gone away.
    pub async fn next(&mut self) -> Option<Vec<T>> {
        if !self.delivered_initial {
            self.delivered_initial = true;
            return Some(self.receiver.borrow_and_update().clone());
        }
        self.receiver.changed().await.ok()?;
        Some(self.latest())
    }

    /// Waits until a snapshot newer than the last one taken is published.
    /// Returns `false` once the feed has gone away.
    pub async fn changed(&mut self) -> bool {
        self.delivered_initial = true;
        self.receiver.changed().await.is_ok()
    }

    /// The newest published snapshot, marked as seen.
    pub fn latest(&mut self) -> Vec<T> {
        self.receiver.borrow_and_update().clone()
    }

    pub fn unsubscribe(self) {}
}
