//! Shared Blocking Queue
//!
//! An unbounded FIFO queue safe for any number of concurrent producers and
//! consumers. `push` never waits (the queue is logically unbounded, there
//! is no backpressure); `pop` suspends the caller until an item exists.
//!
//! FIFO order matters in one place: a task redelivered after a worker
//! failure goes to the *back* of the task queue, behind work that was
//! already waiting.

use std::collections::VecDeque;
use tokio::sync::{Mutex, Notify};

pub struct SharedQueue<T> {
    items: Mutex<VecDeque<T>>,
    notify: Notify,
}

impl<T> SharedQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            notify: Notify::new(),
        }
    }

    /// Appends an item and wakes one waiting consumer.
    pub async fn push(&self, item: T) {
        self.items.lock().await.push_back(item);
        self.notify.notify_one();
    }

    /// Removes and returns the item at the front of the queue, waiting for
    /// one to arrive if the queue is empty.
    ///
    /// Safe under arbitrary concurrent callers: every popped item goes to
    /// exactly one of them.
    pub async fn pop(&self) -> T {
        loop {
            // Register interest before checking, so a push that lands
            // between the check and the await still wakes us.
            let notified = self.notify.notified();
            {
                let mut items = self.items.lock().await;
                if let Some(item) = items.pop_front() {
                    // Pass the wakeup on when work remains, so consumers
                    // woken by earlier pushes are not stranded.
                    if !items.is_empty() {
                        self.notify.notify_one();
                    }
                    return item;
                }
            }
            notified.await;
        }
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }
}

impl<T> Default for SharedQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
