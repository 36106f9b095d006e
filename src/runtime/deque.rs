use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use metrics::gauge;
use tokio::sync::{Mutex, Notify};

use crate::pipeline::Task;

/// One element of the shared work deque.
///
/// Shutdown is a tagged variant rather than a sentinel value; exactly one
/// worker consumes each marker and exits.
pub enum QueueItem {
    Work(Task),
    Shutdown,
}

/// Thread-safe double-ended work queue with drain detection.
///
/// `push_back` of a `Work` item increments the outstanding count;
/// `task_done` decrements it once the popping worker has finished its burst.
/// `join` resolves when the count reaches zero, meaning no queued or
/// in-flight work remains. Shutdown markers never count as outstanding.
pub struct TaskDeque {
    items: Mutex<VecDeque<QueueItem>>,
    available: Notify,
    outstanding: AtomicUsize,
    drained: Notify,
}

impl TaskDeque {
    pub fn new() -> TaskDeque {
        TaskDeque {
            items: Mutex::new(VecDeque::new()),
            available: Notify::new(),
            outstanding: AtomicUsize::new(0),
            drained: Notify::new(),
        }
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }

    /// Appends an item at the tail and wakes one waiting worker.
    pub async fn push_back(&self, item: QueueItem) {
        if matches!(item, QueueItem::Work(_)) {
            self.outstanding.fetch_add(1, Ordering::AcqRel);
        }

        let depth = {
            let mut items = self.items.lock().await;
            items.push_back(item);
            items.len()
        };
        gauge!("strand_queue_depth").set(depth as f64);

        self.available.notify_one();
    }

    /// Removes the item at the head, waiting until one is available.
    pub async fn pop_front(&self) -> QueueItem {
        loop {
            if let Some(item) = self.try_pop().await {
                return item;
            }

            let notified = self.available.notified();
            // Re-check after registering, so a push racing with the failed
            // attempt is not missed.
            if let Some(item) = self.try_pop().await {
                return item;
            }
            notified.await;
        }
    }

    async fn try_pop(&self) -> Option<QueueItem> {
        let (item, depth) = {
            let mut items = self.items.lock().await;
            let item = items.pop_front();
            (item, items.len())
        };

        if item.is_some() {
            gauge!("strand_queue_depth").set(depth as f64);
        }
        item
    }

    /// Marks one previously popped `Work` item as fully processed.
    pub fn task_done(&self) {
        let previous = self.outstanding.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(previous > 0, "task_done without matching work item");
        if previous == 1 {
            self.drained.notify_waiters();
        }
    }

    /// Waits until every queued and in-flight work item has been processed.
    pub async fn join(&self) {
        loop {
            let notified = self.drained.notified();
            if self.outstanding.load(Ordering::Acquire) == 0 {
                return;
            }
            notified.await;
        }
    }
}

impl Default for TaskDeque {
    fn default() -> Self {
        TaskDeque::new()
    }
}
