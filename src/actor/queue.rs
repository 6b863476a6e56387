//! Blocking Queue: Unbounded FIFO shared by producers and the loop worker.
//!
//! Producers never block on [`BlockingQueue::push`]. The single consumer
//! blocks in [`BlockingQueue::pull`] while the queue is empty and re-checks
//! the condition after every wakeup, so spurious wakeups are harmless.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// A thread-safe FIFO with a blocking pull.
#[derive(Debug)]
pub struct BlockingQueue<T> {
    items: Mutex<VecDeque<T>>,
    not_empty: Condvar,
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BlockingQueue<T> {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            not_empty: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        // No operation leaves the deque half-modified, so a poisoned
        // lock still guards a consistent queue.
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append an item to the tail and wake a waiting consumer.
    pub fn push(&self, item: T) {
        self.lock().push_back(item);
        self.not_empty.notify_one();
    }

    /// Remove the head, blocking while the queue is empty.
    pub fn pull(&self) -> T {
        let mut items = self.lock();
        loop {
            if let Some(item) = items.pop_front() {
                return item;
            }
            items = self
                .not_empty
                .wait(items)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Remove the head if one is present, without blocking.
    pub fn try_pull(&self) -> Option<T> {
        self.lock().pop_front()
    }

    /// Number of queued items at this instant.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the queue is empty at this instant.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every queued item.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_queue_fifo() {
        let queue = BlockingQueue::new();
        assert!(queue.is_empty());

        queue.push(1);
        assert!(!queue.is_empty());
        queue.push(2);
        queue.push(3);
        assert_eq!(queue.len(), 3);

        assert_eq!(queue.pull(), 1);
        assert_eq!(queue.pull(), 2);
        assert_eq!(queue.try_pull(), Some(3));
        assert_eq!(queue.try_pull(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_clear() {
        let queue = BlockingQueue::new();
        queue.push("a");
        queue.push("b");
        queue.clear();
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_pull_blocks_until_push() {
        let queue = Arc::new(BlockingQueue::new());
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.pull())
        };

        thread::sleep(Duration::from_millis(50));
        assert!(!consumer.is_finished());

        queue.push(42);
        assert_eq!(consumer.join().unwrap(), 42);
    }

    #[test]
    fn test_concurrent_producers() {
        const PRODUCERS: usize = 8;
        const PER_PRODUCER: usize = 1_000;

        let queue = Arc::new(BlockingQueue::new());
        let producers: Vec<_> = (0..PRODUCERS)
            .map(|p| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for seq in 0..PER_PRODUCER {
                        queue.push((p, seq));
                    }
                })
            })
            .collect();

        // Each producer's items must arrive in its own push order.
        let mut next = [0usize; PRODUCERS];
        for _ in 0..PRODUCERS * PER_PRODUCER {
            let (p, seq) = queue.pull();
            assert_eq!(seq, next[p], "producer {p} reordered");
            next[p] += 1;
        }

        for producer in producers {
            producer.join().unwrap();
        }
        assert!(next.iter().all(|&n| n == PER_PRODUCER));
        assert!(queue.is_empty());
    }
}
