//! Duplicate-tolerant min-priority queue.
//!
//! Items are stored in a binary min-heap keyed by `(priority,
//! insertion_order)`. Lower priorities are popped first; ties are broken by
//! insertion order (FIFO). Nothing tracks item identity: enqueueing the same
//! item twice stores two independent entries, and callers must tolerate the
//! stale one when it surfaces.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Debug)]
struct Entry<T> {
    item: T,
    priority: f64,
    seq: u64,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Natural order; the heap stores `Reverse<Entry>` to pop the minimum.
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A min-priority queue that allows duplicate items.
///
/// `enqueue` and `dequeue` are both O(log n).
#[derive(Debug)]
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Reverse<Entry<T>>>,
    seq: u64,
}

impl<T> PriorityQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Create an empty queue with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            seq: 0,
        }
    }

    /// Insert `item` with the given priority. Never merges with an existing
    /// entry for the same item.
    pub fn enqueue(&mut self, item: T, priority: f64) {
        debug_assert!(!priority.is_nan(), "priority must not be NaN");
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry {
            item,
            priority,
            seq,
        }));
    }

    /// Remove and return the item with the lowest priority.
    pub fn dequeue(&mut self) -> Option<T> {
        self.heap.pop().map(|Reverse(entry)| entry.item)
    }

    /// Remove the lowest-priority item, also returning its priority.
    pub fn dequeue_with_priority(&mut self) -> Option<(T, f64)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.item, entry.priority))
    }

    /// Priority of the item `dequeue` would return next.
    pub fn peek_priority(&self) -> Option<f64> {
        self.heap.peek().map(|Reverse(entry)| entry.priority)
    }

    /// Number of stored entries, duplicates included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
