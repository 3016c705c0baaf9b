//! Indexed min-priority queue with in-place priority updates.
//!
//! Alongside the heap array, an item → slot map records where every live
//! item sits. Enqueueing an item that is already present updates its
//! priority instead of adding a second entry, so there is at most one live
//! entry per item.

use std::collections::HashMap;
use std::hash::Hash;

/// A binary min-heap keyed by item identity.
///
/// `enqueue`, `dequeue` and priority updates are O(log n). Items are
/// compared through `Eq + Hash`, independently of their priority.
#[derive(Debug, Clone)]
pub struct IndexedPriorityQueue<T> {
    heap: Vec<(T, f64)>,
    index: HashMap<T, usize>,
}

impl<T: Clone + Eq + Hash> IndexedPriorityQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Insert `item`, or move it to `priority` if it is already queued.
    pub fn enqueue(&mut self, item: T, priority: f64) {
        debug_assert!(!priority.is_nan(), "priority must not be NaN");
        if let Some(&i) = self.index.get(&item) {
            self.update(i, priority);
            return;
        }
        let i = self.heap.len();
        self.index.insert(item.clone(), i);
        self.heap.push((item, priority));
        self.sift_up(i);
    }

    /// Remove and return the item with the lowest priority.
    pub fn dequeue(&mut self) -> Option<T> {
        self.dequeue_with_priority().map(|(item, _)| item)
    }

    /// Remove the lowest-priority item, also returning its priority.
    pub fn dequeue_with_priority(&mut self) -> Option<(T, f64)> {
        if self.heap.is_empty() {
            return None;
        }
        let (item, priority) = self.heap.swap_remove(0);
        self.index.remove(&item);
        if let Some((moved, _)) = self.heap.first() {
            self.index.insert(moved.clone(), 0);
            self.sift_down(0);
        }
        Some((item, priority))
    }

    /// The lowest-priority item and its priority, without removing it.
    pub fn peek(&self) -> Option<(&T, f64)> {
        self.heap.first().map(|(item, p)| (item, *p))
    }

    /// Whether `item` is currently queued.
    pub fn contains(&self, item: &T) -> bool {
        self.index.contains_key(item)
    }

    /// Current priority of `item`, if queued.
    pub fn priority_of(&self, item: &T) -> Option<f64> {
        self.index.get(item).map(|&i| self.heap[i].1)
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every item.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
    }

    fn update(&mut self, i: usize, priority: f64) {
        let old = self.heap[i].1;
        self.heap[i].1 = priority;
        if priority < old {
            self.sift_up(i);
        } else if priority > old {
            self.sift_down(i);
        }
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[i].1 >= self.heap[parent].1 {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < n && self.heap[left].1 < self.heap[smallest].1 {
                smallest = left;
            }
            if right < n && self.heap[right].1 < self.heap[smallest].1 {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }

    /// Swap two heap slots and both of their index entries.
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        if let Some(slot) = self.index.get_mut(&self.heap[a].0) {
            *slot = a;
        }
        if let Some(slot) = self.index.get_mut(&self.heap[b].0) {
            *slot = b;
        }
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        assert_eq!(self.index.len(), self.heap.len());
        for (i, (item, p)) in self.heap.iter().enumerate() {
            assert_eq!(self.index.get(item), Some(&i));
            if i > 0 {
                assert!(self.heap[(i - 1) / 2].1 <= *p, "heap order broken at {i}");
            }
        }
    }
}

impl<T: Clone + Eq + Hash> Default for IndexedPriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn pops_in_priority_order() {
        let mut q = IndexedPriorityQueue::new();
        q.enqueue('a', 3.0);
        q.enqueue('b', 1.0);
        q.enqueue('c', 2.0);
        q.assert_consistent();

        assert_eq!(q.dequeue(), Some('b'));
        assert_eq!(q.dequeue(), Some('c'));
        assert_eq!(q.dequeue(), Some('a'));
        assert_eq!(q.dequeue(), None);
    }

    #[test]
    fn re_enqueue_updates_in_place() {
        let mut q = IndexedPriorityQueue::new();
        q.enqueue("x", 5.0);
        q.enqueue("y", 4.0);
        q.enqueue("x", 1.0);
        assert_eq!(q.len(), 2);
        assert_eq!(q.priority_of(&"x"), Some(1.0));
        q.assert_consistent();
        assert_eq!(q.dequeue_with_priority(), Some(("x", 1.0)));
        assert!(!q.contains(&"x"));
        assert_eq!(q.dequeue(), Some("y"));
    }

    #[test]
    fn raising_priority_sifts_down() {
        let mut q = IndexedPriorityQueue::new();
        for (i, p) in [1.0, 2.0, 3.0, 4.0, 5.0].into_iter().enumerate() {
            q.enqueue(i, p);
        }
        q.enqueue(0, 10.0);
        q.assert_consistent();
        assert_eq!(q.peek(), Some((&1, 2.0)));
        let order: Vec<_> = std::iter::from_fn(|| q.dequeue()).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 0]);
    }

    #[test]
    fn empty_queue_reports_nothing() {
        let mut q = IndexedPriorityQueue::<u8>::new();
        assert!(q.is_empty());
        assert_eq!(q.peek(), None);
        assert_eq!(q.dequeue(), None);
        assert_eq!(q.priority_of(&3), None);
    }

    #[test]
    fn random_operations_stay_consistent() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut q = IndexedPriorityQueue::new();
        for _ in 0..2000 {
            match rng.random_range(0..3u32) {
                0 | 1 => {
                    let item = rng.random_range(0..64u32);
                    let before = q.len();
                    let present = q.contains(&item);
                    q.enqueue(item, f64::from(rng.random_range(0..100u32)));
                    assert_eq!(q.len(), if present { before } else { before + 1 });
                }
                _ => {
                    let before = q.len();
                    let popped = q.dequeue_with_priority();
                    match popped {
                        Some((item, p)) => {
                            assert_eq!(q.len(), before - 1);
                            assert!(!q.contains(&item));
                            if let Some((_, next)) = q.peek() {
                                assert!(p <= next);
                            }
                        }
                        None => assert_eq!(before, 0),
                    }
                }
            }
            q.assert_consistent();
        }
    }

    #[test]
    fn clear_resets_index() {
        let mut q = IndexedPriorityQueue::new();
        q.enqueue(1, 1.0);
        q.clear();
        assert!(!q.contains(&1));
        q.enqueue(1, 2.0);
        assert_eq!(q.len(), 1);
        q.assert_consistent();
    }
}
