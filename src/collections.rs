use std::{cmp::Ordering, collections::BinaryHeap, hash::BuildHasherDefault};
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;


/// Use indexmap for fast lookups and rustc_hash for fast hashing
/// Insertion order is kept, which makes iteration over the graph deterministic
pub type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;
pub type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;


/// Min-priority queue with first-in-first-out tie breaking
///
/// Entries are ordered by priority alone, entries with equal priority leave the
/// queue in the order they were inserted. Priorities are compared with
/// `f64::total_cmp`, so the order is total even for NaN.
#[derive(Debug)]
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> PriorityQueue<T> {

    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Add an element with the given priority
    pub fn insert(&mut self, element: T, priority: f64) {
        self.heap.push(Entry {
            element,
            priority,
            seq: self.next_seq,
        });
        self.next_seq += 1;
    }

    /// Remove the entry with the lowest priority
    /// Returns None once the queue is empty
    pub fn extract_min(&mut self) -> Option<(T, f64)> {
        self.heap.pop().map(|entry| (entry.element, entry.priority))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}


/// Queue entry - only priority and insertion sequence take part in ordering
#[derive(Debug)]
struct Entry<T> {
    element: T,
    priority: f64,
    seq: u64,
}

// BinaryHeap is a max-heap, so both comparisons are reversed
impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.priority.total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}
impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl<T> Eq for Entry<T> {}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_in_priority_order_with_stable_ties() {
        let mut queue = PriorityQueue::new();
        queue.insert("a", 5.0);
        queue.insert("b", 1.0);
        queue.insert("c", 3.0);
        queue.insert("d", 1.0);

        let mut extracted = Vec::new();
        while let Some(entry) = queue.extract_min() {
            extracted.push(entry);
        }

        assert_eq!(extracted, vec![("b", 1.0), ("d", 1.0), ("c", 3.0), ("a", 5.0)]);
    }

    #[test]
    fn test_empty_queue() {
        let mut queue: PriorityQueue<&str> = PriorityQueue::default();
        assert!(queue.is_empty());
        assert_eq!(queue.extract_min(), None);

        queue.insert("x", 0.0);
        assert!(!queue.is_empty());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.extract_min(), Some(("x", 0.0)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_ties_stay_fifo_after_interleaved_extraction() {
        let mut queue = PriorityQueue::new();
        queue.insert(1, 2.0);
        queue.insert(2, 2.0);
        assert_eq!(queue.extract_min(), Some((1, 2.0)));

        // inserted later, so it goes behind the remaining entry of equal priority
        queue.insert(3, 2.0);
        queue.insert(4, 0.5);
        assert_eq!(queue.extract_min(), Some((4, 0.5)));
        assert_eq!(queue.extract_min(), Some((2, 2.0)));
        assert_eq!(queue.extract_min(), Some((3, 2.0)));
    }

    #[test]
    fn test_infinite_priority_goes_last() {
        let mut queue = PriorityQueue::new();
        queue.insert("far", f64::INFINITY);
        queue.insert("near", 10.0);
        assert_eq!(queue.extract_min().map(|(e, _)| e), Some("near"));
        assert_eq!(queue.extract_min().map(|(e, _)| e), Some("far"));
    }
}
