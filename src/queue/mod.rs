//! Priority queues driving the assignment engines.
//!
//! Two orderings appear across solver variants:
//!
//! - [`AvailabilityQueue`] holds resources keyed by next-available time,
//!   popped in non-decreasing time order (the simulated clock).
//! - [`CandidateQueue`] holds (task, resource) candidates keyed by their
//!   last-known score, popped best-first for lazy invalidation.
//!
//! Both support duplicate keys and break ties deterministically by
//! identity so runs are reproducible.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::models::{ResourceId, TaskId};

/// Min-queue of resources keyed by `(available_at, resource_id)`.
#[derive(Debug, Default)]
pub struct AvailabilityQueue {
    // BinaryHeap is a max-heap; entries are stored with reversed order.
    heap: BinaryHeap<AvailabilityEntry>,
}

#[derive(Debug, PartialEq, Eq)]
struct AvailabilityEntry {
    available_at_ms: i64,
    resource: ResourceId,
}

impl Ord for AvailabilityEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: the heap's max is the smallest (time, id) pair
        (other.available_at_ms, other.resource).cmp(&(self.available_at_ms, self.resource))
    }
}

impl PartialOrd for AvailabilityEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AvailabilityQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a resource keyed by its available time.
    pub fn insert(&mut self, available_at_ms: i64, resource: ResourceId) {
        self.heap.push(AvailabilityEntry {
            available_at_ms,
            resource,
        });
    }

    /// Removes and returns the earliest-available resource.
    pub fn pop(&mut self) -> Option<(i64, ResourceId)> {
        self.heap.pop().map(|e| (e.available_at_ms, e.resource))
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

/// Max-queue of (task, resource) candidates keyed by last-known score.
///
/// Pops the highest score first; equal scores pop in ascending
/// (task, resource) order. Scores must be finite.
#[derive(Debug, Default)]
pub struct CandidateQueue {
    heap: BinaryHeap<CandidateEntry>,
}

#[derive(Debug)]
struct CandidateEntry {
    score: f64,
    task: TaskId,
    resource: ResourceId,
}

impl PartialEq for CandidateEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CandidateEntry {}

impl Ord for CandidateEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| (other.task, other.resource).cmp(&(self.task, self.resource)))
    }
}

impl PartialOrd for CandidateEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl CandidateQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a candidate keyed by its score. Also used to reinsert a
    /// stale entry with a freshly recomputed score.
    pub fn insert(&mut self, score: f64, task: TaskId, resource: ResourceId) {
        self.heap.push(CandidateEntry {
            score,
            task,
            resource,
        });
    }

    /// Removes and returns the best-scored candidate.
    pub fn pop(&mut self) -> Option<(f64, TaskId, ResourceId)> {
        self.heap.pop().map(|e| (e.score, e.task, e.resource))
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_pops_in_time_order() {
        let mut q = AvailabilityQueue::new();
        q.insert(30, ResourceId(0));
        q.insert(10, ResourceId(1));
        q.insert(20, ResourceId(2));

        assert_eq!(q.pop(), Some((10, ResourceId(1))));
        assert_eq!(q.pop(), Some((20, ResourceId(2))));
        assert_eq!(q.pop(), Some((30, ResourceId(0))));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn test_availability_duplicate_times_tie_break_by_id() {
        let mut q = AvailabilityQueue::new();
        q.insert(5, ResourceId(2));
        q.insert(5, ResourceId(0));
        q.insert(5, ResourceId(1));

        assert_eq!(q.pop(), Some((5, ResourceId(0))));
        assert_eq!(q.pop(), Some((5, ResourceId(1))));
        assert_eq!(q.pop(), Some((5, ResourceId(2))));
    }

    #[test]
    fn test_availability_reinsert() {
        let mut q = AvailabilityQueue::new();
        q.insert(0, ResourceId(0));
        let (t, r) = q.pop().unwrap();
        assert_eq!(t, 0);
        q.insert(40, r);
        assert_eq!(q.pop(), Some((40, ResourceId(0))));
        assert!(q.is_empty());
    }

    #[test]
    fn test_candidates_pop_best_first() {
        let mut q = CandidateQueue::new();
        q.insert(1.5, TaskId(0), ResourceId(0));
        q.insert(9.0, TaskId(1), ResourceId(0));
        q.insert(4.2, TaskId(2), ResourceId(1));

        assert_eq!(q.pop().unwrap().1, TaskId(1));
        assert_eq!(q.pop().unwrap().1, TaskId(2));
        assert_eq!(q.pop().unwrap().1, TaskId(0));
    }

    #[test]
    fn test_candidates_equal_scores_tie_break_by_ids() {
        let mut q = CandidateQueue::new();
        q.insert(3.0, TaskId(1), ResourceId(1));
        q.insert(3.0, TaskId(0), ResourceId(1));
        q.insert(3.0, TaskId(0), ResourceId(0));

        assert_eq!(q.pop(), Some((3.0, TaskId(0), ResourceId(0))));
        assert_eq!(q.pop(), Some((3.0, TaskId(0), ResourceId(1))));
        assert_eq!(q.pop(), Some((3.0, TaskId(1), ResourceId(1))));
    }

    #[test]
    fn test_candidate_reinsert_with_fresh_score() {
        let mut q = CandidateQueue::new();
        q.insert(8.0, TaskId(0), ResourceId(0));
        q.insert(6.0, TaskId(1), ResourceId(0));

        let (stale, task, resource) = q.pop().unwrap();
        assert_eq!(stale, 8.0);
        // recomputed score dropped below the runner-up
        q.insert(5.0, task, resource);
        assert_eq!(q.pop().unwrap().1, TaskId(1));
        assert_eq!(q.pop().unwrap().1, TaskId(0));
    }
}
