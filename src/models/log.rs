//! Assignment output records.
//!
//! The ordered sequence of committed decisions produced by an engine
//! run. Serialization to a concrete answer-file format is external to
//! this crate.

use serde::{Deserialize, Serialize};

use super::{Leg, ResourceId};

/// One committed decision: a resource serving an ordered task sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    /// Resource the work was committed to.
    pub resource: ResourceId,
    /// Ordered task references with per-task amounts.
    pub legs: Vec<Leg>,
    /// Resource's available time when the commit started.
    pub start_ms: i64,
    /// Resource's new available time after the commit.
    pub end_ms: i64,
    /// Benefit estimate of the committed candidate.
    pub value: f64,
}

/// Ordered log of all committed assignments of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentLog {
    /// Records in commit order.
    pub records: Vec<AssignmentRecord>,
}

impl AssignmentLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn push(&mut self, record: AssignmentRecord) {
        self.records.push(record);
    }

    /// Number of committed decisions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no decision was committed.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total demand satisfied across all records.
    pub fn total_amount(&self) -> i64 {
        self.records
            .iter()
            .flat_map(|r| r.legs.iter())
            .map(|l| l.amount)
            .sum()
    }

    /// Records committed to one resource, in commit order.
    pub fn records_for(&self, resource: ResourceId) -> impl Iterator<Item = &AssignmentRecord> {
        self.records.iter().filter(move |r| r.resource == resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskId;

    fn record(resource: usize, task: usize, amount: i64, start: i64, end: i64) -> AssignmentRecord {
        AssignmentRecord {
            resource: ResourceId(resource),
            legs: vec![Leg { task: TaskId(task), amount }],
            start_ms: start,
            end_ms: end,
            value: 1.0,
        }
    }

    #[test]
    fn test_log_totals() {
        let mut log = AssignmentLog::new();
        assert!(log.is_empty());
        log.push(record(0, 0, 3, 0, 10));
        log.push(record(1, 1, 4, 0, 20));
        log.push(record(0, 1, 2, 10, 30));

        assert_eq!(log.len(), 3);
        assert_eq!(log.total_amount(), 9);
        assert_eq!(log.records_for(ResourceId(0)).count(), 2);
    }

    #[test]
    fn test_records_for_preserves_order() {
        let mut log = AssignmentLog::new();
        log.push(record(0, 0, 1, 0, 5));
        log.push(record(0, 1, 1, 5, 9));
        let ends: Vec<i64> = log.records_for(ResourceId(0)).map(|r| r.end_ms).collect();
        assert_eq!(ends, vec![5, 9]);
    }
}
