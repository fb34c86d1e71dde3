//! Candidate assignment proposals.
//!
//! A candidate is an ephemeral, derived value produced by a scorer or by
//! the path search during one scoring pass. It is never persisted: a
//! committed candidate is recorded in the [`AssignmentLog`] and the
//! struct itself is discarded.
//!
//! [`AssignmentLog`]: super::AssignmentLog

use serde::{Deserialize, Serialize};

use super::TaskId;

/// One task touched by a candidate, with the demand it would consume.
///
/// A zero-amount leg denotes pure transit (e.g. driving an already
/// covered street edge): time passes but no demand is satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    /// Task reference.
    pub task: TaskId,
    /// Units of demand this leg satisfies. May be zero for transit.
    pub amount: i64,
}

/// A scored assignment proposal for one resource.
///
/// Single-task scorers produce one leg; the path search produces an
/// ordered leg sequence, one per edge traversed.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Benefit estimate. Always finite and non-negative.
    pub value: f64,
    /// Ordered task references with per-task amounts.
    pub legs: Vec<Leg>,
    /// Simulated time the resource becomes free again after the commit.
    pub completes_at_ms: i64,
    /// Network node the resource ends on, for routing variants.
    pub ends_at_node: Option<usize>,
}

impl Candidate {
    /// Creates a single-leg candidate.
    pub fn single(value: f64, task: TaskId, amount: i64, completes_at_ms: i64) -> Self {
        Self {
            value,
            legs: vec![Leg { task, amount }],
            completes_at_ms,
            ends_at_node: None,
        }
    }

    /// Total demand consumed across all legs.
    pub fn total_amount(&self) -> i64 {
        self.legs.iter().map(|l| l.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_leg_candidate() {
        let c = Candidate::single(2.5, TaskId(4), 3, 120);
        assert_eq!(c.legs.len(), 1);
        assert_eq!(c.legs[0].task, TaskId(4));
        assert_eq!(c.total_amount(), 3);
        assert_eq!(c.completes_at_ms, 120);
        assert_eq!(c.ends_at_node, None);
    }

    #[test]
    fn test_total_amount_ignores_transit_legs() {
        let c = Candidate {
            value: 1.0,
            legs: vec![
                Leg { task: TaskId(0), amount: 2 },
                Leg { task: TaskId(1), amount: 0 },
                Leg { task: TaskId(2), amount: 5 },
            ],
            completes_at_ms: 10,
            ends_at_node: Some(3),
        };
        assert_eq!(c.total_amount(), 7);
    }
}
