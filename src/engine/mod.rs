//! Greedy assignment engines.
//!
//! Two instantiations of the same orchestration pattern:
//!
//! - [`GreedyEngine`] (resource-pull): an availability queue holds
//!   resources; each pop re-scores all open tasks fresh. Used when
//!   feasibility is cheap to recompute and task state churns fast.
//! - [`LazyEngine`] (lazy invalidation): a candidate queue holds
//!   (task, resource) pairs keyed by last-known score; scores are
//!   recomputed only on pop, and stale entries are reinserted instead of
//!   committed. Used when most scores are stable across many commits.
//!
//! Both route every state mutation through [`commit`], the single place
//! the monotonicity and capacity invariants are enforced.
//!
//! # Reference
//! Minoux (1978), "Accelerated greedy algorithms for maximizing
//! submodular set functions"

mod greedy;
mod lazy;

pub use greedy::GreedyEngine;
pub use lazy::LazyEngine;

use thiserror::Error;

use crate::models::{AssignmentRecord, Candidate, Instance, ResourceId, TaskId};
use crate::validation::ValidationError;

/// Errors aborting an engine run before any assignment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// The instance failed structural validation.
    #[error("invalid instance: {} problem(s) found", .0.len())]
    InvalidInstance(Vec<ValidationError>),
}

/// A hard constraint violation detected at commit time.
///
/// A violated commit is rejected, never applied partially: the engine
/// retries or discards the candidate, and all state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitViolation {
    /// A leg would consume more than the task's remaining demand.
    #[error("task {task} demand exceeded: requested {requested}, remaining {remaining}")]
    DemandExceeded {
        task: TaskId,
        requested: i64,
        remaining: i64,
    },
    /// The candidate's total amount would overrun the resource capacity.
    #[error("resource {resource} capacity exceeded: requested {requested}, left {left}")]
    CapacityExceeded {
        resource: ResourceId,
        requested: i64,
        left: i64,
    },
    /// Completion would fall past a task deadline.
    #[error("task {task} window missed: completes at {completes_at_ms}, deadline {deadline_ms}")]
    WindowMissed {
        task: TaskId,
        completes_at_ms: i64,
        deadline_ms: i64,
    },
    /// The candidate would move the resource's available time backwards.
    #[error("resource {resource} time regression: completes at {completes_at_ms}, available at {available_at_ms}")]
    TimeRegression {
        resource: ResourceId,
        completes_at_ms: i64,
        available_at_ms: i64,
    },
}

/// Commits a candidate, mutating resource and task state.
///
/// Feasibility is re-checked here even though the candidate was scored
/// as feasible: in the lazy variant the state it was computed against
/// may have changed since. Checks run before any mutation so a rejected
/// commit leaves the instance untouched.
pub fn commit(
    instance: &mut Instance,
    resource: ResourceId,
    candidate: &Candidate,
) -> Result<AssignmentRecord, CommitViolation> {
    let start_ms = instance.resources[resource.0].available_at_ms;
    if candidate.completes_at_ms < start_ms {
        return Err(CommitViolation::TimeRegression {
            resource,
            completes_at_ms: candidate.completes_at_ms,
            available_at_ms: start_ms,
        });
    }

    for leg in &candidate.legs {
        let task = &instance.tasks[leg.task.0];
        if leg.amount <= 0 {
            continue; // transit leg
        }
        if task.done || leg.amount > task.remaining {
            return Err(CommitViolation::DemandExceeded {
                task: leg.task,
                requested: leg.amount,
                remaining: if task.done { 0 } else { task.remaining },
            });
        }
        if let Some(deadline) = task.deadline_ms {
            if candidate.completes_at_ms > deadline {
                return Err(CommitViolation::WindowMissed {
                    task: leg.task,
                    completes_at_ms: candidate.completes_at_ms,
                    deadline_ms: deadline,
                });
            }
        }
    }

    let total = candidate.total_amount();
    if let Some(left) = instance.resources[resource.0].capacity_left() {
        if total > left {
            return Err(CommitViolation::CapacityExceeded {
                resource,
                requested: total,
                left,
            });
        }
    }

    // all checks passed; apply
    for leg in &candidate.legs {
        if leg.amount > 0 {
            let task = &mut instance.tasks[leg.task.0];
            task.remaining -= leg.amount;
            if task.remaining == 0 {
                task.done = true;
            }
        }
        instance.resources[resource.0].assigned.push(leg.task);
    }
    let r = &mut instance.resources[resource.0];
    r.used += total;
    r.available_at_ms = candidate.completes_at_ms;
    if candidate.ends_at_node.is_some() {
        r.at_node = candidate.ends_at_node;
    }

    Ok(AssignmentRecord {
        resource,
        legs: candidate.legs.clone(),
        start_ms,
        end_ms: candidate.completes_at_ms,
        value: candidate.value,
    })
}
