//! Resource-pull greedy engine.
//!
//! # Algorithm
//!
//! 1. Seed the availability queue with every resource keyed by
//!    `(available_at, id)`.
//! 2. Pop the earliest-available resource; if it is past the horizon,
//!    discard it without reinsertion.
//! 3. Ask the selector for the best feasible candidate over all open
//!    tasks (O(tasks) per pop, re-scored fresh).
//! 4. If none is feasible the resource is exhausted; otherwise commit
//!    and reinsert keyed by the new available time.
//!
//! Terminates because every commit consumes demand or time budget, both
//! finite and non-increasing.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching

use std::collections::HashMap;

use crate::models::{AssignmentLog, Instance, ResourceId};
use crate::queue::AvailabilityQueue;
use crate::scoring::{BestTaskSelector, CandidateSelector, ScoreContext, Scorer};
use crate::validation::validate_instance;

use super::{commit, EngineError};

/// Availability-driven greedy assignment engine.
///
/// # Example
///
/// ```
/// use greedy_dispatch::engine::GreedyEngine;
/// use greedy_dispatch::models::{Instance, Resource, Task};
/// use greedy_dispatch::scoring::RatioScorer;
///
/// let mut instance = Instance::new(1_000);
/// instance.add_resource(|id| Resource::new(id).with_capacity(10));
/// instance.add_task(|id| Task::new(id, 5).with_unit_time(2));
///
/// let log = GreedyEngine::with_scorer(RatioScorer::new())
///     .run(&mut instance)
///     .unwrap();
/// assert_eq!(log.total_amount(), 5);
/// ```
#[derive(Debug)]
pub struct GreedyEngine<C: CandidateSelector> {
    selector: C,
}

impl<S: Scorer> GreedyEngine<BestTaskSelector<S>> {
    /// Creates an engine that scans all open tasks with the scorer.
    pub fn with_scorer(scorer: S) -> Self {
        Self {
            selector: BestTaskSelector::new(scorer),
        }
    }
}

impl<C: CandidateSelector> GreedyEngine<C> {
    /// Creates an engine around a custom selector.
    pub fn new(selector: C) -> Self {
        Self { selector }
    }

    /// Drains the availability queue, committing greedy assignments.
    ///
    /// Aborts before any assignment if the instance is malformed. The
    /// instance is mutated in place; the returned log lists every
    /// committed decision in order.
    pub fn run(&self, instance: &mut Instance) -> Result<AssignmentLog, EngineError> {
        validate_instance(instance).map_err(EngineError::InvalidInstance)?;

        let mut queue = AvailabilityQueue::new();
        for r in &instance.resources {
            queue.insert(r.available_at_ms, r.id);
        }

        let mut log = AssignmentLog::new();
        // log length at the last rejected commit, per resource; a
        // rejected resource is retried only after some other commit has
        // changed global state, otherwise it is dropped (termination)
        let mut rejected_at: HashMap<ResourceId, usize> = HashMap::new();

        while let Some((now_ms, rid)) = queue.pop() {
            if now_ms > instance.horizon_ms {
                continue; // past the horizon: dropped, no reinsertion
            }

            expire_overdue_tasks(instance, now_ms);
            let ctx = ScoreContext::at_time(now_ms, instance.horizon_ms);

            let resource = &instance.resources[rid.0];
            let candidate = match self.selector.select(resource, &instance.tasks, &ctx) {
                Some(c) => c,
                None => {
                    instance.resources[rid.0].exhausted = true;
                    continue;
                }
            };

            match commit(instance, rid, &candidate) {
                Ok(record) => {
                    log.push(record);
                    queue.insert(instance.resources[rid.0].available_at_ms, rid);
                }
                Err(_) => {
                    if rejected_at.get(&rid) == Some(&log.len()) {
                        instance.resources[rid.0].exhausted = true;
                    } else {
                        rejected_at.insert(rid, log.len());
                        queue.insert(now_ms, rid);
                    }
                }
            }
        }

        Ok(log)
    }
}

/// Marks tasks whose deadline has passed as done so scoring ignores them.
fn expire_overdue_tasks(instance: &mut Instance, now_ms: i64) {
    for task in &mut instance.tasks {
        if task.done {
            continue;
        }
        if let Some(deadline) = task.deadline_ms {
            if deadline <= now_ms {
                task.done = true;
            }
        }
    }
}
