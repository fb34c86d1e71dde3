//! Lazy-invalidation greedy engine.
//!
//! Seeds a candidate queue with every (task, resource) pair's score and
//! recomputes a score only when its entry is popped. If the fresh score
//! matches the queued one the candidate is committed; if it changed, the
//! entry is reinserted with the fresh score instead. Most candidates'
//! scores are stable across many commits, so this avoids rescoring the
//! whole bipartite relationship on every step.
//!
//! # Reference
//! Minoux (1978), "Accelerated greedy algorithms for maximizing
//! submodular set functions"

use crate::models::{AssignmentLog, Instance};
use crate::queue::CandidateQueue;
use crate::scoring::{Score, ScoreContext, Scorer};
use crate::validation::validate_instance;

use super::{commit, EngineError};

/// Default tolerance below which a recomputed score counts as unchanged.
const DEFAULT_EPSILON: f64 = 1e-9;

/// Default cut-off; candidates scoring at or below it are discarded.
const DEFAULT_CUTOFF: f64 = 1e-9;

/// Score-driven engine with lazy score invalidation.
///
/// Unlike the resource-pull engine this variant is not clock-driven:
/// candidates are popped in benefit order regardless of resource
/// availability, which suits placement problems (cache contents, batch
/// composition) where simulated time plays no role.
///
/// # Example
///
/// ```
/// use greedy_dispatch::engine::LazyEngine;
/// use greedy_dispatch::models::{Instance, Resource, Task};
/// use greedy_dispatch::scoring::RatioScorer;
///
/// let mut instance = Instance::new(1_000);
/// instance.add_resource(|id| Resource::new(id).with_capacity(8));
/// instance.add_task(|id| Task::new(id, 5));
///
/// let log = LazyEngine::new(RatioScorer::new()).run(&mut instance).unwrap();
/// assert_eq!(log.total_amount(), 5);
/// ```
#[derive(Debug)]
pub struct LazyEngine<S: Scorer> {
    scorer: S,
    epsilon: f64,
    cutoff: f64,
}

impl<S: Scorer> LazyEngine<S> {
    /// Creates an engine with default epsilon and cut-off.
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            epsilon: DEFAULT_EPSILON,
            cutoff: DEFAULT_CUTOFF,
        }
    }

    /// Sets the staleness tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the score cut-off.
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Drains the candidate queue, committing greedy assignments.
    pub fn run(&self, instance: &mut Instance) -> Result<AssignmentLog, EngineError> {
        validate_instance(instance).map_err(EngineError::InvalidInstance)?;

        let ctx = ScoreContext::at_time(0, instance.horizon_ms);
        let mut queue = CandidateQueue::new();
        for task in &instance.tasks {
            for resource in &instance.resources {
                if let Score::Feasible(c) = self.scorer.score(resource, task, &ctx) {
                    if c.value > self.cutoff {
                        queue.insert(c.value, task.id, resource.id);
                    }
                }
            }
        }

        let mut log = AssignmentLog::new();
        while let Some((queued_value, tid, rid)) = queue.pop() {
            if queued_value <= self.cutoff {
                break;
            }
            let fresh = self
                .scorer
                .score(&instance.resources[rid.0], &instance.tasks[tid.0], &ctx);
            let candidate = match fresh {
                Score::Feasible(c) => c,
                Score::Infeasible => continue, // invalidated entirely
            };
            if (candidate.value - queued_value).abs() <= self.epsilon {
                // score held up; a commit-time violation means the entry
                // was stale after all, so it is simply discarded
                if let Ok(record) = commit(instance, rid, &candidate) {
                    log.push(record);
                }
            } else if candidate.value > self.cutoff {
                queue.insert(candidate.value, tid, rid);
            }
        }

        Ok(log)
    }
}
