//! Scoring contract and candidate selection.
//!
//! A scorer maps one (resource, task) pairing to a benefit estimate; a
//! selector runs a scorer across all open tasks to find the best
//! feasible candidate for a popped resource.
//!
//! # Score Convention
//! Higher value = better candidate. Infeasibility is a distinct variant,
//! never a low score: callers must exclude `Infeasible` from selection
//! rather than let a sentinel value win or lose numerically.
//!
//! # Usage
//!
//! ```
//! use greedy_dispatch::models::{Resource, ResourceId, Task, TaskId};
//! use greedy_dispatch::scoring::{RatioScorer, ScoreContext, Scorer};
//!
//! let resource = Resource::new(ResourceId(0));
//! let task = Task::new(TaskId(0), 5).with_unit_time(10);
//! let ctx = ScoreContext::at_time(0, 1_000);
//!
//! let score = RatioScorer::new().score(&resource, &task, &ctx);
//! assert!(score.is_feasible());
//! ```

mod ratio;
mod shuffled;
mod smoothed;

pub use ratio::RatioScorer;
pub use shuffled::ShuffledSelector;
pub use smoothed::SmoothedScorer;

use std::fmt::Debug;

use crate::models::{Candidate, Resource, Task};

/// Outcome of scoring one (resource, task) pairing.
#[derive(Debug, Clone, PartialEq)]
pub enum Score {
    /// The pairing is feasible; carries the concrete proposal.
    Feasible(Candidate),
    /// A hard constraint (capacity, window, reachability) is violated.
    /// Excluded from candidate selection.
    Infeasible,
}

impl Score {
    /// Whether this score may enter candidate selection.
    pub fn is_feasible(&self) -> bool {
        matches!(self, Score::Feasible(_))
    }

    /// The candidate behind a feasible score.
    pub fn into_candidate(self) -> Option<Candidate> {
        match self {
            Score::Feasible(c) => Some(c),
            Score::Infeasible => None,
        }
    }
}

/// Global state visible to scorers during one scoring pass.
///
/// Carries the simulated clock implied by queue order and the time
/// horizon. Scorers must be pure functions of (resource, task, context);
/// anything else they need has to be passed here.
#[derive(Debug, Clone, Copy)]
pub struct ScoreContext {
    /// Current simulated time (the popped resource's available time).
    pub now_ms: i64,
    /// Maximum simulated time; completions beyond it are infeasible.
    pub horizon_ms: i64,
}

impl ScoreContext {
    /// Creates a context at the given time.
    pub fn at_time(now_ms: i64, horizon_ms: i64) -> Self {
        Self { now_ms, horizon_ms }
    }
}

/// Maps one (resource, task) pairing to a benefit estimate.
///
/// Implementations must be deterministic and pure: the same inputs
/// always yield the same score, with no hidden state.
pub trait Scorer: Send + Sync + Debug {
    /// Scorer name (e.g. "RATIO", "SMOOTHED").
    fn name(&self) -> &'static str;

    /// Scores the pairing. Returns `Infeasible` when a hard constraint
    /// cannot be met, never a negative or sentinel numeric value.
    fn score(&self, resource: &Resource, task: &Task, ctx: &ScoreContext) -> Score;
}

/// Finds the best feasible candidate for a popped resource.
///
/// The resource-pull engine delegates step 2 of its loop to this trait
/// so path-seeking variants can plug in a search instead of a per-task
/// scan.
pub trait CandidateSelector: Send + Sync + Debug {
    /// Returns the best feasible candidate over the open tasks, or
    /// `None` if the resource has no feasible work left.
    fn select(&self, resource: &Resource, tasks: &[Task], ctx: &ScoreContext) -> Option<Candidate>;
}

/// Scans every open task with a scorer and keeps the best candidate.
///
/// Ties are broken by discovery order: strict `>` means the first task
/// (in arena order) achieving the best value wins, keeping runs
/// reproducible.
#[derive(Debug)]
pub struct BestTaskSelector<S: Scorer> {
    scorer: S,
}

impl<S: Scorer> BestTaskSelector<S> {
    /// Creates a selector around the given scorer.
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }
}

impl<S: Scorer> CandidateSelector for BestTaskSelector<S> {
    fn select(&self, resource: &Resource, tasks: &[Task], ctx: &ScoreContext) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for task in tasks {
            if !task.is_open(ctx.now_ms) {
                continue;
            }
            if let Score::Feasible(candidate) = self.scorer.score(resource, task, ctx) {
                let better = match &best {
                    Some(b) => candidate.value > b.value,
                    None => true,
                };
                if better {
                    best = Some(candidate);
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResourceId, TaskId};

    /// Scores every open task by its per-unit value, full remaining
    /// demand, completing instantly.
    #[derive(Debug)]
    struct ValueScorer;

    impl Scorer for ValueScorer {
        fn name(&self) -> &'static str {
            "VALUE"
        }

        fn score(&self, _resource: &Resource, task: &Task, ctx: &ScoreContext) -> Score {
            if !task.is_open(ctx.now_ms) {
                return Score::Infeasible;
            }
            Score::Feasible(Candidate::single(
                task.value_per_unit,
                task.id,
                task.remaining,
                ctx.now_ms,
            ))
        }
    }

    fn tasks(values: &[f64]) -> Vec<Task> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Task::new(TaskId(i), 1).with_value(v))
            .collect()
    }

    #[test]
    fn test_selector_picks_highest_value() {
        let resource = Resource::new(ResourceId(0));
        let tasks = tasks(&[1.0, 5.0, 3.0]);
        let ctx = ScoreContext::at_time(0, 100);

        let best = BestTaskSelector::new(ValueScorer)
            .select(&resource, &tasks, &ctx)
            .unwrap();
        assert_eq!(best.legs[0].task, TaskId(1));
    }

    #[test]
    fn test_selector_tie_breaks_by_discovery_order() {
        let resource = Resource::new(ResourceId(0));
        let tasks = tasks(&[2.0, 2.0, 2.0]);
        let ctx = ScoreContext::at_time(0, 100);

        let best = BestTaskSelector::new(ValueScorer)
            .select(&resource, &tasks, &ctx)
            .unwrap();
        // strict `>` keeps the first task found
        assert_eq!(best.legs[0].task, TaskId(0));
    }

    #[test]
    fn test_selector_skips_done_tasks() {
        let resource = Resource::new(ResourceId(0));
        let mut tasks = tasks(&[9.0, 1.0]);
        tasks[0].done = true;
        let ctx = ScoreContext::at_time(0, 100);

        let best = BestTaskSelector::new(ValueScorer)
            .select(&resource, &tasks, &ctx)
            .unwrap();
        assert_eq!(best.legs[0].task, TaskId(1));
    }

    #[test]
    fn test_selector_returns_none_when_all_done() {
        let resource = Resource::new(ResourceId(0));
        let mut tasks = tasks(&[1.0]);
        tasks[0].remaining = 0;
        let ctx = ScoreContext::at_time(0, 100);

        assert!(BestTaskSelector::new(ValueScorer)
            .select(&resource, &tasks, &ctx)
            .is_none());
    }
}
