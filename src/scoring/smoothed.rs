//! Smoothed feasibility scoring.
//!
//! Scores a pairing by how completely the resource could satisfy the
//! task, sharpened by a smoothing exponent, times a time-based urgency
//! term. Used by the delivery and scanning variants, where serving most
//! of an order is worth far less than serving all of it.

use crate::models::{Candidate, Resource, Task};

use super::{Score, ScoreContext, Scorer};

/// Default smoothing exponent.
///
/// Empirically tuned; instance-dependent, hence configurable.
pub const DEFAULT_EXPONENT: f64 = 10.0;

/// Scores a pairing by `(satisfiable fraction)^p * urgency`.
///
/// The fraction is the proposed amount over the task's remaining demand;
/// with `p` well above 1 the score collapses toward zero unless the
/// resource can serve (nearly) the whole task. Urgency is the fraction
/// of the horizon left at completion, scaled to 0..=100.
#[derive(Debug, Clone, Copy)]
pub struct SmoothedScorer {
    /// Smoothing exponent `p` (>= 1).
    pub exponent: f64,
}

impl SmoothedScorer {
    /// Creates a scorer with the default exponent.
    pub fn new() -> Self {
        Self {
            exponent: DEFAULT_EXPONENT,
        }
    }

    /// Sets the smoothing exponent.
    pub fn with_exponent(mut self, exponent: f64) -> Self {
        self.exponent = exponent.max(1.0);
        self
    }
}

impl Default for SmoothedScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl Scorer for SmoothedScorer {
    fn name(&self) -> &'static str {
        "SMOOTHED"
    }

    fn score(&self, resource: &Resource, task: &Task, ctx: &ScoreContext) -> Score {
        if !task.is_open(ctx.now_ms) {
            return Score::Infeasible;
        }
        let amount = match resource.capacity_left() {
            Some(left) => task.remaining.min(left),
            None => task.remaining,
        };
        if amount <= 0 {
            return Score::Infeasible;
        }

        let start = task.earliest_start(ctx.now_ms);
        let completes = start + task.service_time_ms(amount, resource.efficiency);
        if completes > ctx.horizon_ms {
            return Score::Infeasible;
        }
        if let Some(deadline) = task.deadline_ms {
            if completes > deadline {
                return Score::Infeasible;
            }
        }

        let fraction = amount as f64 / task.remaining as f64;
        let urgency =
            (ctx.horizon_ms - completes) as f64 / ctx.horizon_ms as f64 * 100.0;
        let value = fraction.powf(self.exponent) * urgency;
        Score::Feasible(Candidate::single(value, task.id, amount, completes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ResourceId, TaskId};

    fn value_of(score: Score) -> f64 {
        score.into_candidate().unwrap().value
    }

    #[test]
    fn test_full_satisfaction_beats_partial() {
        // partial server finishes sooner (more urgent) but only covers
        // half the demand; the exponent must still make the full server win
        let full = Resource::new(ResourceId(0)).with_capacity(10);
        let partial = Resource::new(ResourceId(1)).with_capacity(5);
        let task = Task::new(TaskId(0), 10).with_unit_time(5);
        let ctx = ScoreContext::at_time(0, 10_000);

        let v_full = value_of(SmoothedScorer::new().score(&full, &task, &ctx));
        let v_partial = value_of(SmoothedScorer::new().score(&partial, &task, &ctx));
        assert!(v_full > v_partial);
        // (1/2)^10 leaves essentially nothing
        assert!(v_partial < v_full * 0.01);
    }

    #[test]
    fn test_exponent_one_keeps_partial_competitive() {
        let full = Resource::new(ResourceId(0)).with_capacity(10);
        let partial = Resource::new(ResourceId(1)).with_capacity(5);
        let task = Task::new(TaskId(0), 10).with_unit_time(5);
        let ctx = ScoreContext::at_time(0, 10_000);

        let scorer = SmoothedScorer::new().with_exponent(1.0);
        let v_full = value_of(scorer.score(&full, &task, &ctx));
        let v_partial = value_of(scorer.score(&partial, &task, &ctx));
        assert!(v_partial > v_full * 0.4);
    }

    #[test]
    fn test_earlier_completion_is_more_urgent() {
        let fast = Resource::new(ResourceId(0)).with_efficiency(2.0);
        let slow = Resource::new(ResourceId(1));
        let task = Task::new(TaskId(0), 4).with_unit_time(100);
        let ctx = ScoreContext::at_time(0, 1_000);

        let v_fast = value_of(SmoothedScorer::new().score(&fast, &task, &ctx));
        let v_slow = value_of(SmoothedScorer::new().score(&slow, &task, &ctx));
        assert!(v_fast > v_slow);
    }

    #[test]
    fn test_completion_past_horizon_is_infeasible() {
        let resource = Resource::new(ResourceId(0));
        let task = Task::new(TaskId(0), 4).with_unit_time(300);
        let ctx = ScoreContext::at_time(0, 1_000);

        assert_eq!(
            SmoothedScorer::new().score(&resource, &task, &ctx),
            Score::Infeasible
        );
    }

    #[test]
    fn test_exponent_floor_is_one() {
        let s = SmoothedScorer::new().with_exponent(0.2);
        assert!((s.exponent - 1.0).abs() < 1e-10);
    }
}
