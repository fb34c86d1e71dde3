//! Benefit/cost ratio scoring.
//!
//! Prefers cheap-high-yield assignments: the value of a pairing is the
//! benefit gained divided by the time spent obtaining it. Used by the
//! routing and cache-placement variants, where the objective is additive
//! over covered demand and resources pay a time or size cost per unit.

use crate::models::{Candidate, Resource, Task};

use super::{Score, ScoreContext, Scorer};

/// Scores a pairing by benefit gained per unit of cost incurred.
///
/// The proposed amount is the full remaining demand clamped to the
/// resource's remaining capacity. Cost is the elapsed time from `now`
/// to completion, including any release-time wait. Pairings whose
/// completion would overrun the horizon or the task deadline are
/// infeasible.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatioScorer;

impl RatioScorer {
    /// Creates a ratio scorer.
    pub fn new() -> Self {
        Self
    }
}

impl Scorer for RatioScorer {
    fn name(&self) -> &'static str {
        "RATIO"
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

        let benefit = amount as f64 * task.value_per_unit;
        // instantaneous service still has unit cost so the ratio stays finite
        let cost = ((completes - ctx.now_ms) as f64).max(1.0);
        Score::Feasible(Candidate::single(benefit / cost, task.id, amount, completes))
    }
}
