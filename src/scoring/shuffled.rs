//! Randomized task traversal for restart heuristics.
//!
//! Restart-based variants re-run the engine with different traversal
//! orders and keep the best log. Randomness is isolated to the order in
//! which tasks are scanned; feasibility checks and scores themselves
//! stay deterministic, so every restart still produces a valid run.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::models::{Candidate, Resource, Task};

use super::{CandidateSelector, Score, ScoreContext, Scorer};

/// Scans tasks in a seeded-random order instead of arena order.
///
/// Only tie-breaking is affected: with strict `>` selection, shuffling
/// changes which of several equal-value candidates is discovered first.
/// The scan order is derived from `(seed, resource, pop time)`, so a
/// given seed always reproduces the same run without any interior
/// mutable state.
#[derive(Debug)]
pub struct ShuffledSelector<S: Scorer> {
    scorer: S,
    seed: u64,
}

impl<S: Scorer> ShuffledSelector<S> {
    /// Creates a selector with the given traversal seed.
    pub fn new(scorer: S, seed: u64) -> Self {
        Self { scorer, seed }
    }

    fn scan_order(&self, resource: &Resource, ctx: &ScoreContext, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        let per_pop = self
            .seed
            .wrapping_mul(0x9e37_79b9_7f4a_7c15)
            .wrapping_add(resource.id.0 as u64)
            .wrapping_add((ctx.now_ms as u64).rotate_left(17));
        let mut rng = StdRng::seed_from_u64(per_pop);
        order.shuffle(&mut rng);
        order
    }
}

impl<S: Scorer> CandidateSelector for ShuffledSelector<S> {
    fn select(&self, resource: &Resource, tasks: &[Task], ctx: &ScoreContext) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for idx in self.scan_order(resource, ctx, tasks.len()) {
            let task = &tasks[idx];
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
