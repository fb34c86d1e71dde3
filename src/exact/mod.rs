//! External exact-solver interface.
//!
//! The greedy engines fix the hard combinatorial choices (which
//! resources participate, in what order); a final item-to-bucket split
//! can then be re-optimized exactly. The solver is treated as a black
//! box behind a capability trait so the core can be tested with a
//! trivial stub, and a timeout degrades to the greedy assignment
//! already computed rather than failing the run.

use crate::models::AssignmentLog;

/// A final-split re-optimization model.
///
/// Items carry a value and may be placed in at most one bucket, drawn
/// from an eligibility list; every bucket caps the number of items it
/// accepts. The objective is to maximize the total value of placed
/// items.
#[derive(Debug, Clone, Default)]
pub struct ReassignModel {
    /// Value of each item.
    pub item_values: Vec<f64>,
    /// Maximum number of items each bucket accepts.
    pub bucket_capacities: Vec<i64>,
    /// Allowed `(item, bucket)` placements.
    pub eligible: Vec<(usize, usize)>,
}

impl ReassignModel {
    /// Whether a full assignment satisfies the model's constraints.
    pub fn is_valid(&self, assignment: &[(usize, usize)]) -> bool {
        let mut used = vec![0i64; self.bucket_capacities.len()];
        let mut placed = vec![false; self.item_values.len()];
        for &(item, bucket) in assignment {
            if item >= self.item_values.len() || bucket >= self.bucket_capacities.len() {
                return false;
            }
            if placed[item] || !self.eligible.contains(&(item, bucket)) {
                return false;
            }
            placed[item] = true;
            used[bucket] += 1;
            if used[bucket] > self.bucket_capacities[bucket] {
                return false;
            }
        }
        true
    }

    /// Total value of an assignment.
    pub fn objective(&self, assignment: &[(usize, usize)]) -> f64 {
        assignment.iter().map(|&(item, _)| self.item_values[item]).sum()
    }
}

/// Result of one exact-solver invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// An `(item, bucket)` assignment satisfying all constraints.
    Assignment(Vec<(usize, usize)>),
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The solver hit its budget before proving anything.
    Timeout,
}

/// Capability interface to an exact optimizer.
///
/// Implementations wrap a real MIP/CP backend or a test stub; the core
/// never depends on which.
pub trait ExactSolver: Send + Sync {
    /// Attempts to solve the model to optimality.
    fn optimize(&self, model: &ReassignModel) -> SolveOutcome;
}

/// Refines a greedy split with an exact solver, falling back on failure.
///
/// `greedy` is the `(item, bucket)` split extracted from the engine's
/// log. The solver's answer replaces it only when it is valid and at
/// least as good; on `Timeout`, `Infeasible`, or a constraint-violating
/// answer the greedy split is returned unchanged — a solver failure
/// never fails the run.
pub fn refine(
    greedy: Vec<(usize, usize)>,
    model: &ReassignModel,
    solver: &dyn ExactSolver,
) -> Vec<(usize, usize)> {
    match solver.optimize(model) {
        SolveOutcome::Assignment(exact) => {
            if model.is_valid(&exact) && model.objective(&exact) >= model.objective(&greedy) {
                exact
            } else {
                greedy
            }
        }
        SolveOutcome::Infeasible | SolveOutcome::Timeout => greedy,
    }
}

/// Extracts the `(task, resource)` split of a log as reassignment pairs.
///
/// One pair per demand-consuming leg; transit legs are skipped.
pub fn split_of(log: &AssignmentLog) -> Vec<(usize, usize)> {
    log.records
        .iter()
        .flat_map(|r| {
            r.legs
                .iter()
                .filter(|l| l.amount > 0)
                .map(move |l| (l.task.0, r.resource.0))
        })
        .collect()
}

/// Exhaustive depth-first reassignment solver with a node budget.
///
/// Explores, for each item, every eligible bucket plus leaving the item
/// out. Suitable for the small final-split models this crate delegates;
/// returns [`SolveOutcome::Timeout`] once the node budget is spent.
#[derive(Debug, Clone)]
pub struct BranchingSolver {
    /// Maximum search nodes to expand.
    pub node_budget: u64,
}

impl BranchingSolver {
    /// Creates a solver with the given node budget.
    pub fn new(node_budget: u64) -> Self {
        Self { node_budget }
    }
}

impl ExactSolver for BranchingSolver {
    fn optimize(&self, model: &ReassignModel) -> SolveOutcome {
        let items = model.item_values.len();
        let mut options: Vec<Vec<usize>> = vec![Vec::new(); items];
        for &(item, bucket) in &model.eligible {
            if item < items && bucket < model.bucket_capacities.len() {
                options[item].push(bucket);
            }
        }

        let mut state = DfsState {
            model,
            options: &options,
            used: vec![0; model.bucket_capacities.len()],
            chosen: Vec::new(),
            best: None,
            best_value: f64::NEG_INFINITY,
            nodes_left: self.node_budget,
        };
        if !state.dfs(0, 0.0) {
            return SolveOutcome::Timeout;
        }
        match state.best {
            Some(best) => SolveOutcome::Assignment(best),
            None => SolveOutcome::Infeasible,
        }
    }
}

struct DfsState<'a> {
    model: &'a ReassignModel,
    options: &'a [Vec<usize>],
    used: Vec<i64>,
    chosen: Vec<(usize, usize)>,
    best: Option<Vec<(usize, usize)>>,
    best_value: f64,
    nodes_left: u64,
}

impl DfsState<'_> {
    /// Returns `false` when the node budget ran out.
    fn dfs(&mut self, item: usize, value: f64) -> bool {
        if self.nodes_left == 0 {
            return false;
        }
        self.nodes_left -= 1;

        if item == self.options.len() {
            if value > self.best_value {
                self.best_value = value;
                self.best = Some(self.chosen.clone());
            }
            return true;
        }

        // skip the item
        if !self.dfs(item + 1, value) {
            return false;
        }
        // or place it in each eligible bucket with room
        for i in 0..self.options[item].len() {
            let bucket = self.options[item][i];
            if self.used[bucket] >= self.model.bucket_capacities[bucket] {
                continue;
            }
            self.used[bucket] += 1;
            self.chosen.push((item, bucket));
            let ok = self.dfs(item + 1, value + self.model.item_values[item]);
            self.chosen.pop();
            self.used[bucket] -= 1;
            if !ok {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignmentRecord, Leg, ResourceId, TaskId};

    fn tiny_model() -> ReassignModel {
        ReassignModel {
            item_values: vec![10.0, 6.0, 4.0],
            bucket_capacities: vec![1, 1],
            eligible: vec![(0, 0), (1, 0), (1, 1), (2, 1)],
        }
    }

    struct StubSolver(SolveOutcome);

    impl ExactSolver for StubSolver {
        fn optimize(&self, _model: &ReassignModel) -> SolveOutcome {
            self.0.clone()
        }
    }

    #[test]
    fn test_branching_solver_finds_optimum() {
        let model = tiny_model();
        let outcome = BranchingSolver::new(10_000).optimize(&model);
        let assignment = match outcome {
            SolveOutcome::Assignment(a) => a,
            other => panic!("expected assignment, got {other:?}"),
        };
        assert!(model.is_valid(&assignment));
        // optimum places items 0 and 1 (16.0), leaving item 2 out
        assert!((model.objective(&assignment) - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_branching_solver_times_out() {
        let outcome = BranchingSolver::new(2).optimize(&tiny_model());
        assert_eq!(outcome, SolveOutcome::Timeout);
    }

    #[test]
    fn test_refine_keeps_greedy_on_timeout() {
        let greedy = vec![(1, 0), (2, 1)];
        let refined = refine(greedy.clone(), &tiny_model(), &StubSolver(SolveOutcome::Timeout));
        assert_eq!(refined, greedy);
    }

    #[test]
    fn test_refine_keeps_greedy_on_infeasible() {
        let greedy = vec![(0, 0)];
        let refined = refine(
            greedy.clone(),
            &tiny_model(),
            &StubSolver(SolveOutcome::Infeasible),
        );
        assert_eq!(refined, greedy);
    }

    #[test]
    fn test_refine_rejects_invalid_solver_answer() {
        // bucket 0 has capacity 1; the stub's answer overfills it
        let greedy = vec![(0, 0), (2, 1)];
        let bogus = StubSolver(SolveOutcome::Assignment(vec![(0, 0), (1, 0)]));
        let refined = refine(greedy.clone(), &tiny_model(), &bogus);
        assert_eq!(refined, greedy);
    }

    #[test]
    fn test_refine_rejects_worse_solver_answer() {
        let greedy = vec![(0, 0), (2, 1)];
        let worse = StubSolver(SolveOutcome::Assignment(vec![(1, 1)]));
        let refined = refine(greedy.clone(), &tiny_model(), &worse);
        assert_eq!(refined, greedy);
    }

    #[test]
    fn test_refine_adopts_better_answer() {
        let model = tiny_model();
        let greedy = vec![(2, 1)];
        let refined = refine(greedy, &model, &BranchingSolver::new(10_000));
        assert!((model.objective(&refined) - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_split_of_skips_transit_legs() {
        let mut log = AssignmentLog::new();
        log.push(AssignmentRecord {
            resource: ResourceId(1),
            legs: vec![
                Leg { task: TaskId(0), amount: 0 },
                Leg { task: TaskId(3), amount: 2 },
            ],
            start_ms: 0,
            end_ms: 10,
            value: 1.0,
        });
        assert_eq!(split_of(&log), vec![(3, 1)]);
    }
}
