//! Bounded best-first path search for routing variants.
//!
//! In routing instances each task is an edge of a street network and a
//! resource earns the edge's value by driving it once. Scoring a popped
//! resource therefore means finding a whole path of edges, not a single
//! task: starting from the resource's current node, simple paths (no
//! node revisited) are enumerated breadth-first up to a hop bound,
//! pruning any path that would overrun the time budget and any whose
//! benefit/time ratio falls too far behind the best seen so far.
//!
//! The search tree is bounded by two tunable parameters rather than
//! exhaustive enumeration: the maximum hop count and the fraction of the
//! current best ratio a branch must hold to be expanded further.

use std::collections::VecDeque;

use crate::dsu::DisjointSet;
use crate::models::{Candidate, Leg, Resource, Task, TaskId};
use crate::scoring::{CandidateSelector, ScoreContext};

/// Default maximum number of nodes in one path.
pub const DEFAULT_MAX_HOPS: usize = 20;

/// Default expansion threshold as a fraction of the best ratio.
///
/// Empirically tuned; instance-dependent, hence configurable.
pub const DEFAULT_PRUNE_RATIO: f64 = 0.5;

/// An edge of the network, carrying the task it corresponds to.
#[derive(Debug, Clone)]
pub struct NetworkEdge {
    /// Endpoint nodes.
    pub a: usize,
    /// Endpoint nodes.
    pub b: usize,
    /// Whether the edge can be traversed in both directions.
    pub bidirectional: bool,
    /// Traversal time.
    pub time_ms: i64,
    /// Task satisfied by traversing this edge while it has demand left.
    pub task: TaskId,
}

/// A node/edge network whose edges are tasks.
///
/// Owns a [`DisjointSet`] over its nodes so reachability queries do not
/// require a traversal.
#[derive(Debug, Clone)]
pub struct Network {
    edges: Vec<NetworkEdge>,
    adjacency: Vec<Vec<(usize, usize)>>,
    components: DisjointSet,
}

impl Network {
    /// Creates a network with `node_count` nodes and no edges.
    pub fn new(node_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            adjacency: vec![Vec::new(); node_count],
            components: DisjointSet::new(node_count),
        }
    }

    /// Adds an edge backed by the given task.
    pub fn add_edge(
        &mut self,
        a: usize,
        b: usize,
        bidirectional: bool,
        time_ms: i64,
        task: TaskId,
    ) {
        let idx = self.edges.len();
        self.adjacency[a].push((b, idx));
        if bidirectional {
            self.adjacency[b].push((a, idx));
        }
        self.components.union(a, b);
        self.edges.push(NetworkEdge {
            a,
            b,
            bidirectional,
            time_ms,
            task,
        });
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[NetworkEdge] {
        &self.edges
    }

    /// Outgoing `(neighbor, edge index)` pairs of a node.
    pub fn neighbors(&self, node: usize) -> &[(usize, usize)] {
        &self.adjacency[node]
    }

    /// Whether two nodes are in the same connected component.
    pub fn connected(&self, a: usize, b: usize) -> bool {
        self.components.connected(a, b)
    }
}

/// Breadth-first enumeration of simple paths with ratio pruning.
#[derive(Debug, Clone, Copy)]
pub struct PathSearch {
    /// Maximum nodes per path, including the start node.
    pub max_hops: usize,
    /// A branch is expanded only if its ratio is at least this fraction
    /// of the best ratio found so far.
    pub prune_ratio: f64,
}

impl PathSearch {
    /// Creates a search with default bounds.
    pub fn new() -> Self {
        Self {
            max_hops: DEFAULT_MAX_HOPS,
            prune_ratio: DEFAULT_PRUNE_RATIO,
        }
    }

    /// Sets the hop bound.
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops.max(2);
        self
    }

    /// Sets the expansion threshold.
    pub fn with_prune_ratio(mut self, prune_ratio: f64) -> Self {
        self.prune_ratio = prune_ratio.clamp(0.0, 1.0);
        self
    }

    /// Finds the best benefit/time path from `start` within the budget.
    ///
    /// Returns `None` when no path earns any benefit — every reachable
    /// edge-task is done or out of time. Ties in ratio are broken by
    /// discovery order: strict `>` keeps the first path found.
    pub fn best_path(
        &self,
        network: &Network,
        tasks: &[Task],
        start: usize,
        now_ms: i64,
        horizon_ms: i64,
    ) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        let mut best_ratio = 0.0_f64;

        let mut frontier: VecDeque<PathState> = VecDeque::new();
        frontier.push_back(PathState {
            nodes: vec![start],
            legs: Vec::new(),
            benefit: 0.0,
            time_ms: 0,
        });

        while let Some(state) = frontier.pop_front() {
            if state.nodes.len() >= self.max_hops {
                continue;
            }
            let cur = *state.nodes.last().unwrap_or(&start);

            for &(next, edge_idx) in network.neighbors(cur) {
                if state.nodes.contains(&next) {
                    continue;
                }
                let edge = &network.edges[edge_idx];
                if now_ms + state.time_ms + edge.time_ms > horizon_ms {
                    continue;
                }
                let task = &tasks[edge.task.0];
                let open = !task.done && task.remaining > 0;
                let extended = state.extend(next, edge, task, open);

                if open {
                    let ratio = extended.ratio();
                    if ratio > best_ratio {
                        best_ratio = ratio;
                        best = Some(extended.to_candidate(now_ms));
                        frontier.push_back(extended);
                    } else if ratio > self.prune_ratio * best_ratio {
                        frontier.push_back(extended);
                    }
                } else {
                    // already covered: costs time, earns nothing, but may
                    // lead to uncovered edges further on
                    frontier.push_back(extended);
                }
            }
        }

        best
    }
}

impl Default for PathSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
struct PathState {
    nodes: Vec<usize>,
    legs: Vec<Leg>,
    benefit: f64,
    time_ms: i64,
}

impl PathState {
    fn extend(&self, next: usize, edge: &NetworkEdge, task: &Task, open: bool) -> Self {
        let mut nodes = self.nodes.clone();
        nodes.push(next);
        let mut legs = self.legs.clone();
        let amount = if open { task.remaining } else { 0 };
        legs.push(Leg {
            task: edge.task,
            amount,
        });
        Self {
            nodes,
            legs,
            benefit: self.benefit + amount as f64 * task.value_per_unit,
            time_ms: self.time_ms + edge.time_ms,
        }
    }

    fn ratio(&self) -> f64 {
        self.benefit / (self.time_ms.max(1)) as f64
    }

    fn to_candidate(&self, now_ms: i64) -> Candidate {
        Candidate {
            value: self.ratio(),
            legs: self.legs.clone(),
            completes_at_ms: now_ms + self.time_ms,
            ends_at_node: self.nodes.last().copied(),
        }
    }
}

/// Plugs the path search into the resource-pull engine.
///
/// The popped resource's current node seeds the search; committing the
/// returned candidate marks the traversed edge-tasks as covered and
/// moves the resource to the path's final node.
#[derive(Debug)]
pub struct PathSelector {
    network: Network,
    search: PathSearch,
}

impl PathSelector {
    /// Creates a selector over the given network.
    pub fn new(network: Network, search: PathSearch) -> Self {
        Self { network, search }
    }

    /// The underlying network.
    pub fn network(&self) -> &Network {
        &self.network
    }
}

impl CandidateSelector for PathSelector {
    fn select(&self, resource: &Resource, tasks: &[Task], ctx: &ScoreContext) -> Option<Candidate> {
        let start = resource.at_node?;
        self.search
            .best_path(&self.network, tasks, start, ctx.now_ms, ctx.horizon_ms)
    }
}
