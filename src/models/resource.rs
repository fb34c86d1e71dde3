//! Resource model.
//!
//! Resources are the agents that consume simulated time performing
//! assigned work: vehicles, drones, cache servers, libraries. Each
//! resource carries its next-available time, an optional capacity with a
//! usage ledger, and the ordered log of task references assigned to it.

use serde::{Deserialize, Serialize};

use super::TaskId;

/// Opaque stable identifier of a resource within an [`Instance`].
///
/// Wraps the resource's arena index; also serves as the deterministic
/// tie-break key in the availability queue.
///
/// [`Instance`]: super::Instance
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ResourceId(pub usize);

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// An agent that is assigned work by the engine.
///
/// Resources live for the whole run; they are never destroyed, only
/// marked exhausted once no reachable task remains. All mutable fields
/// are written exclusively by the engine's commit step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier (arena index).
    pub id: ResourceId,
    /// Simulated time at which the resource becomes free.
    /// Monotonically non-decreasing across commits.
    pub available_at_ms: i64,
    /// Total demand this resource may absorb. `None` = unbounded.
    pub capacity: Option<i64>,
    /// Demand absorbed by committed assignments. Never exceeds `capacity`.
    pub used: i64,
    /// Work rate multiplier (1.0 = normal, <1.0 = slower, >1.0 = faster).
    pub efficiency: f64,
    /// Current network node for routing variants. `None` = off-network.
    pub at_node: Option<usize>,
    /// Ordered task references committed to this resource.
    pub assigned: Vec<TaskId>,
    /// Set once no feasible task remains for this resource.
    pub exhausted: bool,
}

impl Resource {
    /// Creates a resource available at t=0 with unbounded capacity.
    pub fn new(id: ResourceId) -> Self {
        Self {
            id,
            available_at_ms: 0,
            capacity: None,
            used: 0,
            efficiency: 1.0,
            at_node: None,
            assigned: Vec::new(),
            exhausted: false,
        }
    }

    /// Sets the time the resource first becomes available.
    pub fn with_available_at(mut self, time_ms: i64) -> Self {
        self.available_at_ms = time_ms;
        self
    }

    /// Sets the capacity bound.
    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Sets the efficiency multiplier.
    pub fn with_efficiency(mut self, efficiency: f64) -> Self {
        self.efficiency = efficiency;
        self
    }

    /// Places the resource on a network node.
    pub fn with_node(mut self, node: usize) -> Self {
        self.at_node = Some(node);
        self
    }

    /// Remaining capacity, or `None` if unbounded.
    pub fn capacity_left(&self) -> Option<i64> {
        self.capacity.map(|c| c - self.used)
    }

    /// Whether an additional `amount` of demand fits within capacity.
    pub fn fits(&self, amount: i64) -> bool {
        match self.capacity_left() {
            Some(left) => amount <= left,
            None => true,
        }
    }
}
