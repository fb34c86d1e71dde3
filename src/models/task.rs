//! Task model.
//!
//! A task is a unit of demand that can be satisfied, fully or partially,
//! by one or more resources: a street edge to cover, a customer order, a
//! video to place, a book to scan. Tasks are created at load time and
//! never destroyed; once done they are ignored by all further scoring.

use serde::{Deserialize, Serialize};

/// Opaque stable identifier of a task within an [`Instance`].
///
/// [`Instance`]: super::Instance
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TaskId(pub usize);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// A unit of demand to be satisfied by resources.
///
/// `remaining` is monotonically non-increasing: it only decreases as
/// resources partially satisfy the task, and only through the engine's
/// commit step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier (arena index).
    pub id: TaskId,
    /// Total demand declared at load time.
    pub demand: i64,
    /// Demand still unsatisfied. Starts at `demand`, only decreases.
    pub remaining: i64,
    /// Benefit earned per unit of demand satisfied.
    pub value_per_unit: f64,
    /// Fixed time before service can begin (travel, sign-up, setup).
    pub lead_time_ms: i64,
    /// Service time per unit of demand at efficiency 1.0.
    pub unit_time_ms: i64,
    /// Earliest start time. `None` = available immediately.
    pub release_ms: Option<i64>,
    /// Latest completion time. `None` = no deadline.
    pub deadline_ms: Option<i64>,
    /// Set once demand reaches zero or the deadline passes.
    pub done: bool,
}

impl Task {
    /// Creates a task with the given demand, worth 1.0 per unit.
    pub fn new(id: TaskId, demand: i64) -> Self {
        Self {
            id,
            demand,
            remaining: demand,
            value_per_unit: 1.0,
            lead_time_ms: 0,
            unit_time_ms: 0,
            release_ms: None,
            deadline_ms: None,
            done: demand == 0,
        }
    }

    /// Sets the per-unit benefit.
    pub fn with_value(mut self, value_per_unit: f64) -> Self {
        self.value_per_unit = value_per_unit;
        self
    }

    /// Sets the fixed lead time.
    pub fn with_lead_time(mut self, lead_time_ms: i64) -> Self {
        self.lead_time_ms = lead_time_ms;
        self
    }

    /// Sets the per-unit service time.
    pub fn with_unit_time(mut self, unit_time_ms: i64) -> Self {
        self.unit_time_ms = unit_time_ms;
        self
    }

    /// Sets the release time (earliest start).
    pub fn with_release(mut self, release_ms: i64) -> Self {
        self.release_ms = Some(release_ms);
        self
    }

    /// Sets the deadline (latest completion).
    pub fn with_deadline(mut self, deadline_ms: i64) -> Self {
        self.deadline_ms = Some(deadline_ms);
        self
    }

    /// Whether the task can still accept work at the given time.
    ///
    /// A task is open if it is not done, has remaining demand, and its
    /// deadline has not already passed.
    pub fn is_open(&self, now_ms: i64) -> bool {
        if self.done || self.remaining <= 0 {
            return false;
        }
        match self.deadline_ms {
            Some(d) => now_ms < d,
            None => true,
        }
    }

    /// Earliest time service can start for a resource free at `now_ms`.
    pub fn earliest_start(&self, now_ms: i64) -> i64 {
        match self.release_ms {
            Some(r) => now_ms.max(r),
            None => now_ms,
        }
    }

    /// Time to serve `amount` units with a resource of the given
    /// efficiency, including the fixed lead time. Rounded up.
    pub fn service_time_ms(&self, amount: i64, efficiency: f64) -> i64 {
        let raw = (self.lead_time_ms + amount * self.unit_time_ms) as f64;
        (raw / efficiency).ceil() as i64
    }
}
