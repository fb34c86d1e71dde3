//! Problem instance arena.
//!
//! An instance owns all resources and tasks of one problem, addressed by
//! their opaque ids. The engine borrows the instance mutably for the
//! duration of a run; all state changes go through its commit step.

use serde::{Deserialize, Serialize};

use super::{Resource, ResourceId, Task, TaskId};

/// A parsed problem instance: resources, tasks, and the time horizon.
///
/// Built by an external I/O loader, consumed by an engine. Ids are
/// handed out by `add_resource`/`add_task` and index directly into the
/// arenas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    /// All resources, indexed by [`ResourceId`].
    pub resources: Vec<Resource>,
    /// All tasks, indexed by [`TaskId`].
    pub tasks: Vec<Task>,
    /// Maximum simulated time; no assignment is considered beyond it.
    pub horizon_ms: i64,
}

impl Instance {
    /// Creates an empty instance with the given horizon.
    pub fn new(horizon_ms: i64) -> Self {
        Self {
            resources: Vec::new(),
            tasks: Vec::new(),
            horizon_ms,
        }
    }

    /// Adds a resource built by `f` and returns its id.
    pub fn add_resource(&mut self, f: impl FnOnce(ResourceId) -> Resource) -> ResourceId {
        let id = ResourceId(self.resources.len());
        self.resources.push(f(id));
        id
    }

    /// Adds a task built by `f` and returns its id.
    pub fn add_task(&mut self, f: impl FnOnce(TaskId) -> Task) -> TaskId {
        let id = TaskId(self.tasks.len());
        self.tasks.push(f(id));
        id
    }

    /// Borrows a resource by id.
    pub fn resource(&self, id: ResourceId) -> &Resource {
        &self.resources[id.0]
    }

    /// Borrows a task by id.
    pub fn task(&self, id: TaskId) -> &Task {
        &self.tasks[id.0]
    }

    /// Total demand still unsatisfied across all tasks.
    pub fn remaining_demand(&self) -> i64 {
        self.tasks.iter().map(|t| t.remaining).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_ids_are_indices() {
        let mut inst = Instance::new(1000);
        let r0 = inst.add_resource(Resource::new);
        let r1 = inst.add_resource(|id| Resource::new(id).with_capacity(5));
        let t0 = inst.add_task(|id| Task::new(id, 3));

        assert_eq!(r0, ResourceId(0));
        assert_eq!(r1, ResourceId(1));
        assert_eq!(t0, TaskId(0));
        assert_eq!(inst.resource(r1).capacity, Some(5));
        assert_eq!(inst.task(t0).demand, 3);
    }

    #[test]
    fn test_remaining_demand() {
        let mut inst = Instance::new(100);
        inst.add_task(|id| Task::new(id, 4));
        inst.add_task(|id| Task::new(id, 6));
        assert_eq!(inst.remaining_demand(), 10);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut inst = Instance::new(500);
        inst.add_resource(|id| Resource::new(id).with_capacity(7));
        inst.add_task(|id| Task::new(id, 2).with_deadline(400));

        let json = serde_json::to_string(&inst).unwrap();
        let back: Instance = serde_json::from_str(&json).unwrap();
        assert_eq!(back.horizon_ms, 500);
        assert_eq!(back.resources.len(), 1);
        assert_eq!(back.tasks[0].deadline_ms, Some(400));
    }
}
