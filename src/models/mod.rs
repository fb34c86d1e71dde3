//! Domain models for greedy assignment.
//!
//! Provides the core data types shared by all solver variants. The same
//! resource/task vocabulary maps onto each concrete problem:
//!
//! | greedy-dispatch | Routing | Delivery | Caching | Library scanning |
//! |-----------------|---------|----------|---------|------------------|
//! | Resource | Car | Drone | Cache server | Library |
//! | Task | Street edge | Customer order | Video | Book |
//! | Candidate | Path | Load-and-deliver trip | Placement | Scan batch |
//! | AssignmentLog | Movement list | Command list | Server contents | Scan order |

mod candidate;
mod instance;
mod log;
mod resource;
mod task;

pub use candidate::{Candidate, Leg};
pub use instance::Instance;
pub use log::{AssignmentLog, AssignmentRecord};
pub use resource::{Resource, ResourceId};
pub use task::{Task, TaskId};
