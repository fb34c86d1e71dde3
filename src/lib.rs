//! Greedy assignment framework for discrete optimization heuristics.
//!
//! Provides the common core shared by single-run heuristic solvers for
//! routing, packing, delivery, caching, and scheduling problems: a greedy
//! assignment engine driven by a dynamically re-scored priority queue over
//! a resource/task bipartite relationship.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Resource`, `Task`, `Instance`,
//!   `Candidate`, `AssignmentRecord`, `AssignmentLog`
//! - **`scoring`**: The `Scorer` contract and built-in scoring families
//!   (benefit/cost ratio, smoothed feasibility)
//! - **`queue`**: Availability and candidate priority queues with
//!   deterministic tie-breaking
//! - **`engine`**: The greedy assignment engines — resource-pull and
//!   lazy-invalidation variants
//! - **`search`**: Bounded best-first path search over edge-task networks
//! - **`exact`**: Capability interface for delegating a sub-problem to an
//!   external exact solver, with greedy fallback
//! - **`validation`**: Structural integrity checks on instances
//!
//! # Architecture
//!
//! Each solver built on this crate is a self-contained batch program: an
//! external loader parses one problem instance into an [`models::Instance`],
//! an engine from [`engine`] drains the availability queue and commits
//! assignments, and the resulting [`models::AssignmentLog`] is handed back
//! for serialization. All task/resource mutation is routed through the
//! engine's commit step so the monotonicity and capacity invariants are
//! enforced in one place.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Minoux (1978), "Accelerated greedy algorithms for maximizing
//!   submodular set functions" (lazy evaluation)
//! - Cormen et al. (2009), "Introduction to Algorithms", Ch. 21
//!   (disjoint sets)

pub mod dsu;
pub mod engine;
pub mod exact;
pub mod models;
pub mod queue;
pub mod scoring;
pub mod search;
pub mod validation;
