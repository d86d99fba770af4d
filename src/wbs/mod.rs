// src/wbs/mod.rs

//! Work breakdown schedule engine.
//!
//! - [`task`] defines the task entity and its create/edit value types.
//! - [`tree`] stores tasks in an id-keyed arena with parent/child links.
//! - [`graph`] views the dependency relation as a petgraph DAG.
//! - [`deliverable`] is the input record the tree is built from.
//! - [`builder`] turns deliverables into a phase-grouped task tree.
//! - [`scheduler`] assigns start/end dates.
//! - [`mutator`] applies user edits and keeps dates current.

pub mod builder;
pub mod deliverable;
pub mod graph;
pub mod mutator;
pub mod scheduler;
pub mod task;
pub mod tree;

pub use builder::{build_wbs, group_by_phase};
pub use deliverable::{Deliverable, load_deliverables};
pub use graph::DependencyGraph;
pub use mutator::WbsSession;
pub use scheduler::{ScheduleReport, schedule};
pub use task::{NewTask, Task, TaskId, TaskNode, TaskPatch};
pub use tree::TaskTree;
