// src/wbs/task.rs

//! The task entity and the value types used to create and edit tasks.

use std::borrow::Borrow;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::TaskKind;

/// Opaque, stable identifier of a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for TaskId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for TaskId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TaskId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A unit of schedulable work, stored flat in a [`TaskTree`](super::TaskTree).
///
/// Containment is expressed through `parent_id` / `children` (ids, not
/// nested values); `dependencies` is a separate predecessor relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Source deliverable name (only for tasks created from deliverables).
    #[serde(default)]
    pub deliverable: Option<String>,
    /// Phase code; empty for tasks added outside the phase structure.
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub discipline: String,
    #[serde(default)]
    pub duration_days: u32,
    /// Predecessor ids. Unique and never containing `id` itself.
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
    /// 0-100, entered by the user.
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub parent_id: Option<TaskId>,
    #[serde(default)]
    pub children: Vec<TaskId>,
    #[serde(rename = "type", default)]
    pub kind: TaskKind,
    #[serde(default = "default_expanded")]
    pub expanded: bool,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

fn default_expanded() -> bool {
    true
}

impl Task {
    /// A bare task with everything but `id` and `name` defaulted.
    pub fn new(id: impl Into<TaskId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            deliverable: None,
            phase: String::new(),
            discipline: String::new(),
            duration_days: 0,
            dependencies: Vec::new(),
            progress: 0,
            assignee: None,
            level: 0,
            parent_id: None,
            children: Vec::new(),
            kind: TaskKind::Task,
            expanded: true,
            start_date: None,
            end_date: None,
        }
    }

    /// Replace the dependency list, dropping duplicates and self references.
    pub fn set_dependencies(&mut self, deps: impl IntoIterator<Item = TaskId>) {
        self.dependencies = normalise_dependencies(&self.id, deps);
    }

    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
    }

    pub fn is_phase_group(&self) -> bool {
        self.level == 0 && !self.children.is_empty()
    }
}

/// Keep the first occurrence of every id, drop `owner` itself.
pub(crate) fn normalise_dependencies(
    owner: &TaskId,
    deps: impl IntoIterator<Item = TaskId>,
) -> Vec<TaskId> {
    let mut out: Vec<TaskId> = Vec::new();
    for dep in deps {
        if &dep == owner || out.contains(&dep) {
            continue;
        }
        out.push(dep);
    }
    out
}

/// Initial fields for a task added through the editing session.
///
/// Position (`level`, `parent_id`) and `id` are assigned by the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub name: String,
    pub description: String,
    pub phase: String,
    pub discipline: String,
    pub duration_days: u32,
    pub dependencies: Vec<TaskId>,
    pub progress: u8,
    pub assignee: Option<String>,
    pub kind: TaskKind,
}

impl NewTask {
    pub fn into_task(self, id: TaskId) -> Task {
        let mut task = Task::new(id, self.name);
        task.description = self.description;
        task.phase = self.phase;
        task.discipline = self.discipline;
        task.duration_days = self.duration_days;
        task.set_dependencies(self.dependencies);
        task.set_progress(self.progress);
        task.assignee = self.assignee;
        task.kind = self.kind;
        task
    }
}

/// Partial update of a task. `None` leaves the field unchanged.
///
/// `assignee: Some(None)` clears the assignee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_days: Option<u32>,
    pub dependencies: Option<Vec<TaskId>>,
    pub assignee: Option<Option<String>>,
    pub kind: Option<TaskKind>,
    pub progress: Option<u8>,
}

impl TaskPatch {
    pub(crate) fn apply(self, task: &mut Task) {
        if let Some(name) = self.name {
            task.name = name;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(days) = self.duration_days {
            task.duration_days = days;
        }
        if let Some(deps) = self.dependencies {
            task.set_dependencies(deps);
        }
        if let Some(assignee) = self.assignee {
            task.assignee = assignee;
        }
        if let Some(kind) = self.kind {
            task.kind = kind;
        }
        if let Some(progress) = self.progress {
            task.set_progress(progress);
        }
    }
}

/// Nested, tree-shaped view of a task and its subtree, as handed to
/// renderers and serialised to JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskNode {
    pub id: TaskId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliverable: Option<String>,
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub discipline: String,
    #[serde(default)]
    pub duration_days: u32,
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
    #[serde(default)]
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default)]
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<TaskId>,
    #[serde(rename = "type", default)]
    pub kind: TaskKind,
    #[serde(default = "default_expanded")]
    pub expanded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub children: Vec<TaskNode>,
}

impl TaskNode {
    pub(crate) fn from_task(task: &Task, children: Vec<TaskNode>) -> Self {
        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            description: task.description.clone(),
            deliverable: task.deliverable.clone(),
            phase: task.phase.clone(),
            discipline: task.discipline.clone(),
            duration_days: task.duration_days,
            dependencies: task.dependencies.clone(),
            progress: task.progress,
            assignee: task.assignee.clone(),
            level: task.level,
            parent_id: task.parent_id.clone(),
            kind: task.kind,
            expanded: task.expanded,
            start_date: task.start_date,
            end_date: task.end_date,
            children,
        }
    }

    /// Split into the flat task (without children links) and the child nodes.
    pub(crate) fn into_task(self) -> (Task, Vec<TaskNode>) {
        let mut task = Task::new(self.id, self.name);
        task.description = self.description;
        task.deliverable = self.deliverable;
        task.phase = self.phase;
        task.discipline = self.discipline;
        task.duration_days = self.duration_days;
        task.set_dependencies(self.dependencies);
        task.set_progress(self.progress);
        task.assignee = self.assignee;
        task.kind = self.kind;
        task.expanded = self.expanded;
        task.start_date = self.start_date;
        task.end_date = self.end_date;
        (task, self.children)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TaskNode::count).sum::<usize>()
    }
}
