// src/wbs/mutator.rs

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::ConfigFile;
use crate::errors::{Result, WbsError};
use crate::wbs::builder::build_wbs;
use crate::wbs::deliverable::Deliverable;
use crate::wbs::graph::cycle_with;
use crate::wbs::scheduler::{ScheduleReport, schedule};
use crate::wbs::task::{NewTask, Task, TaskId, TaskNode, TaskPatch};
use crate::wbs::tree::TaskTree;

/// A single-user editing session over one work breakdown.
///
/// Every mutation other than [`WbsSession::toggle_expand`] reschedules the
/// whole tree before returning, so dates read from the session are always
/// current.
#[derive(Debug, Clone)]
pub struct WbsSession {
    tree: TaskTree,
    config: ConfigFile,
    /// Scheduling reference date.
    today: NaiveDate,
    /// Counter behind `task-<n>` ids.
    next_id: u64,
    last_report: ScheduleReport,
}

impl WbsSession {
    /// An empty session.
    pub fn new(config: ConfigFile, today: NaiveDate) -> Self {
        Self {
            tree: TaskTree::new(),
            config,
            today,
            next_id: 1,
            last_report: ScheduleReport::default(),
        }
    }

    /// Build the tree from `deliverables` and schedule it.
    pub fn from_deliverables(
        deliverables: &[Deliverable],
        config: ConfigFile,
        today: NaiveDate,
    ) -> Result<Self> {
        let mut session = Self::new(config, today);
        session.rebuild(deliverables)?;
        Ok(session)
    }

    /// Adopt an existing tree (e.g. one read back from JSON) and schedule it.
    pub fn from_tree(tree: TaskTree, config: ConfigFile, today: NaiveDate) -> Result<Self> {
        let mut session = Self::new(config, today);
        session.tree = tree;
        session.reschedule()?;
        Ok(session)
    }

    /// Replace the whole tree with one built from a new deliverable list.
    pub fn rebuild(&mut self, deliverables: &[Deliverable]) -> Result<()> {
        self.tree = build_wbs(deliverables, &self.config, self.today)?;
        self.reschedule()?;
        Ok(())
    }

    /// Move the reference date and reschedule.
    pub fn set_today(&mut self, today: NaiveDate) -> Result<()> {
        self.today = today;
        self.reschedule()?;
        Ok(())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn tree(&self) -> &TaskTree {
        &self.tree
    }

    /// Nested, dated rendering of the tree.
    pub fn nodes(&self) -> Vec<TaskNode> {
        self.tree.to_nodes()
    }

    pub fn roots(&self) -> &[TaskId] {
        self.tree.roots()
    }

    /// Tasks in structural order.
    pub fn flatten(&self) -> Vec<&Task> {
        self.tree.flatten()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tree.get(id)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Result of the latest scheduling pass.
    pub fn report(&self) -> &ScheduleReport {
        &self.last_report
    }

    /// Recompute every date.
    pub fn reschedule(&mut self) -> Result<&ScheduleReport> {
        self.last_report = schedule(&mut self.tree, self.today, self.config.schedule())?;
        Ok(&self.last_report)
    }

    /// Add a task under `parent` (or as a new root) and return its id.
    /// Blank names are rejected.
    ///
    /// No dependency edges are added implicitly; `fields.dependencies` is
    /// used as given (duplicates dropped).
    pub fn add_task(&mut self, parent: Option<&str>, fields: NewTask) -> Result<TaskId> {
        check_name(&fields.name)?;
        if let Some(parent) = parent {
            if !self.tree.contains(parent) {
                return Err(WbsError::TaskNotFound(parent.to_string()));
            }
        }

        let id = self.fresh_id();
        let mut task = fields.into_task(id.clone());
        task.parent_id = parent.map(TaskId::from);

        let level = self.tree.insert(task)?.level;
        info!(task = %id, parent = ?parent, level, "added task");

        self.reschedule()?;
        Ok(id)
    }

    /// Update a task in place. `Ok(false)` when no task has this id.
    ///
    /// A blank name or a dependency list that would close a cycle is
    /// rejected and the task is left untouched.
    pub fn edit_task(&mut self, id: &str, patch: TaskPatch) -> Result<bool> {
        if !self.tree.contains(id) {
            debug!(task = %id, "edit of unknown task; ignoring");
            return Ok(false);
        }
        if let Some(name) = patch.name.as_deref() {
            check_name(name)?;
        }

        if let Some(deps) = patch.dependencies.as_ref() {
            if let Some(members) = cycle_with(&self.tree, id, deps) {
                warn!(task = %id, ?members, "rejected dependency edit: would form a cycle");
                return Err(WbsError::DependencyCycle(members));
            }
        }

        if let Some(task) = self.tree.get_mut(id) {
            patch.apply(task);
        }
        debug!(task = %id, "edited task");

        self.reschedule()?;
        Ok(true)
    }

    /// Remove a task and its subtree; unknown ids are a no-op.
    ///
    /// The removed ids are also dropped from the dependency lists of the
    /// remaining tasks.
    pub fn delete_task(&mut self, id: &str) -> Result<()> {
        let removed = self.tree.remove_subtree(id);
        if removed.is_empty() {
            debug!(task = %id, "delete of unknown task; ignoring");
            return Ok(());
        }

        let removed: HashSet<TaskId> = removed.into_iter().collect();
        let pruned = self.tree.prune_dependencies(&removed);
        info!(task = %id, removed = removed.len(), pruned, "deleted task");

        self.reschedule()?;
        Ok(())
    }

    /// Flip the expanded/collapsed flag. Returns the new state, or `None`
    /// for an unknown id.
    pub fn toggle_expand(&mut self, id: &str) -> Option<bool> {
        let task = self.tree.get_mut(id)?;
        task.expanded = !task.expanded;
        Some(task.expanded)
    }

    fn fresh_id(&mut self) -> TaskId {
        loop {
            let id = TaskId::new(format!("task-{}", self.next_id));
            self.next_id += 1;
            if !self.tree.contains(id.as_str()) {
                return id;
            }
        }
    }
}

fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(WbsError::InvalidTask("task name must not be blank".to_string()));
    }
    Ok(())
}
