// src/wbs/tree.rs

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::errors::{Result, WbsError};
use crate::wbs::task::{Task, TaskId, TaskNode};

/// Arena of tasks keyed by id.
///
/// Parent/child relations are id links (`Task::parent_id`,
/// `Task::children`), so lookups by id are O(1); the tree shape is
/// recovered on demand by [`TaskTree::flatten`] and [`TaskTree::to_nodes`].
#[derive(Debug, Clone, Default)]
pub struct TaskTree {
    tasks: HashMap<TaskId, Task>,
    /// Root-level task ids, in display order.
    roots: Vec<TaskId>,
}

impl TaskTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.get_mut(id)
    }

    pub fn roots(&self) -> &[TaskId] {
        &self.roots
    }

    /// Children of `id`, in order. Empty for unknown ids.
    pub fn children_of(&self, id: &str) -> &[TaskId] {
        self.tasks
            .get(id)
            .map(|t| t.children.as_slice())
            .unwrap_or(&[])
    }

    /// Insert `task` under `task.parent_id` (or as a root).
    ///
    /// `level` is derived from the parent and any `children` on the incoming
    /// value are discarded: children are attached by inserting them in turn.
    pub fn insert(&mut self, mut task: Task) -> Result<&Task> {
        if self.tasks.contains_key(&task.id) {
            return Err(WbsError::DuplicateTask(task.id.to_string()));
        }

        task.children.clear();
        match task.parent_id.clone() {
            Some(parent_id) => {
                let parent = self
                    .tasks
                    .get_mut(&parent_id)
                    .ok_or_else(|| WbsError::TaskNotFound(parent_id.to_string()))?;
                task.level = parent.level + 1;
                parent.children.push(task.id.clone());
            }
            None => {
                task.level = 0;
                self.roots.push(task.id.clone());
            }
        }

        let id = task.id.clone();
        self.tasks.insert(id.clone(), task);
        Ok(&self.tasks[&id])
    }

    /// All tasks in structural (pre-order) order: each task is followed by
    /// its subtree before its next sibling.
    pub fn flatten(&self) -> Vec<&Task> {
        let mut flat = Vec::with_capacity(self.tasks.len());
        let mut stack: Vec<&TaskId> = self.roots.iter().rev().collect();

        while let Some(id) = stack.pop() {
            if let Some(task) = self.tasks.get(id) {
                flat.push(task);
                stack.extend(task.children.iter().rev());
            }
        }

        flat
    }

    /// `id` followed by all of its descendants, in pre-order. Empty when `id`
    /// is unknown.
    pub fn subtree_ids(&self, id: &str) -> Vec<TaskId> {
        let mut out = Vec::new();
        let Some(root) = self.tasks.get(id) else {
            return out;
        };

        let mut stack = vec![&root.id];
        while let Some(current) = stack.pop() {
            if let Some(task) = self.tasks.get(current) {
                out.push(task.id.clone());
                stack.extend(task.children.iter().rev());
            }
        }
        out
    }

    /// Detach `id` from its parent (or the root list) and drop its whole
    /// subtree. Returns the removed ids; empty when `id` is unknown.
    pub fn remove_subtree(&mut self, id: &str) -> Vec<TaskId> {
        let removed = self.subtree_ids(id);
        if removed.is_empty() {
            return removed;
        }

        let parent_id = self.tasks.get(id).and_then(|t| t.parent_id.clone());
        match parent_id.and_then(|p| self.tasks.get_mut(&p)) {
            Some(parent) => parent.children.retain(|c| c != id),
            None => self.roots.retain(|r| r != id),
        }

        for removed_id in removed.iter() {
            self.tasks.remove(removed_id);
        }

        debug!(task = %id, removed = removed.len(), "removed subtree");
        removed
    }

    /// Remove every id in `removed` from all dependency lists. Returns how
    /// many references were dropped.
    pub fn prune_dependencies(&mut self, removed: &HashSet<TaskId>) -> usize {
        let mut pruned = 0;
        for task in self.tasks.values_mut() {
            let before = task.dependencies.len();
            task.dependencies.retain(|d| !removed.contains(d));
            pruned += before - task.dependencies.len();
        }
        pruned
    }

    /// Nested rendering of the whole tree.
    pub fn to_nodes(&self) -> Vec<TaskNode> {
        self.roots
            .iter()
            .filter_map(|id| self.node_for(id.as_str()))
            .collect()
    }

    fn node_for(&self, id: &str) -> Option<TaskNode> {
        let task = self.tasks.get(id)?;
        let children = task
            .children
            .iter()
            .filter_map(|c| self.node_for(c.as_str()))
            .collect();
        Some(TaskNode::from_task(task, children))
    }

    /// Rebuild an arena from nested nodes (e.g. a tree read back from JSON).
    ///
    /// `level` and `parent_id` are taken from the nesting, not from the
    /// nodes' own fields.
    pub fn from_nodes(nodes: Vec<TaskNode>) -> Result<Self> {
        let mut tree = TaskTree::new();
        let mut pending: Vec<(Option<TaskId>, TaskNode)> =
            nodes.into_iter().rev().map(|n| (None, n)).collect();

        while let Some((parent, node)) = pending.pop() {
            let (mut task, children) = node.into_task();
            task.parent_id = parent;
            let id = tree.insert(task)?.id.clone();
            pending.extend(
                children
                    .into_iter()
                    .rev()
                    .map(|child| (Some(id.clone()), child)),
            );
        }

        Ok(tree)
    }
}
