// src/wbs/graph.rs

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use petgraph::Direction;
use petgraph::algo::{has_path_connecting, tarjan_scc};
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::errors::{Result, WbsError};
use crate::wbs::task::TaskId;
use crate::wbs::tree::TaskTree;

/// Dependency relation of a [`TaskTree`] as a petgraph graph.
///
/// Edge direction: dep -> task. For a task B with `dependencies = ["A"]`
/// we add the edge A -> B.
///
/// References to ids that are not in the tree are left out of the graph and
/// recorded in [`DependencyGraph::dangling`].
#[derive(Debug)]
pub struct DependencyGraph<'a> {
    graph: DiGraphMap<&'a str, ()>,
    /// Flatten (pre-order) position of every task; used as the tie-breaker
    /// when ordering.
    position: HashMap<&'a str, usize>,
    /// Structural order of the tasks.
    flat: Vec<&'a str>,
    /// `(task, missing dependency)` pairs.
    dangling: Vec<(&'a str, &'a str)>,
}

impl<'a> DependencyGraph<'a> {
    pub fn from_tree(tree: &'a TaskTree) -> Self {
        let tasks = tree.flatten();
        let mut graph: DiGraphMap<&'a str, ()> = DiGraphMap::new();
        let mut position = HashMap::with_capacity(tasks.len());
        let mut flat = Vec::with_capacity(tasks.len());

        for (idx, task) in tasks.iter().enumerate() {
            graph.add_node(task.id.as_str());
            position.insert(task.id.as_str(), idx);
            flat.push(task.id.as_str());
        }

        let mut dangling = Vec::new();
        for task in tasks.iter() {
            for dep in task.dependencies.iter() {
                if graph.contains_node(dep.as_str()) {
                    graph.add_edge(dep.as_str(), task.id.as_str(), ());
                } else {
                    debug!(task = %task.id, dep = %dep, "dependency not in tree; ignoring");
                    dangling.push((task.id.as_str(), dep.as_str()));
                }
            }
        }

        Self {
            graph,
            position,
            flat,
            dangling,
        }
    }

    /// Dependency references that point at no task.
    pub fn dangling(&self) -> &[(&'a str, &'a str)] {
        &self.dangling
    }

    /// Resolvable direct dependencies of `id`.
    pub fn dependencies_of(&self, id: &str) -> Vec<&'a str> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Re-borrow `id` with the graph's lifetime, if it is a node.
    fn node(&self, id: &str) -> Option<&'a str> {
        self.position.get_key_value(id).map(|(k, _)| *k)
    }

    fn neighbors(&self, id: &str, dir: Direction) -> Vec<&'a str> {
        let Some(node) = self.node(id) else {
            return Vec::new();
        };
        let mut out: Vec<&'a str> = self.graph.neighbors_directed(node, dir).collect();
        out.sort_by_key(|n| self.position[n]);
        out
    }

    /// Kahn's algorithm over the dependency edges.
    ///
    /// Among tasks whose dependencies are all ordered, the one earliest in
    /// structural order goes first, so a tree that is already in dependency
    /// order comes back unchanged.
    pub fn topological_order(&self) -> Result<Vec<&'a str>> {
        let mut in_degree: HashMap<&'a str, usize> = self
            .flat
            .iter()
            .map(|&n| {
                (
                    n,
                    self.graph.neighbors_directed(n, Direction::Incoming).count(),
                )
            })
            .collect();

        let mut ready: BinaryHeap<Reverse<usize>> = self
            .flat
            .iter()
            .filter(|n| in_degree[*n] == 0)
            .map(|n| Reverse(self.position[n]))
            .collect();

        let mut order = Vec::with_capacity(self.flat.len());
        while let Some(Reverse(pos)) = ready.pop() {
            let node = self.flat[pos];
            order.push(node);

            for next in self.graph.neighbors_directed(node, Direction::Outgoing) {
                if let Some(deg) = in_degree.get_mut(next) {
                    *deg -= 1;
                    if *deg == 0 {
                        ready.push(Reverse(self.position[next]));
                    }
                }
            }
        }

        if order.len() < self.flat.len() {
            return Err(WbsError::DependencyCycle(self.cycle_members()));
        }

        Ok(order)
    }

    /// Ids of every task that sits on a dependency cycle, in structural
    /// order.
    pub fn cycle_members(&self) -> Vec<String> {
        let mut members: Vec<&'a str> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self.graph.contains_edge(scc[0], scc[0]))
            .flatten()
            .collect();
        members.sort_by_key(|n| self.position[n]);
        members.into_iter().map(str::to_string).collect()
    }

    /// Whether giving `task` the dependency `dep` would close a cycle, i.e.
    /// whether `dep` is already reachable from `task`.
    pub fn reaches(&self, task: &str, dep: &str) -> bool {
        let (Some(from), Some(to)) = (self.node(task), self.node(dep)) else {
            return false;
        };
        from == to || has_path_connecting(&self.graph, from, to, None)
    }
}

/// If `task` took `deps` as its new dependency list, which ids would form a
/// cycle with it? `None` when the change is safe.
pub fn cycle_with(tree: &TaskTree, task: &str, deps: &[TaskId]) -> Option<Vec<String>> {
    let graph = DependencyGraph::from_tree(tree);
    let closing: Vec<String> = deps
        .iter()
        // self references are dropped on apply, not rejected
        .filter(|dep| dep.as_str() != task && graph.reaches(task, dep.as_str()))
        .map(|dep| dep.to_string())
        .collect();

    if closing.is_empty() {
        None
    } else {
        let mut members = vec![task.to_string()];
        members.extend(closing);
        Some(members)
    }
}
