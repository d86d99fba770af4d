// src/wbs/scheduler.rs

//! Date scheduling: a forward pass over the dependency graph followed by a
//! roll-up of phase-group dates.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use tracing::{debug, info};

use crate::config::ScheduleSection;
use crate::errors::Result;
use crate::wbs::graph::DependencyGraph;
use crate::wbs::task::TaskId;
use crate::wbs::tree::TaskTree;

/// Summary of one scheduling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleReport {
    /// Number of tasks that received dates.
    pub scheduled: usize,
    /// Dependency references that named no task and were ignored.
    pub dangling_refs: usize,
    /// Earliest start over all tasks.
    pub start: Option<NaiveDate>,
    /// Latest end over all tasks.
    pub end: Option<NaiveDate>,
}

/// Assign `start_date` / `end_date` to every task of `tree`.
///
/// - no dependencies: starts on `today`
/// - only unknown dependency ids: starts `buffer_days` after `today`
/// - otherwise: starts `buffer_days` after the latest resolvable dependency end
/// - always: ends `duration_days` after its start
///
/// Dates past [`NaiveDate::MAX`] are clamped to it.
///
/// Tasks are visited in dependency order (see
/// [`DependencyGraph::topological_order`]), so a dependency listed later in
/// the tree than its dependent is still honoured. Afterwards every root with
/// children spans exactly its children's dates.
///
/// On a dependency cycle nothing is written and
/// [`WbsError::DependencyCycle`](crate::errors::WbsError::DependencyCycle) is
/// returned.
pub fn schedule(
    tree: &mut TaskTree,
    today: NaiveDate,
    settings: &ScheduleSection,
) -> Result<ScheduleReport> {
    let buffer = Days::new(u64::from(settings.buffer_days));

    let (dates, dangling_refs) = {
        let graph = DependencyGraph::from_tree(tree);
        let order = graph.topological_order()?;

        let mut dates: HashMap<&str, (NaiveDate, NaiveDate)> = HashMap::with_capacity(order.len());
        for id in order {
            let Some(task) = tree.get(id) else {
                continue;
            };

            let latest_dep_end = graph
                .dependencies_of(id)
                .into_iter()
                .filter_map(|dep| dates.get(dep).map(|(_, end)| *end))
                .max();

            // A task that lists dependencies waits a buffer even when none
            // of them resolve.
            let start = match latest_dep_end {
                Some(end) => add_days(end, buffer),
                None if !task.dependencies.is_empty() => add_days(today, buffer),
                None => today,
            };
            let end = add_days(start, Days::new(u64::from(task.duration_days)));
            dates.insert(id, (start, end));
        }

        for root in tree.roots() {
            let Some(group) = tree.get(root.as_str()) else {
                continue;
            };
            if !group.is_phase_group() {
                continue;
            }
            let span = group
                .children
                .iter()
                .filter_map(|c| dates.get(c.as_str()).copied())
                .fold(None, |acc: Option<(NaiveDate, NaiveDate)>, (s, e)| match acc {
                    Some((lo, hi)) => Some((lo.min(s), hi.max(e))),
                    None => Some((s, e)),
                });

            if let Some(span) = span {
                debug!(task = %root, start = %span.0, end = %span.1, "rolled up phase group");
                dates.insert(root.as_str(), span);
            }
        }

        let owned: Vec<(TaskId, NaiveDate, NaiveDate)> = dates
            .into_iter()
            .map(|(id, (s, e))| (TaskId::from(id), s, e))
            .collect();
        (owned, graph.dangling().len())
    };

    let mut report = ScheduleReport {
        scheduled: dates.len(),
        dangling_refs,
        start: None,
        end: None,
    };

    for (id, start, end) in dates {
        if let Some(task) = tree.get_mut(id.as_str()) {
            task.start_date = Some(start);
            task.end_date = Some(end);
        }
        report.start = Some(report.start.map_or(start, |s| s.min(start)));
        report.end = Some(report.end.map_or(end, |e| e.max(end)));
    }

    info!(
        tasks = report.scheduled,
        dangling = report.dangling_refs,
        start = ?report.start,
        end = ?report.end,
        "schedule computed"
    );

    Ok(report)
}

/// `date + days`, saturating at [`NaiveDate::MAX`].
fn add_days(date: NaiveDate, days: Days) -> NaiveDate {
    date.checked_add_days(days).unwrap_or(NaiveDate::MAX)
}
