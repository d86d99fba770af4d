// src/wbs/builder.rs

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::config::ConfigFile;
use crate::errors::Result;
use crate::types::{HoldPointPlacement, TaskKind};
use crate::wbs::deliverable::Deliverable;
use crate::wbs::scheduler::schedule;
use crate::wbs::task::{Task, TaskId};
use crate::wbs::tree::TaskTree;

const MULTIDISCIPLINE: &str = "Multidiscipline";
const REVIEW_NAME: &str = "Client Review";
const REVIEW_ASSIGNEE: &str = "Client Representative";

/// Deliverables grouped by phase, in lifecycle order, empty phases omitted.
///
/// Deliverables whose phase code is not part of `[phases].order` are
/// dropped with a warning.
pub fn group_by_phase<'d>(
    deliverables: &'d [Deliverable],
    cfg: &ConfigFile,
) -> Vec<(String, Vec<&'d Deliverable>)> {
    for d in deliverables.iter() {
        let code = d.phase_code();
        if !cfg.phases().order.contains(&code) {
            warn!(
                deliverable = %d.name,
                phase = %d.milestone,
                "deliverable phase is not in the configured phase order; skipping"
            );
        }
    }

    cfg.phases()
        .order
        .iter()
        .filter_map(|phase| {
            let members: Vec<&Deliverable> = deliverables
                .iter()
                .filter(|d| d.phase_code() == *phase)
                .collect();
            if members.is_empty() {
                None
            } else {
                Some((phase.clone(), members))
            }
        })
        .collect()
}

/// Turn a flat deliverable list into a dated, phase-grouped task tree.
///
/// Every non-empty phase becomes a level-0 group `phase-<code>` holding one
/// level-1 task per deliverable, chained serially. The first task of a phase
/// waits on the terminal task of the previous non-empty phase. Review phases
/// also get a `hold_point` gate, placed according to
/// `[phases].hold_point_placement`.
///
/// The tree is scheduled against `today` before it is returned.
pub fn build_wbs(
    deliverables: &[Deliverable],
    cfg: &ConfigFile,
    today: NaiveDate,
) -> Result<TaskTree> {
    let mut tree = TaskTree::new();
    let mut del_index = 0usize;
    // Terminal task of the previous non-empty phase.
    let mut previous_terminal: Option<TaskId> = None;

    for (phase, members) in group_by_phase(deliverables, cfg) {
        let mut chain = PhaseChain::new(&phase, previous_terminal.clone());

        let gated = cfg.is_review_phase(&phase);
        if gated && cfg.phases().hold_point_placement == HoldPointPlacement::Entry {
            chain.push(hold_point(&phase, cfg.phases().hold_point_days));
        }

        for d in members {
            let mut task = Task::new(format!("del-{del_index}"), d.name.clone());
            del_index += 1;
            task.description = d.description.clone();
            task.deliverable = Some(d.name.clone());
            task.phase = d.milestone.clone();
            task.discipline = d.discipline();
            task.duration_days = d.duration_days(cfg.schedule().hours_per_day);
            chain.push(task);
        }
        let last_deliverable = chain.last().cloned();

        if gated && cfg.phases().hold_point_placement == HoldPointPlacement::Exit {
            chain.push(hold_point(&phase, cfg.phases().hold_point_days));
        }

        let terminal = match cfg.phases().hold_point_placement {
            HoldPointPlacement::Exit => chain.last().cloned(),
            HoldPointPlacement::Entry => last_deliverable,
        };

        chain.insert_into(&mut tree)?;
        previous_terminal = terminal;
    }

    info!(
        deliverables = deliverables.len(),
        phases = tree.roots().len(),
        tasks = tree.len(),
        "built work breakdown"
    );

    schedule(&mut tree, today, cfg.schedule())?;
    Ok(tree)
}

fn hold_point(phase: &str, days: u32) -> Task {
    let mut task = Task::new(format!("hold-{phase}-review"), REVIEW_NAME);
    task.description = format!(
        "Client review and approval for {} phase",
        phase.to_uppercase()
    );
    task.phase = phase.to_string();
    task.discipline = MULTIDISCIPLINE.to_string();
    task.duration_days = days;
    task.assignee = Some(REVIEW_ASSIGNEE.to_string());
    task.kind = TaskKind::HoldPoint;
    task
}

/// Children of one phase group, each depending on the one before it.
struct PhaseChain {
    group: Task,
    children: Vec<Task>,
    /// What the next pushed task depends on.
    tail: Option<TaskId>,
}

impl PhaseChain {
    fn new(phase: &str, previous_terminal: Option<TaskId>) -> Self {
        let code = phase.to_uppercase();
        let mut group = Task::new(format!("phase-{phase}"), code.clone());
        group.description = format!("{code} Phase");
        group.phase = phase.to_string();
        group.discipline = MULTIDISCIPLINE.to_string();
        group.set_dependencies(previous_terminal.clone());

        Self {
            group,
            children: Vec::new(),
            tail: previous_terminal,
        }
    }

    fn push(&mut self, mut task: Task) {
        task.set_dependencies(self.tail.take());
        task.parent_id = Some(self.group.id.clone());
        debug!(task = %task.id, deps = ?task.dependencies, "chained phase task");
        self.tail = Some(task.id.clone());
        self.children.push(task);
    }

    fn last(&self) -> Option<&TaskId> {
        self.children.last().map(|t| &t.id)
    }

    fn insert_into(mut self, tree: &mut TaskTree) -> Result<()> {
        self.group.duration_days = self
            .children
            .iter()
            .fold(0u32, |acc, t| acc.saturating_add(t.duration_days));
        tree.insert(self.group)?;
        for child in self.children {
            tree.insert(child)?;
        }
        Ok(())
    }
}
