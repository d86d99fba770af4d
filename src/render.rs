// src/render.rs

//! Plain-text output for the CLI. Gantt bars and tree widgets live in the
//! UI; this is only an indented outline.

use std::fmt::Write as _;

use crate::config::ConfigFile;
use crate::types::TaskKind;
use crate::wbs::{Deliverable, ScheduleReport, TaskNode, group_by_phase};

/// Indented outline of a dated tree, one task per line.
pub fn outline(nodes: &[TaskNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node, 0);
    }
    out
}

fn write_node(out: &mut String, node: &TaskNode, depth: usize) {
    let marker = match node.kind {
        _ if node.level == 0 && !node.children.is_empty() => "#",
        TaskKind::Task => "-",
        TaskKind::Milestone => "*",
        TaskKind::HoldPoint => "!",
    };
    let dates = match (node.start_date, node.end_date) {
        (Some(s), Some(e)) => format!("{s} .. {e}"),
        _ => "unscheduled".to_string(),
    };

    let _ = write!(
        out,
        "{:indent$}{marker} {} [{}] {} ({}d)",
        "",
        node.name,
        node.id,
        dates,
        node.duration_days,
        indent = depth * 2
    );
    if !node.dependencies.is_empty() {
        let deps: Vec<&str> = node.dependencies.iter().map(|d| d.as_str()).collect();
        let _ = write!(out, " after {}", deps.join(", "));
    }
    if let Some(ref who) = node.assignee {
        let _ = write!(out, " @{who}");
    }
    out.push('\n');

    for child in node.children.iter() {
        write_node(out, child, depth + 1);
    }
}

/// One-line schedule summary.
pub fn summary(report: &ScheduleReport) -> String {
    match (report.start, report.end) {
        (Some(start), Some(end)) => format!(
            "{} tasks scheduled from {start} to {end} ({} days)",
            report.scheduled,
            (end - start).num_days()
        ),
        _ => "nothing to schedule".to_string(),
    }
}

/// Dry-run output: configuration and phase grouping, no dates.
pub fn dry_run(cfg: &ConfigFile, deliverables: &[Deliverable]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "wbsplan dry-run");
    let _ = writeln!(out, "  schedule.hours_per_day = {}", cfg.schedule().hours_per_day);
    let _ = writeln!(out, "  schedule.buffer_days = {}", cfg.schedule().buffer_days);
    let _ = writeln!(out, "  phases.order = {:?}", cfg.phases().order);
    let _ = writeln!(out, "  phases.review = {:?}", cfg.phases().review);
    let _ = writeln!(
        out,
        "  phases.hold_point = {}d ({:?})",
        cfg.phases().hold_point_days, cfg.phases().hold_point_placement
    );
    let _ = writeln!(out);

    let groups = group_by_phase(deliverables, cfg);
    let _ = writeln!(out, "phases ({}):", groups.len());
    for (phase, members) in groups {
        let review = if cfg.is_review_phase(&phase) {
            " (client review)"
        } else {
            ""
        };
        let _ = writeln!(out, "  - {}{review}", phase.to_uppercase());
        for d in members {
            let _ = writeln!(
                out,
                "      {}: {}h -> {}d",
                d.name,
                d.hours,
                d.duration_days(cfg.schedule().hours_per_day)
            );
        }
    }
    out
}
