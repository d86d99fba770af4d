// tests/builder_scenarios.rs

use std::error::Error;

use wbsplan::config::ConfigFile;
use wbsplan::types::{HoldPointPlacement, TaskKind};
use wbsplan::wbs::{Deliverable, TaskTree, build_wbs};
use wbsplan_test_utils::builders::{ConfigFileBuilder, deliverable};
use wbsplan_test_utils::checks::check_schedule;
use wbsplan_test_utils::{day, init_tracing, today};

type TestResult = Result<(), Box<dyn Error>>;

fn ifr_ifc(placement: HoldPointPlacement) -> ConfigFile {
    ConfigFileBuilder::new()
        .with_phases(&["ifr", "ifc"])
        .with_review_phases(&["ifc"])
        .with_placement(placement)
        .build()
}

fn abc() -> Vec<Deliverable> {
    vec![
        deliverable("A", "ifr", 16.0),
        deliverable("B", "ifr", 8.0),
        deliverable("C", "ifc", 24.0),
    ]
}

fn child_names(tree: &TaskTree, id: &str) -> Vec<String> {
    tree.children_of(id)
        .iter()
        .filter_map(|c| tree.get(c.as_str()))
        .map(|t| t.name.clone())
        .collect()
}

fn deps(tree: &TaskTree, id: &str) -> Vec<String> {
    tree.get(id)
        .map(|t| t.dependencies.iter().map(|d| d.to_string()).collect())
        .unwrap_or_default()
}

#[test]
fn review_gate_at_phase_entry_sits_between_phases() -> TestResult {
    init_tracing();

    let tree = build_wbs(&abc(), &ifr_ifc(HoldPointPlacement::Entry), today())?;

    let roots: Vec<&str> = tree.roots().iter().map(|r| r.as_str()).collect();
    assert_eq!(roots, vec!["phase-ifr", "phase-ifc"]);
    assert_eq!(child_names(&tree, "phase-ifr"), vec!["A", "B"]);
    assert_eq!(child_names(&tree, "phase-ifc"), vec!["Client Review", "C"]);

    let a = tree.get("del-0").ok_or("A missing")?;
    assert_eq!(a.duration_days, 2);
    assert!(a.dependencies.is_empty());

    let b = tree.get("del-1").ok_or("B missing")?;
    assert_eq!(b.duration_days, 1);
    assert_eq!(deps(&tree, "del-1"), vec!["del-0"]);

    let hold = tree.get("hold-ifc-review").ok_or("hold point missing")?;
    assert_eq!(hold.kind, TaskKind::HoldPoint);
    assert_eq!(hold.duration_days, 3);
    assert_eq!(hold.assignee.as_deref(), Some("Client Representative"));
    assert_eq!(deps(&tree, "hold-ifc-review"), vec!["del-1"]);

    let c = tree.get("del-2").ok_or("C missing")?;
    assert_eq!(c.duration_days, 3);
    assert_eq!(deps(&tree, "del-2"), vec!["hold-ifc-review"]);

    assert!(deps(&tree, "phase-ifr").is_empty());
    assert_eq!(deps(&tree, "phase-ifc"), vec!["del-1"]);

    // A: 0..2, B: 3..4, review: 5..8, C: 9..12
    assert_eq!((a.start_date, a.end_date), (Some(day(0)), Some(day(2))));
    assert_eq!((b.start_date, b.end_date), (Some(day(3)), Some(day(4))));
    assert_eq!((hold.start_date, hold.end_date), (Some(day(5)), Some(day(8))));
    assert_eq!((c.start_date, c.end_date), (Some(day(9)), Some(day(12))));

    let ifc = tree.get("phase-ifc").ok_or("ifc group missing")?;
    assert_eq!(ifc.duration_days, 6);
    assert_eq!((ifc.start_date, ifc.end_date), (Some(day(5)), Some(day(12))));

    check_schedule(&tree, today(), 1)?;
    Ok(())
}

#[test]
fn review_gate_at_phase_exit_follows_last_deliverable() -> TestResult {
    init_tracing();

    let tree = build_wbs(&abc(), &ifr_ifc(HoldPointPlacement::Exit), today())?;

    assert_eq!(child_names(&tree, "phase-ifr"), vec!["A", "B"]);
    assert_eq!(child_names(&tree, "phase-ifc"), vec!["C", "Client Review"]);
    assert_eq!(deps(&tree, "del-2"), vec!["del-1"]);
    assert_eq!(deps(&tree, "hold-ifc-review"), vec!["del-2"]);

    let hold = tree.get("hold-ifc-review").ok_or("hold point missing")?;
    assert_eq!((hold.start_date, hold.end_date), (Some(day(9)), Some(day(12))));

    check_schedule(&tree, today(), 1)?;
    Ok(())
}

#[test]
fn next_phase_waits_on_exit_review_not_last_deliverable() -> TestResult {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .with_phases(&["ifr", "ifc"])
        .with_review_phases(&["ifr"])
        .build();
    let tree = build_wbs(&abc(), &cfg, today())?;

    assert_eq!(child_names(&tree, "phase-ifr"), vec!["A", "B", "Client Review"]);
    assert_eq!(deps(&tree, "hold-ifr-review"), vec!["del-1"]);
    assert_eq!(deps(&tree, "del-2"), vec!["hold-ifr-review"]);
    assert_eq!(deps(&tree, "phase-ifc"), vec!["hold-ifr-review"]);

    let ifr = tree.get("phase-ifr").ok_or("ifr group missing")?;
    assert_eq!(ifr.duration_days, 2 + 1 + 3);
    Ok(())
}

#[test]
fn empty_phases_are_skipped_and_the_chain_bridges_them() -> TestResult {
    init_tracing();

    // Default lifecycle: ifd, ifr, ifh, ifa, ifc with reviews at ifr/ifa/ifc.
    let cfg = ConfigFile::default();
    let deliverables = vec![
        deliverable("Design basis", "ifd", 8.0),
        deliverable("Layout", "IFA", 40.0),
    ];
    let tree = build_wbs(&deliverables, &cfg, today())?;

    let roots: Vec<&str> = tree.roots().iter().map(|r| r.as_str()).collect();
    assert_eq!(roots, vec!["phase-ifd", "phase-ifa"]);
    assert!(!tree.contains("phase-ifr"));
    assert!(!tree.contains("hold-ifr-review"));

    // ifd has no review, so ifa chains straight onto its only deliverable.
    assert_eq!(deps(&tree, "del-1"), vec!["del-0"]);
    assert_eq!(child_names(&tree, "phase-ifa"), vec!["Layout", "Client Review"]);

    let layout = tree.get("del-1").ok_or("layout missing")?;
    assert_eq!(layout.duration_days, 5);
    assert_eq!(layout.phase, "IFA");
    assert_eq!(layout.deliverable.as_deref(), Some("Layout"));
    assert_eq!(layout.discipline, "Process");
    assert_eq!(layout.level, 1);
    assert_eq!(
        layout.parent_id.as_ref().map(|p| p.as_str()),
        Some("phase-ifa")
    );

    check_schedule(&tree, today(), 1)?;
    Ok(())
}

#[test]
fn no_deliverables_yield_an_empty_tree() -> TestResult {
    let tree = build_wbs(&[], &ConfigFile::default(), today())?;
    assert!(tree.is_empty());
    assert!(tree.roots().is_empty());
    Ok(())
}

#[test]
fn unknown_phase_codes_are_left_out() -> TestResult {
    init_tracing();

    let deliverables = vec![
        deliverable("Stray", "xyz", 8.0),
        deliverable("Kept", "ifd", 8.0),
    ];
    let tree = build_wbs(&deliverables, &ConfigFile::default(), today())?;

    assert_eq!(tree.len(), 2);
    assert_eq!(child_names(&tree, "phase-ifd"), vec!["Kept"]);
    Ok(())
}

#[test]
fn partial_days_round_up_and_non_positive_hours_take_no_time() -> TestResult {
    let cfg = ConfigFileBuilder::new().with_phases(&["ifd"]).build();
    let deliverables = vec![
        deliverable("Tiny", "ifd", 0.5),
        deliverable("Nothing", "ifd", 0.0),
        deliverable("Broken", "ifd", -4.0),
        deliverable("Long", "ifd", 17.0),
    ];
    let tree = build_wbs(&deliverables, &cfg, today())?;

    let durations: Vec<u32> = tree
        .children_of("phase-ifd")
        .iter()
        .filter_map(|c| tree.get(c.as_str()))
        .map(|t| t.duration_days)
        .collect();
    assert_eq!(durations, vec![1, 0, 0, 3]);

    let group = tree.get("phase-ifd").ok_or("group missing")?;
    assert_eq!(group.duration_days, 4);
    Ok(())
}

#[test]
fn hours_per_day_and_hold_point_length_are_configurable() -> TestResult {
    let cfg = ConfigFileBuilder::new()
        .with_phases(&["ifr"])
        .with_review_phases(&["ifr"])
        .with_hours_per_day(4)
        .with_hold_point_days(1)
        .build();
    let tree = build_wbs(&[deliverable("A", "ifr", 16.0)], &cfg, today())?;

    assert_eq!(tree.get("del-0").map(|t| t.duration_days), Some(4));
    assert_eq!(tree.get("hold-ifr-review").map(|t| t.duration_days), Some(1));
    Ok(())
}

#[test]
fn discipline_falls_back_to_unknown_without_description() {
    let d = Deliverable::new("Loose", "ifd", "", 8.0);
    assert_eq!(d.discipline(), "Unknown");

    let d = Deliverable::new("Piping", "ifd", "Mechanical - Piping GA", 8.0);
    assert_eq!(d.discipline(), "Mechanical");
}

#[test]
fn enormous_estimates_saturate_instead_of_overflowing() -> TestResult {
    init_tracing();

    let cfg = ConfigFileBuilder::new().with_phases(&["ifd"]).build();
    let deliverables = vec![
        deliverable("Big", "ifd", 2.0e10),
        deliverable("Bigger", "ifd", 2.0e10),
        deliverable("Absurd", "ifd", 1.0e12),
    ];
    let tree = build_wbs(&deliverables, &cfg, today())?;

    assert_eq!(tree.get("del-0").map(|t| t.duration_days), Some(2_500_000_000));
    assert_eq!(tree.get("del-2").map(|t| t.duration_days), Some(u32::MAX));
    assert_eq!(tree.get("phase-ifd").map(|t| t.duration_days), Some(u32::MAX));

    let group = tree.get("phase-ifd").ok_or("group missing")?;
    assert_eq!(group.start_date, Some(today()));
    assert_eq!(group.end_date, Some(chrono::NaiveDate::MAX));
    Ok(())
}
