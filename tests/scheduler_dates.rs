// tests/scheduler_dates.rs

use std::error::Error;

use chrono::NaiveDate;
use wbsplan::config::ScheduleSection;
use wbsplan::errors::WbsError;
use wbsplan::wbs::{Task, TaskId, TaskTree, schedule};
use wbsplan_test_utils::checks::check_schedule;
use wbsplan_test_utils::{day, init_tracing, today};

type TestResult = Result<(), Box<dyn Error>>;

fn task(id: &str, days: u32, parent: Option<&str>, deps: &[&str]) -> Task {
    let mut t = Task::new(id, id.to_uppercase());
    t.duration_days = days;
    t.parent_id = parent.map(TaskId::from);
    t.set_dependencies(deps.iter().map(|d| TaskId::from(*d)));
    t
}

fn dates(tree: &TaskTree, id: &str) -> (Option<NaiveDate>, Option<NaiveDate>) {
    tree.get(id)
        .map(|t| (t.start_date, t.end_date))
        .unwrap_or((None, None))
}

#[test]
fn dependency_listed_after_its_dependent_is_still_honoured() -> TestResult {
    init_tracing();

    // x depends on y, but y comes later in structural order.
    let mut tree = TaskTree::new();
    tree.insert(task("g", 0, None, &[]))?;
    tree.insert(task("x", 1, Some("g"), &["y"]))?;
    tree.insert(task("y", 2, Some("g"), &[]))?;

    schedule(&mut tree, today(), &ScheduleSection::default())?;

    assert_eq!(dates(&tree, "y"), (Some(day(0)), Some(day(2))));
    assert_eq!(dates(&tree, "x"), (Some(day(3)), Some(day(4))));
    assert_eq!(dates(&tree, "g"), (Some(day(0)), Some(day(4))));
    check_schedule(&tree, today(), 1)?;
    Ok(())
}

#[test]
fn start_follows_the_latest_of_several_dependencies() -> TestResult {
    let mut tree = TaskTree::new();
    tree.insert(task("short", 1, None, &[]))?;
    tree.insert(task("long", 6, None, &[]))?;
    tree.insert(task("join", 2, None, &["short", "long"]))?;

    schedule(&mut tree, today(), &ScheduleSection::default())?;

    assert_eq!(dates(&tree, "join"), (Some(day(7)), Some(day(9))));
    Ok(())
}

#[test]
fn unknown_dependency_ids_are_ignored() -> TestResult {
    init_tracing();

    let mut tree = TaskTree::new();
    tree.insert(task("a", 2, None, &[]))?;
    tree.insert(task("only-ghost", 3, None, &["ghost"]))?;
    tree.insert(task("mixed", 1, None, &["ghost", "a"]))?;

    let report = schedule(&mut tree, today(), &ScheduleSection::default())?;

    assert_eq!(report.dangling_refs, 2);
    assert_eq!(report.scheduled, 3);
    // listing only unknown ids still costs the buffer day
    assert_eq!(dates(&tree, "only-ghost"), (Some(day(1)), Some(day(4))));
    assert_eq!(dates(&tree, "mixed"), (Some(day(3)), Some(day(4))));
    check_schedule(&tree, today(), 1)?;
    Ok(())
}

#[test]
fn cycle_is_reported_and_leaves_dates_untouched() -> TestResult {
    init_tracing();

    let mut tree = TaskTree::new();
    tree.insert(task("free", 1, None, &[]))?;
    tree.insert(task("p", 1, None, &["q"]))?;
    tree.insert(task("q", 1, None, &["p"]))?;

    match schedule(&mut tree, today(), &ScheduleSection::default()) {
        Err(WbsError::DependencyCycle(members)) => {
            assert_eq!(members, vec!["p".to_string(), "q".to_string()]);
        }
        other => panic!("expected DependencyCycle, got {other:?}"),
    }

    assert_eq!(dates(&tree, "free"), (None, None));
    assert_eq!(dates(&tree, "p"), (None, None));
    Ok(())
}

#[test]
fn rescheduling_an_unchanged_tree_is_idempotent() -> TestResult {
    let mut tree = TaskTree::new();
    tree.insert(task("g", 0, None, &[]))?;
    tree.insert(task("a", 3, Some("g"), &[]))?;
    tree.insert(task("b", 2, Some("g"), &["a"]))?;
    tree.insert(task("c", 4, None, &["b"]))?;

    let first = schedule(&mut tree, today(), &ScheduleSection::default())?;
    let snapshot = tree.to_nodes();
    let second = schedule(&mut tree, today(), &ScheduleSection::default())?;

    assert_eq!(first, second);
    assert_eq!(snapshot, tree.to_nodes());
    Ok(())
}

#[test]
fn group_spans_children_and_childless_roots_keep_their_own_dates() -> TestResult {
    let mut tree = TaskTree::new();
    // Group with its own (ignored) duration and two parallel children.
    tree.insert(task("g", 30, None, &[]))?;
    tree.insert(task("a", 5, Some("g"), &[]))?;
    tree.insert(task("b", 2, Some("g"), &[]))?;
    tree.insert(task("solo", 4, None, &[]))?;
    tree.insert(task("empty", 0, None, &[]))?;

    schedule(&mut tree, today(), &ScheduleSection::default())?;

    assert_eq!(dates(&tree, "g"), (Some(day(0)), Some(day(5))));
    assert_eq!(dates(&tree, "solo"), (Some(day(0)), Some(day(4))));
    assert_eq!(dates(&tree, "empty"), (Some(today()), Some(today())));
    Ok(())
}

#[test]
fn buffer_between_dependent_tasks_is_configurable() -> TestResult {
    let mut tree = TaskTree::new();
    tree.insert(task("a", 2, None, &[]))?;
    tree.insert(task("b", 1, None, &["a"]))?;

    let tight = ScheduleSection {
        buffer_days: 0,
        ..ScheduleSection::default()
    };
    schedule(&mut tree, today(), &tight)?;
    assert_eq!(dates(&tree, "b"), (Some(day(2)), Some(day(3))));

    let loose = ScheduleSection {
        buffer_days: 5,
        ..ScheduleSection::default()
    };
    schedule(&mut tree, today(), &loose)?;
    assert_eq!(dates(&tree, "b"), (Some(day(7)), Some(day(8))));
    check_schedule(&tree, today(), 5)?;
    Ok(())
}

#[test]
fn report_covers_the_whole_schedule() -> TestResult {
    let mut tree = TaskTree::new();
    tree.insert(task("a", 2, None, &[]))?;
    tree.insert(task("b", 3, None, &["a"]))?;

    let report = schedule(&mut tree, today(), &ScheduleSection::default())?;

    assert_eq!(report.start, Some(day(0)));
    assert_eq!(report.end, Some(day(6)));

    let empty = schedule(&mut TaskTree::new(), today(), &ScheduleSection::default())?;
    assert_eq!(empty.scheduled, 0);
    assert_eq!(empty.start, None);
    Ok(())
}

#[test]
fn dates_past_the_calendar_end_are_clamped() -> TestResult {
    init_tracing();

    let mut tree = TaskTree::new();
    tree.insert(task("huge", u32::MAX, None, &[]))?;
    tree.insert(task("after", 1, None, &["huge"]))?;
    tree.insert(task("small", 2, None, &[]))?;

    let report = schedule(&mut tree, today(), &ScheduleSection::default())?;

    assert_eq!(dates(&tree, "huge"), (Some(today()), Some(NaiveDate::MAX)));
    assert_eq!(
        dates(&tree, "after"),
        (Some(NaiveDate::MAX), Some(NaiveDate::MAX))
    );
    assert_eq!(dates(&tree, "small"), (Some(day(0)), Some(day(2))));
    assert_eq!(report.end, Some(NaiveDate::MAX));
    Ok(())
}
