use chrono::{Days, NaiveDate};
use wbsplan::wbs::TaskTree;

/// Every date rule the scheduler promises, checked over the whole tree.
///
/// Returns a description of the first violation.
pub fn check_schedule(tree: &TaskTree, today: NaiveDate, buffer_days: u64) -> Result<(), String> {
    for task in tree.flatten() {
        let (Some(start), Some(end)) = (task.start_date, task.end_date) else {
            return Err(format!("task {} has no dates", task.id));
        };

        if task.is_phase_group() {
            let kids: Vec<_> = tree
                .children_of(task.id.as_str())
                .iter()
                .filter_map(|c| tree.get(c.as_str()))
                .collect();
            let min = kids.iter().filter_map(|k| k.start_date).min();
            let max = kids.iter().filter_map(|k| k.end_date).max();
            if Some(start) != min || Some(end) != max {
                return Err(format!(
                    "group {} spans {start}..{end}, children span {min:?}..{max:?}",
                    task.id
                ));
            }
            continue;
        }

        let expected_end = start
            .checked_add_days(Days::new(u64::from(task.duration_days)))
            .unwrap_or(NaiveDate::MAX);
        if end != expected_end {
            return Err(format!(
                "task {} ends {end}, expected start {start} + {}d",
                task.id, task.duration_days
            ));
        }

        let dep_ends: Vec<NaiveDate> = task
            .dependencies
            .iter()
            .filter_map(|d| tree.get(d.as_str()))
            .filter_map(|d| d.end_date)
            .collect();

        match dep_ends.iter().max() {
            None => {
                // only unknown ids still cost a buffer
                let expected = if task.dependencies.is_empty() {
                    today
                } else {
                    today + Days::new(buffer_days)
                };
                if start != expected {
                    return Err(format!(
                        "task {} has no resolvable dependency but starts {start}, not {expected}",
                        task.id
                    ));
                }
            }
            Some(latest) if start < *latest + Days::new(buffer_days) => {
                return Err(format!(
                    "task {} starts {start}, before dependency end {latest} + {buffer_days}d",
                    task.id
                ));
            }
            _ => {}
        }
    }
    Ok(())
}
