#![allow(dead_code)]

use wbsplan::config::{ConfigFile, PhasesSection, RawConfigFile, ScheduleSection};
use wbsplan::types::{HoldPointPlacement, TaskKind};
use wbsplan::wbs::{Deliverable, NewTask, TaskId};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                schedule: ScheduleSection::default(),
                phases: PhasesSection::default(),
            },
        }
    }

    pub fn with_phases(mut self, order: &[&str]) -> Self {
        self.config.phases.order = order.iter().map(|s| s.to_string()).collect();
        self.config.phases.review.retain(|r| order.contains(&r.as_str()));
        self
    }

    pub fn with_review_phases(mut self, review: &[&str]) -> Self {
        self.config.phases.review = review.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_hold_point_days(mut self, days: u32) -> Self {
        self.config.phases.hold_point_days = days;
        self
    }

    pub fn with_placement(mut self, placement: HoldPointPlacement) -> Self {
        self.config.phases.hold_point_placement = placement;
        self
    }

    pub fn with_hours_per_day(mut self, hours: u32) -> Self {
        self.config.schedule.hours_per_day = hours;
        self
    }

    pub fn with_buffer_days(mut self, days: u32) -> Self {
        self.config.schedule.buffer_days = days;
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Shorthand for a deliverable with a `"<discipline> - <name>"` description.
pub fn deliverable(name: &str, phase: &str, hours: f64) -> Deliverable {
    Deliverable::new(name, phase, format!("Process - {name}"), hours)
}

/// Builder for `NewTask`.
pub struct NewTaskBuilder {
    task: NewTask,
}

impl NewTaskBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            task: NewTask {
                name: name.to_string(),
                ..NewTask::default()
            },
        }
    }

    pub fn days(mut self, days: u32) -> Self {
        self.task.duration_days = days;
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.dependencies.push(TaskId::from(dep));
        self
    }

    pub fn kind(mut self, kind: TaskKind) -> Self {
        self.task.kind = kind;
        self
    }

    pub fn assignee(mut self, who: &str) -> Self {
        self.task.assignee = Some(who.to_string());
        self
    }

    pub fn build(self) -> NewTask {
        self.task
    }
}
