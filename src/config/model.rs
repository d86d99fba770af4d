// src/config/model.rs

use serde::{Deserialize, Serialize};

use crate::types::HoldPointPlacement;

/// Configuration exactly as read from a TOML file, before validation.
///
/// ```toml
/// [schedule]
/// hours_per_day = 8
/// buffer_days = 1
///
/// [phases]
/// order = ["ifd", "ifr", "ifh", "ifa", "ifc"]
/// review = ["ifr", "ifa", "ifc"]
/// hold_point_days = 3
/// hold_point_placement = "exit"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// Date arithmetic from `[schedule]`.
    #[serde(default)]
    pub schedule: ScheduleSection,

    /// Phase lifecycle from `[phases]`.
    #[serde(default)]
    pub phases: PhasesSection,
}

/// Validated configuration.
///
/// Only obtainable through `ConfigFile::try_from(RawConfigFile)` (or
/// [`ConfigFile::default`]), so phase codes are lower-cased and unique and
/// every review phase is part of the phase order. Fields are read through
/// accessors; the only post-validation change allowed is the hold point
/// placement, which no invariant depends on.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigFile {
    schedule: ScheduleSection,
    phases: PhasesSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(schedule: ScheduleSection, phases: PhasesSection) -> Self {
        Self { schedule, phases }
    }

    pub fn schedule(&self) -> &ScheduleSection {
        &self.schedule
    }

    pub fn phases(&self) -> &PhasesSection {
        &self.phases
    }

    /// Override `[phases].hold_point_placement` (e.g. from the command line).
    pub fn with_hold_point_placement(mut self, placement: HoldPointPlacement) -> Self {
        self.phases.hold_point_placement = placement;
        self
    }

    /// Whether `phase` gets a client-review hold point.
    pub fn is_review_phase(&self, phase: &str) -> bool {
        self.phases.review.iter().any(|p| p == phase)
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(ScheduleSection::default(), PhasesSection::default())
    }
}

/// `[schedule]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScheduleSection {
    /// Working hours in one day; deliverable hours are divided by this and
    /// rounded up to get a duration in days.
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: u32,

    /// Days between a dependency's end date and the dependent's start date.
    #[serde(default = "default_buffer_days")]
    pub buffer_days: u32,
}

fn default_hours_per_day() -> u32 {
    8
}

fn default_buffer_days() -> u32 {
    1
}

impl Default for ScheduleSection {
    fn default() -> Self {
        Self {
            hours_per_day: default_hours_per_day(),
            buffer_days: default_buffer_days(),
        }
    }
}

/// `[phases]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PhasesSection {
    /// Design-issue lifecycle, earliest phase first.
    #[serde(default = "default_phase_order")]
    pub order: Vec<String>,

    /// Major phases that end (or start) with a client review.
    #[serde(default = "default_review_phases")]
    pub review: Vec<String>,

    /// Duration of each client-review hold point.
    #[serde(default = "default_hold_point_days")]
    pub hold_point_days: u32,

    #[serde(default)]
    pub hold_point_placement: HoldPointPlacement,
}

fn default_phase_order() -> Vec<String> {
    ["ifd", "ifr", "ifh", "ifa", "ifc"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_review_phases() -> Vec<String> {
    ["ifr", "ifa", "ifc"].iter().map(|s| s.to_string()).collect()
}

fn default_hold_point_days() -> u32 {
    3
}

impl Default for PhasesSection {
    fn default() -> Self {
        Self {
            order: default_phase_order(),
            review: default_review_phases(),
            hold_point_days: default_hold_point_days(),
            hold_point_placement: HoldPointPlacement::default(),
        }
    }
}
