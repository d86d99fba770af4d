use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What kind of schedulable work a task represents.
///
/// - `Task`: ordinary work with a duration.
/// - `Milestone`: a marker, conventionally zero days long (not enforced).
/// - `HoldPoint`: a client or stakeholder review gate that downstream work
///   waits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    #[default]
    Task,
    Milestone,
    HoldPoint,
}

/// Where the client-review hold point of a review-gated phase is placed.
///
/// - `Exit`: after the phase's last deliverable; the next phase waits on the
///   review (default behaviour).
/// - `Entry`: before the phase's first deliverable; the phase's own work
///   waits on the review of what the previous phase issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoldPointPlacement {
    #[default]
    Exit,
    Entry,
}

impl FromStr for HoldPointPlacement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exit" => Ok(HoldPointPlacement::Exit),
            "entry" => Ok(HoldPointPlacement::Entry),
            other => Err(format!(
                "invalid hold_point_placement: {other} (expected \"exit\" or \"entry\")"
            )),
        }
    }
}
