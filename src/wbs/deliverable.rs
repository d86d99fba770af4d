// src/wbs/deliverable.rs

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// One estimated deliverable, as received from the estimation backend.
///
/// ```json
/// { "name": "P&ID", "milestone": "IFR", "description": "Process - P&ID", "hours": 16 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deliverable {
    pub name: String,

    /// Phase code the deliverable is issued in (e.g. `"ifr"`). Any case.
    #[serde(alias = "phase", alias = "phase_code")]
    pub milestone: String,

    #[serde(default)]
    pub description: String,

    /// Estimated effort.
    #[serde(default, alias = "adjusted_hours")]
    pub hours: f64,
}

impl Deliverable {
    pub fn new(
        name: impl Into<String>,
        milestone: impl Into<String>,
        description: impl Into<String>,
        hours: f64,
    ) -> Self {
        Self {
            name: name.into(),
            milestone: milestone.into(),
            description: description.into(),
            hours,
        }
    }

    /// Lower-cased phase code used for grouping.
    pub fn phase_code(&self) -> String {
        self.milestone.trim().to_lowercase()
    }

    /// Whole working days needed, rounding partial days up. Non-positive or
    /// non-finite estimates take no time; huge ones saturate at `u32::MAX`.
    pub fn duration_days(&self, hours_per_day: u32) -> u32 {
        if !self.hours.is_finite() || self.hours <= 0.0 || hours_per_day == 0 {
            return 0;
        }
        let days = (self.hours / f64::from(hours_per_day)).ceil();
        if days >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            days as u32
        }
    }

    /// Discipline label: the part of the description before `" - "`.
    pub fn discipline(&self) -> String {
        let head = self.description.split(" - ").next().unwrap_or("").trim();
        if head.is_empty() {
            "Unknown".to_string()
        } else {
            head.to_string()
        }
    }
}

/// Read a JSON array of deliverables.
pub fn load_deliverables(path: impl AsRef<Path>) -> Result<Vec<Deliverable>> {
    let contents = fs::read_to_string(path.as_ref())?;
    let deliverables: Vec<Deliverable> = serde_json::from_str(&contents)?;
    Ok(deliverables)
}
