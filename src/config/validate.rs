// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ConfigFile, PhasesSection, RawConfigFile};
use crate::errors::{Result, WbsError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::WbsError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_schedule(&raw)?;
        let phases = normalise_phases(raw.phases);
        validate_phase_order(&phases)?;
        validate_review_phases(&phases)?;
        Ok(ConfigFile::new_unchecked(raw.schedule, phases))
    }
}

/// Deliverables carry phase codes in any case; everything is compared
/// lower-cased.
fn normalise_phases(mut phases: PhasesSection) -> PhasesSection {
    for code in phases.order.iter_mut().chain(phases.review.iter_mut()) {
        *code = code.trim().to_lowercase();
    }
    phases
}

fn validate_schedule(cfg: &RawConfigFile) -> Result<()> {
    if cfg.schedule.hours_per_day == 0 {
        return Err(WbsError::ConfigError(
            "[schedule].hours_per_day must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_phase_order(phases: &PhasesSection) -> Result<()> {
    if phases.order.is_empty() {
        return Err(WbsError::ConfigError(
            "[phases].order must list at least one phase code".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for code in phases.order.iter() {
        if code.is_empty() {
            return Err(WbsError::ConfigError(
                "[phases].order contains an empty phase code".to_string(),
            ));
        }
        if !seen.insert(code.as_str()) {
            return Err(WbsError::ConfigError(format!(
                "phase '{}' appears more than once in [phases].order",
                code
            )));
        }
    }
    Ok(())
}

fn validate_review_phases(phases: &PhasesSection) -> Result<()> {
    let mut seen = HashSet::new();
    for code in phases.review.iter() {
        if !seen.insert(code.as_str()) {
            return Err(WbsError::ConfigError(format!(
                "review phase '{}' appears more than once in [phases].review",
                code
            )));
        }
        if !phases.order.contains(code) {
            return Err(WbsError::ConfigError(format!(
                "review phase '{}' is not listed in [phases].order",
                code
            )));
        }
    }
    Ok(())
}
