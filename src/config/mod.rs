// src/config/mod.rs

//! Engine configuration.
//!
//! - [`model`] holds the serde types for the TOML file.
//! - [`loader`] reads a file from disk.
//! - [`validate`] turns a [`RawConfigFile`] into a checked [`ConfigFile`].

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{ConfigFile, PhasesSection, RawConfigFile, ScheduleSection};
