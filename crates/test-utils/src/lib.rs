pub mod builders;
pub mod checks;

use std::sync::Once;

use chrono::NaiveDate;
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Fixed reference date so scheduled dates are stable across runs.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).expect("valid fixed date")
}

/// `today() + n` days.
pub fn day(n: u64) -> NaiveDate {
    today() + chrono::Days::new(n)
}
