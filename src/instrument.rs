//! Wall-clock and memory measurement around the pipeline.
//!
//! Brackets a whole run with an `Instant` and an RSS sample on each side,
//! emitting the result through `tracing`. Purely observational; a failed
//! measurement never affects the run.

use std::time::{Duration, Instant};

use tracing::info;

#[derive(Debug, Clone)]
pub struct RunMeasurement {
    pub elapsed: Duration,
    pub rss_before_kb: Option<u64>,
    pub rss_after_kb: Option<u64>,
}

impl RunMeasurement {
    /// Resident-set growth over the run in MB, when the platform exposes it.
    pub fn rss_delta_mb(&self) -> Option<f64> {
        let before = self.rss_before_kb?;
        let after = self.rss_after_kb?;
        Some(after.saturating_sub(before) as f64 / 1024.0)
    }
}

/// Runs `f`, measuring wall time and RSS around it.
pub fn measure<T, F: FnOnce() -> T>(label: &str, f: F) -> (T, RunMeasurement) {
    let rss_before_kb = current_rss_kb();
    let started = Instant::now();

    let value = f();

    let measurement = RunMeasurement {
        elapsed: started.elapsed(),
        rss_before_kb,
        rss_after_kb: current_rss_kb(),
    };

    info!(
        label,
        elapsed_ms = measurement.elapsed.as_millis() as u64,
        rss_before_kb = ?measurement.rss_before_kb,
        rss_after_kb = ?measurement.rss_after_kb,
        "measurement complete"
    );

    (value, measurement)
}

#[cfg(target_os = "linux")]
fn current_rss_kb() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|line| line.starts_with("VmRSS:"))?;
    line.split_whitespace().nth(1)?.parse().ok()
}

#[cfg(not(target_os = "linux"))]
fn current_rss_kb() -> Option<u64> {
    None
}
