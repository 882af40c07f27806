//! Session Report Library
//!
//! Generates a single JSON report from a flat, line-delimited activity log of
//! user and session records: per-user total and longest session time, the
//! browsers and dates of every session in arrival order, and whether the user
//! stuck to the Chrome family or ever touched Internet Explorer.
//!
//! ## Architecture
//!
//! The pipeline is two strictly sequential passes:
//!
//! - [`parser`] - pure per-line classification and field extraction
//! - [`aggregator`] - streaming accumulation: per-user counters, interned
//!   browser/date ids packed into flat per-user session streams
//! - [`interner`] - dense insertion-ordered string ids for browsers and dates
//! - [`classifier`] - sorted browser-family id sets built once after parsing
//! - [`report`] - insertion-ordered, incrementally streamed JSON rendering
//! - [`pipeline`] - phase orchestration and atomic output finalization
//!
//! Ambient concerns live in [`config`], [`logging`], [`instrument`], and
//! [`error`].
//!
//! ## Entry Point
//!
//! ```no_run
//! use session_report::ReportPipeline;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let pipeline = ReportPipeline::new();
//! let totals = pipeline.generate(Path::new("data.txt"), Path::new("report.json"))?;
//! println!("{} users, {} sessions", totals.total_users, totals.total_sessions);
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod classifier;
pub mod config;
pub mod error;
pub mod instrument;
pub mod interner;
pub mod logging;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod report;

pub use aggregator::{Aggregator, ReportSnapshot};
pub use error::ReportError;
pub use models::*;
pub use pipeline::ReportPipeline;
