//! Pipeline orchestration.
//!
//! Coordinates the two phases of a run:
//!
//! 1. **Parse**: single forward pass over the input stream, feeding the
//!    aggregator; the read handle is released when the pass ends.
//! 2. **Render**: single pass over the frozen snapshot, streamed to a
//!    temporary file next to the destination and persisted only on full
//!    success, so a failed run never leaves a truncated report behind.
//!
//! Strictly sequential: the snapshot (inverted tables plus classifier sets)
//! only exists once parsing has fully completed.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::aggregator::{Aggregator, ReportSnapshot};
use crate::config::get_config;
use crate::error::ReportError;
use crate::models::{ParsedLine, RunTotals};
use crate::parser::parse_line;
use crate::report::ReportRenderer;

pub struct ReportPipeline {
    read_buffer: usize,
    write_buffer: usize,
}

impl Default for ReportPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPipeline {
    pub fn new() -> Self {
        let config = get_config();
        Self {
            read_buffer: config.io.read_buffer_kb * 1024,
            write_buffer: config.io.write_buffer_kb * 1024,
        }
    }

    /// Runs the whole pipeline and returns the document-level totals.
    pub fn generate(&self, input: &Path, output: &Path) -> Result<RunTotals> {
        let snapshot = self.parse_phase(input)?;
        let totals = snapshot.totals();
        self.render_phase(&snapshot, output)?;
        Ok(totals)
    }

    fn parse_phase(&self, input: &Path) -> Result<ReportSnapshot> {
        let file = File::open(input)
            .map_err(ReportError::Io)
            .with_context(|| format!("failed to open input file {}", input.display()))?;
        let reader = BufReader::with_capacity(self.read_buffer, file);
        let mut aggregator = Aggregator::new();

        for (idx, line) in reader.lines().enumerate() {
            let line_number = idx + 1;
            let line = line
                .map_err(ReportError::Io)
                .with_context(|| format!("failed to read input line {line_number}"))?;

            match parse_line(&line).with_context(|| format!("input line {line_number}"))? {
                ParsedLine::User(record) => aggregator.record_user(record),
                ParsedLine::Session(record) => aggregator
                    .record_session(record)
                    .with_context(|| format!("input line {line_number}"))?,
                ParsedLine::Skip => {}
            }
        }

        debug!(
            users = aggregator.user_count(),
            sessions = aggregator.total_sessions(),
            "parse phase complete"
        );

        Ok(aggregator.freeze())
    }

    fn render_phase(&self, snapshot: &ReportSnapshot, output: &Path) -> Result<()> {
        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("failed to create temporary report in {}", dir.display()))?;

        let mut writer = BufWriter::with_capacity(self.write_buffer, tmp.as_file());
        ReportRenderer::new(snapshot).write_to(&mut writer)?;
        writer.flush().context("failed to flush report")?;
        drop(writer);

        tmp.persist(output)
            .with_context(|| format!("failed to finalize report at {}", output.display()))?;

        debug!(report = %output.display(), "render phase complete");
        Ok(())
    }
}
