use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process;
use tracing::info_span;
use uuid::Uuid;

use session_report::instrument::{self, RunMeasurement};
use session_report::logging;
use session_report::{ReportPipeline, RunTotals};

#[derive(Parser)]
#[command(name = "session-report")]
#[command(about = "Generate a per-user browser session report from a flat activity log")]
#[command(version = "1.0.0")]
struct Cli {
    /// Input log file with user (u,...) and session (s,...) lines
    input: PathBuf,

    /// Report destination
    #[arg(short, long, default_value = "report.json")]
    output: PathBuf,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging();

    let run_id = Uuid::new_v4();
    let span = info_span!("report_run", run_id = %run_id);
    let _guard = span.enter();

    let pipeline = ReportPipeline::new();
    let (result, measurement) =
        instrument::measure("report pipeline", || pipeline.generate(&cli.input, &cli.output));

    match result {
        Ok(totals) => {
            print_summary(&cli, &totals, &measurement);
            Ok(())
        }
        Err(e) => handle_error(e, cli.json),
    }
}

fn print_summary(cli: &Cli, totals: &RunTotals, measurement: &RunMeasurement) {
    if cli.json {
        let summary = serde_json::json!({
            "report": cli.output.display().to_string(),
            "totalUsers": totals.total_users,
            "totalSessions": totals.total_sessions,
            "uniqueBrowsersCount": totals.unique_browsers,
            "elapsedMs": measurement.elapsed.as_millis() as u64,
        });
        println!("{summary}");
    } else {
        println!(
            "{} {}",
            "Report written to".green(),
            cli.output.display().to_string().bold()
        );
        println!(
            "  users: {}  sessions: {}  distinct browsers: {}",
            totals.total_users, totals.total_sessions, totals.unique_browsers
        );
        print!("  time: {:.3}s", measurement.elapsed.as_secs_f64());
        if let Some(delta_mb) = measurement.rss_delta_mb() {
            print!("  memory: {delta_mb:.2} MB");
        }
        println!();
    }
}

fn handle_error(e: anyhow::Error, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::json!({"error": format!("{e:#}")}));
    } else {
        eprintln!("Error: {e:#}");
    }
    process::exit(1);
}
