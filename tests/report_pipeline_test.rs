//! End-to-end pipeline tests over realistic activity logs.

use session_report::ReportPipeline;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{generate_report, write_log};

const BASIC_LOG: &str = "\
u,1,Anna,Smith,22\n\
s,1,0,Chrome 35,30,2023-01-01T00:00:00\n\
s,1,1,Chrome 35,50,2023-01-02T00:00:00\n\
u,2,Bob,Jones,31\n\
s,2,0,Internet Explorer 11,20,2023-02-10T12:30:00\n\
s,2,1,Firefox 47,15,2023-02-11T12:30:00\n\
u,3,Cal,Reed,19\n";

#[test]
fn test_document_totals() {
    let doc = generate_report(BASIC_LOG).unwrap();

    assert_eq!(doc["totalSessions"], 4);
    assert_eq!(doc["totalUsers"], 3);
    assert_eq!(doc["uniqueBrowsersCount"], 3);
    assert_eq!(
        doc["allBrowsers"],
        "Chrome 35,Internet Explorer 11,Firefox 47"
    );
}

#[test]
fn test_anna_smith_scenario() {
    let doc = generate_report(
        "u,1,Anna,Smith,x\n\
         s,1,ignored,Chrome,30,2023-01-01T00:00:00\n\
         s,1,ignored,Chrome,50,2023-01-02T00:00:00\n",
    )
    .unwrap();

    let stats = &doc["usersStats"]["Anna Smith"];
    assert_eq!(stats["totalTime"], "80");
    assert_eq!(stats["longestSession"], "50");
    assert_eq!(stats["sessionsCount"], "2");
    assert_eq!(stats["alwaysUsedChrome"], true);
    assert_eq!(stats["usedIE"], false);
    assert_eq!(stats["browsers"], "Chrome,Chrome");
    assert_eq!(
        stats["dates"],
        serde_json::json!(["2023-01-01", "2023-01-02"])
    );
}

#[test]
fn test_user_without_sessions() {
    let doc = generate_report(BASIC_LOG).unwrap();

    let stats = &doc["usersStats"]["Cal Reed"];
    assert_eq!(stats["alwaysUsedChrome"], false);
    assert_eq!(stats["usedIE"], false);
    assert_eq!(stats["sessionsCount"], "0");
    assert_eq!(stats["browsers"], "");
    assert_eq!(stats["dates"], serde_json::json!([]));
    assert_eq!(stats["totalTime"], "0");
    assert_eq!(stats["longestSession"], "0");
}

#[test]
fn test_ie_session_clears_chrome_flag() {
    let doc = generate_report(
        "u,1,Bob,Jones,x\n\
         s,1,0,Chrome 35,10,2023-01-01T00:00:00\n\
         s,1,1,Internet Explorer 11,5,2023-01-02T00:00:00\n\
         s,1,2,Chrome 35,10,2023-01-03T00:00:00\n",
    )
    .unwrap();

    let stats = &doc["usersStats"]["Bob Jones"];
    assert_eq!(stats["usedIE"], true);
    assert_eq!(stats["alwaysUsedChrome"], false);
    assert_eq!(stats["sessionsCount"], "3");
}

#[test]
fn test_users_render_in_first_seen_order() {
    let doc = generate_report(BASIC_LOG).unwrap();
    let names: Vec<_> = doc["usersStats"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(names, vec!["Anna Smith", "Bob Jones", "Cal Reed"]);
}

#[test]
fn test_unrecognized_lines_affect_nothing() {
    let doc = generate_report(
        "# header comment\n\
         u,1,Anna,Smith,x\n\
         \n\
         x,totally,unrelated\n\
         s,1,0,Chrome 35,30,2023-01-01T00:00:00\n\
         trailer\n",
    )
    .unwrap();

    assert_eq!(doc["totalSessions"], 1);
    assert_eq!(doc["totalUsers"], 1);
    assert_eq!(doc["uniqueBrowsersCount"], 1);
}

#[test]
fn test_output_is_byte_for_byte_idempotent() {
    let dir = TempDir::new().unwrap();
    let input = write_log(&dir, "data.txt", BASIC_LOG).unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    let pipeline = ReportPipeline::new();
    pipeline.generate(&input, &first).unwrap();
    pipeline.generate(&input, &second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_malformed_session_line_aborts_without_report() {
    let dir = TempDir::new().unwrap();
    let input = write_log(
        &dir,
        "data.txt",
        "u,1,Anna,Smith,x\n\
         s,1,0,Chrome 35,notanumber,2023-01-01T00:00:00\n",
    )
    .unwrap();
    let output = dir.path().join("report.json");

    let err = ReportPipeline::new()
        .generate(&input, &output)
        .unwrap_err();

    assert!(format!("{err:#}").contains("malformed session line"));
    assert!(format!("{err:#}").contains("input line 2"));
    assert!(!output.exists(), "no report may be left behind on failure");
}

#[test]
fn test_session_before_user_line_aborts() {
    let dir = TempDir::new().unwrap();
    let input = write_log(
        &dir,
        "data.txt",
        "s,9,0,Chrome 35,30,2023-01-01T00:00:00\n\
         u,9,Anna,Smith,x\n",
    )
    .unwrap();
    let output = dir.path().join("report.json");

    let err = ReportPipeline::new()
        .generate(&input, &output)
        .unwrap_err();

    assert!(format!("{err:#}").contains("unknown user id 9"));
    assert!(!output.exists());
}

#[test]
fn test_missing_input_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = ReportPipeline::new()
        .generate(&dir.path().join("nope.txt"), &dir.path().join("report.json"))
        .unwrap_err();
    assert!(format!("{err:#}").contains("failed to open input file"));
}

#[test]
fn test_existing_report_survives_failed_rerun() {
    let dir = TempDir::new().unwrap();
    let good = write_log(&dir, "good.txt", BASIC_LOG).unwrap();
    let bad = write_log(&dir, "bad.txt", "s,1,0,Chrome,5,2023-01-01\n").unwrap();
    let output = dir.path().join("report.json");

    let pipeline = ReportPipeline::new();
    pipeline.generate(&good, &output).unwrap();
    let before = fs::read(&output).unwrap();

    pipeline.generate(&bad, &output).unwrap_err();
    assert_eq!(fs::read(&output).unwrap(), before);
}

#[test]
fn test_large_stream_accumulates_linearly() {
    let mut log = String::from("u,1,Anna,Smith,x\n");
    for i in 0..1000u64 {
        let browser = if i % 3 == 0 { "Firefox 47" } else { "Chrome 35" };
        log.push_str(&format!("s,1,{i},{browser},{},2023-01-01T00:00:00\n", i % 7));
    }

    let doc = generate_report(&log).unwrap();
    let stats = &doc["usersStats"]["Anna Smith"];
    assert_eq!(doc["totalSessions"], 1000);
    assert_eq!(stats["sessionsCount"], "1000");
    assert_eq!(stats["longestSession"], "6");
    assert_eq!(stats["alwaysUsedChrome"], false);
    assert_eq!(stats["dates"].as_array().unwrap().len(), 1000);
}
