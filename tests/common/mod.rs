use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Writes an input log fixture and returns its path.
pub fn write_log(dir: &TempDir, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.path().join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Runs the pipeline over `content` and returns the parsed report document.
pub fn generate_report(content: &str) -> Result<serde_json::Value> {
    let dir = TempDir::new()?;
    let input = write_log(&dir, "data.txt", content)?;
    let output = dir.path().join("report.json");

    session_report::ReportPipeline::new().generate(&input, &output)?;

    let rendered = fs::read_to_string(&output)?;
    Ok(serde_json::from_str(&rendered)?)
}

#[allow(dead_code)]
pub fn read_report(path: &Path) -> Result<serde_json::Value> {
    Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
}
