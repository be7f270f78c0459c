//! Local archive for grading records.
//!
//! Each graded exchange can be kept as one pretty-printed JSON file under
//! the platform data directory, named after the scenario with a running
//! index.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::model::grading_record::GradingRecord;

fn default_results_dir() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("mailcoach");
    path.push("results");
    path
}

/// Write a record into `dir` (the platform default when `None`) and return
/// the path written.
pub fn save_record(record: &GradingRecord, dir: Option<&Path>) -> Result<PathBuf> {
    let dir = dir.map(Path::to_path_buf).unwrap_or_else(default_results_dir);
    fs::create_dir_all(&dir)
        .with_context(|| format!("cannot create results directory: {}", dir.display()))?;

    let path = next_free_path(&dir, &record.scenario_name);
    let json = serde_json::to_string_pretty(record)?;
    fs::write(&path, json)
        .with_context(|| format!("cannot write grading record: {}", path.display()))?;
    Ok(path)
}

/// Read one archived record back.
pub fn load_record(path: impl AsRef<Path>) -> Result<GradingRecord> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("grading record not found: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid grading record: {}", path.display()))
}

fn next_free_path(dir: &Path, scenario_name: &str) -> PathBuf {
    let slug: String = scenario_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    for idx in 1.. {
        let candidate = dir.join(format!("{}-{:03}.json", slug, idx));
        if !candidate.exists() {
            return candidate;
        }
    }
    unreachable!("ran out of record indices");
}
