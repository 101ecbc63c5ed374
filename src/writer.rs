use crate::{Job, Result};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// `{dir}/{company}-{YYYY-MM-DD}.csv`
pub fn snapshot_path(dir: impl AsRef<Path>, company: &str, date: NaiveDate) -> PathBuf {
    dir.as_ref()
        .join(format!("{}-{}.csv", company, date.format("%Y-%m-%d")))
}

/// Writes the dated snapshot for `company`, creating `dir` if needed.
pub fn save_snapshot(
    jobs: &[Job],
    dir: impl AsRef<Path>,
    company: &str,
    date: NaiveDate,
) -> Result<PathBuf> {
    fs::create_dir_all(dir.as_ref())?;
    let path = snapshot_path(dir, company, date);
    save_to_csv(jobs, &path)?;
    Ok(path)
}

pub fn save_to_csv(jobs: &[Job], file_path: impl AsRef<Path>) -> Result<()> {
    let mut file = File::create(file_path)?;
    file.write_all(UTF8_BOM)?;

    if jobs.is_empty() {
        return Ok(());
    }

    let headers = collect_headers(jobs);
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(&headers)?;

    for job in jobs {
        writer.write_record(headers.iter().map(|key| to_cell(job.get(key))))?;
    }

    writer.flush()?;
    Ok(())
}

/// Union of all keys, in the order they are first seen.
fn collect_headers(jobs: &[Job]) -> Vec<String> {
    let mut seen_keys = HashSet::new();
    jobs.iter()
        .flat_map(|job| job.keys())
        .filter(|key| seen_keys.insert(*key))
        .cloned()
        .collect()
}

fn to_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
