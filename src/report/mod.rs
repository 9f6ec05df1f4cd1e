pub mod text;

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::endpoint::HostResult;
use crate::error::{Result, ScanError};
use crate::time;

/// Name of the running multi-scan JSON log
pub const RUNNING_LOG_JSON: &str = "scan_log.json";
/// Name of the running multi-scan text log
pub const RUNNING_LOG_TEXT: &str = "scan_log.txt";

/// Aggregate of one finished (or in-progress) scan.
///
/// Created empty at scan start, filled as probes complete, frozen once the
/// orchestrator hands it over.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    pub started_at: DateTime<Local>,
    pub range: String,
    pub hosts: Vec<HostResult>,
}

impl ScanReport {
    /// New empty report for the given range, stamped now.
    pub fn new(range: String) -> Self {
        Self {
            started_at: Local::now(),
            range,
            hosts: Vec::new(),
        }
    }

    /// Scan start time in the report filename format.
    pub fn file_timestamp(&self) -> String {
        time::file_timestamp(self.started_at)
    }

    /// Scan start time in the running-log format.
    pub fn log_timestamp(&self) -> String {
        time::log_timestamp(self.started_at)
    }
}

/// Persistence policy for a finished report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// New file pair named after the scan start time
    TimestampedFiles,
    /// Append to the running multi-scan log pair
    AppendToRunningLog,
}

/// Where a written report landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub json_path: PathBuf,
    pub text_path: PathBuf,
}

/// Serialized shape of one report inside the JSON outputs.
#[derive(Serialize)]
struct ReportDocument<'a> {
    scan_time: String,
    network_range: &'a str,
    hosts: &'a [HostResult],
}

/// Writes finished reports to a destination directory in both formats.
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Make sure the destination directory exists before any probing or
    /// writing happens.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| ScanError::DestinationUnwritable {
            path: self.dir.clone(),
            source: e,
        })
    }

    /// Persist a frozen report in both formats under the given policy.
    pub fn write(&self, report: &ScanReport, mode: WriteMode) -> Result<ReportPaths> {
        self.prepare()?;
        match mode {
            WriteMode::TimestampedFiles => self.write_timestamped(report),
            WriteMode::AppendToRunningLog => self.append_running_log(report),
        }
    }

    fn write_timestamped(&self, report: &ScanReport) -> Result<ReportPaths> {
        let stamp = report.file_timestamp();
        let json_path = self.dir.join(format!("{}_scan_results.json", stamp));
        let text_path = self.dir.join(format!("{}_scan_results.txt", stamp));

        let document = ReportDocument {
            scan_time: stamp,
            network_range: &report.range,
            hosts: &report.hosts,
        };
        let json = to_pretty_json(&document, &json_path)?;
        write_new(&json_path, &json)?;
        write_new(&text_path, &text::render(report, &report.file_timestamp()))?;

        Ok(ReportPaths { json_path, text_path })
    }

    fn append_running_log(&self, report: &ScanReport) -> Result<ReportPaths> {
        let json_path = self.dir.join(RUNNING_LOG_JSON);
        let text_path = self.dir.join(RUNNING_LOG_TEXT);

        // An absent or unparsable log is empty state, not an error.
        let mut root: Map<String, Value> = fs::read_to_string(&json_path)
            .ok()
            .and_then(|s| serde_json::from_str::<Value>(&s).ok())
            .and_then(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .unwrap_or_default();

        let document = ReportDocument {
            scan_time: report.log_timestamp(),
            network_range: &report.range,
            hosts: &report.hosts,
        };
        let entry = serde_json::to_value(&document).map_err(|e| {
            ScanError::DestinationUnwritable {
                path: json_path.clone(),
                source: e.into(),
            }
        })?;

        let scans = root.entry("scans".to_string()).or_insert_with(|| json!([]));
        if !scans.is_array() {
            *scans = json!([]);
        }
        if let Some(entries) = scans.as_array_mut() {
            entries.push(entry);
        }

        let json = to_pretty_json(&Value::Object(root), &json_path)?;
        write_new(&json_path, &json)?;

        // The text log only ever grows.
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&text_path)
            .map_err(|e| ScanError::DestinationUnwritable {
                path: text_path.clone(),
                source: e,
            })?;
        file.write_all(text::render(report, &report.log_timestamp()).as_bytes())
            .map_err(|e| ScanError::DestinationUnwritable {
                path: text_path.clone(),
                source: e,
            })?;

        Ok(ReportPaths { json_path, text_path })
    }
}

/// Pretty-print with 4-space indent; serde_json's default pretty printer
/// indents 2 and the persisted format requires 4.
fn to_pretty_json<T: Serialize>(value: &T, path: &Path) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| ScanError::DestinationUnwritable {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
    Ok(String::from_utf8(buf).expect("serde_json emits UTF-8"))
}

fn write_new(path: &Path, contents: &str) -> Result<()> {
    let mut file = File::create(path).map_err(|e| ScanError::DestinationUnwritable {
        path: path.to_path_buf(),
        source: e,
    })?;
    file.write_all(contents.as_bytes())
        .map_err(|e| ScanError::DestinationUnwritable {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Report artifacts (.json/.txt) in the directory, in name order — the
/// timestamp prefix makes that chronological. Unreadable directory means
/// no files, not an error.
pub fn list_report_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("cannot read report directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && matches!(
                    path.extension().and_then(|e| e.to_str()),
                    Some("json") | Some("txt")
                )
        })
        .collect();
    files.sort();
    files
}
