use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::{VERSION_CACHE_TTL_SECS, VERSION_ENDPOINT};
use crate::error::ScanError;
use crate::probe::ProbeCapability;
use crate::report::{self, ReportWriter, ScanReport, WriteMode};
use crate::scan::{ScanOutcome, ScanSetting, Scanner};

/// Handle on a running scan.
///
/// The only state visible before completion is the progress percentage;
/// host data stays inside the orchestrator until the outcome is frozen.
pub struct ScanHandle {
    progress: watch::Receiver<f64>,
    cancel: CancellationToken,
    task: JoinHandle<ScanOutcome>,
}

impl ScanHandle {
    /// Receiver for progress percentages (0..=100).
    pub fn progress(&self) -> watch::Receiver<f64> {
        self.progress.clone()
    }

    /// Drive a callback with every progress change on a separate task, so
    /// the caller's sink can never block a probe worker.
    pub fn subscribe_progress<F>(&self, mut sink: F)
    where
        F: FnMut(f64) + Send + 'static,
    {
        let mut receiver = self.progress.clone();
        tokio::spawn(async move {
            while receiver.changed().await.is_ok() {
                let percent = *receiver.borrow();
                sink(percent);
            }
        });
    }

    /// Ask the scan to stop: no new probes are dispatched, in-flight probes
    /// are abandoned, nothing is written to disk.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the outcome is ready to collect without blocking.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the scan and take its outcome.
    pub async fn wait(self) -> ScanOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => ScanOutcome::Failed {
                reason: ScanError::Probe(format!("scan task failed: {}", e)),
                report: None,
            },
        }
    }
}

struct VersionCache {
    fetched_at: Instant,
    value: String,
}

/// Entry point handed to the UI layer: starts scans, exposes progress and
/// outcomes, lists persisted reports, answers the cached version check.
pub struct ScanSession {
    capability: Arc<dyn ProbeCapability>,
    report_dir: PathBuf,
    version_endpoint: String,
    version_cache: Mutex<Option<VersionCache>>,
}

impl ScanSession {
    pub fn new(capability: Arc<dyn ProbeCapability>, report_dir: impl Into<PathBuf>) -> Self {
        Self {
            capability,
            report_dir: report_dir.into(),
            version_endpoint: VERSION_ENDPOINT.to_string(),
            version_cache: Mutex::new(None),
        }
    }

    /// Override the endpoint the version check queries.
    pub fn with_version_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.version_endpoint = endpoint.into();
        self
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    /// Start a scan on the runtime and return a handle to it.
    ///
    /// With a write mode, the destination directory is verified before any
    /// probing starts, and the frozen report is committed afterwards. A
    /// post-scan write failure still hands the report back through the
    /// outcome so no data is lost.
    pub fn start_scan(&self, setting: ScanSetting, write_mode: Option<WriteMode>) -> ScanHandle {
        let (progress_tx, progress_rx) = watch::channel(0.0);
        let cancel = CancellationToken::new();
        let scan_cancel = cancel.clone();
        let capability = self.capability.clone();
        let writer = ReportWriter::new(self.report_dir.clone());

        let task = tokio::spawn(async move {
            if write_mode.is_some() {
                if let Err(e) = writer.prepare() {
                    tracing::error!("scan aborted before probing: {}", e);
                    return ScanOutcome::Failed {
                        reason: e,
                        report: None,
                    };
                }
            }

            let scanner = Scanner::new(capability, setting);
            let outcome = scanner.run(progress_tx, scan_cancel).await;

            match (outcome, write_mode) {
                (ScanOutcome::Completed(scan_report), Some(mode)) => {
                    commit(&writer, scan_report, mode)
                }
                (outcome, _) => outcome,
            }
        });

        ScanHandle {
            progress: progress_rx,
            cancel,
            task,
        }
    }

    /// Persisted report artifacts in the session's report directory.
    pub fn list_report_files(&self) -> Vec<PathBuf> {
        report::list_report_files(&self.report_dir)
    }

    /// Latest released version from the remote endpoint, cached for an hour.
    ///
    /// Returns "Unknown" when the response carries no tag and an error
    /// string when the request fails; either way the result is cached so a
    /// broken network is asked again only after the TTL.
    pub async fn fetch_remote_version(&self) -> String {
        let mut cache = self.version_cache.lock().await;
        if let Some(cached) = cache.as_ref() {
            if cached.fetched_at.elapsed() < Duration::from_secs(VERSION_CACHE_TTL_SECS) {
                return cached.value.clone();
            }
        }
        let value = fetch_latest_tag(&self.version_endpoint).await;
        *cache = Some(VersionCache {
            fetched_at: Instant::now(),
            value: value.clone(),
        });
        value
    }
}

fn commit(writer: &ReportWriter, scan_report: ScanReport, mode: WriteMode) -> ScanOutcome {
    match writer.write(&scan_report, mode) {
        Ok(paths) => {
            tracing::info!(
                "scan results saved to {} and {}",
                paths.json_path.display(),
                paths.text_path.display()
            );
            ScanOutcome::Completed(scan_report)
        }
        Err(e) => {
            tracing::error!("failed to persist scan results: {}", e);
            ScanOutcome::Failed {
                reason: e,
                report: Some(scan_report),
            }
        }
    }
}

async fn fetch_latest_tag(endpoint: &str) -> String {
    let response = match reqwest::get(endpoint).await {
        Ok(response) => response,
        Err(e) => return format!("Error retrieving version: {}", e),
    };
    let response = match response.error_for_status() {
        Ok(response) => response,
        Err(e) => return format!("Error retrieving version: {}", e),
    };
    match response.json::<serde_json::Value>().await {
        Ok(body) => match body.get("tag_name").and_then(|tag| tag.as_str()) {
            Some(tag) => tag.to_string(),
            None => "Unknown".to_string(),
        },
        Err(_) => "Unknown".to_string(),
    }
}
