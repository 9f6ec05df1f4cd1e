use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::endpoint::HostResult;
use crate::error::ScanError;
use crate::probe::{HostProbe, PortSpec, ProbeCapability, ProbeOptions};
use crate::report::ScanReport;
use crate::target::TargetSpec;

/// Everything one scan needs: the range, the ports, and the probe tuning.
#[derive(Debug, Clone)]
pub struct ScanSetting {
    pub target: TargetSpec,
    pub ports: PortSpec,
    pub options: ProbeOptions,
}

impl ScanSetting {
    /// Design-default profile: full port range, hostname and OS detection on.
    pub fn full(target: TargetSpec) -> Self {
        Self {
            target,
            ports: PortSpec::full(),
            options: ProbeOptions::default(),
        }
    }

    /// Narrow profile: well-known ports only, no OS detection.
    /// Same probe contract, different tuning.
    pub fn quick(target: TargetSpec) -> Self {
        Self {
            target,
            ports: PortSpec::well_known(),
            options: ProbeOptions {
                os_detection: false,
                ..ProbeOptions::default()
            },
        }
    }
}

/// Result of one full scan.
#[derive(Debug)]
pub enum ScanOutcome {
    /// The scan ran to completion; the report is frozen.
    Completed(ScanReport),
    /// The range expanded to nothing, or discovery saw no live host.
    /// A valid outcome, not an error.
    NoHostsFound { range: String },
    /// The scan aborted. `report` carries the in-memory results when
    /// probing succeeded but the commit afterwards failed.
    Failed {
        reason: ScanError,
        report: Option<ScanReport>,
    },
}

impl ScanOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ScanOutcome::Completed(_))
    }

    /// The report, whichever outcome carries one.
    pub fn report(&self) -> Option<&ScanReport> {
        match self {
            ScanOutcome::Completed(report) => Some(report),
            ScanOutcome::Failed { report, .. } => report.as_ref(),
            ScanOutcome::NoHostsFound { .. } => None,
        }
    }
}

/// Drives one scan across a resolved range: bulk discovery, bounded
/// per-host probing, progress reporting, deterministic aggregation.
pub struct Scanner {
    capability: Arc<dyn ProbeCapability>,
    pub setting: ScanSetting,
}

impl Scanner {
    pub fn new(capability: Arc<dyn ProbeCapability>, setting: ScanSetting) -> Self {
        Self { capability, setting }
    }

    /// Run the scan.
    ///
    /// Progress percentages go out through `progress` after every completed
    /// host probe; sends never block the probe workers. `cancel` stops
    /// dispatching and abandons in-flight probes.
    pub async fn run(
        &self,
        progress: watch::Sender<f64>,
        cancel: CancellationToken,
    ) -> ScanOutcome {
        let range = self.setting.target.to_string();

        let candidates = self.setting.target.expand_hosts();
        if candidates.is_empty() {
            tracing::warn!("range {} has no usable host addresses", range);
            return ScanOutcome::NoHostsFound { range };
        }

        tracing::info!(
            "starting scan of {} ({} candidate host(s))",
            range,
            candidates.len()
        );

        // Phase 1: bulk liveness discovery over the whole range.
        let live = match self
            .capability
            .discover_hosts(&candidates, &self.setting.options)
            .await
        {
            Ok(live) => live,
            Err(e) => {
                return ScanOutcome::Failed {
                    reason: e,
                    report: None,
                }
            }
        };
        if live.is_empty() {
            tracing::warn!("no hosts found in the scan for the range {}", range);
            return ScanOutcome::NoHostsFound { range };
        }

        // Phase 2: detail probes, bounded, into slots indexed by discovery
        // order so the report stays in ascending address order no matter
        // which probe finishes first.
        let total = live.len();
        let mut report = ScanReport::new(range);
        let probe = HostProbe::new(self.capability.clone());
        let ports = self.setting.ports.clone();
        let options = self.setting.options.clone();
        let concurrency = options.host_concurrency.max(1);

        let mut slots: Vec<Option<HostResult>> = (0..total).map(|_| None).collect();
        let mut completed = 0usize;

        let mut probes = stream::iter(live.into_iter().enumerate())
            .map(|(slot, address)| {
                let probe = probe.clone();
                let ports = ports.clone();
                let options = options.clone();
                async move { (slot, probe.probe(address, &ports, &options).await) }
            })
            .buffer_unordered(concurrency);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::warn!("scan of {} cancelled after {}/{} host(s)", report.range, completed, total);
                    return ScanOutcome::Failed {
                        reason: ScanError::Cancelled,
                        report: None,
                    };
                }
                next = probes.next() => match next {
                    Some((slot, host)) => {
                        slots[slot] = Some(host);
                        completed += 1;
                        let _ = progress.send(completed as f64 / total as f64 * 100.0);
                    }
                    None => break,
                }
            }
        }

        report.hosts = slots.into_iter().flatten().collect();
        tracing::info!(
            "scan of {} completed, {} host(s) probed",
            report.range,
            report.hosts.len()
        );
        ScanOutcome::Completed(report)
    }
}
