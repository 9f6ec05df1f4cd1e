use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::cli::ScanArgs;
use crate::config;
use crate::output;
use crate::probe::tcp::ConnectProber;
use crate::report::WriteMode;
use crate::scan::{ScanOutcome, ScanSetting};
use crate::session::ScanSession;
use crate::target::{self, TargetSpec};

/// Run a full scan.
pub async fn run(args: ScanArgs, quiet: bool) -> Result<()> {
    let target = match &args.target {
        Some(raw) => TargetSpec::normalize(raw)?,
        None => {
            let cidr = target::resolve_local_subnet();
            tracing::info!("no target given, detected subnet: {}", cidr);
            TargetSpec::normalize(&cidr)?
        }
    };

    let mut setting = if args.quick {
        ScanSetting::quick(target)
    } else {
        ScanSetting::full(target)
    };
    setting.options.host_concurrency = args.concurrency.max(1);
    setting.options.connect_timeout = Duration::from_millis(args.timeout_ms);

    let report_dir = args.output_dir.unwrap_or_else(config::default_report_dir);
    let session = ScanSession::new(Arc::new(ConnectProber::new()), report_dir);

    let write_mode = if args.no_save {
        None
    } else if args.append {
        Some(WriteMode::AppendToRunningLog)
    } else {
        Some(WriteMode::TimestampedFiles)
    };

    let handle = session.start_scan(setting, write_mode);

    // Progress bar fed from the scan's progress channel
    let header_span = tracing::info_span!("scan");
    header_span.pb_set_style(&output::progress::scan_progress_style());
    header_span.pb_set_message("Scanning");
    header_span.pb_set_length(100);
    header_span.pb_set_position(0);
    header_span.pb_start();

    let progress_span = header_span.clone();
    let mut receiver = handle.progress();
    let forwarder = tokio::spawn(async move {
        while receiver.changed().await.is_ok() {
            let percent = *receiver.borrow();
            progress_span.pb_set_position(percent.round() as u64);
        }
    });

    let outcome = handle.wait().await;
    let _ = forwarder.await;
    drop(header_span);

    match outcome {
        ScanOutcome::Completed(report) => {
            if !quiet {
                output::host::print_report_tree(&report);
            }
            Ok(())
        }
        ScanOutcome::NoHostsFound { range } => {
            tracing::warn!("no hosts were found during the scan for the range: {}", range);
            Ok(())
        }
        ScanOutcome::Failed { reason, report } => {
            // a post-probe write failure still has results worth showing
            if let Some(report) = report {
                if !quiet {
                    output::host::print_report_tree(&report);
                }
            }
            Err(reason.into())
        }
    }
}
