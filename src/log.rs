use anyhow::Result;
use std::fs::File;
use tracing::level_filters::LevelFilter;
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{filter::Targets, fmt, registry};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::cli::Cli;
use crate::time::LocalTimeOnly;

/// Initialize the logger based on command-line arguments.
pub fn init_logger(cli_args: &Cli) -> Result<()> {
    // Writer that coexists with progress bars
    let indicatif_layer = IndicatifLayer::new();

    let console_fmt = fmt::layer()
        .with_target(false)
        .with_timer(LocalTimeOnly)
        .with_writer(indicatif_layer.get_stderr_writer());

    let console_filter = if cli_args.quiet {
        // Quiet mode keeps errors only
        Targets::new().with_default(LevelFilter::ERROR)
    } else {
        Targets::new()
            .with_default(LevelFilter::OFF)
            .with_target("netharvest", cli_args.log_level.to_level_filter())
    };

    if !cli_args.log_file {
        registry()
            .with(indicatif_layer)
            .with(console_fmt.with_filter(console_filter))
            .init();
        return Ok(());
    }

    let log_file_path = cli_args
        .log_file_path
        .clone()
        .unwrap_or_else(|| crate::config::get_user_file_path("netharvest.log"));
    if let Some(parent) = log_file_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = File::options().create(true).append(true).open(&log_file_path)?;

    let file_fmt = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_timer(LocalTimeOnly)
        .with_writer(file);
    let file_filter = Targets::new()
        .with_default(LevelFilter::OFF)
        .with_target("netharvest", cli_args.log_level.to_level_filter());

    registry()
        .with(indicatif_layer)
        .with(console_fmt.with_filter(console_filter))
        .with(file_fmt.with_filter(file_filter))
        .init();

    Ok(())
}
