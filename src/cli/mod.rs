use clap::{value_parser, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{
    DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_HOSTS_CONCURRENCY, DEFAULT_REACH_TIMEOUT_MS,
};

/// netharvest - Network discovery and scan engine
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "netharvest - Network discovery and scan engine\nhttps://github.com/netharvest/netharvest",
    long_about = None
)]
pub struct Cli {
    /// Global log level
    #[arg(long, default_value = "info")]
    pub log_level: LogLevel,

    /// Log to file (in addition to stderr)
    #[arg(long, default_value_t = false)]
    pub log_file: bool,

    /// Log file path (default: ~/.netharvest/netharvest.log)
    #[arg(long, value_name = "FILE", value_parser = value_parser!(PathBuf))]
    pub log_file_path: Option<PathBuf>,

    /// Suppress non-error logs and result trees
    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Command,
}

/// Log level
#[derive(Copy, Clone, Debug, ValueEnum, Eq, PartialEq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    pub fn to_level_filter(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan a host or subnet for live hosts, open ports and services
    Scan(ScanArgs),

    /// Check reachability of a host or every host in a subnet
    Ping(PingArgs),

    /// Show the default network interface and its derived /24
    Interface(InterfaceArgs),

    /// List persisted scan report files
    Reports(ReportsArgs),

    /// Show the latest released version (checked remotely, cached)
    Version(VersionArgs),
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Target IPv4 address or CIDR. Omit to scan the local /24 subnet.
    pub target: Option<String>,

    /// Scan well-known ports only instead of the full 1-65535 range
    #[arg(short, long, default_value_t = false)]
    pub quick: bool,

    /// Bound on hosts probed concurrently
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_HOSTS_CONCURRENCY)]
    pub concurrency: usize,

    /// Connect timeout per port probe in ms
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_CONNECT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Append to the running scan log instead of writing timestamped files
    #[arg(short, long, default_value_t = false)]
    pub append: bool,

    /// Keep results in memory only, write nothing to disk
    #[arg(long, default_value_t = false)]
    pub no_save: bool,

    /// Directory scan reports are written to (default: ./scans)
    #[arg(short, long, value_name = "DIR", value_parser = value_parser!(PathBuf))]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PingArgs {
    /// Target IPv4 address or CIDR
    pub target: String,

    /// Reachability timeout per host in ms
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_REACH_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Bound on hosts probed concurrently
    #[arg(short, long, value_name = "N", default_value_t = DEFAULT_HOSTS_CONCURRENCY)]
    pub concurrency: usize,
}

#[derive(Args, Debug)]
pub struct InterfaceArgs {}

#[derive(Args, Debug)]
pub struct ReportsArgs {
    /// Directory to list (default: ./scans)
    #[arg(short, long, value_name = "DIR", value_parser = value_parser!(PathBuf))]
    pub dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {}
