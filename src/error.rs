use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for scan engine operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Error taxonomy of the scan engine.
///
/// Per-host probe failures are not represented here: they are recovered
/// locally as `status: down` host results and never abort a scan.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The supplied target is neither a valid IPv4 address nor a valid CIDR
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// The report destination cannot be created or written
    #[error("destination unwritable: {path}: {source}")]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scan was aborted on caller request
    #[error("scan cancelled")]
    Cancelled,

    /// The probe capability failed as a whole (not a single host)
    #[error("probe failure: {0}")]
    Probe(String),
}
