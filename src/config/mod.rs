use std::path::PathBuf;

/// Default bound on concurrently probed hosts
pub const DEFAULT_HOSTS_CONCURRENCY: usize = 256;
/// Default bound on concurrently probed ports per host
pub const DEFAULT_PORTS_CONCURRENCY: usize = 100;
/// Default TCP connect timeout in milliseconds
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 1000;
/// Default reachability probe timeout in milliseconds
pub const DEFAULT_REACH_TIMEOUT_MS: u64 = 1000;
/// Upper bound on a single host detail probe (seconds)
pub const DEFAULT_TASK_TIMEOUT_SECS: u64 = 600;
/// First port of the full scan range
pub const FULL_PORT_RANGE_START: u16 = 1;
/// Last port of the full scan range
pub const FULL_PORT_RANGE_END: u16 = 65535;
/// Directory name for persisted scan reports
pub const DEFAULT_REPORT_DIR_NAME: &str = "scans";
/// How long a fetched remote version string stays valid (seconds)
pub const VERSION_CACHE_TTL_SECS: u64 = 3600;
/// Endpoint queried by the remote version check
pub const VERSION_ENDPOINT: &str =
    "https://api.github.com/repos/netharvest/netharvest/releases/latest";

const USER_DIR_NAME: &str = ".netharvest";

/// Per-user application directory (~/.netharvest)
pub fn get_user_dir_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(USER_DIR_NAME))
}

/// Path of a file inside the per-user application directory.
/// Falls back to the current directory when no home directory is known.
pub fn get_user_file_path(file_name: &str) -> PathBuf {
    match get_user_dir_path() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Default directory scan reports are persisted to
pub fn default_report_dir() -> PathBuf {
    PathBuf::from(DEFAULT_REPORT_DIR_NAME)
}
