use anyhow::Result;
use std::sync::Arc;

use crate::cli::VersionArgs;
use crate::config;
use crate::probe::tcp::ConnectProber;
use crate::session::ScanSession;

/// Show the latest released version from the remote endpoint.
pub async fn run(_args: VersionArgs) -> Result<()> {
    let session = ScanSession::new(Arc::new(ConnectProber::new()), config::default_report_dir());
    let version = session.fetch_remote_version().await;
    println!("Latest release: {}", version);
    Ok(())
}
