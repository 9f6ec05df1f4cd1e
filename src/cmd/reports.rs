use anyhow::Result;

use crate::cli::ReportsArgs;
use crate::config;
use crate::report;

/// List persisted scan report files, oldest first.
pub async fn run(args: ReportsArgs) -> Result<()> {
    let dir = args.dir.unwrap_or_else(config::default_report_dir);
    let files = report::list_report_files(&dir);
    if files.is_empty() {
        tracing::warn!("no report files found in {}", dir.display());
        return Ok(());
    }
    for file in files {
        println!("{}", file.display());
    }
    Ok(())
}
