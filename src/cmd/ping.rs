use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use crate::cli::PingArgs;
use crate::output;
use crate::ping::ReachabilityChecker;
use crate::probe::tcp::ConnectProber;
use crate::target::TargetSpec;

/// Run a reachability check against one host or a whole subnet.
pub async fn run(args: PingArgs, quiet: bool) -> Result<()> {
    let target = TargetSpec::normalize(&args.target)?;

    let checker = ReachabilityChecker::new(Arc::new(ConnectProber::new()))
        .with_timeout(Duration::from_millis(args.timeout_ms))
        .with_concurrency(args.concurrency);

    tracing::info!("checking reachability of {}", target);
    let results = checker.check(&target).await;
    let reachable = results.values().filter(|up| **up).count();

    if reachable == 0 {
        tracing::warn!("no hosts were reachable in {}", target);
    } else {
        tracing::info!("{}/{} host(s) reachable", reachable, results.len());
    }
    if !quiet {
        output::ping::print_reachability_tree(&target, &results);
    }
    Ok(())
}
