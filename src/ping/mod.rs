use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{DEFAULT_HOSTS_CONCURRENCY, DEFAULT_REACH_TIMEOUT_MS};
use crate::probe::{HostProbe, ProbeCapability};
use crate::target::TargetSpec;

/// Lightweight reachability sweep, no port or service detail.
///
/// Backs the interactive ping feature: one address or every usable host in
/// a subnet, probed with the same bounded-concurrency pattern as a full
/// scan so a /16 cannot fan out unbounded.
pub struct ReachabilityChecker {
    probe: HostProbe,
    timeout: Duration,
    concurrency: usize,
}

impl ReachabilityChecker {
    pub fn new(capability: Arc<dyn ProbeCapability>) -> Self {
        Self {
            probe: HostProbe::new(capability),
            timeout: Duration::from_millis(DEFAULT_REACH_TIMEOUT_MS),
            concurrency: DEFAULT_HOSTS_CONCURRENCY,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Reachability of every host in the target, keyed ascending by address.
    pub async fn check(&self, target: &TargetSpec) -> BTreeMap<IpAddr, bool> {
        let hosts = target.expand_hosts();
        let timeout = self.timeout;
        let mut results = BTreeMap::new();

        let mut probes = stream::iter(hosts)
            .map(|address| {
                let probe = self.probe.clone();
                async move { (address, probe.is_reachable(address, timeout).await) }
            })
            .buffer_unordered(self.concurrency);

        while let Some((address, reachable)) = probes.next().await {
            results.insert(address, reachable);
        }
        results
    }
}
