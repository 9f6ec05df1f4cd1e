use async_trait::async_trait;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};
use std::net::IpAddr;
use std::time::Duration;

use netharvest::endpoint::{HostResult, HostStatus, PortResult, PortState};
use netharvest::error::{Result, ScanError};
use netharvest::probe::{PortSpec, ProbeCapability, ProbeOptions};

/// Scripted probe capability for orchestration tests.
///
/// Hosts in `live` answer bulk discovery and detail probes with their
/// scripted result; hosts in `failing` answer discovery but error on the
/// detail probe; everything else is invisible.
#[derive(Default)]
pub struct FakeProber {
    live: BTreeMap<IpAddr, HostResult>,
    failing: BTreeSet<IpAddr>,
    reachable: BTreeSet<IpAddr>,
    max_random_latency: Option<Duration>,
    fixed_latency: Option<Duration>,
}

impl FakeProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: HostResult) -> Self {
        self.live.insert(host.address, host);
        self
    }

    pub fn with_failing(mut self, address: IpAddr) -> Self {
        self.failing.insert(address);
        self
    }

    pub fn with_reachable(mut self, address: IpAddr) -> Self {
        self.reachable.insert(address);
        self
    }

    /// Sleep a random duration up to `max` before answering a detail probe.
    pub fn with_random_latency(mut self, max: Duration) -> Self {
        self.max_random_latency = Some(max);
        self
    }

    /// Sleep exactly `latency` before answering a detail probe.
    pub fn with_fixed_latency(mut self, latency: Duration) -> Self {
        self.fixed_latency = Some(latency);
        self
    }
}

/// Scripted up-host with the given open ports.
pub fn up_host(address: &str, ports: &[(u16, &str)]) -> HostResult {
    HostResult {
        address: address.parse().unwrap(),
        status: HostStatus::Up,
        hostname: String::new(),
        os_guesses: Vec::new(),
        ports: ports
            .iter()
            .map(|(port, service)| PortResult {
                port: *port,
                state: PortState::Open,
                service: service.to_string(),
            })
            .collect(),
    }
}

#[async_trait]
impl ProbeCapability for FakeProber {
    async fn discover_hosts(
        &self,
        candidates: &[IpAddr],
        _options: &ProbeOptions,
    ) -> Result<Vec<IpAddr>> {
        Ok(candidates
            .iter()
            .copied()
            .filter(|a| self.live.contains_key(a) || self.failing.contains(a))
            .collect())
    }

    async fn probe_host(
        &self,
        address: IpAddr,
        _ports: &PortSpec,
        _options: &ProbeOptions,
    ) -> Result<HostResult> {
        if let Some(latency) = self.fixed_latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(max) = self.max_random_latency {
            let delay = {
                let mut rng = rand::thread_rng();
                rng.gen_range(Duration::ZERO..=max)
            };
            tokio::time::sleep(delay).await;
        }
        if self.failing.contains(&address) {
            return Err(ScanError::Probe(format!("scripted failure for {}", address)));
        }
        self.live
            .get(&address)
            .cloned()
            .ok_or_else(|| ScanError::Probe(format!("unscripted host {}", address)))
    }

    async fn is_reachable(&self, address: IpAddr, _timeout: Duration) -> bool {
        self.reachable.contains(&address)
    }
}
