pub mod icmp;
pub mod tcp;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{
    DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_HOSTS_CONCURRENCY, DEFAULT_PORTS_CONCURRENCY,
    DEFAULT_REACH_TIMEOUT_MS, DEFAULT_TASK_TIMEOUT_SECS, FULL_PORT_RANGE_END,
    FULL_PORT_RANGE_START,
};
use crate::endpoint::HostResult;
use crate::error::Result;

/// Ports to probe on a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortSpec {
    /// Inclusive range of ports
    Range { start: u16, end: u16 },
    /// Explicit port list
    List(Vec<u16>),
}

impl PortSpec {
    /// The design-default full range, 1-65535.
    pub fn full() -> Self {
        PortSpec::Range {
            start: FULL_PORT_RANGE_START,
            end: FULL_PORT_RANGE_END,
        }
    }

    /// The well-known ports from the service table.
    pub fn well_known() -> Self {
        PortSpec::List(crate::db::well_known_ports())
    }

    /// Iterate the ports in ascending order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = u16> + Send + '_> {
        match self {
            PortSpec::Range { start, end } => Box::new(*start..=*end),
            PortSpec::List(ports) => Box::new(ports.iter().copied()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PortSpec::Range { start, end } => (*end as usize).saturating_sub(*start as usize) + 1,
            PortSpec::List(ports) => ports.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            PortSpec::Range { .. } => false,
            PortSpec::List(ports) => ports.is_empty(),
        }
    }
}

/// Tuning knobs for probing. One probe contract for every scan; the
/// narrower variants are profiles of this struct, not separate code paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeOptions {
    /// Bound on hosts probed at the same time
    pub host_concurrency: usize,
    /// Bound on ports probed at the same time, per host
    pub port_concurrency: usize,
    /// Connect timeout per port probe
    pub connect_timeout: Duration,
    /// Timeout for a single reachability probe
    pub reach_timeout: Duration,
    /// Upper bound on one host detail probe as a whole
    pub task_timeout: Duration,
    /// Keep only open ports in results
    pub open_only: bool,
    /// Attempt reverse DNS for each probed host
    pub resolve_hostname: bool,
    /// Attempt best-effort OS detection
    pub os_detection: bool,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            host_concurrency: DEFAULT_HOSTS_CONCURRENCY,
            port_concurrency: DEFAULT_PORTS_CONCURRENCY,
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            reach_timeout: Duration::from_millis(DEFAULT_REACH_TIMEOUT_MS),
            task_timeout: Duration::from_secs(DEFAULT_TASK_TIMEOUT_SECS),
            open_only: true,
            resolve_hostname: true,
            os_detection: true,
        }
    }
}

/// The underlying port-scanning capability.
///
/// The engine depends only on this shape: bulk liveness discovery over a
/// candidate range, detailed probing of one host, and a single echo-style
/// reachability check.
#[async_trait]
pub trait ProbeCapability: Send + Sync {
    /// Which of the candidate addresses have a responding host.
    /// Implementations keep the returned list in ascending order.
    async fn discover_hosts(
        &self,
        candidates: &[IpAddr],
        options: &ProbeOptions,
    ) -> Result<Vec<IpAddr>>;

    /// Detailed port/service/OS probe of one host.
    async fn probe_host(
        &self,
        address: IpAddr,
        ports: &PortSpec,
        options: &ProbeOptions,
    ) -> Result<HostResult>;

    /// One echo-style round trip; false on any error or non-response.
    async fn is_reachable(&self, address: IpAddr, timeout: Duration) -> bool;
}

/// Probes one host through a capability, isolating per-host failures.
#[derive(Clone)]
pub struct HostProbe {
    capability: Arc<dyn ProbeCapability>,
}

impl HostProbe {
    pub fn new(capability: Arc<dyn ProbeCapability>) -> Self {
        Self { capability }
    }

    /// Probe one host. Never fails: a capability error collapses into a
    /// status=down result so a single host cannot abort a scan.
    pub async fn probe(
        &self,
        address: IpAddr,
        ports: &PortSpec,
        options: &ProbeOptions,
    ) -> HostResult {
        match self.capability.probe_host(address, ports, options).await {
            Ok(host) => host,
            Err(e) => {
                tracing::debug!("probe of {} failed, marking down: {}", address, e);
                HostResult::down(address)
            }
        }
    }

    /// Single reachability probe with the given timeout.
    pub async fn is_reachable(&self, address: IpAddr, timeout: Duration) -> bool {
        self.capability.is_reachable(address, timeout).await
    }
}
