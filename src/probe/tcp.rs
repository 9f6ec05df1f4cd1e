use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;

use crate::endpoint::{HostResult, HostStatus, PortResult, PortState};
use crate::error::{Result, ScanError};
use crate::probe::{PortSpec, ProbeCapability, ProbeOptions};

/// Ports tried during bulk liveness discovery. An answer on any of them,
/// including a connection refusal, proves the host is up.
const DISCOVERY_PORTS: [u16; 8] = [22, 80, 135, 139, 443, 445, 3389, 8080];

/// Built-in probe capability over plain TCP connect.
///
/// Needs no raw sockets or privileges. OS guesses stay empty: connect-level
/// probing carries no fingerprint data, so that field is populated only by
/// richer capabilities.
pub struct ConnectProber;

impl ConnectProber {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConnectProber {
    fn default() -> Self {
        Self::new()
    }
}

/// Probe one port: open on connect, closed on refusal, filtered otherwise.
async fn connect_port(address: IpAddr, port: u16, timeout: Duration) -> PortState {
    let socket_addr = SocketAddr::new(address, port);
    match tokio::time::timeout(timeout, TcpStream::connect(socket_addr)).await {
        Ok(Ok(stream)) => {
            drop(stream);
            PortState::Open
        }
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::ConnectionRefused => PortState::Closed,
        _ => PortState::Filtered,
    }
}

/// Whether any discovery port answers at all (open or refused).
async fn host_answers(address: IpAddr, timeout: Duration) -> bool {
    for port in DISCOVERY_PORTS {
        match connect_port(address, port, timeout).await {
            PortState::Open | PortState::Closed => return true,
            PortState::Filtered => {}
        }
    }
    false
}

#[async_trait]
impl ProbeCapability for ConnectProber {
    async fn discover_hosts(
        &self,
        candidates: &[IpAddr],
        options: &ProbeOptions,
    ) -> Result<Vec<IpAddr>> {
        let timeout = options.connect_timeout;
        let concurrency = options.host_concurrency.max(1);
        let mut live: Vec<IpAddr> = stream::iter(candidates.to_vec())
            .map(|address| async move { (address, host_answers(address, timeout).await) })
            .buffer_unordered(concurrency)
            .filter_map(|(address, up)| async move { up.then_some(address) })
            .collect()
            .await;
        live.sort_unstable();
        Ok(live)
    }

    async fn probe_host(
        &self,
        address: IpAddr,
        ports: &PortSpec,
        options: &ProbeOptions,
    ) -> Result<HostResult> {
        let probe = probe_host_ports(address, ports, options);
        match tokio::time::timeout(options.task_timeout, probe).await {
            Ok(host) => Ok(host),
            Err(_) => Err(ScanError::Probe(format!(
                "detail probe of {} exceeded {:?}",
                address, options.task_timeout
            ))),
        }
    }

    async fn is_reachable(&self, address: IpAddr, timeout: Duration) -> bool {
        super::icmp::ping_host(address, timeout).await
    }
}

async fn probe_host_ports(address: IpAddr, ports: &PortSpec, options: &ProbeOptions) -> HostResult {
    let timeout = options.connect_timeout;
    let concurrency = options.port_concurrency.max(1);
    let mut results: Vec<PortResult> = stream::iter(ports.iter())
        .map(|port| async move {
            let state = connect_port(address, port, timeout).await;
            PortResult::new(port, state)
        })
        .buffer_unordered(concurrency)
        .collect()
        .await;
    results.sort_unstable_by_key(|p| p.port);
    if options.open_only {
        results.retain(|p| p.state == PortState::Open);
    }

    let hostname = if options.resolve_hostname {
        crate::dns::reverse_lookup(address, timeout).await.unwrap_or_default()
    } else {
        String::new()
    };

    HostResult {
        address,
        status: HostStatus::Up,
        hostname,
        os_guesses: Vec::new(),
        ports: results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unroutable_port_reports_filtered() {
        // RFC 5737 test network, nothing answers there
        let state = connect_port(
            "192.0.2.1".parse().unwrap(),
            80,
            Duration::from_millis(50),
        )
        .await;
        assert_eq!(state, PortState::Filtered);
    }

    #[tokio::test]
    async fn loopback_unused_port_reports_closed() {
        let state = connect_port(
            "127.0.0.1".parse().unwrap(),
            1, // tcpmux, essentially never bound
            Duration::from_millis(500),
        )
        .await;
        assert_eq!(state, PortState::Closed);
    }
}
