use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Liveness state of a probed host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostStatus {
    Up,
    Down,
}

impl HostStatus {
    /// Create a HostStatus from a string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(HostStatus::Up),
            "down" => Some(HostStatus::Down),
            _ => None,
        }
    }
    /// Get the string representation of the HostStatus.
    pub fn as_str(&self) -> &'static str {
        match self {
            HostStatus::Up => "up",
            HostStatus::Down => "down",
        }
    }
}

/// Port state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortState {
    Open,
    Closed,
    Filtered,
}

impl PortState {
    /// Create a PortState from a string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(PortState::Open),
            "closed" => Some(PortState::Closed),
            "filtered" => Some(PortState::Filtered),
            _ => None,
        }
    }
    /// Get the string representation of the PortState.
    pub fn as_str(&self) -> &'static str {
        match self {
            PortState::Open => "open",
            PortState::Closed => "closed",
            PortState::Filtered => "filtered",
        }
    }
}

/// Result of probing a single port on a host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortResult {
    pub port: u16,
    pub state: PortState,
    pub service: String,
}

impl PortResult {
    /// Create a new PortResult with the well-known service name for the port.
    pub fn new(port: u16, state: PortState) -> Self {
        Self {
            port,
            state,
            service: crate::db::service_name(port).to_string(),
        }
    }
}

/// Aggregated result of probing one host.
///
/// Serializes with the persisted report field names (`host`, `os`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostResult {
    #[serde(rename = "host")]
    pub address: IpAddr,
    pub status: HostStatus,
    pub hostname: String,
    #[serde(rename = "os")]
    pub os_guesses: Vec<String>,
    pub ports: Vec<PortResult>,
}

impl HostResult {
    /// Result for a host that did not answer: status down, no ports.
    pub fn down(address: IpAddr) -> Self {
        Self {
            address,
            status: HostStatus::Down,
            hostname: String::new(),
            os_guesses: Vec::new(),
            ports: Vec::new(),
        }
    }

    pub fn is_up(&self) -> bool {
        self.status == HostStatus::Up
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_result_serializes_with_report_field_names() {
        let host = HostResult {
            address: "192.168.1.5".parse().unwrap(),
            status: HostStatus::Up,
            hostname: "printer.local".to_string(),
            os_guesses: vec!["Linux 5.x".to_string()],
            ports: vec![PortResult {
                port: 22,
                state: PortState::Open,
                service: "ssh".to_string(),
            }],
        };
        let json = serde_json::to_value(&host).unwrap();
        assert_eq!(json["host"], "192.168.1.5");
        assert_eq!(json["status"], "up");
        assert_eq!(json["os"][0], "Linux 5.x");
        assert_eq!(json["ports"][0]["port"], 22);
        assert_eq!(json["ports"][0]["state"], "open");
        assert_eq!(json["ports"][0]["service"], "ssh");
    }

    #[test]
    fn down_host_has_no_ports() {
        let host = HostResult::down("10.0.0.9".parse().unwrap());
        assert_eq!(host.status, HostStatus::Down);
        assert!(host.ports.is_empty());
        assert!(host.hostname.is_empty());
    }

    #[test]
    fn state_string_round_trip() {
        for state in [PortState::Open, PortState::Closed, PortState::Filtered] {
            assert_eq!(PortState::from_str(state.as_str()), Some(state));
        }
        assert_eq!(HostStatus::from_str("UP"), Some(HostStatus::Up));
        assert_eq!(HostStatus::from_str("unknown"), None);
    }
}
