use ipnet::Ipv4Net;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use crate::error::ScanError;

/// A scan target: one address or a whole subnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSpec {
    SingleAddress(Ipv4Addr),
    Subnet(Ipv4Net),
}

impl TargetSpec {
    /// Parse user input as a bare IPv4 address or an IPv4 CIDR.
    ///
    /// CIDR input is canonicalized to its network address, so re-normalizing
    /// the rendered form yields the same value.
    pub fn normalize(input: &str) -> Result<Self, ScanError> {
        let s = input.trim();
        if let Ok(ip) = s.parse::<Ipv4Addr>() {
            return Ok(TargetSpec::SingleAddress(ip));
        }
        if let Ok(net) = s.parse::<Ipv4Net>() {
            return Ok(TargetSpec::Subnet(net.trunc()));
        }
        Err(ScanError::InvalidTarget(s.to_string()))
    }

    /// Candidate host addresses in ascending numeric order.
    ///
    /// For a subnet this is every usable host address (network and broadcast
    /// addresses excluded for prefixes shorter than /31).
    pub fn expand_hosts(&self) -> Vec<IpAddr> {
        match self {
            TargetSpec::SingleAddress(ip) => vec![IpAddr::V4(*ip)],
            TargetSpec::Subnet(net) => net.hosts().map(IpAddr::V4).collect(),
        }
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSpec::SingleAddress(ip) => write!(f, "{}", ip),
            TargetSpec::Subnet(net) => write!(f, "{}", net),
        }
    }
}

/// Containing /24 network of an address, rendered as CIDR.
pub fn derive_subnet(ip: Ipv4Addr) -> String {
    let net = Ipv4Net::new(ip, 24).expect("24 is a valid IPv4 prefix length");
    net.trunc().to_string()
}

/// CIDR of the local /24 subnet.
///
/// The outward-facing address is taken from the default interface when one
/// exists, otherwise discovered by connecting a UDP socket toward an
/// unroutable address and reading the bound local endpoint back (nothing is
/// transmitted). Falls back to the loopback-derived subnet when no route can
/// be determined; the fallback is an expected outcome, not an error.
pub fn resolve_local_subnet() -> String {
    derive_subnet(local_ipv4_address())
}

fn local_ipv4_address() -> Ipv4Addr {
    if let Some(ip) = crate::interface::default_interface_ipv4() {
        return ip;
    }
    if let Some(ip) = probe_outbound_ipv4() {
        return ip;
    }
    Ipv4Addr::LOCALHOST
}

fn probe_outbound_ipv4() -> Option<Ipv4Addr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).ok()?;
    socket.connect(("10.254.254.254", 1)).ok()?;
    match socket.local_addr().ok()? {
        std::net::SocketAddr::V4(local) if !local.ip().is_unspecified() => Some(*local.ip()),
        _ => None,
    }
}
