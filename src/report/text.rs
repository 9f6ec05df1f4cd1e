//! Plain-text rendering of a scan report.
//!
//! The layout is fixed: downstream tooling parses these files line by line,
//! so every label, indent and the "No open ports detected." literal must
//! stay byte-stable.

use crate::report::ScanReport;

/// Render the whole report, trailing blank line after every host included.
pub fn render(report: &ScanReport, scan_time: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Network Scan Results ({})\n", scan_time));
    out.push_str(&format!("Network Range: {}\n\n", report.range));

    for host in &report.hosts {
        out.push_str(&format!("Host: {}\n", host.address));
        out.push_str(&format!("  Status: {}\n", host.status.as_str()));
        out.push_str(&format!("  Hostname: {}\n", host.hostname));
        out.push_str(&format!("  OS: {}\n", host.os_guesses.join(", ")));

        if host.ports.is_empty() {
            out.push_str("  No open ports detected.\n");
        } else {
            out.push_str("  Ports:\n");
            for port in &host.ports {
                out.push_str(&format!("    - Port: {}\n", port.port));
                out.push_str(&format!("      State: {}\n", port.state.as_str()));
                out.push_str(&format!("      Service: {}\n", port.service));
            }
        }

        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{HostResult, HostStatus, PortResult, PortState};

    fn report_with(hosts: Vec<HostResult>) -> ScanReport {
        let mut report = ScanReport::new("192.168.1.0/24".to_string());
        report.hosts = hosts;
        report
    }

    #[test]
    fn renders_header_and_range() {
        let rendered = render(&report_with(Vec::new()), "2026-08-07_12-00-00");
        assert!(rendered.starts_with("Network Scan Results (2026-08-07_12-00-00)\n"));
        assert!(rendered.contains("Network Range: 192.168.1.0/24\n\n"));
    }

    #[test]
    fn empty_ports_renders_the_literal_line_and_no_ports_block() {
        let host = HostResult {
            address: "192.168.1.20".parse().unwrap(),
            status: HostStatus::Up,
            hostname: String::new(),
            os_guesses: Vec::new(),
            ports: Vec::new(),
        };
        let rendered = render(&report_with(vec![host]), "t");
        assert!(rendered.contains("  No open ports detected.\n"));
        assert!(!rendered.contains("  Ports:"));
    }

    #[test]
    fn renders_host_with_ports_exactly() {
        let host = HostResult {
            address: "192.168.1.5".parse().unwrap(),
            status: HostStatus::Up,
            hostname: "gateway.lan".to_string(),
            os_guesses: vec!["Linux 5.x".to_string(), "Linux 6.x".to_string()],
            ports: vec![PortResult {
                port: 22,
                state: PortState::Open,
                service: "ssh".to_string(),
            }],
        };
        let rendered = render(&report_with(vec![host]), "2026-08-07 12:00:00");
        let expected = "Network Scan Results (2026-08-07 12:00:00)\n\
                        Network Range: 192.168.1.0/24\n\
                        \n\
                        Host: 192.168.1.5\n\
                        \x20 Status: up\n\
                        \x20 Hostname: gateway.lan\n\
                        \x20 OS: Linux 5.x, Linux 6.x\n\
                        \x20 Ports:\n\
                        \x20   - Port: 22\n\
                        \x20     State: open\n\
                        \x20     Service: ssh\n\
                        \n";
        assert_eq!(rendered, expected);
    }
}
