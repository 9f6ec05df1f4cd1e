use std::net::{IpAddr, SocketAddr};
use std::process::Stdio;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::process::Command;

/// Ports tried when the system ping utility is unavailable.
const FALLBACK_PORTS: [u16; 4] = [80, 443, 22, 445];

/// One echo-style reachability probe.
///
/// Shells out to the system ping utility (flag syntax abstracted per OS);
/// when ping cannot be spawned at all, falls back to a TCP connect probe
/// against a short list of common ports. False on any error.
pub async fn ping_host(address: IpAddr, timeout: Duration) -> bool {
    match ping_once(address, timeout).await {
        Ok(reachable) => reachable,
        Err(e) => {
            tracing::debug!("ping of {} unavailable ({}), using TCP fallback", address, e);
            tcp_fallback(address, timeout).await
        }
    }
}

async fn ping_once(address: IpAddr, timeout: Duration) -> std::io::Result<bool> {
    let mut command = Command::new("ping");
    command
        .args(ping_args(timeout))
        .arg(address.to_string())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    // a grace period on top of ping's own timeout so a hung binary cannot stall the probe
    let status = tokio::time::timeout(timeout + Duration::from_secs(1), command.status())
        .await
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::TimedOut, "ping did not finish"))??;
    Ok(status.success())
}

/// One echo request with the given timeout, in the local OS's flag syntax.
fn ping_args(timeout: Duration) -> Vec<String> {
    let millis = timeout.as_millis().max(1).to_string();
    if cfg!(windows) {
        vec!["-n".into(), "1".into(), "-w".into(), millis]
    } else if cfg!(target_os = "macos") {
        vec!["-c".into(), "1".into(), "-W".into(), millis]
    } else {
        // Linux ping takes whole seconds
        let secs = timeout.as_secs().max(1).to_string();
        vec!["-c".into(), "1".into(), "-W".into(), secs]
    }
}

async fn tcp_fallback(address: IpAddr, timeout: Duration) -> bool {
    for port in FALLBACK_PORTS {
        let socket_addr = SocketAddr::new(address, port);
        match tokio::time::timeout(timeout, TcpStream::connect(socket_addr)).await {
            Ok(Ok(_)) => return true,
            // refusal still proves a host answered
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::ConnectionRefused => return true,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_args_request_a_single_echo() {
        let args = ping_args(Duration::from_millis(1000));
        assert!(args.contains(&"1".to_string()));
        assert_eq!(args.len(), 4);
    }

    #[tokio::test]
    async fn loopback_is_reachable() {
        assert!(ping_host("127.0.0.1".parse().unwrap(), Duration::from_millis(1000)).await);
    }

    #[tokio::test]
    async fn unroutable_address_is_not_reachable() {
        assert!(!ping_host("192.0.2.1".parse().unwrap(), Duration::from_millis(200)).await);
    }
}
