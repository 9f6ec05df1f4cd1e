use anyhow::Result;
use hickory_resolver::TokioResolver;
use std::net::IpAddr;
use std::time::Duration;

/// Get a DNS resolver configured from the system.
pub fn get_resolver() -> Result<TokioResolver> {
    match TokioResolver::builder_tokio() {
        Ok(builder) => Ok(builder.build()),
        Err(e) => Err(anyhow::anyhow!("failed to create resolver: {}", e)),
    }
}

/// Perform a reverse DNS lookup for the given IP address with a timeout.
///
/// Returns the first PTR name without its trailing dot; None on any failure.
pub async fn reverse_lookup(ip: IpAddr, timeout: Duration) -> Option<String> {
    let resolver = get_resolver().ok()?;
    match tokio::time::timeout(timeout, async move { resolver.reverse_lookup(ip).await }).await {
        Ok(Ok(names)) => names
            .iter()
            .next()
            .map(|n| n.to_string().trim_end_matches('.').to_string()),
        _ => None,
    }
}
