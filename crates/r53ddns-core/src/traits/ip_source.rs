// # IP Source Trait
//
// Defines the interface for discovering the caller's public IPv4 address.
//
// ## Implementations
//
// - HTTP IP-echo endpoint: `r53ddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use r53ddns_core::IpSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* IpSource implementation */;
//
//     let current_ip = source.current().await?;
//     println!("public address: {current_ip}");
//
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Trait for public IP source implementations
///
/// # Behavior
///
/// - Every call performs a fresh lookup. Nothing is cached between calls.
/// - A single attempt is made per call. Failures are returned, not retried.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the current public IPv4 address
    ///
    /// # Returns
    ///
    /// - `Ok(Ipv4Addr)`: The current public address
    /// - `Err(Error)`: `Network`, `UnexpectedStatus`, `Io` or `InvalidAddress`
    async fn current(&self) -> Result<Ipv4Addr, crate::Error>;

    /// Get the source name (for logging/debugging)
    fn source_name(&self) -> &'static str;
}
