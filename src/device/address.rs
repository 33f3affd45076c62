//! Device network address resolution
//!
//! An explicitly supplied address is passed through untouched, with no
//! validation and no network access. Otherwise the device's mDNS name
//! `<name>.local` is looked up and the first IPv4 result is returned.

use tokio::net::lookup_host;
use tracing::debug;

use crate::common::{Error, Result};

/// Resolve the device address: the explicit value wins, DNS otherwise.
pub async fn resolve_address(explicit: Option<&str>, device_name: &str) -> Result<String> {
    if let Some(address) = explicit.filter(|a| !a.trim().is_empty()) {
        return Ok(address.to_string());
    }

    lookup_ipv4(&format!("{device_name}.local")).await
}

/// Name-service lookup filtered to IPv4.
///
/// A failed lookup is fatal and not retried. A lookup that succeeds but
/// yields no IPv4 entries is guarded explicitly - devices regularly
/// announce IPv6 first, and "no usable address" must not surface as an
/// index panic somewhere downstream.
async fn lookup_ipv4(host: &str) -> Result<String> {
    debug!(host, "resolving device address");

    // Port 0: lookup_host wants a socket address, only the IP matters here.
    let addresses = lookup_host((host, 0))
        .await
        .map_err(|source| Error::AddressLookupFailed {
            host: host.to_string(),
            source,
        })?;

    addresses
        .filter(|address| address.is_ipv4())
        .map(|address| address.ip().to_string())
        .next()
        .ok_or_else(|| Error::NoIpv4Address {
            host: host.to_string(),
        })
}
