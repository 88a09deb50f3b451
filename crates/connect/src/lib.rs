//! Host and zone registry plus server-to-server connections.
//!
//! This crate provides:
//! - Host records (sets of equivalent network names) and zones
//! - The process-wide host/zone registry, built once at startup
//! - Per-session connection sets with reuse and bulk teardown
//! - A pluggable connector (TCP by default, stubs in tests)

pub mod error;
pub mod host;
pub mod registry;
pub mod session;
pub mod transport;

pub use error::{Error, Result};
pub use host::{HostRecord, Zone};
pub use registry::{HostRegistry, RegistryConfig};
pub use session::{ConnectionHandle, ConnectionSet};
pub use transport::{Connection, Connector, TcpConnector};

/// Local host identity, resolved once at session start.
///
/// The server's own name comes from its configuration when present; the
/// `HOSTNAME` environment variable is the fallback. Failure to determine
/// an identity is [`Error::HostIdentityUnavailable`].
pub fn local_host_name(configured: Option<&str>) -> Result<String> {
    if let Some(name) = configured {
        if !name.is_empty() {
            return Ok(name.to_owned());
        }
    }
    match std::env::var("HOSTNAME") {
        Ok(name) if !name.is_empty() => Ok(name),
        _ => Err(Error::HostIdentityUnavailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_identity_wins() {
        assert_eq!(local_host_name(Some("storageA")).unwrap(), "storageA");
    }

    #[test]
    fn test_empty_configured_identity_falls_through() {
        // With no usable sources this must surface the identity error.
        std::env::remove_var("HOSTNAME");
        assert!(matches!(
            local_host_name(Some("")),
            Err(Error::HostIdentityUnavailable)
        ));
    }
}
