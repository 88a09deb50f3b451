//! Error types for host resolution and connections.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No host record matches the requested name.
    #[error("unknown host: {0}")]
    UnknownHost(String),
    /// No zone with the requested name.
    #[error("unknown zone: {0}")]
    UnknownZone(String),
    /// Local hostname lookup failed.
    #[error("local host identity unavailable")]
    HostIdentityUnavailable,
    /// Remote peer unreachable. Not retried at this layer.
    #[error("failed to connect to {host}: {source}")]
    ConnectFailed {
        host: String,
        #[source]
        source: std::io::Error,
    },
    /// Registry configuration could not be parsed or validated.
    #[error("registry configuration error: {0}")]
    Configuration(String),
}
