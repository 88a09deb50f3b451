//! Error types for resolution and redirection.
//!
//! Propagation policy: every internal failure is wrapped with the enclosing
//! operation's context (object path, stage name) and passed upward
//! unchanged. No retries anywhere in this layer; retry policy, if any,
//! belongs to the transport below the host registry.

use crate::catalog::CatalogError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A failure wrapped with the stage and object path it occurred in.
    #[error("{stage} failed for [{path}]: {source}")]
    Context {
        stage: &'static str,
        path: String,
        #[source]
        source: Box<Error>,
    },
    /// All candidate resources returned vote 0.0 or errored.
    #[error("voting failed: host [{host}], hierarchy [{hierarchy}]")]
    VotingFailed {
        host: String,
        hierarchy: String,
        #[source]
        source: Option<Box<Error>>,
    },
    /// Object exists in no resource (nothing to open).
    #[error("no replicas found for [{0}]")]
    NoReplicas(String),
    /// External metadata query failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Core(#[from] corelib::Error),
    #[error(transparent)]
    Connect(#[from] connect::Error),
}

impl Error {
    /// Wrap with the enclosing operation's context.
    pub fn context(self, stage: &'static str, path: &str) -> Self {
        Error::Context {
            stage,
            path: path.to_owned(),
            source: Box::new(self),
        }
    }
}
