//! Host records and zones.

use std::collections::BTreeSet;
use std::fmt;

/// A serving identity: the set of equivalent network names and addresses
/// under which one server is known, plus the port it listens on.
///
/// Owned by the [`crate::registry::HostRegistry`] and shared by reference;
/// records are immutable after startup. Connection state lives in the
/// per-session [`crate::session::ConnectionSet`], not here.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HostRecord {
    /// Ordered set of equivalent names/addresses (hostname, FQDN, IP, ...).
    names: BTreeSet<String>,
    port: u16,
}

impl HostRecord {
    pub fn new(names: impl IntoIterator<Item = String>, port: u16) -> Self {
        Self {
            names: names.into_iter().collect(),
            port,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// A stable name for logging and connection keying.
    pub fn canonical_name(&self) -> &str {
        // non-empty is validated at registry build time
        self.names.iter().next().map(String::as_str).unwrap_or("")
    }

    /// True if this record matches the local host identity.
    ///
    /// Deliberate legacy looseness: the comparison is substring containment
    /// of the local name in any recorded name, not exact equality, so a
    /// short hostname matches its own FQDN (`storageA` vs
    /// `storageA.example.org`). Two distinct hosts whose names are
    /// substrings of one another would be misclassified as local; that is
    /// a known quirk downstream deployments rely on, kept as-is.
    pub fn is_local(&self, local_host: &str) -> bool {
        !local_host.is_empty() && self.names.iter().any(|n| n.contains(local_host))
    }
}

impl fmt::Display for HostRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.canonical_name(), self.port)
    }
}

/// A named federation partition.
///
/// Zones scope catalog lookups; the routing decision itself only consults
/// host identity.
#[derive(Clone, Debug)]
pub struct Zone {
    pub name: String,
    pub primary: String,
    pub secondary: Option<String>,
}
