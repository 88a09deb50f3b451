//! Per-session request context.
//!
//! One session = one single-threaded execution context. The resource tree
//! and host registry are shared read-only across sessions; the catalog
//! handle and connection set are session-scoped. There are no process-wide
//! singletons: everything the resolver and redirector need travels here.

use crate::catalog::Catalog;
use crate::error::Result;
use connect::{ConnectionSet, Connector, HostRegistry};
use corelib::resource::ResourceTree;
use std::sync::Arc;

pub struct SessionContext {
    tree: Arc<ResourceTree>,
    registry: Arc<HostRegistry>,
    catalog: Arc<dyn Catalog>,
    connections: ConnectionSet,
    /// Local server identity, resolved once at session start.
    local_host: String,
    /// Host the client request originated from.
    client_host: String,
}

impl SessionContext {
    /// Build a session context. Fails with `HostIdentityUnavailable` when
    /// no local identity can be determined.
    pub fn new(
        tree: Arc<ResourceTree>,
        registry: Arc<HostRegistry>,
        catalog: Arc<dyn Catalog>,
        connector: Arc<dyn Connector>,
        configured_local_host: Option<&str>,
        client_host: impl Into<String>,
    ) -> Result<Self> {
        let local_host = connect::local_host_name(configured_local_host)?;
        Ok(Self {
            tree,
            registry,
            catalog,
            connections: ConnectionSet::new(connector),
            local_host,
            client_host: client_host.into(),
        })
    }

    pub fn tree(&self) -> &ResourceTree {
        &self.tree
    }

    pub fn registry(&self) -> &HostRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    pub fn connections(&self) -> &ConnectionSet {
        &self.connections
    }

    pub fn local_host(&self) -> &str {
        &self.local_host
    }

    pub fn client_host(&self) -> &str {
        &self.client_host
    }

    /// Session teardown. Also runs from `ConnectionSet::drop`, so sockets
    /// are released however the session ends.
    pub fn close(&self) {
        self.connections.disconnect_all();
    }
}
