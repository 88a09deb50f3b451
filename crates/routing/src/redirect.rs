//! Local/remote dispatch decision.
//!
//! Consumes the resolved hierarchy, extracts the leaf resource's serving
//! host, compares it to the local identity, and either confirms local
//! service or establishes (or reuses) a connection to the remote peer.

use crate::error::Result;
use crate::resolve::resolve_resource_hierarchy;
use crate::session::SessionContext;
use connect::ConnectionHandle;
use corelib::hierarchy::HierarchyPath;
use corelib::object::{ObjectDescriptor, Operation};
use tracing::debug;

/// Where the request will be serviced.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Disposition {
    Local,
    Remote,
}

/// Outcome of a redirect decision.
#[derive(Debug)]
pub struct Redirect {
    /// Resolved hierarchy; `None` when the resolver declined to redirect.
    pub hierarchy: Option<HierarchyPath>,
    pub disposition: Disposition,
    /// Connection to the remote peer; present only for `Remote`.
    pub handle: Option<ConnectionHandle>,
}

impl Redirect {
    fn local(hierarchy: Option<HierarchyPath>) -> Self {
        Self {
            hierarchy,
            disposition: Disposition::Local,
            handle: None,
        }
    }
}

/// Decide where `operation` on `descriptor` should be serviced.
pub fn resource_redirect(
    operation: Operation,
    descriptor: &ObjectDescriptor,
    session: &SessionContext,
) -> Result<Redirect> {
    let path = descriptor.logical_path.as_str();

    let hierarchy = resolve_resource_hierarchy(operation, descriptor, session)
        .map_err(|e| e.context("resolve resource hierarchy", path))?;

    // An empty hierarchy is an intentional opt-out of redirection; the
    // caller proceeds without a host decision.
    let Some(hierarchy) = hierarchy else {
        debug!(path, "no hierarchy, proceeding without redirect");
        return Ok(Redirect::local(None));
    };

    // The leaf resource's serving host decides the dispatch.
    let leaf = session.tree().lookup(hierarchy.leaf())?;
    let record = session.registry().resolve_host(leaf.host())?;

    if record.is_local(session.local_host()) {
        debug!(path, hierarchy = %hierarchy, "servicing locally");
        return Ok(Redirect::local(Some(hierarchy)));
    }

    // Remote resource: server-to-server connection, reused when open.
    // A connect failure is fatal for this request; no retry at this layer.
    let handle = session.connections().connect(&record)?;
    debug!(path, hierarchy = %hierarchy, peer = handle.peer(), "redirecting to remote host");
    Ok(Redirect {
        hierarchy: Some(hierarchy),
        disposition: Disposition::Remote,
        handle: Some(handle),
    })
}
