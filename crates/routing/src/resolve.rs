//! Resolution of the resource hierarchy servicing a request.
//!
//! Given an operation kind and object descriptor, infer the true operation
//! mode, select a candidate root resource, special-case pinned collections,
//! and ask the resource tree to vote. The result is the hierarchy path the
//! request should be serviced against, or `None` when the resolver
//! intentionally declines to redirect.

use crate::catalog::CollectionStat;
use crate::error::{Error, Result};
use crate::session::SessionContext;
use corelib::hierarchy::HierarchyPath;
use corelib::object::{ObjectDescriptor, ObjectView, Operation};
use corelib::resource::VoteRequest;
use tracing::debug;

/// Resolve the hierarchy path for one request.
///
/// `Ok(None)` is a legitimate, non-error outcome: the resolver declined to
/// redirect (e.g. a pinned collection with an empty stored hierarchy).
/// Callers must distinguish it from failure.
pub fn resolve_resource_hierarchy(
    operation: Operation,
    descriptor: &ObjectDescriptor,
    session: &SessionContext,
) -> Result<Option<HierarchyPath>> {
    let path = descriptor.logical_path.as_str();

    // Build the replica view up front. Failure is held, not surfaced: it is
    // only fatal if the branch we end up in needs the view.
    let view_result = session
        .catalog()
        .replicas(path)
        .map(|replicas| ObjectView::new(path, replicas));

    // Operation-mode inference. A create with no destination hint, against
    // an object that may already exist elsewhere, is idempotent with open.
    // With a hint present, a hint matching an existing replica's root means
    // the object already lives there: a re-open, not a new placement.
    let mut oper = operation;
    if operation.is_create() {
        if let Ok(view) = &view_result {
            match descriptor.hints.destination() {
                None => {
                    oper = Operation::Open;
                }
                Some(dest) => {
                    if view.replicas().iter().any(|r| r.hierarchy.root() == dest) {
                        oper = Operation::Open;
                    }
                }
            }
            if oper != operation {
                debug!(path, "create rewritten to open");
            }
        }
    }

    let (candidate_root, view) = if !oper.is_create() {
        // Open-like: the destination is whatever existing placement is
        // referenced, so the replica view must have loaded.
        let view = view_result.map_err(|e| Error::from(e).context("build replica view", path))?;
        let first = view
            .replicas()
            .first()
            .ok_or_else(|| Error::NoReplicas(path.to_owned()))?;
        (first.hierarchy.root().to_owned(), view)
    } else {
        // Genuine create: consult the parent collection first.
        let collection = descriptor.collection_path();
        let stat = session
            .catalog()
            .stat_collection(collection)
            .map_err(|e| Error::from(e).context("stat collection", path))?;

        if let CollectionStat::Pinned { hierarchy } = stat {
            // Pinned collection: everything under it lives on one fixed
            // hierarchy. Adopt it verbatim and skip voting entirely; it is
            // not re-validated against the live tree, that is deferred to
            // the I/O layer.
            debug!(path, hierarchy = hierarchy.as_str(), "pinned collection, skipping redirect vote");
            if hierarchy.is_empty() {
                return Ok(None);
            }
            let hier = HierarchyPath::parse(&hierarchy).map_err(|_| {
                Error::Core(corelib::Error::Configuration(format!(
                    "pinned hierarchy for [{}] is malformed: {}",
                    collection, hierarchy
                )))
            })?;
            return Ok(Some(hier));
        }

        let root_name = match descriptor.hints.destination() {
            Some(name) => name.to_owned(),
            None => session
                .catalog()
                .default_create_resource(descriptor)
                .map_err(|e| Error::from(e).context("assign default resource", path))?,
        };

        // A placement root must be a tree root. A parented resource here is
        // an administrator configuration error, never a retryable one.
        let node = session.tree().lookup(&root_name)?;
        if session.tree().parent_of(node).is_ok() {
            return Err(Error::Core(corelib::Error::Configuration(format!(
                "create destination {} is not a tree root",
                root_name
            ))));
        }

        let view = view_result.unwrap_or_else(|_| ObjectView::new(path, Vec::new()));
        (root_name, view)
    };

    // Voting pass. The candidate root's policy returns the full hierarchy
    // its vote applies to; zero means no viable path.
    let candidate = session.tree().lookup(&candidate_root)?;
    let request = VoteRequest {
        operation: oper,
        object: &view,
        client_host: session.local_host(),
    };
    let scored = match session.tree().vote(candidate, &request) {
        Ok(scored) => scored,
        Err(err) => {
            return Err(Error::VotingFailed {
                host: session.local_host().to_owned(),
                hierarchy: candidate_root,
                source: Some(Box::new(Error::Core(err))),
            })
        }
    };
    if scored.vote.is_zero() {
        return Err(Error::VotingFailed {
            host: session.local_host().to_owned(),
            hierarchy: scored.hierarchy.to_string(),
            source: None,
        });
    }

    debug!(path, %oper, hierarchy = %scored.hierarchy, vote = scored.vote.value(), "resolved");
    Ok(Some(scored.hierarchy))
}
