//! End-to-end tests for resolution and redirection.
//!
//! # Test Strategy
//!
//! 1. **Operation-mode inference**: create/open rewrites per hint + replicas
//! 2. **Create placement**: placement-root invariant, default resource
//! 3. **Pinned collections**: short-circuit, empty-hierarchy pass-through
//! 4. **Redirect**: local/remote classification, connection reuse
//! 5. **Failure surfaces**: missing objects, zero votes

use connect::{Connection, Connector, HostRecord, HostRegistry, RegistryConfig};
use corelib::hierarchy::HierarchyPath;
use corelib::object::{HintKey, ObjectDescriptor, Operation, Replica};
use corelib::resource::{ResourceTree, ScoredHierarchy, VotePolicy, VoteRequest};
use corelib::TreeConfig;
use routing::{
    resolve_resource_hierarchy, resource_redirect, CatalogError, Disposition, Error,
    MemoryCatalog, SessionContext,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// Fixtures
// ============================================================================

/// Topology: one composite root (comp -> storeA, storeB) plus two
/// standalone storage roots, soloA on hostA and soloB on hostB.
fn test_tree() -> Arc<ResourceTree> {
    let config = TreeConfig::from_json(
        r#"{
            "resources": [
                { "name": "comp",   "host": "admin.example.org", "plugin": "composite" },
                { "name": "storeA", "host": "hostA.example.org", "plugin": "storage", "parent": "comp" },
                { "name": "storeB", "host": "hostB.example.org", "plugin": "storage", "parent": "comp" },
                { "name": "soloA",  "host": "hostA.example.org", "plugin": "storage" },
                { "name": "soloB",  "host": "hostB.example.org", "plugin": "storage" }
            ]
        }"#,
    )
    .unwrap()
    .build()
    .unwrap();
    Arc::new(config)
}

fn test_registry() -> Arc<HostRegistry> {
    let config = RegistryConfig::from_json(
        r#"{
            "local_zone": "tempZone",
            "hosts": [
                { "names": ["hostA", "hostA.example.org"] },
                { "names": ["hostB.example.org"] },
                { "names": ["admin.example.org"] }
            ],
            "zones": [ { "name": "tempZone", "primary": "hostA" } ]
        }"#,
    )
    .unwrap();
    Arc::new(HostRegistry::from_config(&config).unwrap())
}

struct CountingConnector {
    dials: AtomicUsize,
}

struct NoopConnection(String);

impl Connection for NoopConnection {
    fn peer(&self) -> &str {
        &self.0
    }
    fn close(&mut self) {}
}

impl Connector for CountingConnector {
    fn dial(&self, host: &HostRecord) -> connect::Result<Box<dyn Connection>> {
        self.dials.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(NoopConnection(host.canonical_name().to_owned())))
    }
}

fn session(catalog: MemoryCatalog) -> (SessionContext, Arc<CountingConnector>) {
    let connector = Arc::new(CountingConnector {
        dials: AtomicUsize::new(0),
    });
    let session = SessionContext::new(
        test_tree(),
        test_registry(),
        Arc::new(catalog),
        Arc::clone(&connector) as Arc<dyn Connector>,
        Some("hostA"),
        "client.example.org",
    )
    .unwrap();
    (session, connector)
}

fn replica(hier: &str) -> Replica {
    Replica::new(HierarchyPath::parse(hier).unwrap(), 0, "/vault/f")
}

// ============================================================================
// Operation-mode inference
// ============================================================================

#[test]
fn test_create_without_hint_on_existing_object_opens() {
    // Object already has a replica on soloA; default create destination is
    // soloB. If create were not rewritten to open, placement would land on
    // soloB; the rewrite makes the existing placement win.
    let catalog = MemoryCatalog::new()
        .with_default_resource("soloB")
        .with_object("/tempZone/home/f", vec![replica("soloA")]);
    let (session, _) = session(catalog);

    let desc = ObjectDescriptor::new("/tempZone/home/f");
    let hier = resolve_resource_hierarchy(Operation::Create, &desc, &session)
        .unwrap()
        .unwrap();
    assert_eq!(hier.to_string(), "soloA");
}

#[test]
fn test_create_with_hint_matching_replica_root_opens() {
    // Replica lives under the composite at comp;storeB. The hint names the
    // replica's ROOT, so this is a re-open: voting runs in open mode and
    // must follow the existing replica to storeB, not tie-break to storeA.
    let catalog = MemoryCatalog::new()
        .with_default_resource("soloA")
        .with_object("/tempZone/home/f", vec![replica("comp;storeB")]);
    let (session, _) = session(catalog);

    let desc = ObjectDescriptor::new("/tempZone/home/f").with_hint(HintKey::DestResc, "comp");
    let hier = resolve_resource_hierarchy(Operation::Create, &desc, &session)
        .unwrap()
        .unwrap();
    assert_eq!(hier.to_string(), "comp;storeB");
}

#[test]
fn test_create_with_unmatched_hint_stays_create() {
    // Existing replica on soloA, but the hint names soloB: a genuine new
    // placement on soloB.
    let catalog = MemoryCatalog::new()
        .with_default_resource("soloA")
        .with_object("/tempZone/home/f", vec![replica("soloA")]);
    let (session, _) = session(catalog);

    let desc = ObjectDescriptor::new("/tempZone/home/f").with_hint(HintKey::DestResc, "soloB");
    let hier = resolve_resource_hierarchy(Operation::Create, &desc, &session)
        .unwrap()
        .unwrap();
    assert_eq!(hier.to_string(), "soloB");
}

// ============================================================================
// Create placement
// ============================================================================

#[test]
fn test_create_new_object_uses_default_resource() {
    let catalog = MemoryCatalog::new().with_default_resource("soloB");
    let (session, _) = session(catalog);

    let desc = ObjectDescriptor::new("/tempZone/home/new.dat");
    let hier = resolve_resource_hierarchy(Operation::Create, &desc, &session)
        .unwrap()
        .unwrap();
    assert_eq!(hier.to_string(), "soloB");
}

#[test]
fn test_non_root_create_destination_is_configuration_error() {
    // storeA has parent comp; nominating it as a placement root must fail
    // hard, never silently place data mid-tree.
    let catalog = MemoryCatalog::new().with_default_resource("soloA");
    let (session, _) = session(catalog);

    let desc =
        ObjectDescriptor::new("/tempZone/home/new.dat").with_hint(HintKey::DestResc, "storeA");
    let err = resolve_resource_hierarchy(Operation::Create, &desc, &session).unwrap_err();
    assert!(matches!(
        err,
        Error::Core(corelib::Error::Configuration(_))
    ));
}

#[test]
fn test_create_composite_destination_votes_down_the_tree() {
    let catalog = MemoryCatalog::new().with_default_resource("comp");
    let (session, _) = session(catalog);

    // Ties between storeA and storeB break to the first-registered child.
    let desc = ObjectDescriptor::new("/tempZone/home/new.dat");
    let hier = resolve_resource_hierarchy(Operation::Create, &desc, &session)
        .unwrap()
        .unwrap();
    assert_eq!(hier.to_string(), "comp;storeA");
}

// ============================================================================
// Pinned collections
// ============================================================================

/// Policy that fails the test if any vote is cast.
struct PanicVote;

impl VotePolicy for PanicVote {
    fn vote(
        &self,
        _tree: &ResourceTree,
        _node: &corelib::resource::ResourceNode,
        _request: &VoteRequest<'_>,
    ) -> corelib::Result<ScoredHierarchy> {
        panic!("vote must not be called for pinned collections");
    }

    fn name(&self) -> &'static str {
        "panic"
    }
}

#[test]
fn test_pinned_collection_short_circuits_voting() {
    use corelib::resource::ResourceNode;

    // Every resource in this tree refuses to vote; resolution still
    // succeeds because the pinned hierarchy is adopted verbatim.
    let tree = ResourceTree::builder()
        .add(ResourceNode::new(
            "pinnedResc",
            None,
            "hostA.example.org",
            Default::default(),
            Box::new(PanicVote),
        ))
        .build()
        .unwrap();

    let catalog = MemoryCatalog::new()
        .with_default_resource("pinnedResc")
        .with_pinned_collection("/tempZone/special", "pinnedResc");
    let connector = Arc::new(CountingConnector {
        dials: AtomicUsize::new(0),
    });
    let session = SessionContext::new(
        Arc::new(tree),
        test_registry(),
        Arc::new(catalog),
        connector as Arc<dyn Connector>,
        Some("hostA"),
        "client.example.org",
    )
    .unwrap();

    let desc = ObjectDescriptor::new("/tempZone/special/obj.dat");
    let hier = resolve_resource_hierarchy(Operation::Create, &desc, &session)
        .unwrap()
        .unwrap();
    assert_eq!(hier.to_string(), "pinnedResc");
}

#[test]
fn test_empty_pinned_hierarchy_passes_through_redirect() {
    // An empty stored hierarchy is a legitimate opt-out: the redirector
    // returns success with no host decision and no connect attempt.
    let catalog = MemoryCatalog::new()
        .with_default_resource("soloA")
        .with_pinned_collection("/tempZone/special", "");
    let (session, connector) = session(catalog);

    let desc = ObjectDescriptor::new("/tempZone/special/obj.dat");
    let redirect = resource_redirect(Operation::Create, &desc, &session).unwrap();
    assert!(redirect.hierarchy.is_none());
    assert_eq!(redirect.disposition, Disposition::Local);
    assert!(redirect.handle.is_none());
    assert_eq!(connector.dials.load(Ordering::SeqCst), 0);
}

// ============================================================================
// Redirect: local/remote classification
// ============================================================================

#[test]
fn test_local_replica_serviced_locally() {
    // Local identity "hostA" matches "hostA.example.org" by substring.
    let catalog = MemoryCatalog::new()
        .with_default_resource("soloA")
        .with_object("/tempZone/home/f", vec![replica("soloA")]);
    let (session, connector) = session(catalog);

    let desc = ObjectDescriptor::new("/tempZone/home/f");
    let redirect = resource_redirect(Operation::Open, &desc, &session).unwrap();
    assert_eq!(redirect.disposition, Disposition::Local);
    assert!(redirect.handle.is_none());
    assert_eq!(redirect.hierarchy.unwrap().to_string(), "soloA");
    assert_eq!(connector.dials.load(Ordering::SeqCst), 0);
}

#[test]
fn test_remote_replica_connects_and_reuses() {
    let catalog = MemoryCatalog::new()
        .with_default_resource("soloA")
        .with_object("/tempZone/home/f", vec![replica("soloB")]);
    let (session, connector) = session(catalog);

    let desc = ObjectDescriptor::new("/tempZone/home/f");
    let redirect = resource_redirect(Operation::Open, &desc, &session).unwrap();
    assert_eq!(redirect.disposition, Disposition::Remote);
    assert_eq!(redirect.handle.unwrap().peer(), "hostB.example.org");
    assert_eq!(connector.dials.load(Ordering::SeqCst), 1);

    // Second request to the same peer reuses the open connection.
    let again = resource_redirect(Operation::Open, &desc, &session).unwrap();
    assert_eq!(again.disposition, Disposition::Remote);
    assert_eq!(connector.dials.load(Ordering::SeqCst), 1);

    session.close();
    assert_eq!(session.connections().open_count(), 0);
}

// ============================================================================
// Failure surfaces
// ============================================================================

#[test]
fn test_open_missing_object_surfaces_catalog_error() {
    let catalog = MemoryCatalog::new().with_default_resource("soloA");
    let (session, _) = session(catalog);

    let desc = ObjectDescriptor::new("/tempZone/home/ghost");
    let err = resolve_resource_hierarchy(Operation::Open, &desc, &session).unwrap_err();
    // Wrapped with the stage context, catalog error underneath.
    let Error::Context { stage, source, .. } = err else {
        panic!("expected context wrapper, got {err:?}");
    };
    assert_eq!(stage, "build replica view");
    assert!(matches!(
        *source,
        Error::Catalog(CatalogError::ObjectNotFound(_))
    ));
}

#[test]
fn test_zero_vote_is_voting_failure() {
    // Replica recorded against the bare composite: neither child holds a
    // copy, so every vote is 0.0.
    let catalog = MemoryCatalog::new()
        .with_default_resource("soloA")
        .with_object("/tempZone/home/f", vec![replica("comp")]);
    let (session, _) = session(catalog);

    let desc = ObjectDescriptor::new("/tempZone/home/f");
    let err = resolve_resource_hierarchy(Operation::Open, &desc, &session).unwrap_err();
    assert!(matches!(err, Error::VotingFailed { .. }));
}

#[test]
fn test_redirect_wraps_resolver_failure_with_object_path() {
    let catalog = MemoryCatalog::new().with_default_resource("soloA");
    let (session, _) = session(catalog);

    let desc = ObjectDescriptor::new("/tempZone/home/ghost");
    let err = resource_redirect(Operation::Open, &desc, &session).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("/tempZone/home/ghost"));
    assert!(message.contains("resolve resource hierarchy"));
}
