//! Catalog collaborator interface.
//!
//! The catalog/metadata service is external to the routing core. We consume
//! it through a deliberately narrow surface: replica snapshots, collection
//! stat (for pinned hierarchies), and default-destination assignment for
//! new objects.

use corelib::object::{ObjectDescriptor, Replica};
use std::collections::HashMap;

/// Catalog query failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    /// The logical path names no known data object.
    #[error("no such object: {0}")]
    ObjectNotFound(String),
    /// The metadata service could not be reached or answered garbage.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// What the catalog knows about a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollectionStat {
    /// Normal collection; placement follows the voting rules.
    Ordinary,
    /// Pinned (special) collection: everything under it is constrained to
    /// this stored hierarchy, recorded as the raw wire string. May be
    /// empty, which the resolver treats as "no hierarchy".
    Pinned { hierarchy: String },
}

/// Narrow view of the external catalog service.
pub trait Catalog: Send + Sync {
    /// Fresh replica snapshot for a data object. Never cached.
    fn replicas(&self, logical_path: &str) -> Result<Vec<Replica>, CatalogError>;

    /// Stat a collection, reporting a pinned hierarchy if one exists.
    fn stat_collection(&self, collection_path: &str) -> Result<CollectionStat, CatalogError>;

    /// Catalog-assigned default destination resource for a new object.
    fn default_create_resource(
        &self,
        descriptor: &ObjectDescriptor,
    ) -> Result<String, CatalogError>;
}

/// In-memory catalog for tests and the CLI.
#[derive(Default)]
pub struct MemoryCatalog {
    objects: HashMap<String, Vec<Replica>>,
    pinned: HashMap<String, String>,
    default_resource: Option<String>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_resource(mut self, name: impl Into<String>) -> Self {
        self.default_resource = Some(name.into());
        self
    }

    pub fn with_object(mut self, logical_path: impl Into<String>, replicas: Vec<Replica>) -> Self {
        self.objects.insert(logical_path.into(), replicas);
        self
    }

    pub fn with_pinned_collection(
        mut self,
        collection_path: impl Into<String>,
        hierarchy: impl Into<String>,
    ) -> Self {
        self.pinned.insert(collection_path.into(), hierarchy.into());
        self
    }
}

impl Catalog for MemoryCatalog {
    fn replicas(&self, logical_path: &str) -> Result<Vec<Replica>, CatalogError> {
        self.objects
            .get(logical_path)
            .cloned()
            .ok_or_else(|| CatalogError::ObjectNotFound(logical_path.to_owned()))
    }

    fn stat_collection(&self, collection_path: &str) -> Result<CollectionStat, CatalogError> {
        match self.pinned.get(collection_path) {
            Some(hierarchy) => Ok(CollectionStat::Pinned {
                hierarchy: hierarchy.clone(),
            }),
            None => Ok(CollectionStat::Ordinary),
        }
    }

    fn default_create_resource(
        &self,
        _descriptor: &ObjectDescriptor,
    ) -> Result<String, CatalogError> {
        self.default_resource
            .clone()
            .ok_or_else(|| CatalogError::Unavailable("no default resource assigned".to_owned()))
    }
}
