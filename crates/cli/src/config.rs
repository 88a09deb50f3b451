//! Grid description file for the CLI.
//!
//! One JSON document bundles the resource tree, the host/zone tables, and a
//! seed catalog, so routing decisions can be exercised offline:
//!
//! ```json
//! {
//!   "local_host": "hostA",
//!   "tree": { "resources": [ ... ] },
//!   "registry": { "local_zone": "tempZone", "hosts": [ ... ] },
//!   "default_resource": "soloA",
//!   "objects": [ { "logical_path": "/tempZone/home/f", "replicas": ["soloA"] } ],
//!   "pinned_collections": [ { "collection": "/tempZone/special", "hierarchy": "pinnedResc" } ]
//! }
//! ```

use anyhow::Context;
use connect::RegistryConfig;
use corelib::hierarchy::HierarchyPath;
use corelib::object::Replica;
use corelib::TreeConfig;
use routing::MemoryCatalog;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct ObjectSeed {
    pub logical_path: String,
    pub replicas: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PinnedSeed {
    pub collection: String,
    pub hierarchy: String,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    #[serde(default)]
    pub local_host: Option<String>,
    pub tree: TreeConfig,
    pub registry: RegistryConfig,
    pub default_resource: String,
    #[serde(default)]
    pub objects: Vec<ObjectSeed>,
    #[serde(default)]
    pub pinned_collections: Vec<PinnedSeed>,
}

impl GridConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading grid config {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing grid config {}", path.display()))
    }

    /// Seed an in-memory catalog from the `objects` / `pinned_collections`
    /// sections.
    pub fn catalog(&self) -> anyhow::Result<MemoryCatalog> {
        let mut catalog = MemoryCatalog::new().with_default_resource(&self.default_resource);
        for object in &self.objects {
            let replicas = object
                .replicas
                .iter()
                .enumerate()
                .map(|(n, hier)| {
                    Ok(Replica::new(
                        HierarchyPath::parse(hier)?,
                        n as u32,
                        format!("/vault{}", object.logical_path),
                    ))
                })
                .collect::<corelib::Result<Vec<_>>>()
                .with_context(|| format!("replicas of {}", object.logical_path))?;
            catalog = catalog.with_object(&object.logical_path, replicas);
        }
        for pinned in &self.pinned_collections {
            catalog = catalog.with_pinned_collection(&pinned.collection, &pinned.hierarchy);
        }
        Ok(catalog)
    }
}
