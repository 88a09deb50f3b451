//! Resource tree construction from administrator configuration.
//!
//! The tree is described declaratively (typically JSON) and built exactly
//! once at process start:
//!
//! ```json
//! {
//!   "resources": [
//!     { "name": "comp",   "host": "admin.example.org", "plugin": "composite" },
//!     { "name": "storeA", "host": "hostA.example.org", "plugin": "storage", "parent": "comp" },
//!     { "name": "storeB", "host": "hostB.example.org", "plugin": "storage", "parent": "comp" }
//!   ]
//! }
//! ```
//!
//! Child registration order is the order resources appear in the file; it
//! is the tie-break preference order for composite votes.

use crate::error::{Error, Result};
use crate::resource::policy::{CompositeVote, PassthruVote, StorageVote};
use crate::resource::vote::VotePolicy;
use crate::resource::{ResourceNode, ResourceTree};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::info;

/// Resource variant selector.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PluginKind {
    Storage,
    Composite,
    Passthru,
}

impl PluginKind {
    fn policy(self) -> Box<dyn VotePolicy> {
        match self {
            PluginKind::Storage => Box::new(StorageVote),
            PluginKind::Composite => Box::new(CompositeVote),
            PluginKind::Passthru => Box::new(PassthruVote),
        }
    }
}

/// One resource definition.
#[derive(Clone, Debug, Deserialize)]
pub struct ResourceConfig {
    pub name: String,
    pub host: String,
    pub plugin: PluginKind,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

/// The administrator-defined topology.
#[derive(Clone, Debug, Deserialize)]
pub struct TreeConfig {
    pub resources: Vec<ResourceConfig>,
}

impl TreeConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| Error::Configuration(e.to_string()))
    }

    /// Validate and build the immutable resource tree.
    ///
    /// Children are registered in file order. Invariant violations
    /// (duplicate names, empty host, unknown parents, cycles) are
    /// `Configuration` errors.
    pub fn build(&self) -> Result<ResourceTree> {
        let mut builder = ResourceTree::builder();
        for resc in &self.resources {
            builder = builder.add(ResourceNode::new(
                &resc.name,
                resc.parent.clone(),
                &resc.host,
                resc.properties.clone(),
                resc.plugin.policy(),
            ));
        }
        let tree = builder.build()?;
        info!(resources = tree.node_count(), "resource tree built");
        Ok(tree)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// comp (composite) -> storeA, storeB (storage leaves).
    pub(crate) fn demo_tree() -> ResourceTree {
        TreeConfig::from_json(
            r#"{
                "resources": [
                    { "name": "comp",   "host": "admin.example.org", "plugin": "composite" },
                    { "name": "storeA", "host": "hostA.example.org", "plugin": "storage", "parent": "comp" },
                    { "name": "storeB", "host": "hostB.example.org", "plugin": "storage", "parent": "comp" }
                ]
            }"#,
        )
        .unwrap()
        .build()
        .unwrap()
    }

    /// thru (passthru, write_weight 0.5) -> storeC; plus a childless passthru.
    pub(crate) fn weighted_tree() -> ResourceTree {
        TreeConfig::from_json(
            r#"{
                "resources": [
                    { "name": "thru", "host": "admin.example.org", "plugin": "passthru",
                      "properties": { "write_weight": "0.5" } },
                    { "name": "storeC", "host": "hostC.example.org", "plugin": "storage", "parent": "thru" },
                    { "name": "bare-thru", "host": "admin.example.org", "plugin": "passthru" }
                ]
            }"#,
        )
        .unwrap()
        .build()
        .unwrap()
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let cfg = TreeConfig::from_json(
            r#"{ "resources": [
                { "name": "a", "host": "h", "plugin": "storage" },
                { "name": "a", "host": "h", "plugin": "storage" }
            ] }"#,
        )
        .unwrap();
        assert!(matches!(cfg.build(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let cfg = TreeConfig::from_json(
            r#"{ "resources": [
                { "name": "a", "host": "h", "plugin": "storage", "parent": "ghost" }
            ] }"#,
        )
        .unwrap();
        assert!(matches!(cfg.build(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_parent_cycle_rejected() {
        let cfg = TreeConfig::from_json(
            r#"{ "resources": [
                { "name": "a", "host": "h", "plugin": "passthru", "parent": "b" },
                { "name": "b", "host": "h", "plugin": "passthru", "parent": "a" }
            ] }"#,
        )
        .unwrap();
        assert!(matches!(cfg.build(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_demo_tree_children_in_file_order() {
        let tree = demo_tree();
        let comp = tree.lookup("comp").unwrap();
        assert_eq!(comp.children(), ["storeA".to_owned(), "storeB".to_owned()]);
    }
}
