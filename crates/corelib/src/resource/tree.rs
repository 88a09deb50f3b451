//! Resource tree lookup and vote dispatch.

use crate::error::{Error, Result};
use crate::hierarchy::HierarchyPath;
use crate::resource::node::ResourceNode;
use crate::resource::vote::{ScoredHierarchy, VoteRequest};
use std::collections::HashMap;
use tracing::trace;

/// The static resource topology, resolved by name lookup.
///
/// Built once at startup (see [`crate::config::TreeConfig`]) and read-only
/// thereafter; safe to share across session contexts without locking.
pub struct ResourceTree {
    nodes: HashMap<String, ResourceNode>,
}

/// Programmatic tree construction with invariant checks.
///
/// Resources are added in registration order; that order is the tie-break
/// preference order for composite votes. [`crate::config::TreeConfig`]
/// drives this builder from declarative configuration.
#[derive(Default)]
pub struct ResourceTreeBuilder {
    nodes: Vec<ResourceNode>,
}

impl ResourceTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, node: ResourceNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Validate and build.
    ///
    /// Rejected: duplicate names, empty serving host, unknown parents,
    /// parent cycles.
    pub fn build(self) -> Result<ResourceTree> {
        let mut nodes: HashMap<String, ResourceNode> = HashMap::new();
        let order: Vec<(String, Option<String>)> = self
            .nodes
            .iter()
            .map(|n| (n.name().to_owned(), n.parent_name().map(str::to_owned)))
            .collect();

        for node in self.nodes {
            if node.host().is_empty() {
                return Err(Error::Configuration(format!(
                    "resource {} has no serving host",
                    node.name()
                )));
            }
            let name = node.name().to_owned();
            if nodes.insert(name.clone(), node).is_some() {
                return Err(Error::Configuration(format!(
                    "duplicate resource name: {}",
                    name
                )));
            }
        }

        // Register children in registration order.
        for (name, parent) in &order {
            if let Some(parent) = parent {
                if parent == name {
                    return Err(Error::Configuration(format!(
                        "resource {} is its own parent",
                        name
                    )));
                }
                match nodes.get_mut(parent) {
                    Some(p) => p.register_child(name),
                    None => {
                        return Err(Error::Configuration(format!(
                            "resource {} names unknown parent {}",
                            name, parent
                        )))
                    }
                }
            }
        }

        // Parent back-references must not form a cycle.
        for (name, parent) in &order {
            let mut steps = 0usize;
            let mut current = parent.as_deref();
            while let Some(ancestor) = current {
                steps += 1;
                if steps > nodes.len() {
                    return Err(Error::Configuration(format!(
                        "parent cycle involving resource {}",
                        name
                    )));
                }
                current = nodes.get(ancestor).and_then(|n| n.parent_name());
            }
        }

        Ok(ResourceTree { nodes })
    }
}

impl ResourceTree {
    pub fn builder() -> ResourceTreeBuilder {
        ResourceTreeBuilder::new()
    }

    /// Look up a resource by name.
    pub fn lookup(&self, name: &str) -> Result<&ResourceNode> {
        self.nodes
            .get(name)
            .ok_or_else(|| Error::ResourceNotFound(name.to_owned()))
    }

    /// Parent of `node`, or `NoParent` if it is a tree root.
    ///
    /// Used to enforce the placement-root invariant: a resource nominated
    /// as the placement root for a new object must itself be a tree root.
    pub fn parent_of(&self, node: &ResourceNode) -> Result<&ResourceNode> {
        match node.parent_name() {
            Some(parent) => self.lookup(parent),
            None => Err(Error::NoParent(node.name().to_owned())),
        }
    }

    /// Root-to-node hierarchy for a named resource, by walking parent links.
    pub fn hierarchy_to(&self, name: &str) -> Result<HierarchyPath> {
        let mut hier = HierarchyPath::from_root(self.lookup(name)?.name())?;
        let mut current = self.lookup(name)?;
        while let Some(parent) = current.parent_name() {
            hier = hier.prepend(parent)?;
            current = self.lookup(parent)?;
        }
        Ok(hier)
    }

    /// Ask `node` to vote on servicing `request`.
    ///
    /// Pure dispatch: the node's policy decides the vote and the hierarchy
    /// it applies to. A vote of exactly 0.0 means no viable path.
    pub fn vote(&self, node: &ResourceNode, request: &VoteRequest<'_>) -> Result<ScoredHierarchy> {
        let scored = node.policy().vote(self, node, request)?;
        trace!(
            resource = node.name(),
            policy = node.policy().name(),
            vote = scored.vote.value(),
            hierarchy = %scored.hierarchy,
            "vote"
        );
        Ok(scored)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate all nodes (arbitrary order).
    pub fn nodes(&self) -> impl Iterator<Item = &ResourceNode> {
        self.nodes.values()
    }
}

impl std::fmt::Debug for ResourceTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceTree")
            .field("nodes", &self.nodes.len())
            .finish()
    }
}
