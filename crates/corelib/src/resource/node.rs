//! Resource node abstraction.
//!
//! Nodes are constructed once from administrator configuration at process
//! start and never mutated per-request. Parent/child relationships are
//! expressed as name-keyed back-references, never owning pointers, so the
//! tree stays acyclic by construction and lifetimes stay simple.

use crate::resource::vote::VotePolicy;
use std::collections::BTreeMap;
use std::fmt;

/// A named storage resource in the tree.
pub struct ResourceNode {
    name: String,
    parent: Option<String>,
    /// Child names in registration order. The order is load-bearing: it is
    /// the tie-break preference order for composite votes.
    children: Vec<String>,
    /// Name of the serving host, resolvable to a host record.
    host: String,
    properties: BTreeMap<String, String>,
    policy: Box<dyn VotePolicy>,
}

impl ResourceNode {
    pub fn new(
        name: impl Into<String>,
        parent: Option<String>,
        host: impl Into<String>,
        properties: BTreeMap<String, String>,
        policy: Box<dyn VotePolicy>,
    ) -> Self {
        Self {
            name: name.into(),
            parent,
            children: Vec::new(),
            host: host.into(),
            properties,
            policy,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_name(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn policy(&self) -> &dyn VotePolicy {
        self.policy.as_ref()
    }

    pub(crate) fn register_child(&mut self, name: &str) {
        self.children.push(name.to_owned());
    }
}

impl fmt::Debug for ResourceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceNode")
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("host", &self.host)
            .field("policy", &self.policy.name())
            .finish()
    }
}
