//! Pass-through voting policy.
//!
//! Forwards the vote to its single child, rescaling the child's vote by a
//! configurable weight. Weights below 1.0 let an administrator steer
//! traffic away from a subtree without removing it.
//!
//! Properties consulted on the node:
//! - `read_weight` — applied to open-like operations (default 1.0)
//! - `write_weight` — applied to create/write (default 1.0)

use crate::error::{Error, Result};
use crate::object::Operation;
use crate::resource::node::ResourceNode;
use crate::resource::tree::ResourceTree;
use crate::resource::vote::{ScoredHierarchy, Vote, VotePolicy, VoteRequest};

#[derive(Debug, Default)]
pub struct PassthruVote;

impl PassthruVote {
    fn weight_for(node: &ResourceNode, operation: Operation) -> Result<f64> {
        let key = match operation {
            Operation::Create | Operation::Write => "write_weight",
            Operation::Open | Operation::Unlink => "read_weight",
        };
        match node.property(key) {
            Some(raw) => raw.parse::<f64>().map_err(|_| {
                Error::Configuration(format!(
                    "resource {}: property {} is not a number: {}",
                    node.name(),
                    key,
                    raw
                ))
            }),
            None => Ok(1.0),
        }
    }
}

impl VotePolicy for PassthruVote {
    fn vote(
        &self,
        tree: &ResourceTree,
        node: &ResourceNode,
        request: &VoteRequest<'_>,
    ) -> Result<ScoredHierarchy> {
        let child_name = match node.children() {
            [only] => only,
            children => {
                return Err(Error::Configuration(format!(
                    "passthru resource {} requires exactly one child, has {}",
                    node.name(),
                    children.len()
                )))
            }
        };

        let child = tree.lookup(child_name)?;
        let scored = tree.vote(child, request)?;
        let weight = Self::weight_for(node, request.operation)?;

        Ok(ScoredHierarchy::new(
            Vote::clamped(scored.vote.value() * weight),
            scored.hierarchy,
        ))
    }

    fn name(&self) -> &'static str {
        "passthru"
    }
}
