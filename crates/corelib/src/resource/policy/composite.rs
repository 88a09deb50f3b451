//! Composite (parent) voting policy.
//!
//! Delegates the vote to every child in registration order and keeps the
//! best answer.
//!
//! # Tie-break contract
//!
//! Highest vote wins. Equal votes are broken by preferring the child that
//! returned the first positive vote, i.e. stable preference order equals
//! tree child registration order. Every composite resource variant must
//! document and implement this identically so placement stays deterministic
//! across resource types.

use crate::error::Result;
use crate::resource::node::ResourceNode;
use crate::resource::tree::ResourceTree;
use crate::resource::vote::{ScoredHierarchy, Vote, VotePolicy, VoteRequest};
use tracing::warn;

/// Voting policy for a resource that aggregates children.
#[derive(Debug, Default)]
pub struct CompositeVote;

impl VotePolicy for CompositeVote {
    fn vote(
        &self,
        tree: &ResourceTree,
        node: &ResourceNode,
        request: &VoteRequest<'_>,
    ) -> Result<ScoredHierarchy> {
        let mut best: Option<ScoredHierarchy> = None;

        for child_name in node.children() {
            let child = tree.lookup(child_name)?;
            let scored = match tree.vote(child, request) {
                Ok(scored) => scored,
                Err(err) => {
                    // A failing child does not poison its siblings.
                    warn!(
                        parent = node.name(),
                        child = child_name.as_str(),
                        error = %err,
                        "child vote failed"
                    );
                    continue;
                }
            };

            // Strictly-greater keeps the earlier child on ties.
            match &best {
                Some(current) if scored.vote <= current.vote => {}
                _ => best = Some(scored),
            }
        }

        // No child could serve: report a zero vote against our own position.
        match best {
            Some(scored) => Ok(scored),
            None => Ok(ScoredHierarchy::new(
                Vote::ZERO,
                tree.hierarchy_to(node.name())?,
            )),
        }
    }

    fn name(&self) -> &'static str {
        "composite"
    }
}
