//! Leaf-store voting policy.
//!
//! # Algorithm
//!
//! - **create**: always willing; full vote when the node is colocated with
//!   the requesting host, half otherwise.
//! - **open-like** (open/write/unlink): willing only if one of the object's
//!   replicas already lives on this node; colocation again raises the vote.
//!
//! Colocation uses the same substring containment the redirector applies
//! to host records, so both layers classify hosts identically.

use crate::error::Result;
use crate::resource::node::ResourceNode;
use crate::resource::tree::ResourceTree;
use crate::resource::vote::{ScoredHierarchy, Vote, VotePolicy, VoteRequest};

/// Votes cast by a leaf store, by scenario.
const VOTE_COLOCATED: f64 = 1.0;
const VOTE_CREATE_REMOTE: f64 = 0.5;
const VOTE_OPEN_REMOTE: f64 = 0.75;

/// Voting policy for a leaf storage resource.
#[derive(Debug, Default)]
pub struct StorageVote;

impl VotePolicy for StorageVote {
    fn vote(
        &self,
        tree: &ResourceTree,
        node: &ResourceNode,
        request: &VoteRequest<'_>,
    ) -> Result<ScoredHierarchy> {
        let hierarchy = tree.hierarchy_to(node.name())?;
        let colocated = node.host().contains(request.client_host);

        let vote = if request.operation.is_create() {
            if colocated {
                Vote::new(VOTE_COLOCATED)?
            } else {
                Vote::new(VOTE_CREATE_REMOTE)?
            }
        } else if request.object.has_replica_on(node.name()) {
            if colocated {
                Vote::new(VOTE_COLOCATED)?
            } else {
                Vote::new(VOTE_OPEN_REMOTE)?
            }
        } else {
            // No replica here: nothing to open.
            Vote::ZERO
        };

        Ok(ScoredHierarchy::new(vote, hierarchy))
    }

    fn name(&self) -> &'static str {
        "storage"
    }
}
