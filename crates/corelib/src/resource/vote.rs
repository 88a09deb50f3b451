//! Vote protocol types and the policy trait.

use crate::error::{Error, Result};
use crate::hierarchy::HierarchyPath;
use crate::object::{ObjectView, Operation};
use crate::resource::node::ResourceNode;
use crate::resource::tree::ResourceTree;
use std::fmt;

/// A resource's self-reported suitability for servicing an operation.
///
/// Range [0.0, 1.0]. Exactly 0.0 means "cannot service"; any positive value
/// expresses relative preference among capable resources.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug)]
pub struct Vote(f64);

impl Vote {
    /// The "cannot service" vote.
    pub const ZERO: Vote = Vote(0.0);
    /// Full preference.
    pub const FULL: Vote = Vote(1.0);

    /// Construct a vote, rejecting values outside [0.0, 1.0].
    pub fn new(value: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&value) || value.is_nan() {
            return Err(Error::InvalidVote(value));
        }
        Ok(Vote(value))
    }

    /// Construct a vote, clamping out-of-range values into [0.0, 1.0].
    ///
    /// Used when scaling an existing vote by a weight.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Vote::ZERO;
        }
        Vote(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// True if this vote signals "no viable path".
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// A vote together with the full root-to-leaf hierarchy it applies to.
#[derive(Clone, Debug)]
pub struct ScoredHierarchy {
    pub vote: Vote,
    pub hierarchy: HierarchyPath,
}

impl ScoredHierarchy {
    pub fn new(vote: Vote, hierarchy: HierarchyPath) -> Self {
        Self { vote, hierarchy }
    }
}

/// Inputs to a vote call: the operation mode, the object's replica view,
/// and the name of the host originating the request.
#[derive(Clone, Copy, Debug)]
pub struct VoteRequest<'a> {
    pub operation: Operation,
    pub object: &'a ObjectView,
    pub client_host: &'a str,
}

/// Polymorphic voting capability implemented by each resource variant.
///
/// The tree prescribes only the signature and the aggregation contract;
/// each variant decides its own policy. Implementations must return the
/// full root-to-leaf hierarchy their vote applies to, and a vote of
/// exactly 0.0 to signal "no viable path".
pub trait VotePolicy: Send + Sync {
    fn vote(
        &self,
        tree: &ResourceTree,
        node: &ResourceNode,
        request: &VoteRequest<'_>,
    ) -> Result<ScoredHierarchy>;

    /// Policy name for logging.
    fn name(&self) -> &'static str;
}
