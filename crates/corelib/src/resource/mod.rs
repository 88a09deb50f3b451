//! Resource tree and the plugin vote protocol.
//!
//! The resource tree is the static, administrator-defined topology of
//! storage resources. It is built once at process start and is read-only
//! for the life of the process, so it may be shared across sessions
//! without locking.

pub mod node;
pub mod policy;
pub mod tree;
pub mod vote;

pub use node::ResourceNode;
pub use policy::{CompositeVote, PassthruVote, StorageVote, VotePolicy};
pub use tree::{ResourceTree, ResourceTreeBuilder};
pub use vote::{ScoredHierarchy, Vote, VoteRequest};
