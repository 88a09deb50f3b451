//! Voting policies for the resource variants.
//!
//! Each storage backend variant implements its own voting policy:
//!
//! - **StorageVote**: leaf store; prefers serving requests colocated with
//!   the requesting host.
//! - **CompositeVote**: delegates to children and takes the max.
//! - **PassthruVote**: forwards to a single child, rescaling by weight.

pub mod composite;
pub mod passthru;
pub mod storage;

pub use crate::resource::vote::VotePolicy;
pub use composite::CompositeVote;
pub use passthru::PassthruVote;
pub use storage::StorageVote;
