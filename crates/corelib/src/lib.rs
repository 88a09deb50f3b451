//! Core library for the federated storage grid routing core.
//!
//! This crate provides the fundamental abstractions for resource routing:
//! - Hierarchy path value type (root-to-leaf resource naming)
//! - Resource tree topology and the plugin vote protocol
//! - Per-request replica / object views
//! - Tree construction from administrator configuration

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod object;
pub mod resource;

pub use config::TreeConfig;
pub use error::{Error, Result};
pub use hierarchy::HierarchyPath;
pub use object::{HintKey, Hints, ObjectDescriptor, ObjectView, Operation, Replica};
pub use resource::{ResourceNode, ResourceTree, ScoredHierarchy, Vote, VoteRequest};
