//! Error types for the core library.

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Resource name absent from the tree.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),
    /// Resource has no parent (it is a tree root).
    #[error("resource has no parent: {0}")]
    NoParent(String),
    /// Empty string where a hierarchy path was required.
    #[error("empty hierarchy")]
    EmptyHierarchy,
    /// Hierarchy string with empty segments, or a resource name
    /// containing the path delimiter.
    #[error("malformed hierarchy: {0}")]
    MalformedHierarchy(String),
    /// Administrator configuration violates a tree invariant.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Vote outside the [0.0, 1.0] range.
    #[error("invalid vote: {0}")]
    InvalidVote(f64),
}
