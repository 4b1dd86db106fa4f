//! Error types for tree mutations.

use labeled_tree_path::ValidationError;
use thiserror::Error;

/// Result type alias using [`TreeError`].
pub type Result<T> = std::result::Result<T, TreeError>;

/// Precondition violations reported by [`Tree`](crate::Tree) and
/// [`PathTree`](crate::PathTree).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A parent is required but none was given.
    #[error("no parent given for {node}, and the tree already has a root")]
    ParentNone { node: String },

    /// The referenced label or path does not exist, or a bare label matched
    /// more than one path where a single node is required.
    #[error("node not found: {node}")]
    NodeNotFound { node: String },

    #[error("node already exists: {node}")]
    NodeAlreadyExists { node: String },

    #[error("path already exists: {path}")]
    PathAlreadyExists { path: String },

    /// The insertion implies a root other than the existing one.
    #[error("root is not unique: tree root is {existing}, got {found}")]
    RootNotUnique { existing: String, found: String },

    #[error("invalid label: {0}")]
    InvalidLabel(#[from] ValidationError),

    /// Nodes that cannot be reached from the root.
    #[error("adjacency contains a cycle through {node}")]
    Cycle { node: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl TreeError {
    pub(crate) fn not_found(node: impl Into<String>) -> Self {
        TreeError::NodeNotFound { node: node.into() }
    }
}
