//! labeled-tree-util - collaborators for labeled-tree
//!
//! This crate provides the FIFO queues used for breadth-first traversal and the
//! box-drawing printer used to render tree structures.

pub mod print;
pub mod queue;

// Re-exports for convenience
pub use print::{print_tree, PrintChild};
pub use queue::{DynamicQueue, FifoQueue, QueueError, StaticQueue, DEFAULT_CAPACITY};
