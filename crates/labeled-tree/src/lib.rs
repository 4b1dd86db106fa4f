//! labeled-tree - rooted trees of labeled nodes
//!
//! Two flavours share one shape (an ordered adjacency list plus a child to
//! parent index):
//!
//! - [`Tree`] identifies nodes by label, so labels are unique.
//! - [`PathTree`] identifies nodes by absolute path (`a.b.c`), so a label may
//!   repeat under different parents and bare-label queries can be
//!   ambiguous; those answer with a [`Lookup`].
//!
//! Mutations take an [`ErrorPolicy`]. Under [`ErrorPolicy::Silent`] a failed
//! mutation leaves the tree unchanged and returns `Ok(false)`; under
//! [`ErrorPolicy::Raise`] it returns the [`TreeError`]. A tree configured to
//! always raise ignores the call-site policy.
//!
//! # Example
//!
//! ```
//! use labeled_tree::{ErrorPolicy, LeafSort, PathTree};
//!
//! let mut tree = PathTree::new();
//! tree.append_all(["a.b.c", "a.b.d", "a.e"], ErrorPolicy::Raise).unwrap();
//! let leaves: Vec<&str> = tree
//!     .leaves(LeafSort::Length, true)
//!     .into_iter()
//!     .map(|p| p.as_str())
//!     .collect();
//! assert_eq!(leaves, ["a.e", "a.b.c", "a.b.d"]);
//! println!("{tree}");
//! ```

pub mod config;
pub mod error;
pub mod lookup;
pub mod path_tree;
mod render;
pub mod traverse;
pub mod tree;
pub mod types;

// Re-exports for convenience
pub use config::{TreeConfig, DEFAULT_ROOT_LABEL};
pub use error::{Result, TreeError};
pub use labeled_tree_path::{AbsPath, Label, DEFAULT_DELIMITER};
pub use lookup::Lookup;
pub use path_tree::PathTree;
pub use traverse::{breadth_first, breadth_first_with};
pub use tree::Tree;
pub use types::{ErrorPolicy, LeafSort, RemoveMode};
