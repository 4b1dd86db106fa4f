//! Modes shared by [`Tree`](crate::Tree) and [`PathTree`](crate::PathTree).

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What a mutation does when its preconditions fail.
///
/// An instance carries a policy of its own; a call's effective policy is
/// `Raise` when either the instance or the call site asks for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Leave the tree untouched and report `Ok(false)`.
    #[default]
    Silent,
    /// Return the error.
    Raise,
}

impl ErrorPolicy {
    pub fn from_raise(raise: bool) -> Self {
        if raise {
            ErrorPolicy::Raise
        } else {
            ErrorPolicy::Silent
        }
    }

    pub fn is_raise(self) -> bool {
        self == ErrorPolicy::Raise
    }

    /// Effective policy of a call made with `call_site` on an instance
    /// configured with `self`.
    pub fn resolve(self, call_site: ErrorPolicy) -> ErrorPolicy {
        if self.is_raise() {
            ErrorPolicy::Raise
        } else {
            call_site
        }
    }

    /// Turn the outcome of a mutation into what the caller sees: failures
    /// are returned under `Raise` and reported as `Ok(false)` otherwise.
    pub(crate) fn settle(self, call_site: ErrorPolicy, outcome: Result<bool>) -> Result<bool> {
        match outcome {
            Ok(applied) => Ok(applied),
            Err(err) if self.resolve(call_site).is_raise() => Err(err),
            Err(err) => {
                tracing::debug!(error = %err, "suppressed tree error");
                Ok(false)
            }
        }
    }
}

/// How `remove` treats the descendants of the removed node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoveMode {
    /// Remove the node with its whole subtree.
    RemoveAll,
    /// Remove only the node; its children move up to its parent.
    #[default]
    RemoveOne,
    /// Remove the node only if it is a leaf.
    DontRemove,
}

/// Ordering of [`PathTree::leaves`](crate::PathTree::leaves).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafSort {
    /// By path string.
    #[default]
    Alphabet,
    /// By number of segments, ties by path string.
    Length,
}
