//! Type definitions for labeled-tree paths.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single node identifier, i.e. one segment of an absolute path.
///
/// Labels never contain the delimiter of the tree they live in; the trees
/// validate this on insertion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// An absolute path: labels from the root down to a node, joined by the
/// tree's delimiter.
///
/// The empty path is the parent of the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbsPath(String);

impl AbsPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The parent sentinel of the root node.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Terminal segment of the path.
    pub fn label(&self, delimiter: char) -> Label {
        Label::new(crate::basename(&self.0, delimiter))
    }

    /// Path of the parent node; empty for the root.
    pub fn parent(&self, delimiter: char) -> AbsPath {
        AbsPath::new(crate::dirname(&self.0, delimiter))
    }

    /// Path of the child labeled `label`.
    pub fn join(&self, label: &str, delimiter: char) -> AbsPath {
        AbsPath(crate::combine_nodes_to_abs_path(&self.0, label, delimiter))
    }

    /// Number of segments.
    pub fn depth(&self, delimiter: char) -> usize {
        crate::depth(&self.0, delimiter)
    }
}

macro_rules! string_newtype_impls {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $ty {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $ty {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $ty {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl PartialEq<str> for $ty {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $ty {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_newtype_impls!(Label);
string_newtype_impls!(AbsPath);
