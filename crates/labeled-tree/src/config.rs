//! Construction options for trees.

use labeled_tree_path::{validate_label, DEFAULT_DELIMITER};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TreeError};
use crate::types::ErrorPolicy;

/// Label of the node seeded by `default_root`.
pub const DEFAULT_ROOT_LABEL: &str = "root";

/// Options shared by [`Tree`](crate::Tree) and [`PathTree`](crate::PathTree).
///
/// # Example
///
/// ```
/// use labeled_tree::TreeConfig;
///
/// let config = TreeConfig::from_json(r#"{"default_root": true, "delimiter": "/"}"#).unwrap();
/// assert!(config.default_root);
/// assert_eq!(config.delimiter, '/');
/// assert_eq!(config.root_label, "root");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Seed the tree with a root node labeled `root_label`.
    pub default_root: bool,
    pub root_label: String,
    /// Raise every failure regardless of the call-site policy.
    pub always_raise_error: bool,
    pub delimiter: char,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            default_root: false,
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            always_raise_error: false,
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl TreeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TreeConfig =
            serde_json::from_str(json).map_err(|e| TreeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_label(&self.root_label, self.delimiter)?;
        Ok(())
    }

    pub fn with_default_root(mut self, default_root: bool) -> Self {
        self.default_root = default_root;
        self
    }

    pub fn with_root_label(mut self, root_label: impl Into<String>) -> Self {
        self.root_label = root_label.into();
        self
    }

    pub fn with_always_raise_error(mut self, always_raise_error: bool) -> Self {
        self.always_raise_error = always_raise_error;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn policy(&self) -> ErrorPolicy {
        ErrorPolicy::from_raise(self.always_raise_error)
    }
}
