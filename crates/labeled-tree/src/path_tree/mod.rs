//! Path-addressed tree: a node is identified by the labels from the root down
//! to it, so the same label may appear under different parents.

mod cascade;

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::iter;

use indexmap::IndexMap;
use labeled_tree_path::{
    ancestors, change_delimiter, root_segment, validate_abs_path, validate_label, AbsPath, Label,
    ValidationError, DEFAULT_DELIMITER,
};
use tracing::{debug, instrument, trace};

use crate::config::{TreeConfig, DEFAULT_ROOT_LABEL};
use crate::error::{Result, TreeError};
use crate::lookup::Lookup;
use crate::render::render_structure;
use crate::traverse;
use crate::types::{ErrorPolicy, LeafSort, RemoveMode};

/// Rooted tree keyed by absolute path.
///
/// Queries take either a bare label or an absolute path. A query containing
/// the delimiter names exactly one path; a bare label names every path that
/// ends in it, which is why lookups answer with a [`Lookup`].
///
/// # Example
///
/// ```
/// use labeled_tree::{ErrorPolicy, PathTree, RemoveMode};
///
/// let mut tree = PathTree::new();
/// tree.append_all(["a.b.c.d.h", "a.b.c.e.d.f"], ErrorPolicy::Raise).unwrap();
/// assert!(tree.search("d").is_ambiguous());
///
/// tree.remove("e", RemoveMode::RemoveOne, ErrorPolicy::Raise).unwrap();
/// let merged = tree.children("a.b.c.d").resolved().unwrap().1;
/// assert_eq!(merged.iter().map(|l| l.as_str()).collect::<Vec<_>>(), ["f", "h"]);
/// assert_eq!(tree.len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTree {
    /// Children are stored by label; a child's path is its parent's path
    /// joined with the label.
    adjacency: IndexMap<AbsPath, Vec<Label>>,
    /// Parent path of every node; the root maps to the empty path.
    reverse: HashMap<AbsPath, AbsPath>,
    /// Every path ending in a given label.
    labels: HashMap<Label, BTreeSet<AbsPath>>,
    root: Option<Label>,
    delimiter: char,
    policy: ErrorPolicy,
}

impl Default for PathTree {
    fn default() -> Self {
        Self {
            adjacency: IndexMap::new(),
            reverse: HashMap::new(),
            labels: HashMap::new(),
            root: None,
            delimiter: DEFAULT_DELIMITER,
            policy: ErrorPolicy::Silent,
        }
    }
}

impl PathTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tree holding a single root labeled `"root"`.
    pub fn with_default_root() -> Self {
        let mut tree = Self::new();
        tree.insert_node(AbsPath::from(DEFAULT_ROOT_LABEL), AbsPath::empty(), None);
        tree
    }

    pub fn from_config(config: &TreeConfig) -> Result<Self> {
        config.validate()?;
        let mut tree = Self {
            delimiter: config.delimiter,
            policy: config.policy(),
            ..Self::default()
        };
        if config.default_root {
            tree.insert_node(AbsPath::new(config.root_label.clone()), AbsPath::empty(), None);
        }
        Ok(tree)
    }

    /// Resolve a bare label or an absolute path.
    ///
    /// Ambiguous matches are listed in path order.
    pub fn search(&self, query: &str) -> Lookup<&AbsPath> {
        if self.is_abs_path(query) {
            return match self.adjacency.get_key_value(query) {
                Some((path, _)) => Lookup::Resolved(path),
                None => Lookup::NotFound,
            };
        }
        match self.labels.get(query) {
            Some(paths) => Lookup::from_matches(paths.iter().collect()),
            None => Lookup::NotFound,
        }
    }

    /// Resolve the node a mutation acts on. A query equal to a stored path
    /// names that node even when it is also a bare label, so the root stays
    /// addressable after a descendant takes its label.
    fn resolve_target(&self, query: &str) -> Lookup<&AbsPath> {
        match self.adjacency.get_key_value(query) {
            Some((path, _)) => Lookup::Resolved(path),
            None => self.search(query),
        }
    }

    /// Parent path of each node matching `query`. The root's parent is the
    /// empty path.
    pub fn parent(&self, query: &str) -> Lookup<&AbsPath> {
        match self.search(query) {
            Lookup::NotFound => Lookup::NotFound,
            Lookup::Resolved(path) => match self.reverse.get(path) {
                Some(parent) => Lookup::Resolved(parent),
                None => Lookup::NotFound,
            },
            Lookup::Ambiguous(paths) => Lookup::Ambiguous(
                paths.into_iter().filter_map(|path| self.reverse.get(path)).collect(),
            ),
        }
    }

    /// Child labels of each node matching `query`, paired with its path.
    pub fn children(&self, query: &str) -> Lookup<(&AbsPath, &[Label])> {
        self.search(query).map(|path| (path, self.child_slice(path)))
    }

    /// Append `label` under the node named by `parent`.
    ///
    /// On an empty tree a bare-label parent becomes the root.
    ///
    /// # Errors
    ///
    /// - [`TreeError::InvalidLabel`] when `label` is empty or holds the
    ///   delimiter.
    /// - [`TreeError::ParentNone`] when no parent is given on a non-empty
    ///   tree.
    /// - [`TreeError::NodeNotFound`] when `parent` is missing or ambiguous.
    /// - [`TreeError::PathAlreadyExists`] when the new path is taken.
    #[instrument(level = "debug", skip(self))]
    pub fn append(&mut self, label: &str, parent: Option<&str>, policy: ErrorPolicy) -> Result<bool> {
        let outcome = self.plan_append(label, parent).map(|paths| {
            self.insert_paths(paths);
            true
        });
        self.policy.settle(policy, outcome)
    }

    /// Insert absolute paths together with their missing ancestors.
    ///
    /// Paths already present are accepted. The batch is checked as a whole
    /// first: every item must be well formed and hang from the same root as
    /// the tree, otherwise nothing is inserted.
    #[instrument(level = "debug", skip(self, paths))]
    pub fn append_all<I, S>(&mut self, paths: I, policy: ErrorPolicy) -> Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths: Vec<S> = paths.into_iter().collect();
        let outcome = self.plan_batch(&paths).map(|missing| {
            debug!(items = paths.len(), inserted = missing.len(), "append batch");
            self.insert_paths(missing);
            true
        });
        self.policy.settle(policy, outcome)
    }

    /// Insert a single absolute path, creating missing ancestors.
    #[instrument(level = "debug", skip(self))]
    pub fn append_abs(&mut self, path: &str, policy: ErrorPolicy) -> Result<bool> {
        let outcome = if self.contains(path) {
            Err(TreeError::PathAlreadyExists { path: path.to_string() })
        } else {
            self.plan_batch(&[path])
        };
        let outcome = outcome.map(|missing| {
            self.insert_paths(missing);
            true
        });
        self.policy.settle(policy, outcome)
    }

    /// Rename the node named by `query` to `label`, rewriting the paths of
    /// its whole subtree. The node keeps its place among its siblings.
    #[instrument(level = "debug", skip(self))]
    pub fn replace(&mut self, query: &str, label: &str, policy: ErrorPolicy) -> Result<bool> {
        let outcome = self.plan_rename(query, label).map(|rename| {
            self.apply_rename(rename);
            true
        });
        self.policy.settle(policy, outcome)
    }

    /// Remove the nodes named by `query` according to `mode`.
    ///
    /// A bare label matching several paths removes each of them, deepest
    /// first. The root's label names the root alone. With [`RemoveMode::RemoveOne`] the children of a removed node
    /// move up to its parent, merging into same-labeled siblings; a merged
    /// node's children end up sorted by label.
    ///
    /// Returns `Ok(true)` when at least one node was removed.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, query: &str, mode: RemoveMode, policy: ErrorPolicy) -> Result<bool> {
        let outcome = self.try_remove(query, mode);
        self.policy.settle(policy, outcome)
    }

    /// Switch to a new delimiter, rewriting every stored path.
    ///
    /// # Errors
    ///
    /// [`TreeError::InvalidLabel`] when an existing label contains
    /// `delimiter`.
    #[instrument(level = "debug", skip(self))]
    pub fn set_delimiter(&mut self, delimiter: char) -> Result<()> {
        let from = self.delimiter;
        if delimiter == from {
            return Ok(());
        }
        if let Some(label) = self.labels.keys().find(|l| l.as_str().contains(delimiter)) {
            return Err(ValidationError::LabelContainsDelimiter {
                label: label.to_string(),
                delimiter,
            }
            .into());
        }
        let convert = |path: &AbsPath| AbsPath::new(change_delimiter(path.as_str(), from, delimiter));
        self.adjacency = std::mem::take(&mut self.adjacency)
            .into_iter()
            .map(|(path, children)| (convert(&path), children))
            .collect();
        self.reverse = std::mem::take(&mut self.reverse)
            .into_iter()
            .map(|(path, parent)| (convert(&path), convert(&parent)))
            .collect();
        for paths in self.labels.values_mut() {
            *paths = std::mem::take(paths).iter().map(&convert).collect();
        }
        self.delimiter = delimiter;
        Ok(())
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Leaf paths, sorted by `sort`.
    ///
    /// `ascending = false` reverses the primary key only; paths of equal
    /// length stay in alphabetical order.
    pub fn leaves(&self, sort: LeafSort, ascending: bool) -> Vec<&AbsPath> {
        let d = self.delimiter;
        let mut leaves: Vec<&AbsPath> = match self.root_path() {
            Some(root) => self
                .breadth_first_paths(root)
                .into_iter()
                .filter(|path| self.child_slice(path).is_empty())
                .collect(),
            None => Vec::new(),
        };
        let direct = |ordering: std::cmp::Ordering| if ascending { ordering } else { ordering.reverse() };
        match sort {
            LeafSort::Alphabet => leaves.sort_by(|a, b| direct(a.cmp(b))),
            LeafSort::Length => {
                leaves.sort_by(|a, b| direct(a.depth(d).cmp(&b.depth(d))).then_with(|| a.cmp(b)))
            }
        }
        leaves
    }

    /// The node named by `from` and everything below it, level by level.
    /// Empty unless `from` names exactly one node.
    pub fn breadth_first(&self, from: &str) -> Vec<&AbsPath> {
        match self.search(from) {
            Lookup::Resolved(start) => self.breadth_first_paths(start),
            _ => Vec::new(),
        }
    }

    pub fn root(&self) -> Option<&Label> {
        self.root.as_ref()
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Check for an exact path.
    pub fn contains(&self, path: &str) -> bool {
        self.adjacency.contains_key(path)
    }

    pub fn adjacency(&self) -> &IndexMap<AbsPath, Vec<Label>> {
        &self.adjacency
    }

    pub fn reverse_index(&self) -> &HashMap<AbsPath, AbsPath> {
        &self.reverse
    }

    pub fn label_index(&self) -> &HashMap<Label, BTreeSet<AbsPath>> {
        &self.labels
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ErrorPolicy) {
        self.policy = policy;
    }

    /// Drop every node and reset the policy to [`ErrorPolicy::Silent`]. The
    /// delimiter is kept.
    pub fn clear(&mut self) {
        self.adjacency.clear();
        self.reverse.clear();
        self.labels.clear();
        self.root = None;
        self.policy = ErrorPolicy::Silent;
    }

    /// Box-drawing rendering by label, root first, children in stored order.
    pub fn structure(&self) -> String {
        let d = self.delimiter;
        render_structure(
            self.root_path(),
            |path| path.label(d).into_string(),
            |path| self.child_paths(path),
        )
    }

    pub fn is_abs_path(&self, path: &str) -> bool {
        labeled_tree_path::is_abs_path(path, self.delimiter)
    }

    pub fn basename<'a>(&self, path: &'a str) -> &'a str {
        labeled_tree_path::basename(path, self.delimiter)
    }

    pub fn dirname<'a>(&self, path: &'a str) -> &'a str {
        labeled_tree_path::dirname(path, self.delimiter)
    }

    pub fn split_abs_path<'a>(&self, path: &'a str) -> (&'a str, &'a str) {
        labeled_tree_path::split_abs_path(path, self.delimiter)
    }

    pub fn combine_nodes_to_abs_path(&self, head: &str, tail: &str) -> String {
        labeled_tree_path::combine_nodes_to_abs_path(head, tail, self.delimiter)
    }

    fn root_path(&self) -> Option<&AbsPath> {
        let root = self.root.as_ref()?;
        self.adjacency.get_key_value(root.as_str()).map(|(path, _)| path)
    }

    fn child_slice(&self, path: &AbsPath) -> &[Label] {
        self.adjacency.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    fn child_paths(&self, path: &AbsPath) -> Vec<&AbsPath> {
        self.child_slice(path)
            .iter()
            .filter_map(|label| {
                let child = path.join(label.as_str(), self.delimiter);
                self.adjacency.get_key_value(child.as_str()).map(|(key, _)| key)
            })
            .collect()
    }

    fn breadth_first_paths(&self, start: &AbsPath) -> Vec<&AbsPath> {
        match self.adjacency.get_key_value(start) {
            Some((start, _)) => traverse::breadth_first(start, |path| self.child_paths(path)),
            None => Vec::new(),
        }
    }

    /// Add a node below `parent` (the root when `parent` is empty), at
    /// `position` among its siblings or last.
    fn insert_node(&mut self, path: AbsPath, parent: AbsPath, position: Option<usize>) {
        trace!(%path, %parent, "insert node");
        let label = path.label(self.delimiter);
        if parent.is_empty() {
            self.root = Some(label.clone());
        } else if let Some(siblings) = self.adjacency.get_mut(&parent) {
            match position {
                Some(pos) if pos <= siblings.len() => siblings.insert(pos, label.clone()),
                _ => siblings.push(label.clone()),
            }
        }
        self.labels.entry(label).or_default().insert(path.clone());
        self.reverse.insert(path.clone(), parent);
        self.adjacency.insert(path, Vec::new());
    }

    /// Drop a node from the three maps, leaving its parent's child list and
    /// its descendants alone.
    fn erase_node(&mut self, path: &AbsPath) {
        self.adjacency.shift_remove(path);
        self.reverse.remove(path);
        self.unindex_label(path);
    }

    fn unindex_label(&mut self, path: &AbsPath) {
        let label = path.label(self.delimiter);
        if let Some(paths) = self.labels.get_mut(&label) {
            paths.remove(path);
            if paths.is_empty() {
                self.labels.remove(&label);
            }
        }
    }

    /// Insert paths whose parents are either present or earlier in `paths`.
    fn insert_paths(&mut self, paths: Vec<AbsPath>) {
        for path in paths {
            let parent = path.parent(self.delimiter);
            self.insert_node(path, parent, None);
        }
    }

    fn plan_append(&self, label: &str, parent: Option<&str>) -> Result<Vec<AbsPath>> {
        let d = self.delimiter;
        validate_label(label, d)?;
        let Some(parent) = parent else {
            return match &self.root {
                Some(_) => Err(TreeError::ParentNone { node: label.to_string() }),
                None => Ok(vec![AbsPath::from(label)]),
            };
        };
        if self.is_empty() {
            if self.is_abs_path(parent) {
                return Err(TreeError::not_found(parent));
            }
            validate_label(parent, d)?;
            let root = AbsPath::from(parent);
            let child = root.join(label, d);
            return Ok(vec![root, child]);
        }
        let parent_path = self
            .resolve_target(parent)
            .resolved()
            .ok_or_else(|| TreeError::not_found(parent))?;
        let path = parent_path.join(label, d);
        if self.contains(path.as_str()) {
            return Err(TreeError::PathAlreadyExists { path: path.into_string() });
        }
        Ok(vec![path])
    }

    /// Missing paths, ancestors first, needed to hold every item of
    /// `paths`.
    fn plan_batch<S: AsRef<str>>(&self, paths: &[S]) -> Result<Vec<AbsPath>> {
        let d = self.delimiter;
        let mut root: Option<&str> = self.root.as_ref().map(Label::as_str);
        for path in paths {
            let path = path.as_ref();
            validate_abs_path(path, d)?;
            let found = root_segment(path, d);
            match root {
                Some(existing) if existing != found => {
                    return Err(TreeError::RootNotUnique {
                        existing: existing.to_string(),
                        found: found.to_string(),
                    })
                }
                Some(_) => {}
                None => root = Some(found),
            }
        }

        let mut planned: HashSet<&str> = HashSet::new();
        let mut missing = Vec::new();
        for path in paths {
            let path = path.as_ref();
            for prefix in ancestors(path, d).into_iter().chain(iter::once(path)) {
                if !self.contains(prefix) && planned.insert(prefix) {
                    missing.push(AbsPath::from(prefix));
                }
            }
        }
        Ok(missing)
    }

    fn try_remove(&mut self, query: &str, mode: RemoveMode) -> Result<bool> {
        let d = self.delimiter;
        let mut targets: Vec<AbsPath> =
            self.resolve_target(query).map(AbsPath::clone).into_vec();
        if targets.is_empty() {
            return Err(TreeError::not_found(query));
        }
        if mode == RemoveMode::DontRemove {
            // Leaf status is taken before anything moves, so a parent emptied
            // by an earlier match is kept.
            targets.retain(|path| self.child_slice(path).is_empty());
            if targets.is_empty() {
                debug!(query, "kept nodes with children");
                return Ok(false);
            }
        }
        targets.sort_by(|a, b| b.depth(d).cmp(&a.depth(d)).then_with(|| a.cmp(b)));

        let mut applied = false;
        for target in &targets {
            if !self.contains(target.as_str()) {
                trace!(path = %target, "already gone");
                continue;
            }
            applied |= self.remove_path(target, mode);
        }
        Ok(applied)
    }

    fn remove_path(&mut self, path: &AbsPath, mode: RemoveMode) -> bool {
        let is_leaf = self.child_slice(path).is_empty();
        match mode {
            RemoveMode::DontRemove if !is_leaf => {
                debug!(%path, "kept node with children");
                false
            }
            RemoveMode::DontRemove | RemoveMode::RemoveAll => {
                self.remove_subtree(path);
                true
            }
            RemoveMode::RemoveOne => {
                self.remove_one(path);
                true
            }
        }
    }
}

impl fmt::Display for PathTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.structure())
    }
}
