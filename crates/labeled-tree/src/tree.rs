//! Label-addressed tree: every node is identified by its label, so labels are
//! unique within a tree.

use std::collections::{HashMap, HashSet};
use std::fmt;

use indexmap::IndexMap;
use labeled_tree_path::{parse_path, Label, ValidationError, DEFAULT_DELIMITER};
use tracing::debug;

use crate::config::{TreeConfig, DEFAULT_ROOT_LABEL};
use crate::error::{Result, TreeError};
use crate::render::render_structure;
use crate::traverse;
use crate::types::{ErrorPolicy, RemoveMode};

/// Rooted tree keyed by unique labels.
///
/// Children keep their insertion order, which is also the order used by
/// [`structure`](Tree::structure) and [`breadth_first`](Tree::breadth_first).
///
/// # Example
///
/// ```
/// use labeled_tree::{ErrorPolicy, Tree};
///
/// let mut tree = Tree::new();
/// tree.append_all(["a.b.c", "a.d"], ErrorPolicy::Raise).unwrap();
/// assert_eq!(tree.parent("c").map(|p| p.as_str()), Some("b"));
/// assert_eq!(tree.to_string(), "a\n├ b\n│ └ c\n└ d");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    adjacency: IndexMap<Label, Vec<Label>>,
    /// Parent of every node except the root.
    reverse: HashMap<Label, Label>,
    root: Option<Label>,
    delimiter: char,
    policy: ErrorPolicy,
}

impl Default for Tree {
    fn default() -> Self {
        Self {
            adjacency: IndexMap::new(),
            reverse: HashMap::new(),
            root: None,
            delimiter: DEFAULT_DELIMITER,
            policy: ErrorPolicy::Silent,
        }
    }
}

/// One link planned by [`Tree::plan_chain`]: `label` under `parent`, or the
/// root when `parent` is `None`.
type Link = (Label, Option<Label>);

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tree holding a single root labeled `"root"`.
    pub fn with_default_root() -> Self {
        let mut tree = Self::new();
        tree.insert_root(Label::from(DEFAULT_ROOT_LABEL));
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
            tree.insert_root(Label::new(config.root_label.clone()));
        }
        Ok(tree)
    }

    /// Build a tree from a raw adjacency list, deriving the parent index and
    /// the root.
    ///
    /// Children that never appear as keys become leaves.
    ///
    /// # Errors
    ///
    /// - [`TreeError::NodeAlreadyExists`] for a duplicate key or a child
    ///   listed under two parents.
    /// - [`TreeError::RootNotUnique`] when more than one node has no parent.
    /// - [`TreeError::Cycle`] when some node cannot be reached from the root.
    pub fn from_adjacency<I, K, C, V>(adjacency: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, C)>,
        K: Into<Label>,
        C: IntoIterator<Item = V>,
        V: Into<Label>,
    {
        let mut tree = Self::new();
        for (node, children) in adjacency {
            let node: Label = node.into();
            let children: Vec<Label> = children.into_iter().map(Into::into).collect();
            for label in std::iter::once(&node).chain(&children) {
                if label.as_str().is_empty() {
                    return Err(ValidationError::EmptyLabel.into());
                }
            }
            if tree.adjacency.contains_key(&node) {
                return Err(TreeError::NodeAlreadyExists { node: node.into_string() });
            }
            for child in &children {
                if tree.reverse.insert(child.clone(), node.clone()).is_some() {
                    return Err(TreeError::NodeAlreadyExists { node: child.to_string() });
                }
            }
            tree.adjacency.insert(node, children);
        }

        let implicit: Vec<Label> = tree
            .adjacency
            .values()
            .flatten()
            .filter(|child| !tree.adjacency.contains_key(*child))
            .cloned()
            .collect();
        for leaf in implicit {
            tree.adjacency.insert(leaf, Vec::new());
        }

        if tree.adjacency.is_empty() {
            return Ok(tree);
        }
        let roots: Vec<&Label> = tree
            .adjacency
            .keys()
            .filter(|node| !tree.reverse.contains_key(*node))
            .collect();
        let root = match roots.as_slice() {
            [] => {
                let node = tree.adjacency.keys().next().map(Label::to_string);
                return Err(TreeError::Cycle { node: node.unwrap_or_default() });
            }
            [root] => (*root).clone(),
            [existing, found, ..] => {
                return Err(TreeError::RootNotUnique {
                    existing: existing.to_string(),
                    found: found.to_string(),
                })
            }
        };

        let reachable: HashSet<&Label> = tree.breadth_first(root.as_str()).into_iter().collect();
        if let Some(stray) = tree.adjacency.keys().find(|node| !reachable.contains(node)) {
            return Err(TreeError::Cycle { node: stray.to_string() });
        }
        tree.root = Some(root);
        Ok(tree)
    }

    /// Append `label` under `parent`.
    ///
    /// On an empty tree `label` becomes the root, or, when a parent is given,
    /// the parent becomes the root and `label` its first child.
    pub fn append(&mut self, label: &str, parent: Option<&str>, policy: ErrorPolicy) -> Result<bool> {
        debug!(label, parent, "append");
        let outcome = self.plan_link(label, parent).map(|links| {
            self.apply(links);
            true
        });
        self.policy.settle(policy, outcome)
    }

    /// Append delimiter-joined chains such as `"a.b.c"`, each pair linked as
    /// child below parent. Pairs that are already linked are skipped.
    ///
    /// The batch is applied to a scratch copy and committed only when every
    /// item succeeds, so a failing item leaves the tree unchanged under either
    /// policy.
    pub fn append_all<I, S>(&mut self, items: I, policy: ErrorPolicy) -> Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scratch = self.clone();
        let outcome = items.into_iter().try_for_each(|item| {
            let links = scratch.plan_chain(item.as_ref())?;
            scratch.apply(links);
            Ok::<_, TreeError>(())
        });
        let outcome = outcome.map(|()| {
            *self = scratch;
            true
        });
        self.policy.settle(policy, outcome)
    }

    /// Rename `old` to `new` without moving it.
    pub fn replace(&mut self, old: &str, new: &str, policy: ErrorPolicy) -> Result<bool> {
        debug!(old, new, "replace");
        let outcome = self.try_replace(old, new).map(|()| true);
        self.policy.settle(policy, outcome)
    }

    /// Remove `label` according to `mode`.
    ///
    /// [`RemoveMode::DontRemove`] on a node with children is not an error:
    /// it returns `Ok(false)` and leaves the tree as is.
    pub fn remove(&mut self, label: &str, mode: RemoveMode, policy: ErrorPolicy) -> Result<bool> {
        debug!(label, ?mode, "remove");
        let outcome = self.try_remove(label, mode);
        self.policy.settle(policy, outcome)
    }

    pub fn search(&self, label: &str) -> Option<&Label> {
        self.adjacency.get_key_value(label).map(|(key, _)| key)
    }

    /// Parent of `label`; `None` for the root and for missing labels.
    pub fn parent(&self, label: &str) -> Option<&Label> {
        self.reverse.get(label)
    }

    pub fn children(&self, label: &str) -> Option<&[Label]> {
        self.adjacency.get(label).map(Vec::as_slice)
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

    pub fn contains(&self, label: &str) -> bool {
        self.adjacency.contains_key(label)
    }

    pub fn adjacency(&self) -> &IndexMap<Label, Vec<Label>> {
        &self.adjacency
    }

    /// Child to parent index; the root has no entry.
    pub fn reverse_index(&self) -> &HashMap<Label, Label> {
        &self.reverse
    }

    /// Nodes without children, in pre-order.
    pub fn leaves(&self) -> Vec<&Label> {
        let mut leaves = Vec::new();
        let mut stack: Vec<&Label> = self.root.iter().collect();
        while let Some(node) = stack.pop() {
            let children = self.child_slice(node);
            if children.is_empty() {
                leaves.push(node);
            }
            stack.extend(children.iter().rev());
        }
        leaves
    }

    /// `from` and everything below it, level by level. Empty when `from` is
    /// missing.
    pub fn breadth_first(&self, from: &str) -> Vec<&Label> {
        match self.adjacency.get_key_value(from) {
            Some((start, _)) => traverse::breadth_first(start, |node| self.child_slice(node)),
            None => Vec::new(),
        }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Delimiter used to split [`append_all`](Tree::append_all) items.
    pub fn set_delimiter(&mut self, delimiter: char) {
        self.delimiter = delimiter;
    }

    pub fn policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: ErrorPolicy) {
        self.policy = policy;
    }

    /// Drop every node and reset the policy to [`ErrorPolicy::Silent`].
    pub fn clear(&mut self) {
        self.adjacency.clear();
        self.reverse.clear();
        self.root = None;
        self.policy = ErrorPolicy::Silent;
    }

    /// Box-drawing rendering, root first, children in stored order.
    pub fn structure(&self) -> String {
        render_structure(
            self.root.as_ref(),
            |node| node.to_string(),
            |node| self.child_slice(node).iter().collect(),
        )
    }

    fn child_slice(&self, label: &Label) -> &[Label] {
        self.adjacency.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    fn insert_root(&mut self, label: Label) {
        self.adjacency.insert(label.clone(), Vec::new());
        self.root = Some(label);
    }

    fn apply(&mut self, links: Vec<Link>) {
        for (label, parent) in links {
            match parent {
                Some(parent) => {
                    self.adjacency.insert(label.clone(), Vec::new());
                    if let Some(siblings) = self.adjacency.get_mut(&parent) {
                        siblings.push(label.clone());
                    }
                    self.reverse.insert(label, parent);
                }
                None => self.insert_root(label),
            }
        }
    }

    fn plan_link(&self, label: &str, parent: Option<&str>) -> Result<Vec<Link>> {
        if label.is_empty() {
            return Err(ValidationError::EmptyLabel.into());
        }
        match (&self.root, parent) {
            (None, None) => Ok(vec![(Label::from(label), None)]),
            (None, Some(parent)) => {
                if parent.is_empty() {
                    return Err(ValidationError::EmptyLabel.into());
                }
                if parent == label {
                    return Err(TreeError::NodeAlreadyExists { node: label.to_string() });
                }
                Ok(vec![
                    (Label::from(parent), None),
                    (Label::from(label), Some(Label::from(parent))),
                ])
            }
            (Some(_), None) => Err(TreeError::ParentNone { node: label.to_string() }),
            (Some(_), Some(parent)) => {
                if !self.contains(parent) {
                    return Err(TreeError::not_found(parent));
                }
                if self.contains(label) {
                    return Err(TreeError::NodeAlreadyExists { node: label.to_string() });
                }
                Ok(vec![(Label::from(label), Some(Label::from(parent)))])
            }
        }
    }

    /// Links needed to add the chain `item`, checked against the tree and
    /// against the links planned earlier in the same chain.
    fn plan_chain(&self, item: &str) -> Result<Vec<Link>> {
        let segments = parse_path(item, self.delimiter);
        if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return Err(ValidationError::EmptySegment { path: item.to_string() }.into());
        }
        let mut planned: Vec<Link> = Vec::new();
        let parent_of = |planned: &[Link], label: &str| -> Option<Option<Label>> {
            if let Some(parent) = self.reverse.get(label) {
                return Some(Some(parent.clone()));
            }
            if self.contains(label) {
                return Some(None);
            }
            planned
                .iter()
                .find(|(planned_label, _)| planned_label.as_str() == label)
                .map(|(_, parent)| parent.clone())
        };

        if self.root.is_none() {
            planned.push((Label::from(segments[0]), None));
        } else if segments.len() == 1 {
            return Err(TreeError::ParentNone { node: item.to_string() });
        }
        for pair in segments.windows(2) {
            let (parent, child) = (pair[0], pair[1]);
            if parent_of(&planned, parent).is_none() {
                return Err(TreeError::not_found(parent));
            }
            match parent_of(&planned, child) {
                Some(Some(existing)) if existing.as_str() == parent => continue,
                Some(_) => {
                    return Err(TreeError::NodeAlreadyExists { node: child.to_string() })
                }
                None => planned.push((Label::from(child), Some(Label::from(parent)))),
            }
        }
        Ok(planned)
    }

    fn try_replace(&mut self, old: &str, new: &str) -> Result<()> {
        if !self.contains(old) {
            return Err(TreeError::not_found(old));
        }
        if new.is_empty() {
            return Err(ValidationError::EmptyLabel.into());
        }
        if self.contains(new) {
            return Err(TreeError::NodeAlreadyExists { node: new.to_string() });
        }
        let new = Label::from(new);
        let Some((index, _, children)) = self.adjacency.shift_remove_full(old) else {
            return Err(TreeError::not_found(old));
        };
        for child in &children {
            self.reverse.insert(child.clone(), new.clone());
        }
        self.adjacency.shift_insert(index, new.clone(), children);

        if let Some(parent) = self.reverse.remove(old) {
            if let Some(slot) = self
                .adjacency
                .get_mut(&parent)
                .and_then(|siblings| siblings.iter_mut().find(|s| s.as_str() == old))
            {
                *slot = new.clone();
            }
            self.reverse.insert(new.clone(), parent);
        }
        if self.root.as_ref().is_some_and(|root| root.as_str() == old) {
            self.root = Some(new);
        }
        Ok(())
    }

    fn try_remove(&mut self, label: &str, mode: RemoveMode) -> Result<bool> {
        let Some(is_leaf) = self.adjacency.get(label).map(Vec::is_empty) else {
            return Err(TreeError::not_found(label));
        };
        match mode {
            RemoveMode::DontRemove if !is_leaf => {
                debug!(label, "kept node with children");
                Ok(false)
            }
            RemoveMode::DontRemove | RemoveMode::RemoveAll => {
                self.remove_subtree(label);
                Ok(true)
            }
            RemoveMode::RemoveOne => {
                self.remove_one(label);
                Ok(true)
            }
        }
    }

    fn remove_subtree(&mut self, label: &str) {
        let doomed: Vec<Label> = self.breadth_first(label).into_iter().cloned().collect();
        if let Some(parent) = self.reverse.get(label).cloned() {
            if let Some(siblings) = self.adjacency.get_mut(&parent) {
                siblings.retain(|s| s.as_str() != label);
            }
        }
        for node in &doomed {
            self.adjacency.shift_remove(node);
            self.reverse.remove(node);
        }
        if self.root.as_ref().is_some_and(|root| root.as_str() == label) {
            self.root = None;
        }
    }

    fn remove_one(&mut self, label: &str) {
        let children = self.adjacency.shift_remove(label).unwrap_or_default();
        match self.reverse.remove(label) {
            Some(parent) => {
                for child in &children {
                    self.reverse.insert(child.clone(), parent.clone());
                }
                if let Some(siblings) = self.adjacency.get_mut(&parent) {
                    if let Some(pos) = siblings.iter().position(|s| s.as_str() == label) {
                        let tail = siblings.split_off(pos + 1);
                        siblings.pop();
                        siblings.extend(children);
                        siblings.extend(tail);
                    }
                }
            }
            None => {
                let mut rest = children.into_iter();
                let Some(promoted) = rest.next() else {
                    self.root = None;
                    return;
                };
                self.reverse.remove(&promoted);
                let rest: Vec<Label> = rest.collect();
                for child in &rest {
                    self.reverse.insert(child.clone(), promoted.clone());
                }
                if let Some(grandchildren) = self.adjacency.get_mut(&promoted) {
                    grandchildren.extend(rest);
                }
                debug!(root = %promoted, "promoted new root");
                self.root = Some(promoted);
            }
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.structure())
    }
}
