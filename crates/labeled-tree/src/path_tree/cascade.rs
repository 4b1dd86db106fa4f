//! Subtree moves: renames rewrite a subtree's paths in place, removals detach
//! subtrees and graft them back under a new parent.

use labeled_tree_path::{combine_nodes_to_abs_path, replace_prefix, validate_label, AbsPath, Label};
use tracing::{debug, trace};

use super::PathTree;
use crate::error::{Result, TreeError};

/// Path rewrites for one rename, parents before children.
pub(super) struct Rename {
    from: AbsPath,
    to: AbsPath,
    moves: Vec<(AbsPath, AbsPath)>,
}

/// A subtree taken out of the maps: its top label and the paths below it,
/// relative to the top (the top itself is the empty suffix), parents first.
struct Detached {
    label: Label,
    suffixes: Vec<String>,
}

impl PathTree {
    pub(super) fn plan_rename(&self, query: &str, label: &str) -> Result<Rename> {
        let d = self.delimiter;
        let from = self
            .resolve_target(query)
            .resolved()
            .ok_or_else(|| TreeError::not_found(query))?
            .clone();
        validate_label(label, d)?;
        let to = from.parent(d).join(label, d);
        if self.contains(to.as_str()) {
            return Err(TreeError::PathAlreadyExists { path: to.into_string() });
        }
        let moves = self
            .breadth_first_paths(&from)
            .into_iter()
            .filter_map(|path| {
                replace_prefix(path.as_str(), from.as_str(), to.as_str(), d)
                    .map(|moved| (path.clone(), AbsPath::new(moved)))
            })
            .collect();
        Ok(Rename { from, to, moves })
    }

    pub(super) fn apply_rename(&mut self, rename: Rename) {
        let d = self.delimiter;
        for (old, new) in &rename.moves {
            trace!(from = %old, to = %new, "rekey");
            if let Some((index, _, children)) = self.adjacency.shift_remove_full(old) {
                self.adjacency.shift_insert(index, new.clone(), children);
            }
            self.reverse.remove(old);
            self.reverse.insert(new.clone(), new.parent(d));
            self.unindex_label(old);
            self.labels.entry(new.label(d)).or_default().insert(new.clone());
        }

        let old_label = rename.from.label(d);
        let new_label = rename.to.label(d);
        let parent = rename.to.parent(d);
        if parent.is_empty() {
            self.root = Some(new_label);
        } else if let Some(slot) = self
            .adjacency
            .get_mut(&parent)
            .and_then(|siblings| siblings.iter_mut().find(|l| **l == old_label))
        {
            *slot = new_label;
        }
    }

    /// Remove `path` with everything below it.
    pub(super) fn remove_subtree(&mut self, path: &AbsPath) {
        let parent = self.reverse.get(path).cloned().unwrap_or_default();
        self.unlink(path, &parent);
        self.detach(path);
        if parent.is_empty() {
            self.root = None;
        }
    }

    /// Remove `path` alone, moving its children up to its parent. A removed
    /// root hands over to its first child.
    pub(super) fn remove_one(&mut self, path: &AbsPath) {
        let d = self.delimiter;
        let parent = self.reverse.get(path).cloned().unwrap_or_default();
        let children = self.child_slice(path).to_vec();
        let mut position = self.unlink(path, &parent);
        self.erase_node(path);

        let mut subtrees = Vec::with_capacity(children.len());
        for child in children {
            let top = path.join(child.as_str(), d);
            subtrees.push(self.detach(&top));
        }

        if !parent.is_empty() {
            for subtree in &subtrees {
                if !self.graft(&parent, subtree, position) {
                    position = position.map(|pos| pos + 1);
                }
            }
            return;
        }

        self.root = None;
        let mut subtrees = subtrees.into_iter();
        let Some(first) = subtrees.next() else {
            return;
        };
        self.graft(&AbsPath::empty(), &first, None);
        let promoted = AbsPath::from(first.label.as_str());
        for subtree in subtrees {
            self.graft(&promoted, &subtree, None);
        }
        debug!(root = %first.label, "promoted new root");
    }

    /// Drop `path` from its parent's children, returning where it was.
    fn unlink(&mut self, path: &AbsPath, parent: &AbsPath) -> Option<usize> {
        let label = path.label(self.delimiter);
        let siblings = self.adjacency.get_mut(parent)?;
        let pos = siblings.iter().position(|l| *l == label)?;
        siblings.remove(pos);
        Some(pos)
    }

    fn detach(&mut self, top: &AbsPath) -> Detached {
        let d = self.delimiter;
        let paths: Vec<AbsPath> = self.breadth_first_paths(top).into_iter().cloned().collect();
        let suffixes = paths
            .iter()
            .filter_map(|path| replace_prefix(path.as_str(), top.as_str(), "", d))
            .collect();
        for path in &paths {
            self.erase_node(path);
        }
        Detached { label: top.label(d), suffixes }
    }

    /// Re-insert `subtree` below `parent`. Nodes whose path already exists
    /// are merged: they keep their place and end up with their children
    /// sorted by label. Returns whether the top itself merged.
    fn graft(&mut self, parent: &AbsPath, subtree: &Detached, position: Option<usize>) -> bool {
        let d = self.delimiter;
        let top = parent.join(subtree.label.as_str(), d);
        let mut merged = Vec::new();
        for suffix in &subtree.suffixes {
            let target = AbsPath::new(combine_nodes_to_abs_path(top.as_str(), suffix, d));
            if self.contains(target.as_str()) {
                merged.push(target);
                continue;
            }
            trace!(path = %target, "graft");
            let target_parent = target.parent(d);
            let at = if suffix.is_empty() { position } else { None };
            self.insert_node(target, target_parent, at);
        }
        for node in &merged {
            if let Some(children) = self.adjacency.get_mut(node) {
                children.sort();
            }
        }
        merged.first() == Some(&top)
    }
}
