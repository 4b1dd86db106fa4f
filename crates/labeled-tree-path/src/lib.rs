//! Absolute-path utilities for labeled trees.
//!
//! A node of a path-addressed tree is identified by the labels on the way
//! from the root down to it, joined by a delimiter (`.` by default):
//! `a.b.c` is the node `c` below `b` below the root `a`. Every function here
//! is pure and takes the delimiter explicitly, so a tree can change its
//! delimiter without these helpers caring.
//!
//! # Example
//!
//! ```
//! use labeled_tree_path::{basename, combine_nodes_to_abs_path, dirname, split_abs_path};
//!
//! assert_eq!(split_abs_path("a.b.c", '.'), ("a.b", "c"));
//! assert_eq!(basename("a", '.'), "a");
//! assert_eq!(dirname("a", '.'), "");
//! assert_eq!(combine_nodes_to_abs_path("a.b", "c.d", '.'), "a.b.c.d");
//! ```

pub mod types;
pub use types::{AbsPath, Label};

pub mod validate;
pub use validate::{validate_abs_path, validate_label, ValidationError};

/// Delimiter used when none is configured.
pub const DEFAULT_DELIMITER: char = '.';

/// Check whether `path` spans more than one segment.
///
/// A bare label is not an absolute path even though it may name the root.
///
/// # Example
///
/// ```
/// use labeled_tree_path::is_abs_path;
///
/// assert!(is_abs_path("a.b", '.'));
/// assert!(!is_abs_path("a", '.'));
/// assert!(is_abs_path("a/b", '/'));
/// ```
pub fn is_abs_path(path: &str, delimiter: char) -> bool {
    path.contains(delimiter)
}

/// Split a path into its parent path and its terminal label.
///
/// # Example
///
/// ```
/// use labeled_tree_path::split_abs_path;
///
/// assert_eq!(split_abs_path("a.b.c", '.'), ("a.b", "c"));
/// assert_eq!(split_abs_path("a", '.'), ("", "a"));
/// ```
pub fn split_abs_path(path: &str, delimiter: char) -> (&str, &str) {
    match path.rfind(delimiter) {
        Some(idx) => (&path[..idx], &path[idx + delimiter.len_utf8()..]),
        None => ("", path),
    }
}

/// Terminal label of a path.
pub fn basename(path: &str, delimiter: char) -> &str {
    split_abs_path(path, delimiter).1
}

/// Parent path of a path; empty for a single segment.
pub fn dirname(path: &str, delimiter: char) -> &str {
    split_abs_path(path, delimiter).0
}

/// Join two paths (or labels) with the delimiter.
///
/// An empty side yields the other side unchanged, so
/// `combine_nodes_to_abs_path(dirname(p), basename(p)) == p` holds for the
/// root as well.
///
/// # Example
///
/// ```
/// use labeled_tree_path::combine_nodes_to_abs_path;
///
/// assert_eq!(combine_nodes_to_abs_path("a.b.c", "d.e", '.'), "a.b.c.d.e");
/// assert_eq!(combine_nodes_to_abs_path("a", "b", '.'), "a.b");
/// assert_eq!(combine_nodes_to_abs_path("", "a", '.'), "a");
/// ```
pub fn combine_nodes_to_abs_path(head: &str, tail: &str, delimiter: char) -> String {
    if head.is_empty() {
        return tail.to_string();
    }
    if tail.is_empty() {
        return head.to_string();
    }
    let mut out = String::with_capacity(head.len() + tail.len() + delimiter.len_utf8());
    out.push_str(head);
    out.push(delimiter);
    out.push_str(tail);
    out
}

/// Split a path into its segments. The empty path has no segments.
pub fn parse_path(path: &str, delimiter: char) -> Vec<&str> {
    if path.is_empty() {
        return Vec::new();
    }
    path.split(delimiter).collect()
}

/// Join segments into a path.
pub fn format_path<S: AsRef<str>>(segments: &[S], delimiter: char) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push(delimiter);
        }
        out.push_str(segment.as_ref());
    }
    out
}

/// First segment of a path, i.e. the label of the root it hangs from.
pub fn root_segment(path: &str, delimiter: char) -> &str {
    match path.find(delimiter) {
        Some(idx) => &path[..idx],
        None => path,
    }
}

/// Number of segments; 0 for the empty path.
pub fn depth(path: &str, delimiter: char) -> usize {
    if path.is_empty() {
        return 0;
    }
    path.matches(delimiter).count() + 1
}

/// Every proper prefix of `path`, shortest first.
///
/// # Example
///
/// ```
/// use labeled_tree_path::ancestors;
///
/// assert_eq!(ancestors("a.b.c", '.'), vec!["a", "a.b"]);
/// assert!(ancestors("a", '.').is_empty());
/// ```
pub fn ancestors(path: &str, delimiter: char) -> Vec<&str> {
    path.match_indices(delimiter)
        .map(|(idx, _)| &path[..idx])
        .collect()
}

/// Check if `path` lies strictly below `ancestor`.
///
/// # Example
///
/// ```
/// use labeled_tree_path::is_descendant;
///
/// assert!(is_descendant("a.b", "a.b.c", '.'));
/// assert!(!is_descendant("a.b", "a.bc", '.'));
/// assert!(!is_descendant("a.b", "a.b", '.'));
/// ```
pub fn is_descendant(ancestor: &str, path: &str, delimiter: char) -> bool {
    if ancestor.is_empty() {
        return !path.is_empty();
    }
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path[ancestor.len()..].starts_with(delimiter)
}

/// Rewrite the `old` prefix of `path` into `new`.
///
/// Returns `None` when `path` is neither `old` nor below it.
///
/// # Example
///
/// ```
/// use labeled_tree_path::replace_prefix;
///
/// assert_eq!(replace_prefix("a.b.c", "a.b", "a.x", '.'), Some("a.x.c".to_string()));
/// assert_eq!(replace_prefix("a.b", "a.b", "x", '.'), Some("x".to_string()));
/// assert_eq!(replace_prefix("a.bc", "a.b", "a.x", '.'), None);
/// ```
pub fn replace_prefix(path: &str, old: &str, new: &str, delimiter: char) -> Option<String> {
    if path == old {
        return Some(new.to_string());
    }
    if !is_descendant(old, path, delimiter) {
        return None;
    }
    let rest = if old.is_empty() {
        path
    } else {
        &path[old.len() + delimiter.len_utf8()..]
    };
    Some(combine_nodes_to_abs_path(new, rest, delimiter))
}

/// Re-join a path with a different delimiter.
pub fn change_delimiter(path: &str, from: char, to: char) -> String {
    path.chars().map(|c| if c == from { to } else { c }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_abs_path() {
        assert!(is_abs_path("a.b", '.'));
        assert!(!is_abs_path("a", '.'));
        assert!(!is_abs_path("", '.'));
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("a.b.c", '.'), "c");
        assert_eq!(basename("a", '.'), "a");
        assert_eq!(basename("", '.'), "");
    }

    #[test]
    fn test_dirname() {
        assert_eq!(dirname("a.b.c", '.'), "a.b");
        assert_eq!(dirname("a", '.'), "");
    }

    #[test]
    fn test_split_abs_path() {
        assert_eq!(split_abs_path("a.b.c", '.'), ("a.b", "c"));
        assert_eq!(split_abs_path("a", '.'), ("", "a"));
        assert_eq!(split_abs_path("가→나", '→'), ("가", "나"));
    }

    #[test]
    fn test_combine_nodes_to_abs_path() {
        assert_eq!(combine_nodes_to_abs_path("a.b.c", "d.e", '.'), "a.b.c.d.e");
        assert_eq!(combine_nodes_to_abs_path("a.b.c", "d", '.'), "a.b.c.d");
        assert_eq!(combine_nodes_to_abs_path("a", "b.c", '.'), "a.b.c");
        assert_eq!(combine_nodes_to_abs_path("a", "b", '.'), "a.b");
        assert_eq!(combine_nodes_to_abs_path("a", "", '.'), "a");
    }

    #[test]
    fn test_parse_and_format_path() {
        assert_eq!(parse_path("a.b.c", '.'), vec!["a", "b", "c"]);
        assert!(parse_path("", '.').is_empty());
        assert_eq!(format_path(&["a", "b", "c"], '/'), "a/b/c");
        assert_eq!(format_path::<&str>(&[], '/'), "");
    }

    #[test]
    fn test_root_segment_and_depth() {
        assert_eq!(root_segment("a.b.c", '.'), "a");
        assert_eq!(root_segment("a", '.'), "a");
        assert_eq!(depth("a.b.c", '.'), 3);
        assert_eq!(depth("a", '.'), 1);
        assert_eq!(depth("", '.'), 0);
    }

    #[test]
    fn test_replace_prefix_from_root() {
        assert_eq!(
            replace_prefix("root.a.b", "root", "", '.'),
            Some("a.b".to_string())
        );
        assert_eq!(replace_prefix("a.b", "", "x", '.'), Some("x.a.b".to_string()));
    }

    #[test]
    fn test_change_delimiter() {
        assert_eq!(change_delimiter("a.b.c", '.', '/'), "a/b/c");
        assert_eq!(change_delimiter("a", '.', '/'), "a");
    }
}
