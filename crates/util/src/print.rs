//! Box-drawing printer for tree-shaped output.

/// Renders one child given the tab prefix its own children must use.
pub type PrintChild<'a> = dyn Fn(&str) -> String + 'a;

/// Print the children of a node, one per line, below the node's own line.
///
/// Each child line starts with `tab` followed by `├ ` (or `└ ` for the last
/// child). A child's own children are printed with `tab + "│ "`, or with
/// `tab + "  "` below the last child, so the vertical rules line up:
///
/// ```text
/// a
/// ├ b
/// │ └ c
/// └ d
/// ```
///
/// # Example
///
/// ```
/// use labeled_tree_util::print_tree;
///
/// let leaf = |_: &str| "b".to_string();
/// let out = format!("a{}", print_tree("", &[&leaf, &leaf]));
/// assert_eq!(out, "a\n├ b\n└ b");
/// ```
pub fn print_tree(tab: &str, children: &[&PrintChild<'_>]) -> String {
    let mut out = String::new();
    let Some(last) = children.len().checked_sub(1) else {
        return out;
    };

    for (i, child_fn) in children.iter().enumerate() {
        let is_last = i == last;
        let child_tab = format!("{tab}{}", if is_last { "  " } else { "│ " });
        let child = child_fn(&child_tab);

        out.push('\n');
        out.push_str(tab);
        out.push_str(if is_last { "└" } else { "├" });
        out.push(' ');
        out.push_str(&child);
    }

    out
}
