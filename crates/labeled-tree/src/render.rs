//! Text rendering of a tree structure.

use labeled_tree_util::{print_tree, PrintChild};

/// Render the tree below `root` in pre-order, one node per line, children in
/// stored order. Returns an empty string for an empty tree.
pub(crate) fn render_structure<K, N, C>(root: Option<K>, name: N, children: C) -> String
where
    N: Fn(&K) -> String,
    C: Fn(&K) -> Vec<K>,
{
    match root {
        Some(root) => render_node(&root, "", &name, &children),
        None => String::new(),
    }
}

fn render_node<K, N, C>(node: &K, tab: &str, name: &N, children: &C) -> String
where
    N: Fn(&K) -> String,
    C: Fn(&K) -> Vec<K>,
{
    let kids = children(node);
    let printers: Vec<Box<PrintChild<'_>>> = kids
        .iter()
        .map(|kid| {
            Box::new(move |child_tab: &str| render_node(kid, child_tab, name, children))
                as Box<PrintChild<'_>>
        })
        .collect();
    let printers: Vec<&PrintChild<'_>> = printers.iter().map(|p| p.as_ref()).collect();
    format!("{}{}", name(node), print_tree(tab, &printers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_render_structure() {
        let adj: HashMap<&str, Vec<&str>> = HashMap::from([
            ("root", vec!["a1", "a2"]),
            ("a1", vec!["b1", "b2"]),
            ("b1", vec![]),
            ("b2", vec![]),
            ("a2", vec!["b3"]),
            ("b3", vec![]),
        ]);
        let out = render_structure(Some("root"), |n| n.to_string(), |n| adj[n].clone());
        assert_eq!(
            out,
            "root\n├ a1\n│ ├ b1\n│ └ b2\n└ a2\n  └ b3"
        );
    }

    #[test]
    fn test_render_empty() {
        let out = render_structure(None::<&str>, |n| n.to_string(), |_| Vec::new());
        assert_eq!(out, "");
    }
}
