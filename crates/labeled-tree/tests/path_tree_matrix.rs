use labeled_tree::{
    AbsPath, ErrorPolicy, Label, LeafSort, Lookup, PathTree, RemoveMode, TreeConfig, TreeError,
};

const SILENT: ErrorPolicy = ErrorPolicy::Silent;
const RAISE: ErrorPolicy = ErrorPolicy::Raise;

fn search<'a>(tree: &'a PathTree, query: &str) -> Lookup<&'a str> {
    tree.search(query).map(AbsPath::as_str)
}

fn parent<'a>(tree: &'a PathTree, query: &str) -> Lookup<&'a str> {
    tree.parent(query).map(AbsPath::as_str)
}

fn children<'a>(tree: &'a PathTree, query: &str) -> Lookup<(&'a str, Vec<&'a str>)> {
    tree.children(query).map(|(path, children)| {
        (path.as_str(), children.iter().map(Label::as_str).collect())
    })
}

fn child_labels<'a>(tree: &'a PathTree, path: &str) -> Vec<&'a str> {
    match children(tree, path) {
        Lookup::Resolved((_, labels)) => labels,
        other => panic!("{path} did not resolve: {other:?}"),
    }
}

fn leaves(tree: &PathTree, sort: LeafSort, ascending: bool) -> Vec<&str> {
    tree.leaves(sort, ascending).into_iter().map(AbsPath::as_str).collect()
}

fn built(paths: &[&str]) -> PathTree {
    let mut tree = PathTree::new();
    assert_eq!(tree.append_all(paths, RAISE), Ok(true));
    tree
}

#[test]
fn empty_tree_queries() {
    let mut tree = PathTree::new();
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.root(), None);
    assert_eq!(search(&tree, "root"), Lookup::NotFound);
    assert_eq!(children(&tree, "a"), Lookup::NotFound);
    assert_eq!(parent(&tree, "b"), Lookup::NotFound);
    assert_eq!(tree.remove("c", RemoveMode::default(), SILENT), Ok(false));
    assert_eq!(tree.replace("a", "c", SILENT), Ok(false));
    assert!(tree.leaves(LeafSort::Alphabet, true).is_empty());
}

#[test]
fn default_root_and_clear() {
    let mut tree = PathTree::with_default_root();
    assert_eq!(tree.len(), 1);
    assert_eq!(search(&tree, "root"), Lookup::Resolved("root"));
    tree.set_policy(RAISE);
    tree.clear();
    assert_eq!(tree.root(), None);
    assert!(tree.adjacency().is_empty());
    assert!(tree.reverse_index().is_empty());
    assert!(tree.label_index().is_empty());
    assert_eq!(tree.policy(), SILENT);
}

#[test]
fn path_helper_matrix() {
    let tree = PathTree::new();
    assert!(tree.is_abs_path("a.b"));
    assert!(!tree.is_abs_path("a"));
    assert_eq!(tree.basename("a.b.c"), "c");
    assert_eq!(tree.basename("a"), "a");
    assert_eq!(tree.dirname("a.b.c"), "a.b");
    assert_eq!(tree.dirname("a"), "");
    assert_eq!(tree.split_abs_path("a.b.c"), ("a.b", "c"));
    assert_eq!(tree.split_abs_path("a"), ("", "a"));
    assert_eq!(tree.combine_nodes_to_abs_path("a.b.c", "d.e"), "a.b.c.d.e");
    assert_eq!(tree.combine_nodes_to_abs_path("a.b.c", "d"), "a.b.c.d");
    assert_eq!(tree.combine_nodes_to_abs_path("a", "b.c"), "a.b.c");
    assert_eq!(tree.combine_nodes_to_abs_path("a", "b"), "a.b");
}

#[test]
fn append_auto_root_matrix() {
    let mut tree = PathTree::new();
    tree.append("a", None, SILENT).unwrap();
    assert_eq!(tree.root().map(Label::as_str), Some("a"));
    assert_eq!(search(&tree, "a"), Lookup::Resolved("a"));
    assert_eq!(children(&tree, "a"), Lookup::Resolved(("a", vec![])));
    assert_eq!(parent(&tree, "a"), Lookup::Resolved(""));

    tree.clear();
    tree.append("b", Some("a"), SILENT).unwrap();
    assert_eq!(tree.root().map(Label::as_str), Some("a"));
    assert_eq!(tree.len(), 2);
    assert_eq!(search(&tree, "b"), Lookup::Resolved("a.b"));
    assert_eq!(children(&tree, "a"), Lookup::Resolved(("a", vec!["b"])));
    assert_eq!(parent(&tree, "b"), Lookup::Resolved("a"));
}

#[test]
fn append_repeated_label_matrix() {
    let mut tree = PathTree::new();
    tree.append("a", None, SILENT).unwrap();
    tree.append("b", Some("a"), SILENT).unwrap();
    assert_eq!(children(&tree, "b"), Lookup::Resolved(("a.b", vec![])));
    assert_eq!(children(&tree, "c"), Lookup::NotFound);

    tree.append("b", Some("b"), SILENT).unwrap();
    assert_eq!(tree.len(), 3);
    assert_eq!(search(&tree, "b"), Lookup::Ambiguous(vec!["a.b", "a.b.b"]));
    assert_eq!(
        children(&tree, "b"),
        Lookup::Ambiguous(vec![("a.b", vec!["b"]), ("a.b.b", vec![])])
    );
    assert_eq!(parent(&tree, "b"), Lookup::Ambiguous(vec!["a", "a.b"]));
    assert_eq!(search(&tree, "a.b.b"), Lookup::Resolved("a.b.b"));
    assert_eq!(parent(&tree, "a.b.b"), Lookup::Resolved("a.b"));

    // An ambiguous parent cannot take a child.
    assert_eq!(
        tree.append("c", Some("b"), RAISE),
        Err(TreeError::NodeNotFound { node: "b".into() })
    );
    assert_eq!(tree.append("c", Some("a.b.b"), RAISE), Ok(true));
}

#[test]
fn append_all_matrix() {
    let tree = built(&["a.a.b"]);
    assert_eq!(tree.len(), 3);
    assert_eq!(search(&tree, "a"), Lookup::Ambiguous(vec!["a", "a.a"]));
    assert_eq!(parent(&tree, "a"), Lookup::Ambiguous(vec!["", "a"]));
    assert_eq!(parent(&tree, "b"), Lookup::Resolved("a.a"));
    assert_eq!(tree.root().map(Label::as_str), Some("a"));
    let root_children: Vec<&str> = tree.adjacency()["a"].iter().map(Label::as_str).collect();
    assert_eq!(root_children, vec!["a"]);

    let mut tree = PathTree::with_default_root();
    tree.append_all(["root.a.c", "root.b"], SILENT).unwrap();
    tree.append_all(["root.b.b", "root.d"], SILENT).unwrap();
    assert_eq!(tree.len(), 6);
    assert_eq!(search(&tree, "root.b.b"), Lookup::Resolved("root.b.b"));
    assert_eq!(tree.to_string(), "root\n├ a\n│ └ c\n├ b\n│ └ b\n└ d");
}

#[test]
fn append_all_rejects_whole_batch() {
    let mut tree = PathTree::new();
    assert!(matches!(
        tree.append_all(["root.a.b", "c.d.e"], RAISE),
        Err(TreeError::RootNotUnique { .. })
    ));
    assert!(tree.is_empty());
    assert_eq!(tree.append_all(["root.a.b", "c.d.e"], SILENT), Ok(false));
    assert!(tree.is_empty());

    tree.append_all(["root.a"], RAISE).unwrap();
    assert_eq!(tree.append_all(["root.x", "root..y"], SILENT), Ok(false));
    assert!(!tree.contains("root.x"));
    assert!(matches!(
        tree.append_all(["other.x"], RAISE),
        Err(TreeError::RootNotUnique { .. })
    ));
}

#[test]
fn append_error_matrix() {
    let mut tree = PathTree::with_default_root();
    tree.set_policy(RAISE);
    assert!(matches!(tree.append("a", None, SILENT), Err(TreeError::ParentNone { .. })));
    assert!(matches!(tree.append("b", Some("a"), SILENT), Err(TreeError::NodeNotFound { .. })));
    tree.append("a", Some("root"), SILENT).unwrap();
    assert!(matches!(
        tree.append("a", Some("root"), SILENT),
        Err(TreeError::PathAlreadyExists { .. })
    ));
    assert!(matches!(tree.append("", Some("root"), SILENT), Err(TreeError::InvalidLabel(_))));
}

#[test]
fn append_abs_matrix() {
    let mut tree = PathTree::new();
    tree.set_policy(RAISE);
    let steps = [
        ("a.b.c", 3),
        ("a.a.a", 5),
        ("a.b.c.d", 6),
        ("a.b.e", 7),
        ("a.b.d", 8),
    ];
    for (path, len) in steps {
        tree.append_abs(path, SILENT).unwrap();
        assert_eq!(search(&tree, path), Lookup::Resolved(path));
        assert_eq!(tree.len(), len, "after {path}");
        assert_eq!(tree.root().map(Label::as_str), Some("a"));
    }
    assert_eq!(parent(&tree, "a.b.c"), Lookup::Resolved("a.b"));
    assert_eq!(search(&tree, "d"), Lookup::Ambiguous(vec!["a.b.c.d", "a.b.d"]));

    assert!(matches!(
        tree.append_abs("a.b.c", SILENT),
        Err(TreeError::PathAlreadyExists { .. })
    ));
    assert!(matches!(
        tree.append_abs("10.j.q.k.a", SILENT),
        Err(TreeError::RootNotUnique { .. })
    ));
    assert_eq!(tree.len(), 8);
}

#[test]
fn replace_matrix() {
    let mut tree = PathTree::new();
    tree.append("a", None, SILENT).unwrap();
    tree.append("b", Some("a"), SILENT).unwrap();
    tree.replace("b", "c", SILENT).unwrap();
    assert_eq!(search(&tree, "b"), Lookup::NotFound);
    assert_eq!(search(&tree, "c"), Lookup::Resolved("a.c"));
    assert_eq!(parent(&tree, "c"), Lookup::Resolved("a"));
    assert_eq!(children(&tree, "a"), Lookup::Resolved(("a", vec!["c"])));

    tree.append("d", Some("c"), SILENT).unwrap();
    tree.replace("a.c.d", "b", SILENT).unwrap();
    assert_eq!(search(&tree, "d"), Lookup::NotFound);
    assert_eq!(tree.len(), 3);
    assert_eq!(parent(&tree, "b"), Lookup::Resolved("a.c"));

    tree.replace("a", "z", SILENT).unwrap();
    assert_eq!(tree.root().map(Label::as_str), Some("z"));
    assert_eq!(search(&tree, "b"), Lookup::Resolved("z.c.b"));
    assert_eq!(parent(&tree, "z"), Lookup::Resolved(""));
}

#[test]
fn replace_error_matrix() {
    let mut tree = PathTree::new();
    tree.set_policy(RAISE);
    assert!(matches!(tree.replace("a", "aa", SILENT), Err(TreeError::NodeNotFound { .. })));

    tree.append_all(["a.b.c", "a.b.d"], SILENT).unwrap();
    assert!(matches!(
        tree.replace("a.b.c", "d", SILENT),
        Err(TreeError::PathAlreadyExists { .. })
    ));
    assert!(matches!(tree.replace("c", "x.y", SILENT), Err(TreeError::InvalidLabel(_))));
    assert_eq!(tree.len(), 4);
    assert_eq!(child_labels(&tree, "a.b"), vec!["c", "d"]);
    assert_eq!(leaves(&tree, LeafSort::Alphabet, true), vec!["a.b.c", "a.b.d"]);
}

#[test]
fn remove_one_ambiguous_matrix() {
    let mut tree = built(&["a.b.e", "a.c.d", "a.f.f", "a.g.g.h"]);
    assert_eq!(tree.len(), 10);

    assert_eq!(tree.remove("b", RemoveMode::RemoveOne, SILENT), Ok(true));
    assert_eq!(search(&tree, "b"), Lookup::NotFound);
    assert_eq!(tree.len(), 9);
    assert!(!child_labels(&tree, "a").contains(&"b"));

    assert_eq!(tree.remove("e", RemoveMode::RemoveOne, SILENT), Ok(true));
    assert_eq!(tree.len(), 8);
    assert!(!child_labels(&tree, "a").contains(&"e"));

    assert_eq!(tree.remove("g", RemoveMode::RemoveOne, SILENT), Ok(true));
    assert_eq!(search(&tree, "g"), Lookup::NotFound);
    assert_eq!(tree.len(), 6);
    assert!(child_labels(&tree, "a").contains(&"h"));

    assert_eq!(tree.remove("a.f", RemoveMode::RemoveOne, SILENT), Ok(true));
    assert_eq!(search(&tree, "a.f"), Lookup::Resolved("a.f"));
    assert_eq!(search(&tree, "a.f.f"), Lookup::NotFound);
    assert_eq!(tree.len(), 5);
}

#[test]
fn remove_all_matrix() {
    let mut tree = built(&["a.b.c.d.e", "a.b.c.f", "a.b.g.h", "a.i.j"]);
    assert_eq!(tree.len(), 10);
    assert_eq!(tree.remove("c", RemoveMode::RemoveAll, SILENT), Ok(true));
    assert_eq!(child_labels(&tree, "a.b"), vec!["g"]);
    assert_eq!(tree.len(), 6);
    assert_eq!(search(&tree, "a.i.j"), Lookup::Resolved("a.i.j"));
    assert_eq!(tree.remove("h", RemoveMode::RemoveAll, SILENT), Ok(true));
    assert_eq!(search(&tree, "a.b.g"), Lookup::Resolved("a.b.g"));
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.remove("a", RemoveMode::RemoveAll, SILENT), Ok(true));
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.root(), None);
    assert!(tree.adjacency().is_empty());

    let mut tree = built(&["a.b.c.d.e", "a.b.c.f", "a.b.d.h", "a.i.j", "a.c.c"]);
    assert_eq!(tree.len(), 12);
    assert_eq!(tree.remove("d", RemoveMode::RemoveAll, SILENT), Ok(true));
    assert_eq!(tree.len(), 8);
    assert_eq!(search(&tree, "d"), Lookup::NotFound);
    assert!(!child_labels(&tree, "a.b").contains(&"d"));
    assert_eq!(tree.remove("c", RemoveMode::RemoveAll, SILENT), Ok(true));
    assert_eq!(tree.len(), 4);
    assert_eq!(search(&tree, "f"), Lookup::NotFound);
    assert_eq!(tree.remove("a.i", RemoveMode::RemoveAll, SILENT), Ok(true));
    assert_eq!(tree.len(), 2);
    assert_eq!(children(&tree, "a"), Lookup::Resolved(("a", vec!["b"])));
}

#[test]
fn dont_remove_matrix() {
    let mut tree = built(&["a.b.c.d.e", "a.b.c.f", "a.b.d.h", "a.i.j", "a.c.c"]);
    assert_eq!(tree.remove("e", RemoveMode::DontRemove, SILENT), Ok(true));
    assert_eq!(tree.len(), 11);
    assert_eq!(tree.remove("b", RemoveMode::DontRemove, SILENT), Ok(false));
    assert_eq!(tree.len(), 11);
    assert_eq!(search(&tree, "b"), Lookup::Resolved("a.b"));
    assert_eq!(tree.remove("a.b.c.f", RemoveMode::DontRemove, SILENT), Ok(true));
    assert_eq!(tree.len(), 10);

    // Only the leaf among the three matches goes.
    assert_eq!(tree.remove("c", RemoveMode::DontRemove, SILENT), Ok(true));
    assert_eq!(tree.len(), 9);
    assert_eq!(search(&tree, "a.c.c"), Lookup::NotFound);
    assert_eq!(search(&tree, "a.c"), Lookup::Resolved("a.c"));
    assert_eq!(child_labels(&tree, "a.b.c"), vec!["d"]);
}

#[test]
fn remove_merges_into_existing_sibling() {
    let mut tree = built(&["a.b.c.d.h", "a.b.c.e.d.f"]);
    assert_eq!(tree.len(), 8);
    assert_eq!(tree.remove("e", RemoveMode::default(), SILENT), Ok(true));
    assert_eq!(tree.len(), 6);
    assert_eq!(child_labels(&tree, "a.b.c.d"), vec!["f", "h"]);
    assert_eq!(parent(&tree, "f"), Lookup::Resolved("a.b.c.d"));
}

#[test]
fn remove_merges_nested_subtrees() {
    let mut tree = built(&[
        "a.b.c.d.e",
        "a.b.c.d.f",
        "a.b.c.g.h",
        "a.b.i.c.j",
        "a.b.i.c.k",
        "a.b.i.l.m.n",
    ]);
    assert_eq!(tree.len(), 15);
    assert_eq!(tree.remove("a.b.i", RemoveMode::RemoveOne, SILENT), Ok(true));
    assert_eq!(tree.len(), 13);
    assert_eq!(search(&tree, "i"), Lookup::NotFound);
    assert_eq!(search(&tree, "c"), Lookup::Resolved("a.b.c"));
    assert_eq!(
        children(&tree, "c"),
        Lookup::Resolved(("a.b.c", vec!["d", "g", "j", "k"]))
    );
    assert_eq!(parent(&tree, "c"), Lookup::Resolved("a.b"));
    assert_eq!(search(&tree, "a.b.l.m.n"), Lookup::Resolved("a.b.l.m.n"));
    assert_eq!(child_labels(&tree, "a.b"), vec!["c", "l"]);
    assert_eq!(child_labels(&tree, "a.b.c.d"), vec!["e", "f"]);
    assert_eq!(child_labels(&tree, "a.b.c.g"), vec!["h"]);
    assert_eq!(child_labels(&tree, "a.b.c.j"), Vec::<&str>::new());
}

#[test]
fn remove_root_promotes_first_child() {
    let mut tree = built(&["r.b.x", "r.c.y", "r.d"]);
    assert_eq!(tree.remove("r", RemoveMode::RemoveOne, RAISE), Ok(true));
    assert_eq!(tree.root().map(Label::as_str), Some("b"));
    assert_eq!(tree.to_string(), "b\n├ x\n├ c\n│ └ y\n└ d");
    assert_eq!(parent(&tree, "y"), Lookup::Resolved("b.c"));
    assert_eq!(tree.len(), 5);

    let mut tree = built(&["r"]);
    assert_eq!(tree.remove("r", RemoveMode::RemoveOne, RAISE), Ok(true));
    assert!(tree.is_empty());
    assert_eq!(tree.root(), None);
}

#[test]
fn root_label_shared_with_descendant() {
    let mut tree = built(&["a.a"]);
    assert_eq!(search(&tree, "a"), Lookup::Ambiguous(vec!["a", "a.a"]));

    assert_eq!(tree.append("x", Some("a"), RAISE), Ok(true));
    assert!(tree.contains("a.x"));
    assert!(!tree.contains("a.a.x"));

    assert_eq!(tree.replace("a", "z", RAISE), Ok(true));
    assert_eq!(tree.root().map(Label::as_str), Some("z"));
    assert_eq!(child_labels(&tree, "z"), vec!["a", "x"]);
    assert_eq!(tree.len(), 3);

    let mut tree = built(&["a.a"]);
    assert_eq!(tree.remove("a.a", RemoveMode::RemoveOne, RAISE), Ok(true));
    assert_eq!(search(&tree, "a"), Lookup::Resolved("a"));

    let mut tree = built(&["a.a.b"]);
    assert_eq!(tree.remove("a", RemoveMode::RemoveOne, RAISE), Ok(true));
    assert_eq!(tree.len(), 2);
    assert_eq!(search(&tree, "a"), Lookup::Resolved("a"));
    assert_eq!(search(&tree, "b"), Lookup::Resolved("a.b"));

    let mut tree = built(&["a.a.b"]);
    assert_eq!(tree.remove("a", RemoveMode::DontRemove, RAISE), Ok(false));
    assert_eq!(tree.len(), 3);
}

#[test]
fn remove_missing_raises_not_found() {
    let mut tree = built(&["a.b.c", "a.d"]);
    for mode in [RemoveMode::RemoveOne, RemoveMode::RemoveAll, RemoveMode::DontRemove] {
        assert!(matches!(tree.remove("x", mode, RAISE), Err(TreeError::NodeNotFound { .. })));
        assert!(matches!(tree.remove("a.x", mode, RAISE), Err(TreeError::NodeNotFound { .. })));
    }
    assert_eq!(tree.remove("x", RemoveMode::RemoveOne, SILENT), Ok(false));
    assert_eq!(tree.len(), 4);
}

#[test]
fn change_delimiter_matrix() {
    let mut tree = built(&["a.b.c.d.e", "a.b.c.f", "a.b.g.h", "a.i.j"]);
    tree.set_delimiter('/').unwrap();
    assert_eq!(tree.delimiter(), '/');
    assert_eq!(tree.len(), 10);
    for leaf in leaves(&tree, LeafSort::Alphabet, true) {
        assert!(leaf.contains('/'), "{leaf}");
        assert!(!leaf.contains('.'), "{leaf}");
    }
    assert_eq!(search(&tree, "a/b/g"), Lookup::Resolved("a/b/g"));
    assert!(tree.is_abs_path("a/b"));
    assert!(!tree.is_abs_path("a.b"));
    tree.append_abs("a/i/k", RAISE).unwrap();
    assert_eq!(child_labels(&tree, "a/i"), vec!["j", "k"]);
}

#[test]
fn leaves_sort_matrix() {
    let tree = built(&["a.b.c.d", "a.e", "a.b.f", "a.g"]);
    assert_eq!(
        leaves(&tree, LeafSort::Alphabet, true),
        vec!["a.b.c.d", "a.b.f", "a.e", "a.g"]
    );
    assert_eq!(
        leaves(&tree, LeafSort::Alphabet, false),
        vec!["a.g", "a.e", "a.b.f", "a.b.c.d"]
    );
    assert_eq!(
        leaves(&tree, LeafSort::Length, true),
        vec!["a.e", "a.g", "a.b.f", "a.b.c.d"]
    );
    assert_eq!(
        leaves(&tree, LeafSort::Length, false),
        vec!["a.b.c.d", "a.b.f", "a.e", "a.g"]
    );
}

#[test]
fn breadth_first_matrix() {
    let tree = built(&["a.b.c", "a.d.b"]);
    let order: Vec<&str> = tree.breadth_first("a").into_iter().map(AbsPath::as_str).collect();
    assert_eq!(order, vec!["a", "a.b", "a.d", "a.b.c", "a.d.b"]);
    assert!(tree.breadth_first("b").is_empty());
    assert_eq!(tree.breadth_first("a.d").len(), 2);
}

#[test]
fn config_builds_path_tree() {
    let config = TreeConfig::from_json(r#"{"default_root": true, "delimiter": "/"}"#).unwrap();
    let mut tree = PathTree::from_config(&config).unwrap();
    tree.append_all(["root/src/main.rs", "root/src/lib.rs"], RAISE).unwrap();
    assert_eq!(parent(&tree, "main.rs"), Lookup::Resolved("root/src"));
    assert_eq!(tree.structure(), "root\n└ src\n  ├ main.rs\n  └ lib.rs");
}
