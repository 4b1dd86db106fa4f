//! `path-tree`: build a path tree from absolute paths and print it.
//!
//! Usage:
//!   cargo run -p labeled-tree --features cli --bin path-tree -- [delimiter] < paths.txt
//!
//! One absolute path per line is read from stdin; blank lines are skipped.
//! The optional argument is a single-character delimiter (default `.`).
//! Set `RUST_LOG=labeled_tree=debug` to trace the mutations.

use labeled_tree::{ErrorPolicy, LeafSort, PathTree, TreeConfig};
use std::io::{self, Read, Write};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labeled_tree=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let delimiter = match args.get(1).map(|arg| {
        let mut chars = arg.chars();
        (chars.next(), chars.next())
    }) {
        None => labeled_tree::DEFAULT_DELIMITER,
        Some((Some(delimiter), None)) => delimiter,
        Some(_) => fail("Delimiter must be a single character."),
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        fail(e);
    }
    let paths: Vec<&str> = buf.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    tracing::info!(count = paths.len(), %delimiter, "read paths");

    let config = TreeConfig::new()
        .with_delimiter(delimiter)
        .with_always_raise_error(true);
    let mut tree = match PathTree::from_config(&config) {
        Ok(tree) => tree,
        Err(e) => fail(e),
    };
    if let Err(e) = tree.append_all(&paths, ErrorPolicy::Raise) {
        fail(e);
    }

    let mut out = String::new();
    out.push_str(&tree.structure());
    out.push('\n');
    for leaf in tree.leaves(LeafSort::Alphabet, true) {
        out.push_str(leaf.as_str());
        out.push('\n');
    }
    if let Err(e) = io::stdout().write_all(out.as_bytes()) {
        fail(e);
    }
}
