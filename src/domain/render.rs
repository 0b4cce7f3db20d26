//! Human-readable structure views of a tree.
//!
//! The ASCII view is the canonical diagnostic format:
//!
//! ```text
//!  '--A
//!      |--B
//!      '--C
//! ```
//!
//! `|--` marks a left child, `'--` a right child or the root. A left branch
//! extends the prefix by `|    `, a right branch by four spaces.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use termtree::Tree;
use tracing::{instrument, warn};

use crate::domain::arena::{BinaryTree, NodeId};
use crate::domain::codec::NULL_SENTINEL;

const LEFT_MARKER: &str = "|--";
const RIGHT_MARKER: &str = "'--";
const LEFT_INDENT: &str = "|    ";
const RIGHT_INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    #[default]
    Ascii,
    /// Box-drawing view via termtree
    Unicode,
}

impl fmt::Display for RenderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStyle::Ascii => f.write_str("ascii"),
            RenderStyle::Unicode => f.write_str("unicode"),
        }
    }
}

impl FromStr for RenderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascii" => Ok(RenderStyle::Ascii),
            "unicode" => Ok(RenderStyle::Unicode),
            other => Err(format!("unknown render style: {other}")),
        }
    }
}

/// Deepest tree drawn through termtree; deeper trees fall back to ASCII.
///
/// termtree formats and drops its trees recursively, one frame per level.
pub const UNICODE_DEPTH_LIMIT: isize = 512;

/// Visits one line per node in pre-order as `(prefix, marker, key)`.
///
/// Lines are handed out as they are produced; only the pending right
/// siblings and their prefixes are held.
fn for_each_line<E>(
    tree: &BinaryTree,
    mut emit: impl FnMut(&str, &str, char) -> Result<(), E>,
) -> Result<(), E> {
    let mut stack: Vec<(NodeId, String, bool)> = tree
        .root()
        .map(|root| (root, " ".to_string(), false))
        .into_iter()
        .collect();

    while let Some((idx, prefix, is_left)) = stack.pop() {
        let Some(node) = tree.node(idx) else {
            continue;
        };
        let (marker, indent) = if is_left {
            (LEFT_MARKER, LEFT_INDENT)
        } else {
            (RIGHT_MARKER, RIGHT_INDENT)
        };
        emit(&prefix, marker, node.key())?;

        let child_prefix = format!("{prefix}{indent}");
        if let Some(right) = node.right() {
            stack.push((right, child_prefix.clone(), false));
        }
        if let Some(left) = node.left() {
            stack.push((left, child_prefix, true));
        }
    }
    Ok(())
}

/// Writes the ASCII structure view; an empty tree writes nothing.
#[instrument(level = "debug", skip(tree, out))]
pub fn write_ascii<W: Write>(tree: &BinaryTree, out: &mut W) -> io::Result<()> {
    for_each_line(tree, |prefix, marker, key| {
        writeln!(out, "{prefix}{marker}{key}")
    })
}

pub fn render_ascii(tree: &BinaryTree) -> String {
    let mut rendered = String::new();
    let _ = for_each_line(tree, |prefix, marker, key| {
        rendered.push_str(prefix);
        rendered.push_str(marker);
        rendered.push(key);
        rendered.push('\n');
        Ok::<(), Infallible>(())
    });
    rendered
}

/// Renders in `style`; unicode requests deeper than `UNICODE_DEPTH_LIMIT` render as ASCII.
pub fn render(tree: &BinaryTree, style: RenderStyle) -> String {
    match style {
        RenderStyle::Ascii => render_ascii(tree),
        RenderStyle::Unicode => {
            let height = tree.height();
            if height > UNICODE_DEPTH_LIMIT {
                warn!(
                    height,
                    limit = UNICODE_DEPTH_LIMIT,
                    "tree too deep for unicode view, rendering ascii"
                );
                render_ascii(tree)
            } else {
                tree.to_termtree().to_string()
            }
        }
    }
}

/// Conversion into a `termtree::Tree` for box-drawing output.
///
/// The conversion itself is iterative, but the resulting `termtree::Tree`
/// is formatted and dropped recursively; `render` caps the depth for that.
pub trait TreeConvert {
    fn to_termtree(&self) -> Tree<String>;
}

impl TreeConvert for BinaryTree {
    #[instrument(level = "debug", skip(self))]
    fn to_termtree(&self) -> Tree<String> {
        let Some(root) = self.root() else {
            return Tree::new("(empty)".to_string());
        };

        // Post-order: both children are finished before their parent
        let mut built: HashMap<NodeId, Tree<String>> = HashMap::new();
        for (idx, node) in self.iter_postorder() {
            let mut take = |child: Option<NodeId>| {
                child
                    .and_then(|child_idx| built.remove(&child_idx))
                    .unwrap_or_else(|| Tree::new(NULL_SENTINEL.to_string()))
            };
            // A lone child keeps its side visible through a sentinel sibling
            let leaves = if node.is_leaf() {
                Vec::new()
            } else {
                vec![take(node.left()), take(node.right())]
            };
            built.insert(idx, Tree::new(node.key().to_string()).with_leaves(leaves));
        }
        built
            .remove(&root)
            .unwrap_or_else(|| Tree::new(NULL_SENTINEL.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_node_renders_root_marker() {
        let tree: BinaryTree = "A$$".parse().unwrap();
        assert_eq!(render_ascii(&tree), " '--A\n");
    }

    #[test]
    fn test_empty_tree_renders_nothing() {
        let tree = BinaryTree::new();
        assert_eq!(render_ascii(&tree), "");
        let mut out = Vec::new();
        write_ascii(&tree, &mut out).unwrap();
        assert!(out.is_empty());
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_ascii_stops_at_first_failed_line() {
        let tree: BinaryTree = "AB$$C$$".parse().unwrap();
        let err = write_ascii(&tree, &mut FailingWriter).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_style_parses_from_str() {
        assert_eq!("Unicode".parse::<RenderStyle>().unwrap(), RenderStyle::Unicode);
        assert!("fancy".parse::<RenderStyle>().is_err());
    }
}
