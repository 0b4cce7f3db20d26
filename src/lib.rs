//! Binary trees decoded from pre-order symbol streams.
//!
//! A tree is stored as `<key><left><right>` with `$` marking an absent
//! subtree, so `AB$$C$$` is `A` with leaves `B` and `C`:
//!
//! ```
//! use bintree::BinaryTree;
//!
//! let tree: BinaryTree = "AB$$C$$".parse().unwrap();
//! assert_eq!(tree.height(), 1);
//! assert_eq!(tree.inorder(), vec!['B', 'A', 'C']);
//! assert_eq!(tree.encode(), "AB$$C$$");
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{
    BinaryTree, BuildError, BuildOptions, Node, NodeId, RenderStyle, TrailingPolicy, Traversal,
    TruncationPolicy, NULL_SENTINEL,
};
