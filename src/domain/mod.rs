//! Domain layer: the binary tree, its serialized form and its printers
//!
//! This layer is independent of external concerns (no CLI, no config loading).

pub mod arena;
pub mod codec;
pub mod error;
pub mod render;

pub use arena::{
    BinaryTree, InOrderIterator, LevelOrderIterator, Node, NodeId, PostOrderIterator,
    PreOrderIterator, Traversal,
};
pub use codec::{BuildOptions, Symbols, TrailingPolicy, TruncationPolicy, NULL_SENTINEL};
pub use error::{BuildError, BuildResult};
pub use render::{render, render_ascii, write_ascii, RenderStyle, TreeConvert};
