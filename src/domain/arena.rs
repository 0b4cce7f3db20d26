use std::collections::VecDeque;
use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

/// Stable handle of a node inside its tree's arena.
pub type NodeId = Index;

/// Single tree vertex: a key and its optional children.
///
/// Children are indices into the owning tree's arena; a node is referenced
/// by at most one parent, so the index graph is always a strict tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    key: char,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Node {
    pub fn new(key: char) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    pub fn key(&self) -> char {
        self.key
    }

    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

/// Visiting order of a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Traversal {
    /// root, left, right
    Pre,
    /// left, root, right
    In,
    /// left, right, root
    Post,
    /// breadth-first, left to right within a level
    Level,
}

impl Traversal {
    pub const ALL: [Traversal; 4] = [
        Traversal::Pre,
        Traversal::In,
        Traversal::Post,
        Traversal::Level,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Traversal::Pre => "pre-order",
            Traversal::In => "in-order",
            Traversal::Post => "post-order",
            Traversal::Level => "level-order",
        }
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Arena-backed binary tree.
///
/// Nodes live in a generational arena and reference their children by index,
/// so walks never recurse and degenerate (list-shaped) trees cannot exhaust
/// the call stack. The arena holds exactly the nodes reachable from `root`.
#[derive(Debug, Clone, Default)]
pub struct BinaryTree {
    arena: Arena<Node>,
    root: Option<NodeId>,
}

impl BinaryTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub(crate) fn insert_node(&mut self, key: char) -> NodeId {
        self.arena.insert(Node::new(key))
    }

    pub(crate) fn set_root(&mut self, root: Option<NodeId>) {
        self.root = root;
    }

    pub(crate) fn set_left(&mut self, parent: NodeId, child: Option<NodeId>) {
        if let Some(node) = self.arena.get_mut(parent) {
            node.left = child;
        }
    }

    pub(crate) fn set_right(&mut self, parent: NodeId, child: Option<NodeId>) {
        if let Some(node) = self.arena.get_mut(parent) {
            node.right = child;
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root_node(&self) -> Option<&Node> {
        self.root.and_then(|idx| self.node(idx))
    }

    pub fn node(&self, idx: NodeId) -> Option<&Node> {
        self.arena.get(idx)
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Longest root-to-leaf edge count; -1 for the empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> isize {
        self.subtree_height(self.root)
    }

    /// Height of the subtree rooted at `start`, with an absent subtree at -1.
    ///
    /// Walks one level at a time, so auxiliary space is bounded by the widest level.
    #[instrument(level = "trace", skip(self))]
    pub fn subtree_height(&self, start: Option<NodeId>) -> isize {
        let mut height = -1;
        let mut level: Vec<NodeId> = start.into_iter().collect();
        while !level.is_empty() {
            height += 1;
            level = level
                .iter()
                .filter_map(|&idx| self.node(idx))
                .flat_map(|node| node.left.into_iter().chain(node.right))
                .collect();
        }
        height
    }

    /// Drops every node and the root reference.
    #[instrument(level = "debug", skip(self))]
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub fn iter_preorder(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }

    pub fn iter_inorder(&self) -> InOrderIterator<'_> {
        InOrderIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    pub fn iter_level_order(&self) -> LevelOrderIterator<'_> {
        LevelOrderIterator::new(self)
    }

    pub fn preorder(&self) -> Vec<char> {
        self.iter_preorder().map(|(_, node)| node.key).collect()
    }

    pub fn inorder(&self) -> Vec<char> {
        self.iter_inorder().map(|(_, node)| node.key).collect()
    }

    pub fn postorder(&self) -> Vec<char> {
        self.iter_postorder().map(|(_, node)| node.key).collect()
    }

    pub fn level_order(&self) -> Vec<char> {
        self.iter_level_order().map(|(_, node)| node.key).collect()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn traverse(&self, order: Traversal) -> Vec<char> {
        match order {
            Traversal::Pre => self.preorder(),
            Traversal::In => self.inorder(),
            Traversal::Post => self.postorder(),
            Traversal::Level => self.level_order(),
        }
    }

    /// Same shape and same key at every position, regardless of arena layout.
    fn same_shape(&self, other: &Self) -> bool {
        let mut stack = vec![(self.root, other.root)];
        while let Some(pair) = stack.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) => match (self.node(a), other.node(b)) {
                    (Some(x), Some(y)) if x.key == y.key => {
                        stack.push((x.right, y.right));
                        stack.push((x.left, y.left));
                    }
                    _ => return false,
                },
                _ => return false,
            }
        }
        true
    }
}

impl PartialEq for BinaryTree {
    fn eq(&self, other: &Self) -> bool {
        self.same_shape(other)
    }
}

impl Eq for BinaryTree {}

pub struct PreOrderIterator<'a> {
    tree: &'a BinaryTree,
    stack: Vec<NodeId>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a BinaryTree) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.tree.node(current_idx)?;
        // Right goes first so the left subtree is popped next
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some((current_idx, node))
    }
}

pub struct InOrderIterator<'a> {
    tree: &'a BinaryTree,
    stack: Vec<NodeId>,
    current: Option<NodeId>,
}

impl<'a> InOrderIterator<'a> {
    fn new(tree: &'a BinaryTree) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            current: tree.root(),
        }
    }
}

impl<'a> Iterator for InOrderIterator<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.current {
            self.stack.push(idx);
            self.current = self.tree.node(idx).and_then(|node| node.left);
        }
        let current_idx = self.stack.pop()?;
        let node = self.tree.node(current_idx)?;
        self.current = node.right;
        Some((current_idx, node))
    }
}

pub struct PostOrderIterator<'a> {
    tree: &'a BinaryTree,
    stack: Vec<(NodeId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a BinaryTree) -> Self {
        Self {
            tree,
            stack: tree.root().map(|root| (root, false)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.node(current_idx) {
                if visited {
                    return Some((current_idx, node));
                }
                self.stack.push((current_idx, true));
                if let Some(right) = node.right {
                    self.stack.push((right, false));
                }
                if let Some(left) = node.left {
                    self.stack.push((left, false));
                }
            }
        }
        None
    }
}

pub struct LevelOrderIterator<'a> {
    tree: &'a BinaryTree,
    queue: VecDeque<NodeId>,
}

impl<'a> LevelOrderIterator<'a> {
    fn new(tree: &'a BinaryTree) -> Self {
        Self {
            tree,
            queue: tree.root().into_iter().collect(),
        }
    }
}

impl<'a> Iterator for LevelOrderIterator<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.queue.pop_front()?;
        let node = self.tree.node(current_idx)?;
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        Some((current_idx, node))
    }
}
