//! Data model of the gene index.
//!
//! This module contains:
//! - `Node`: one tree position, owning up to four children and, at the
//!   leaves, the offsets where its gene occurs
//! - `Trie`: the complete 4-ary tree of fixed height m
//!
//! Ownership is strictly tree-shaped: there are no parent or sibling
//! references, so dropping the root releases every node exactly once,
//! children first.

use crate::alphabet::{Base, ALPHABET_SIZE};
use crate::error::{EngineError, EngineResult};

/// One position in the tree.
///
/// Inner nodes own exactly [`ALPHABET_SIZE`] children in A, C, G, T order;
/// leaves own none and are the only nodes whose `positions` ever grow.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Node {
    children: Vec<Node>,
    positions: Vec<usize>,
}

impl Node {
    /// Creates a leaf with no recorded occurrences.
    pub(crate) fn leaf() -> Self {
        Self::default()
    }

    /// Creates an inner node from its children.
    pub(crate) fn inner(children: Vec<Node>) -> Self {
        debug_assert_eq!(children.len(), ALPHABET_SIZE);
        Self {
            children,
            positions: Vec::new(),
        }
    }

    /// Returns true if the node sits at depth m.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Children in alphabet order (empty for leaves).
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child reached by `base`, if any.
    pub fn child(&self, base: Base) -> Option<&Node> {
        self.children.get(base.index())
    }

    fn child_mut(&mut self, base: Base) -> Option<&mut Node> {
        self.children.get_mut(base.index())
    }

    /// Offsets recorded at this node, in insertion order.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Number of recorded offsets (the gene's frequency).
    pub fn occurrence_count(&self) -> usize {
        self.positions.len()
    }

    /// Appends one offset.
    ///
    /// If the buffer cannot grow the offset is not recorded and the existing
    /// positions are left untouched.
    pub(crate) fn push_position(&mut self, offset: usize) -> EngineResult<()> {
        self.positions
            .try_reserve(1)
            .map_err(|_| EngineError::AllocationFailure)?;
        self.positions.push(offset);
        Ok(())
    }
}

/// Counts collected while releasing a trie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseStats {
    /// Nodes freed, leaves included
    pub nodes: usize,
    /// Offsets freed across all leaf buffers
    pub positions: usize,
}

/// The whole index: a complete 4-ary tree of height `depth`.
#[derive(Debug, PartialEq, Eq)]
pub struct Trie {
    root: Node,
    depth: usize,
}

impl Trie {
    pub(crate) fn from_parts(root: Node, depth: usize) -> Self {
        Self { root, depth }
    }

    /// Gene length m, fixed for the life of the trie.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Expected node count of a complete tree of height `depth`:
    /// `(4^(depth+1) - 1) / 3`. Returns `None` on overflow.
    pub fn expected_node_count(depth: usize) -> Option<usize> {
        let exp = u32::try_from(depth).ok()?.checked_add(1)?;
        ALPHABET_SIZE
            .checked_pow(exp)
            .map(|n| (n - 1) / (ALPHABET_SIZE - 1))
    }

    /// Total number of nodes currently in the tree.
    pub fn node_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            1 + node.children.iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }

    /// Number of leaves (always `4^depth`).
    pub fn leaf_count(&self) -> usize {
        fn count(node: &Node) -> usize {
            if node.is_leaf() {
                1
            } else {
                node.children.iter().map(count).sum()
            }
        }
        count(&self.root)
    }

    /// Sum of all leaves' occurrence counts.
    pub fn total_occurrences(&self) -> usize {
        fn count(node: &Node) -> usize {
            node.positions.len() + node.children.iter().map(count).sum::<usize>()
        }
        count(&self.root)
    }

    /// Follows `bases` from the root.
    ///
    /// Returns the leaf only if exactly `depth` bases were consumed.
    pub fn leaf<I>(&self, bases: I) -> Option<&Node>
    where
        I: IntoIterator<Item = Base>,
    {
        let mut node = &self.root;
        let mut steps = 0;
        for base in bases {
            node = node.child(base)?;
            steps += 1;
        }
        (steps == self.depth && node.is_leaf()).then_some(node)
    }

    pub(crate) fn leaf_mut(&mut self, bases: &[Base]) -> Option<&mut Node> {
        if bases.len() != self.depth {
            return None;
        }
        let mut node = &mut self.root;
        for &base in bases {
            node = node.child_mut(base)?;
        }
        node.is_leaf().then_some(node)
    }

    /// Tears the tree down bottom-up, counting what was freed.
    ///
    /// Every child is released before its parent, and every leaf buffer with
    /// the leaf that owns it.
    pub fn release(self) -> ReleaseStats {
        fn release_node(mut node: Node, stats: &mut ReleaseStats) {
            for child in node.children.drain(..) {
                release_node(child, stats);
            }
            stats.positions += node.positions.len();
            stats.nodes += 1;
        }

        let mut stats = ReleaseStats::default();
        release_node(self.root, &mut stats);
        stats
    }
}
