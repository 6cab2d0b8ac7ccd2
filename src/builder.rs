//! Eager construction of the complete 4-ary tree.
//!
//! `build(m)` allocates all `(4^(m+1) - 1) / 3` nodes up front, so `m` is a
//! hard memory knob. The builder refuses depths above its configured ceiling
//! and can additionally be held to a node budget.

use log::{debug, warn};

use crate::alphabet::ALPHABET_SIZE;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::model::{Node, Trie};

/// Builds complete tries of a fixed height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrieBuilder {
    max_depth: usize,
    node_limit: Option<usize>,
}

impl Default for TrieBuilder {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl TrieBuilder {
    /// Creates a builder honoring the depth ceiling and node budget of `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            node_limit: config.node_limit,
        }
    }

    /// Caps the number of nodes a single build may allocate.
    pub fn with_node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Builds a complete tree of height `depth`.
    ///
    /// # Errors
    ///
    /// - `InvalidDepth` if `depth` is zero
    /// - `DepthLimitExceeded` if `depth` is above the ceiling
    /// - `AllocationFailure` if a node cannot be allocated or the node budget
    ///   runs out; nothing built so far survives the call
    pub fn build(&self, depth: usize) -> EngineResult<Trie> {
        if depth == 0 {
            return Err(EngineError::InvalidDepth(depth.to_string()));
        }
        if depth > self.max_depth {
            return Err(EngineError::DepthLimitExceeded {
                depth,
                max: self.max_depth,
            });
        }

        let mut remaining = self.node_limit.unwrap_or(usize::MAX);
        let root = build_node(0, depth, &mut remaining).map_err(|e| {
            warn!("Failed to build tree of depth {}: {}", depth, e);
            e
        })?;
        debug!(
            "Built tree of depth {} ({} nodes)",
            depth,
            Trie::expected_node_count(depth).unwrap_or(usize::MAX)
        );
        Ok(Trie::from_parts(root, depth))
    }
}

/// Builds the subtree rooted at `level`.
///
/// When a child fails, the siblings already built are owned by `children`
/// and are dropped as the error propagates.
fn build_node(level: usize, depth: usize, remaining: &mut usize) -> EngineResult<Node> {
    if *remaining == 0 {
        return Err(EngineError::AllocationFailure);
    }
    *remaining -= 1;

    if level == depth {
        return Ok(Node::leaf());
    }

    let mut children = Vec::new();
    children
        .try_reserve_exact(ALPHABET_SIZE)
        .map_err(|_| EngineError::AllocationFailure)?;
    for _ in 0..ALPHABET_SIZE {
        children.push(build_node(level + 1, depth, remaining)?);
    }
    Ok(Node::inner(children))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Base;

    #[test]
    fn test_build_counts() {
        let builder = TrieBuilder::default();
        for m in 1..=5 {
            let trie = builder.build(m).unwrap();
            assert_eq!(trie.depth(), m);
            assert_eq!(trie.leaf_count(), 4usize.pow(m as u32));
            assert_eq!(trie.node_count(), (4usize.pow(m as u32 + 1) - 1) / 3);
            assert_eq!(Some(trie.node_count()), Trie::expected_node_count(m));
            assert_eq!(trie.total_occurrences(), 0);
        }
    }

    #[test]
    fn test_every_path_has_length_m() {
        fn leaf_depths(node: &Node, level: usize, out: &mut Vec<usize>) {
            if node.is_leaf() {
                out.push(level);
            } else {
                assert_eq!(node.children().len(), ALPHABET_SIZE);
                for child in node.children() {
                    leaf_depths(child, level + 1, out);
                }
            }
        }

        let trie = TrieBuilder::default().build(3).unwrap();
        let mut depths = Vec::new();
        leaf_depths(trie.root(), 0, &mut depths);
        assert_eq!(depths.len(), 64);
        assert!(depths.iter().all(|&d| d == 3));
    }

    #[test]
    fn test_every_gene_reaches_a_leaf() {
        let trie = TrieBuilder::default().build(2).unwrap();
        for a in Base::ALL {
            for b in Base::ALL {
                let leaf = trie.leaf([a, b]).unwrap();
                assert!(leaf.positions().is_empty());
            }
        }
    }

    #[test]
    fn test_zero_depth_rejected() {
        let result = TrieBuilder::default().build(0);
        assert!(matches!(result, Err(EngineError::InvalidDepth(_))));
    }

    #[test]
    fn test_depth_ceiling() {
        let config = EngineConfig {
            max_depth: 3,
            ..Default::default()
        };
        let builder = TrieBuilder::from_config(&config);
        assert!(builder.build(3).is_ok());
        assert_eq!(
            builder.build(4),
            Err(EngineError::DepthLimitExceeded { depth: 4, max: 3 })
        );
    }

    #[test]
    fn test_node_budget_exhausted() {
        // m=2 needs 21 nodes
        let builder = TrieBuilder::default().with_node_limit(20);
        assert_eq!(builder.build(2), Err(EngineError::AllocationFailure));

        let builder = TrieBuilder::default().with_node_limit(21);
        assert_eq!(builder.build(2).unwrap().node_count(), 21);
    }
}
