//! Read-only queries over a filled trie.
//!
//! - `search_exact`: offsets of one gene
//! - `genes` / `enumerate_all`: every observed gene in lexicographic order
//! - `extremum`: the most or least frequent observed genes
//!
//! None of these mutate the tree, and all traversals visit children in
//! A, C, G, T order.

use crate::alphabet::Base;
use crate::error::{EngineError, EngineResult};
use crate::model::{Node, Trie};

/// One observed gene and every offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneOccurrences<'a> {
    pub gene: String,
    pub positions: &'a [usize],
}

impl GeneOccurrences<'_> {
    /// Number of occurrences.
    pub fn count(&self) -> usize {
        self.positions.len()
    }
}

/// Which end of the frequency range to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtremumKind {
    Max,
    Min,
}

impl std::fmt::Display for ExtremumKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtremumKind::Max => write!(f, "most"),
            ExtremumKind::Min => write!(f, "least"),
        }
    }
}

/// Genes sharing the extreme occurrence count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extremum<'a> {
    pub kind: ExtremumKind,
    /// The shared occurrence count
    pub count: usize,
    /// All genes with that count, in lexicographic order
    pub genes: Vec<GeneOccurrences<'a>>,
}

/// Looks up the offsets of `candidate`.
///
/// The candidate is matched case-insensitively. A candidate of the wrong
/// length or with a non-base symbol is reported as `NotFound`, the same as a
/// gene that was never indexed.
pub fn search_exact<'a>(trie: &'a Trie, candidate: &str) -> EngineResult<&'a [usize]> {
    if candidate.len() != trie.depth() {
        return Err(EngineError::NotFound);
    }
    let bases = candidate
        .bytes()
        .map(Base::from_byte)
        .collect::<Option<Vec<Base>>>()
        .ok_or(EngineError::NotFound)?;

    match trie.leaf(bases) {
        Some(leaf) if !leaf.positions().is_empty() => Ok(leaf.positions()),
        _ => Err(EngineError::NotFound),
    }
}

/// Lazy depth-first walk over the observed genes.
///
/// Each call to [`genes`] starts a fresh walk, so the sequence can be
/// restarted at will and is identical between calls as long as nothing is
/// indexed in between.
#[derive(Debug)]
pub struct Genes<'a> {
    // (node, next child slot to visit)
    stack: Vec<(&'a Node, usize)>,
    path: Vec<u8>,
}

impl<'a> Iterator for Genes<'a> {
    type Item = GeneOccurrences<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, cursor) = self.stack.last_mut()?;
            let node: &'a Node = *node;

            if node.is_leaf() {
                self.stack.pop();
                let found = (!node.positions().is_empty()).then(|| GeneOccurrences {
                    gene: self.path.iter().map(|&b| char::from(b)).collect(),
                    positions: node.positions(),
                });
                self.path.pop();
                if found.is_some() {
                    return found;
                }
                continue;
            }

            match node.children().get(*cursor) {
                Some(child) => {
                    let slot = *cursor;
                    *cursor += 1;
                    if let Some(base) = Base::from_index(slot) {
                        self.path.push(base.symbol());
                    }
                    self.stack.push((child, 0));
                }
                None => {
                    self.stack.pop();
                    self.path.pop();
                }
            }
        }
    }
}

/// Starts a lexicographic walk over every gene with at least one occurrence.
pub fn genes(trie: &Trie) -> Genes<'_> {
    Genes {
        stack: vec![(trie.root(), 0)],
        path: Vec::with_capacity(trie.depth()),
    }
}

/// Collects every observed gene with its offsets.
///
/// Returns `NotFound` if nothing has been indexed.
pub fn enumerate_all(trie: &Trie) -> EngineResult<Vec<GeneOccurrences<'_>>> {
    let all: Vec<_> = genes(trie).collect();
    if all.is_empty() {
        return Err(EngineError::NotFound);
    }
    Ok(all)
}

/// Returns every gene whose occurrence count is the largest (`Max`) or the
/// smallest positive (`Min`) count in the trie. Ties are all returned.
///
/// Two passes: the first finds the target count, the second collects the
/// genes that reach it. Genes never observed are not candidates for `Min`.
pub fn extremum(trie: &Trie, kind: ExtremumKind) -> EngineResult<Extremum<'_>> {
    let (min, max) = genes(trie)
        .map(|g| g.count())
        .fold(None, |acc: Option<(usize, usize)>, n| match acc {
            None => Some((n, n)),
            Some((lo, hi)) => Some((lo.min(n), hi.max(n))),
        })
        .ok_or(EngineError::NotFound)?;

    let count = match kind {
        ExtremumKind::Max => max,
        ExtremumKind::Min => min,
    };
    let hits = genes(trie).filter(|g| g.count() == count).collect();

    Ok(Extremum {
        kind,
        count,
        genes: hits,
    })
}
