//! Sliding-window insertion of a sequence into a trie.
//!
//! Every window of length m is inserted at its 0-based start offset. Offsets
//! are local to one call: indexing two sequences numbers each from 0, and
//! both sets accumulate in the same leaves.

use log::{debug, info, warn};

use crate::alphabet::Base;
use crate::error::{EngineError, EngineResult};
use crate::model::Trie;

/// A window that was not inserted because it contains a non-base symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedWindow {
    /// Start offset of the window
    pub offset: usize,
    /// First offending symbol inside the window
    pub symbol: char,
}

impl SkippedWindow {
    /// The localized error this skip corresponds to.
    pub fn to_error(self) -> EngineError {
        EngineError::InvalidSymbol {
            offset: self.offset,
            symbol: self.symbol,
        }
    }
}

/// Outcome of one indexing call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexReport {
    /// Length of the scanned sequence
    pub length: usize,
    /// Windows examined (`length - m + 1`, or 0 when too short)
    pub windows: usize,
    /// Windows whose offset was recorded
    pub inserted: usize,
    /// Windows rejected with `InvalidSymbol`
    pub skipped: Vec<SkippedWindow>,
}

impl IndexReport {
    /// Returns true if the sequence was shorter than m.
    pub fn is_too_short(&self, depth: usize) -> bool {
        self.length < depth
    }
}

/// Inserts every length-m window of `sequence` into `trie`.
///
/// `sequence` must already be normalized (uppercase, no line breaks).
/// Windows containing a symbol outside {A, C, G, T} are skipped one at a
/// time; the rest of the scan continues.
///
/// # Errors
///
/// `AllocationFailure` if a leaf buffer cannot grow. Offsets inserted before
/// the failure stay in the trie; the failing one is not recorded.
pub fn index_sequence(trie: &mut Trie, sequence: &[u8]) -> EngineResult<IndexReport> {
    let depth = trie.depth();
    let mut report = IndexReport {
        length: sequence.len(),
        ..Default::default()
    };

    if sequence.len() < depth {
        debug!(
            "Sequence of length {} is shorter than m={}, nothing to index",
            sequence.len(),
            depth
        );
        return Ok(report);
    }

    let projected: Vec<Option<Base>> = sequence.iter().map(|&b| Base::from_byte(b)).collect();
    let mut window: Vec<Base> = Vec::with_capacity(depth);

    for offset in 0..=sequence.len() - depth {
        report.windows += 1;
        let slice = &projected[offset..offset + depth];

        if let Some(i) = slice.iter().position(Option::is_none) {
            let skipped = SkippedWindow {
                offset,
                symbol: char::from(sequence[offset + i]),
            };
            debug!("{}", skipped.to_error());
            report.skipped.push(skipped);
            continue;
        }

        window.clear();
        window.extend(slice.iter().flatten());

        if let Some(leaf) = trie.leaf_mut(&window) {
            if let Err(e) = leaf.push_position(offset) {
                warn!("Could not record offset {}: {}", offset, e);
                return Err(e);
            }
            report.inserted += 1;
        }
    }

    info!(
        "Indexed {} windows ({} inserted, {} skipped)",
        report.windows,
        report.inserted,
        report.skipped.len()
    );
    Ok(report)
}
