//! Session state: the one trie threaded through build, index and query.
//!
//! ```text
//! Uninitialized --start--> Built --index--> Indexed --index--+
//!       |                    |                 ^             |
//!       |                    |                 +-------------+
//!       +-------- teardown --+----- teardown --+--> Destroyed
//! ```
//!
//! Queries are legal in `Built` and `Indexed`. A second `start` while a tree
//! exists is rejected and leaves the tree untouched.

use log::info;

use crate::builder::TrieBuilder;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::indexer::{index_sequence, IndexReport};
use crate::model::{ReleaseStats, Trie};
use crate::query::{self, Extremum, ExtremumKind, GeneOccurrences};

/// Where a session is in its lifecycle.
#[derive(Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No tree yet
    #[default]
    Uninitialized,
    /// Tree built, nothing indexed
    Built(Trie),
    /// At least one successful `index` call
    Indexed(Trie),
    /// Torn down; the session accepts no further work
    Destroyed,
}

impl SessionState {
    /// Short lowercase name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Built(_) => "built",
            SessionState::Indexed(_) => "indexed",
            SessionState::Destroyed => "destroyed",
        }
    }
}

/// Parses a user-supplied depth token.
///
/// Anything that is not an integer is an `InvalidDepth`; sign and range are
/// checked by [`Session::start`].
pub fn parse_depth(raw: &str) -> EngineResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| EngineError::InvalidDepth(raw.to_string()))
}

/// One indexing session.
#[derive(Debug, Default)]
pub struct Session {
    builder: TrieBuilder,
    state: SessionState,
}

impl Session {
    /// Creates an uninitialized session.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            builder: TrieBuilder::from_config(config),
            state: SessionState::Uninitialized,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The session's tree, if one is live.
    pub fn trie(&self) -> EngineResult<&Trie> {
        match &self.state {
            SessionState::Built(trie) | SessionState::Indexed(trie) => Ok(trie),
            SessionState::Uninitialized => Err(EngineError::UninitializedTrie),
            SessionState::Destroyed => Err(EngineError::SessionClosed),
        }
    }

    /// Builds the session's tree with gene length `depth`.
    pub fn start(&mut self, depth: i64) -> EngineResult<&Trie> {
        let depth = usize::try_from(depth)
            .ok()
            .filter(|&d| d > 0)
            .ok_or_else(|| EngineError::InvalidDepth(depth.to_string()))?;

        match self.state {
            SessionState::Uninitialized => {}
            SessionState::Built(_) | SessionState::Indexed(_) => {
                return Err(EngineError::AlreadyInitialized)
            }
            SessionState::Destroyed => return Err(EngineError::SessionClosed),
        }

        let trie = self.builder.build(depth)?;
        info!("Session started with m={} ({} leaves)", depth, trie.leaf_count());
        self.state = SessionState::Built(trie);
        self.trie()
    }

    /// Indexes one normalized sequence into the session's tree.
    pub fn index(&mut self, sequence: &[u8]) -> EngineResult<IndexReport> {
        let report = match &mut self.state {
            SessionState::Built(trie) | SessionState::Indexed(trie) => {
                index_sequence(trie, sequence)?
            }
            SessionState::Uninitialized => return Err(EngineError::UninitializedTrie),
            SessionState::Destroyed => return Err(EngineError::SessionClosed),
        };

        if matches!(self.state, SessionState::Built(_)) {
            if let SessionState::Built(trie) = std::mem::take(&mut self.state) {
                self.state = SessionState::Indexed(trie);
            }
        }
        Ok(report)
    }

    /// Offsets of `gene`, or `NotFound`.
    pub fn search(&self, gene: &str) -> EngineResult<&[usize]> {
        query::search_exact(self.trie()?, gene)
    }

    /// Every observed gene, or `NotFound` if nothing is indexed.
    pub fn all(&self) -> EngineResult<Vec<GeneOccurrences<'_>>> {
        query::enumerate_all(self.trie()?)
    }

    /// Most (`Max`) or least (`Min`) frequent observed genes.
    pub fn extremum(&self, kind: ExtremumKind) -> EngineResult<Extremum<'_>> {
        query::extremum(self.trie()?, kind)
    }

    /// Releases the tree and closes the session.
    ///
    /// Returns the release counts if a tree was live. Calling it again is a
    /// no-op returning `None`.
    pub fn teardown(&mut self) -> Option<ReleaseStats> {
        let previous = std::mem::replace(&mut self.state, SessionState::Destroyed);
        match previous {
            SessionState::Built(trie) | SessionState::Indexed(trie) => {
                let stats = trie.release();
                info!(
                    "Released {} nodes and {} offsets",
                    stats.nodes, stats.positions
                );
                Some(stats)
            }
            SessionState::Uninitialized | SessionState::Destroyed => None,
        }
    }
}
