//! Error taxonomy of the indexing engine.
//!
//! Every condition here is recoverable at the call site: the session keeps
//! running and the trie is left exactly as it was before the failing call.

use thiserror::Error;

/// Errors that can occur while building, filling or querying a trie.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid depth '{0}': m must be a positive integer")]
    InvalidDepth(String),

    #[error("Depth {depth} exceeds the configured maximum of {max}")]
    DepthLimitExceeded { depth: usize, max: usize },

    #[error("A tree already exists for this session")]
    AlreadyInitialized,

    #[error("Memory allocation failed")]
    AllocationFailure,

    #[error("Invalid symbol '{symbol}' in window at offset {offset}")]
    InvalidSymbol { offset: usize, symbol: char },

    #[error("Sequence too short (length {length}, m={depth})")]
    SequenceTooShort { length: usize, depth: usize },

    #[error("No tree has been created yet. Use 'bio start <m>' first")]
    UninitializedTrie,

    #[error("The session has been closed")]
    SessionClosed,

    #[error("Not found")]
    NotFound,
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
