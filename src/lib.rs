//! # genetrie - DNA Gene Indexer
//!
//! Indexes DNA sequences over the alphabet {A, C, G, T} in a complete 4-ary
//! tree of fixed height m, recording for every length-m gene each offset at
//! which it starts.
//!
//! ## Architecture
//!
//! The engine is split leaves first:
//! - `alphabet`: base projection (A=0, C=1, G=2, T=3) and normalization
//! - `model`: `Node` and `Trie`, navigation and teardown
//! - `builder`: eager construction of the complete tree
//! - `indexer`: sliding-window insertion of a sequence
//! - `query`: exact search, ordered enumeration, frequency extrema
//! - `session`: the explicit Uninitialized/Built/Indexed/Destroyed state
//!
//! Around it sits the console glue:
//! - `fasta`: reading a named sequence file
//! - `command`: parsing `bio <action> [argument]` lines
//! - `report`: human-readable output
//! - `controller`: the command loop
//!
//! ## Example
//!
//! ```rust
//! use genetrie::query::ExtremumKind;
//! use genetrie::session::Session;
//!
//! let mut session = Session::default();
//! session.start(2).unwrap();
//! session.index(b"ACGTACGT").unwrap();
//!
//! assert_eq!(session.search("AC").unwrap(), &[0, 4]);
//! let max = session.extremum(ExtremumKind::Max).unwrap();
//! assert_eq!(max.count, 2);
//! ```

pub mod alphabet;
pub mod builder;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod fasta;
pub mod indexer;
pub mod model;
pub mod query;
pub mod report;
pub mod session;
