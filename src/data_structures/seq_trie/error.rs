// Copyright (c) 2025 Triseq Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the sequence trie.
//!
//! "Not found" and "no change" are ordinary results, never errors. Only
//! malformed arguments and an exhausted node budget surface here.

/// Errors that can occur in sequence trie operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeqTrieError {
    /// A path argument is empty or contains a character other than `0`, `1`, `2`.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// The rejected path.
        path: String,
        /// Why the path was rejected.
        reason: String,
    },

    /// A class name argument is empty.
    #[error("Class name must not be empty")]
    EmptyName,

    /// Insertion would exceed the configured node budget.
    #[error("Node budget of {limit} exhausted")]
    CapacityExhausted {
        /// The configured maximum number of live nodes.
        limit: usize,
    },

    /// A structural invariant was found broken by `check_invariants`.
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

impl SeqTrieError {
    /// Returns `true` for the invalid-argument category: bad paths and empty names.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidPath { .. } | Self::EmptyName)
    }
}

/// Result type for sequence trie operations.
pub type SeqTrieResult<T> = Result<T, SeqTrieError>;
