//! Data structures for triseq.
//!
//! All implementations adhere to the project requirements:
//! - No unsafe code
//! - Explicit result types instead of global error state
//! - Arena-backed storage with stable keys instead of raw links

pub mod seq_trie;

// Re-export common data structures
pub use seq_trie::{
    SeqPath, SeqTrieConfig, SeqTrieError, SeqTrieResult, SequenceDictionary,
    SharedSequenceDictionary,
};
