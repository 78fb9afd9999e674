// Copyright (c) 2025 Triseq Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration options for the sequence trie.

/// Configuration for a [`SequenceDictionary`](super::SequenceDictionary).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqTrieConfig {
    /// Number of node and class slots reserved up front.
    pub initial_capacity: usize,

    /// Maximum number of live nodes, root included.
    /// `None` leaves the trie bounded only by memory.
    pub max_nodes: Option<usize>,
}

impl SeqTrieConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of slots reserved up front.
    ///
    /// # Arguments
    ///
    /// * `initial_capacity` - Node and class slots to pre-allocate.
    ///
    /// # Returns
    ///
    /// Self with the updated configuration.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Caps the number of live nodes. Values below one are raised to one,
    /// since the root always exists.
    ///
    /// # Arguments
    ///
    /// * `max_nodes` - The node budget, root included.
    ///
    /// # Returns
    ///
    /// Self with the updated configuration.
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes.max(1));
        self
    }

    /// Removes any node budget.
    pub fn unbounded(mut self) -> Self {
        self.max_nodes = None;
        self
    }
}

impl Default for SeqTrieConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            max_nodes: None,
        }
    }
}
