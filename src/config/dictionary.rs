//! Dictionary configuration module.
//!
//! Sizing options for the sequence dictionary built by the command runner.

use super::{ConfigResult, Validate};
use crate::data_structures::seq_trie::SeqTrieConfig;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Sequence dictionary configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DictionaryConfig {
    /// Node and class slots reserved up front
    pub initial_capacity: usize,

    /// Maximum number of live nodes, root included (unbounded when absent)
    pub max_nodes: Option<usize>,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        let defaults = SeqTrieConfig::default();
        Self {
            initial_capacity: defaults.initial_capacity,
            max_nodes: defaults.max_nodes,
        }
    }
}

impl Validate for DictionaryConfig {
    fn validate(&self) -> ConfigResult<()> {
        // The root always occupies one node
        if self.max_nodes == Some(0) {
            return Err(ConfigError::ValueOutOfRange {
                key: "dictionary.max_nodes".to_string(),
                message: "must be at least 1 to hold the root".to_string(),
            });
        }

        Ok(())
    }
}

impl From<&DictionaryConfig> for SeqTrieConfig {
    fn from(config: &DictionaryConfig) -> Self {
        let trie = SeqTrieConfig::new().with_initial_capacity(config.initial_capacity);
        match config.max_nodes {
            Some(limit) => trie.with_max_nodes(limit),
            None => trie.unbounded(),
        }
    }
}
