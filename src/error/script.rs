//! Script error module.
//!
//! Errors raised while parsing or running a command script. Invalid path and
//! name arguments are not script errors: they are reported per command and
//! never abort a run.

use thiserror::Error;

use crate::data_structures::seq_trie::SeqTrieError;

/// Errors that can occur while parsing or executing a command script.
#[derive(Error, Debug)]
pub enum ScriptError {
    /// The first token of a line is not a known command.
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand {
        /// 1-based line number
        line: usize,
        /// The unrecognised command word
        command: String,
    },

    /// A command was given the wrong number of arguments.
    #[error("line {line}: '{command}' expects {expected} argument(s), got {actual}")]
    Arity {
        /// 1-based line number
        line: usize,
        /// The command word
        command: String,
        /// Number of arguments the command takes
        expected: usize,
        /// Number of arguments supplied
        actual: usize,
    },

    /// A command failed in a way that stops the run.
    #[error("line {line}: {source}")]
    Execution {
        /// 1-based line number
        line: usize,
        /// The underlying dictionary error
        #[source]
        source: SeqTrieError,
    },
}

impl ScriptError {
    /// Line number the error refers to.
    pub fn line(&self) -> usize {
        match self {
            Self::UnknownCommand { line, .. }
            | Self::Arity { line, .. }
            | Self::Execution { line, .. } => *line,
        }
    }
}
