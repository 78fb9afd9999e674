//! Triseq Library
//!
//! A dictionary of sequences over the alphabet `{0, 1, 2}`, stored as a
//! ternary trie whose nodes are partitioned into named, mergeable equivalence
//! classes. The library also carries the configuration, error reporting and
//! command-script layers used by the `triseq` binary.
//!
//! # Architecture
//!
//! - [`data_structures::seq_trie`] holds the dictionary and its thread-safe handle
//! - [`script`] parses and executes line-oriented command scripts
//! - [`config`] loads layered configuration (defaults, file, environment)
//! - [`error`] defines the error hierarchy and error reporting

pub mod config;
pub mod data_structures;
pub mod error;
pub mod script;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for triseq.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function.
///
/// Installs the tracing-backed error reporter. Safe to call more than once.
pub fn init() {
    let _ = error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter));
}
