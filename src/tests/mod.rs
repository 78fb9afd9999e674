//! Test modules for triseq.
//!
//! This module contains crate-internal test suites:
//! - Configuration loading and validation
//! - Error types and reporting
//! - Scenario and property-based tests for the sequence trie
//! - Shared strategies and fixtures

pub mod error_tests;
pub mod test_utils;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{
    invalid_path_strategy, operation_strategy, path_strategy, Operation, TestFixture,
};
