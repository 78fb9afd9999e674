//! Tests for the error module.
//!
//! This module contains tests for error handling and error types.

use crate::data_structures::seq_trie::SeqTrieError;
use crate::error::config::ConfigError;
use crate::error::script::ScriptError;
use crate::error::{
    get_error_reporting, set_error_reporter, ErrorContext, ErrorReporter, ErrorReporting,
    TracingErrorReporter, TriseqError,
};
use std::error::Error as _;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Test that error context can be created and displayed properly.
#[test]
fn test_error_context_display() {
    let error = TriseqError::Custom("test error".to_string());
    let context = ErrorContext::new(error, "test_component").with_details("additional details");

    let display_string = format!("{context}");
    assert!(display_string.contains("test error"));
    assert!(display_string.contains("test_component"));
    assert!(display_string.contains("additional details"));
}

/// Test that nested errors work correctly.
#[test]
fn test_nested_errors() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let triseq_error = TriseqError::Io(io_error);

    let error_string = format!("{triseq_error}");
    assert!(error_string.contains("file not found"));

    let triseq_error: TriseqError = SeqTrieError::CapacityExhausted { limit: 4 }.into();
    assert_eq!(
        triseq_error.to_string(),
        "Dictionary error: Node budget of 4 exhausted"
    );

    let triseq_error: TriseqError = ConfigError::ValidationError("bad".to_string()).into();
    assert!(matches!(triseq_error, TriseqError::Config(_)));
}

/// Test that a stopped script keeps the dictionary error as its source.
#[test]
fn test_script_error_source_chain() {
    let error = ScriptError::Execution {
        line: 3,
        source: SeqTrieError::CapacityExhausted { limit: 2 },
    };
    assert_eq!(error.line(), 3);
    assert!(error.to_string().starts_with("line 3:"));

    let source = error.source().expect("execution errors carry a source");
    assert_eq!(source.to_string(), "Node budget of 2 exhausted");

    let triseq_error = TriseqError::from(error);
    assert!(triseq_error.to_string().starts_with("Script error: line 3:"));
}

/// Mock error reporter for testing.
#[derive(Debug)]
struct MockErrorReporter {
    reported_count: AtomicUsize,
}

impl MockErrorReporter {
    fn new() -> Self {
        Self {
            reported_count: AtomicUsize::new(0),
        }
    }

    fn reported_count(&self) -> usize {
        self.reported_count.load(Ordering::SeqCst)
    }
}

impl ErrorReporter for MockErrorReporter {
    fn report(&self, _context: ErrorContext) {
        self.reported_count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Test that a reporting facade routes to its reporter.
#[test]
fn test_error_reporting_routes_to_reporter() {
    let reporter = Arc::new(MockErrorReporter::new());
    let reporting = ErrorReporting::new(reporter.clone());

    reporting.report(ErrorContext::new(
        TriseqError::Custom("first".to_string()),
        "test",
    ));
    reporting.report(ErrorContext::new(
        SeqTrieError::EmptyName,
        "test",
    ));

    assert_eq!(reporter.reported_count(), 2);
}

/// Test that the global error reporter works correctly.
///
/// This is the only test that installs the global reporter. Other tests may
/// report through it concurrently, so the count is a lower bound.
#[test]
fn test_global_error_reporter() {
    let reporter = Arc::new(MockErrorReporter::new());
    assert!(set_error_reporter(reporter.clone()));

    get_error_reporting().report(ErrorContext::new(
        TriseqError::Custom("global".to_string()),
        "test",
    ));
    assert!(reporter.reported_count() >= 1);

    // A second installation is refused
    assert!(!set_error_reporter(Arc::new(TracingErrorReporter)));
}

/// Test that the tracing error reporter accepts reports.
#[test]
fn test_tracing_error_reporter() {
    let reporter = TracingErrorReporter;
    let error = TriseqError::Custom("tracing test".to_string());
    let context = ErrorContext::new(error, "test_component").with_details("more");

    // This should not panic
    reporter.report(context);
}

/// Test that the default facade falls back without panicking.
#[test]
fn test_unconfigured_reporting_fallback() {
    let reporting = ErrorReporting::default();
    reporting.report(ErrorContext::new(
        TriseqError::Custom("fallback".to_string()),
        "test",
    ));
}
