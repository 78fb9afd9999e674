//! Test utilities and fixtures for triseq.
//!
//! Reusable proptest strategies for paths and dictionary operations, and a
//! temporary-directory fixture for configuration and script files.

use proptest::prelude::*;
use proptest::strategy::{BoxedStrategy, Strategy};
use tempfile::TempDir;

use crate::data_structures::seq_trie::{SeqTrieResult, SequenceDictionary};

/// Maximum length of generated paths.
pub const MAX_PATH_LENGTH: usize = 6;

/// Generate valid paths of 1 to `max_length` digits.
pub fn path_strategy(max_length: usize) -> BoxedStrategy<String> {
    proptest::collection::vec(prop_oneof![Just('0'), Just('1'), Just('2')], 1..=max_length)
        .prop_map(|digits| digits.into_iter().collect::<String>())
        .boxed()
}

/// Generate strings that are not valid paths: empty, or containing a foreign character.
pub fn invalid_path_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        Just(String::new()),
        (path_strategy(4), "[^012]", path_strategy(4)).prop_map(|(head, bad, tail)| {
            format!("{head}{bad}{tail}")
        }),
    ]
    .boxed()
}

/// A dictionary operation for randomized testing.
#[derive(Debug, Clone)]
pub enum Operation {
    /// `add(path)`
    Add(String),
    /// `remove(path)`
    Remove(String),
    /// `set_name(path, name)`
    SetName(String, String),
    /// `union(first, second)`
    Union(String, String),
}

impl Operation {
    /// Applies the operation, discarding the boolean result.
    pub fn apply(&self, dict: &mut SequenceDictionary) -> SeqTrieResult<()> {
        match self {
            Self::Add(path) => dict.add(path).map(drop),
            Self::Remove(path) => dict.remove(path).map(drop),
            Self::SetName(path, name) => dict.set_name(path, name).map(drop),
            Self::Union(first, second) => dict.union(first, second).map(drop),
        }
    }
}

/// Generate random operations over short paths, biased towards insertion.
pub fn operation_strategy() -> BoxedStrategy<Operation> {
    let path = || path_strategy(MAX_PATH_LENGTH);
    prop_oneof![
        4 => path().prop_map(Operation::Add),
        2 => path().prop_map(Operation::Remove),
        2 => (path(), "[A-Z]{1,3}").prop_map(|(p, n)| Operation::SetName(p, n)),
        3 => (path(), path()).prop_map(|(a, b)| Operation::Union(a, b)),
    ]
    .boxed()
}

/// Test fixture for tests that need files on disk.
pub struct TestFixture {
    /// Temporary directory for test files
    pub temp_dir: TempDir,
}

impl TestFixture {
    /// Create a new test fixture.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    /// Write `contents` to `name` inside the fixture directory.
    pub fn write_file<C: AsRef<[u8]>>(
        &self,
        name: &str,
        contents: C,
    ) -> std::io::Result<std::path::PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}
