// Copyright (c) 2025 Triseq Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Thread-safe handle to a sequence dictionary.
//!
//! Merges and deletions touch nodes scattered across the whole trie, so the
//! dictionary is guarded by a single exclusive lock rather than per-node locks.

use std::sync::Arc;

use parking_lot::Mutex;

use super::{SeqTrieConfig, SeqTrieResult, SeqTrieStats, SequenceDictionary};

/// A cloneable, lock-protected [`SequenceDictionary`].
#[derive(Debug, Clone, Default)]
pub struct SharedSequenceDictionary {
    inner: Arc<Mutex<SequenceDictionary>>,
}

impl SharedSequenceDictionary {
    /// Creates an empty shared dictionary with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty shared dictionary with the specified configuration.
    pub fn with_config(config: SeqTrieConfig) -> Self {
        SequenceDictionary::with_config(config).into()
    }

    /// See [`SequenceDictionary::add`].
    pub fn add(&self, path: impl AsRef<str>) -> SeqTrieResult<bool> {
        self.inner.lock().add(path)
    }

    /// See [`SequenceDictionary::remove`].
    pub fn remove(&self, path: impl AsRef<str>) -> SeqTrieResult<bool> {
        self.inner.lock().remove(path)
    }

    /// See [`SequenceDictionary::exists`].
    pub fn exists(&self, path: impl AsRef<str>) -> SeqTrieResult<bool> {
        self.inner.lock().exists(path)
    }

    /// See [`SequenceDictionary::set_name`].
    pub fn set_name(&self, path: impl AsRef<str>, name: impl AsRef<str>) -> SeqTrieResult<bool> {
        self.inner.lock().set_name(path, name)
    }

    /// Returns an owned copy of the class name; the borrow cannot outlive the lock.
    pub fn get_name(&self, path: impl AsRef<str>) -> SeqTrieResult<Option<String>> {
        Ok(self.inner.lock().get_name(path)?.map(str::to_owned))
    }

    /// See [`SequenceDictionary::union`].
    pub fn union(&self, first: impl AsRef<str>, second: impl AsRef<str>) -> SeqTrieResult<bool> {
        self.inner.lock().union(first, second)
    }

    /// See [`SequenceDictionary::class_size`].
    pub fn class_size(&self, path: impl AsRef<str>) -> SeqTrieResult<Option<usize>> {
        self.inner.lock().class_size(path)
    }

    /// See [`SequenceDictionary::equivalent`].
    pub fn equivalent(&self, first: impl AsRef<str>, second: impl AsRef<str>) -> SeqTrieResult<bool> {
        self.inner.lock().equivalent(first, second)
    }

    /// See [`SequenceDictionary::node_count`].
    pub fn node_count(&self) -> usize {
        self.inner.lock().node_count()
    }

    /// See [`SequenceDictionary::class_count`].
    pub fn class_count(&self) -> usize {
        self.inner.lock().class_count()
    }

    /// See [`SequenceDictionary::stats`].
    pub fn stats(&self) -> SeqTrieStats {
        self.inner.lock().stats()
    }

    /// See [`SequenceDictionary::check_invariants`].
    pub fn check_invariants(&self) -> SeqTrieResult<()> {
        self.inner.lock().check_invariants()
    }

    /// Runs `f` with exclusive access, so several operations apply atomically.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut SequenceDictionary) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }
}

impl From<SequenceDictionary> for SharedSequenceDictionary {
    fn from(dict: SequenceDictionary) -> Self {
        Self {
            inner: Arc::new(Mutex::new(dict)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn test_with_lock_runs_atomically() {
        let shared = SharedSequenceDictionary::new();
        let merged = shared.with_lock(|dict| {
            dict.add("0").unwrap();
            dict.add("1").unwrap();
            dict.union("0", "1").unwrap()
        });
        assert!(merged);
        assert!(shared.equivalent("0", "1").unwrap());
    }

    /// Concurrent inserts on disjoint branches followed by concurrent merges
    /// into the root-level node "0" leave a single consistent class.
    #[test]
    fn test_concurrent_add_and_union() {
        const THREAD_COUNT: usize = 6;
        const PATHS_PER_THREAD: usize = 20;

        let shared = SharedSequenceDictionary::new();
        shared.add("0").unwrap();
        let barrier = Arc::new(Barrier::new(THREAD_COUNT));

        let handles: Vec<_> = (0..THREAD_COUNT)
            .map(|thread_id| {
                let dict = shared.clone();
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    for j in 0..PATHS_PER_THREAD {
                        // Each thread owns the branch "2<thread digits>1..."
                        let path = format!("2{}{}", ternary(thread_id), "1".repeat(j + 1));
                        assert!(dict.add(&path).unwrap());
                        assert!(dict.union("0", &path).unwrap());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(
            shared.class_size("0").unwrap(),
            Some(1 + THREAD_COUNT * PATHS_PER_THREAD)
        );
        assert_eq!(shared.stats().merges, (THREAD_COUNT * PATHS_PER_THREAD) as u64);
        shared.check_invariants().unwrap();
    }

    /// Fixed-width base-3 spelling of `n`, prefixed so that branches never nest.
    fn ternary(mut n: usize) -> String {
        let mut digits = String::new();
        for _ in 0..3 {
            digits.insert(0, char::from(b'0' + (n % 3) as u8));
            n /= 3;
        }
        format!("{digits}0")
    }
}
