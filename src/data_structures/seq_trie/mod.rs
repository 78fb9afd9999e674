// Copyright (c) 2025 Triseq Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Sequence trie with mergeable equivalence classes.
//!
//! A dictionary of sequences over the alphabet `{0, 1, 2}` stored as a ternary
//! trie. Every live node also belongs to exactly one equivalence class; classes
//! can be named and merged, and the membership survives partial deletions of
//! the trie.
//!
//! # Storage
//!
//! Nodes and classes live in two generational arenas. A node holds the key of
//! its class and the keys of its neighbours in the class member list; a class
//! holds the keys of the list ends. Freeing a class invalidates its key, so a
//! class can never be reclaimed twice.
//!
//! # Example
//!
//! ```
//! use triseq_lib::data_structures::seq_trie::SequenceDictionary;
//!
//! let mut dict = SequenceDictionary::new();
//! assert!(dict.add("012").unwrap());
//! assert!(dict.add("1").unwrap());
//!
//! dict.set_name("012", "X").unwrap();
//! dict.set_name("1", "Y").unwrap();
//! assert!(dict.union("012", "1").unwrap());
//! assert_eq!(dict.get_name("1").unwrap(), Some("XY"));
//!
//! assert!(dict.remove("0").unwrap());
//! assert!(!dict.exists("012").unwrap());
//! assert_eq!(dict.get_name("1").unwrap(), Some("XY"));
//! ```

mod class;
mod config;
mod error;
mod node;
mod path;
mod shared;

use std::collections::HashSet;

use slotmap::SlotMap;
use tracing::{debug, trace};

pub use class::EquivalenceClass;
pub use config::SeqTrieConfig;
pub use error::{SeqTrieError, SeqTrieResult};
pub use node::{ClassKey, NodeKey, SeqNode};
pub use path::{Digit, SeqPath, ARITY};
pub use shared::SharedSequenceDictionary;

/// Lifetime counters of a [`SequenceDictionary`].
///
/// `nodes_created - nodes_freed` always equals the number of live nodes and
/// `classes_created - classes_freed` the number of live classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct SeqTrieStats {
    /// Nodes allocated, root included
    pub nodes_created: u64,
    /// Nodes reclaimed by deletion or clearing
    pub nodes_freed: u64,
    /// Classes allocated, one per node
    pub classes_created: u64,
    /// Classes reclaimed because they emptied or were merged away
    pub classes_freed: u64,
    /// Successful merges
    pub merges: u64,
}

/// A ternary trie of sequences whose nodes are partitioned into equivalence classes.
#[derive(Debug)]
pub struct SequenceDictionary {
    /// Node arena
    nodes: SlotMap<NodeKey, SeqNode>,

    /// Class arena
    classes: SlotMap<ClassKey, EquivalenceClass>,

    /// The implicit root; never removed
    root: NodeKey,

    /// Configuration options
    config: SeqTrieConfig,

    /// Lifetime counters
    stats: SeqTrieStats,
}

impl SequenceDictionary {
    /// Creates an empty dictionary with default configuration.
    pub fn new() -> Self {
        Self::with_config(SeqTrieConfig::default())
    }

    /// Creates an empty dictionary with the specified configuration.
    ///
    /// The root node is created immediately as the sole member of an unnamed class.
    pub fn with_config(config: SeqTrieConfig) -> Self {
        let mut dict = Self {
            nodes: SlotMap::with_capacity_and_key(config.initial_capacity),
            classes: SlotMap::with_capacity_and_key(config.initial_capacity),
            root: NodeKey::default(),
            config,
            stats: SeqTrieStats::default(),
        };
        dict.root = dict.spawn_node();
        dict
    }

    /// Inserts a sequence, creating every missing node along its path.
    ///
    /// Each new node starts in a fresh unnamed singleton class.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - At least one node was created.
    /// * `Ok(false)` - The whole path already existed.
    /// * `Err(SeqTrieError)` - The path is invalid, or the node budget ran out.
    ///   Nodes created before the budget ran out are kept.
    pub fn add(&mut self, path: impl AsRef<str>) -> SeqTrieResult<bool> {
        let path = SeqPath::parse(path.as_ref())?;

        let mut current = self.root;
        let mut created = 0usize;
        for &digit in path.digits() {
            current = match self.nodes[current].child(digit) {
                Some(child) => child,
                None => {
                    if let Some(limit) = self.config.max_nodes {
                        if self.nodes.len() >= limit {
                            debug!(path = %path, created, limit, "node budget exhausted during insertion");
                            return Err(SeqTrieError::CapacityExhausted { limit });
                        }
                    }
                    let child = self.spawn_node();
                    self.nodes[current].children[digit.index()] = Some(child);
                    created += 1;
                    child
                }
            };
        }

        if created > 0 {
            debug!(path = %path, created, "inserted sequence");
        }
        Ok(created > 0)
    }

    /// Removes the node at `path` together with its entire subtree.
    ///
    /// Removed nodes are detached from their classes; a class survives as long
    /// as it keeps a member outside the removed subtree.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The subtree was removed.
    /// * `Ok(false)` - The path does not exist.
    /// * `Err(SeqTrieError)` - The path is invalid.
    pub fn remove(&mut self, path: impl AsRef<str>) -> SeqTrieResult<bool> {
        let path = SeqPath::parse(path.as_ref())?;
        let (parent_digits, last) = path.split_last();

        let Some(parent) = self.resolve(parent_digits) else {
            trace!(path = %path, "remove: path not found");
            return Ok(false);
        };
        let Some(target) = self.nodes[parent].child(last) else {
            trace!(path = %path, "remove: path not found");
            return Ok(false);
        };

        let removed = self.delete_subtree(target);
        self.nodes[parent].children[last.index()] = None;

        debug!(path = %path, removed, "removed subtree");
        Ok(true)
    }

    /// Checks whether a sequence is present.
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` - `true` if every node along the path exists.
    /// * `Err(SeqTrieError)` - The path is invalid.
    pub fn exists(&self, path: impl AsRef<str>) -> SeqTrieResult<bool> {
        let path = SeqPath::parse(path.as_ref())?;
        Ok(self.resolve(path.digits()).is_some())
    }

    /// Names the equivalence class of the node at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The name changed.
    /// * `Ok(false)` - The path does not exist, or the class already has this exact name.
    /// * `Err(SeqTrieError)` - The path is invalid or the name is empty.
    pub fn set_name(&mut self, path: impl AsRef<str>, name: impl AsRef<str>) -> SeqTrieResult<bool> {
        let path = SeqPath::parse(path.as_ref())?;
        let name = name.as_ref();
        if name.is_empty() {
            return Err(SeqTrieError::EmptyName);
        }

        let Some(class_key) = self.class_of(&path) else {
            trace!(path = %path, "set_name: path not found");
            return Ok(false);
        };
        let class = &mut self.classes[class_key];
        if class.name == name {
            return Ok(false);
        }

        class.name = name.to_string();
        debug!(path = %path, name, "renamed class");
        Ok(true)
    }

    /// Returns the name of the equivalence class of the node at `path`.
    ///
    /// The name is borrowed from the class; any later mutation (a merge in
    /// particular) may replace it.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(name))` - The class has a name.
    /// * `Ok(None)` - The class is unnamed or the path does not exist.
    /// * `Err(SeqTrieError)` - The path is invalid.
    pub fn get_name(&self, path: impl AsRef<str>) -> SeqTrieResult<Option<&str>> {
        let path = SeqPath::parse(path.as_ref())?;
        Ok(self
            .class_of(&path)
            .and_then(|key| self.classes.get(key))
            .and_then(EquivalenceClass::name))
    }

    /// Declares the sequences at `first` and `second` equivalent.
    ///
    /// The class of `second` is folded into the class of `first`: its members
    /// are appended to the member list and repointed, and its record is freed.
    /// Names combine as described on [`EquivalenceClass`]: an unset name adopts
    /// the other, two different names are concatenated (`first` then `second`).
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Two classes were merged.
    /// * `Ok(false)` - A path does not exist, or both already share a class.
    /// * `Err(SeqTrieError)` - A path is invalid.
    pub fn union(&mut self, first: impl AsRef<str>, second: impl AsRef<str>) -> SeqTrieResult<bool> {
        let first = SeqPath::parse(first.as_ref())?;
        let second = SeqPath::parse(second.as_ref())?;

        let (Some(keep), Some(absorb)) = (self.class_of(&first), self.class_of(&second)) else {
            trace!(first = %first, second = %second, "union: path not found");
            return Ok(false);
        };
        if keep == absorb {
            return Ok(false);
        }

        let absorbed = self.classes.remove(absorb).ok_or_else(|| {
            SeqTrieError::InvariantViolation(format!("node at {second} refers to a freed class"))
        })?;
        self.stats.classes_freed += 1;

        // Splice the absorbed list onto our tail.
        let tail = self.classes[keep].last;
        self.nodes[tail].class_next = Some(absorbed.first);
        self.nodes[absorbed.first].class_prev = Some(tail);

        let mut cursor = Some(absorbed.first);
        while let Some(member) = cursor {
            let node = &mut self.nodes[member];
            node.class = keep;
            cursor = node.class_next;
        }

        let class = &mut self.classes[keep];
        class.last = absorbed.last;
        class.len += absorbed.len;
        class.merge_name(absorbed.name);
        self.stats.merges += 1;

        debug!(
            first = %first,
            second = %second,
            members = class.len,
            name = %class.name,
            "merged classes"
        );
        Ok(true)
    }

    /// Returns the number of members in the class of the node at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(n))` - The node exists and its class has `n` members.
    /// * `Ok(None)` - The path does not exist.
    /// * `Err(SeqTrieError)` - The path is invalid.
    pub fn class_size(&self, path: impl AsRef<str>) -> SeqTrieResult<Option<usize>> {
        let path = SeqPath::parse(path.as_ref())?;
        Ok(self
            .class_of(&path)
            .and_then(|key| self.classes.get(key))
            .map(EquivalenceClass::len))
    }

    /// Checks whether both sequences exist and share an equivalence class.
    pub fn equivalent(&self, first: impl AsRef<str>, second: impl AsRef<str>) -> SeqTrieResult<bool> {
        let first = SeqPath::parse(first.as_ref())?;
        let second = SeqPath::parse(second.as_ref())?;
        Ok(match (self.class_of(&first), self.class_of(&second)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        })
    }

    /// Number of live nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live equivalence classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if no sequence is stored (only the root exists).
    pub fn is_empty(&self) -> bool {
        self.nodes[self.root].present_children().next().is_none()
    }

    /// Lifetime counters of this dictionary.
    pub fn stats(&self) -> SeqTrieStats {
        self.stats
    }

    /// The configuration this dictionary was built with.
    pub fn config(&self) -> &SeqTrieConfig {
        &self.config
    }

    /// Frees every stored sequence and class and starts over from a fresh root.
    pub fn clear(&mut self) {
        self.stats.nodes_freed += self.nodes.len() as u64;
        self.stats.classes_freed += self.classes.len() as u64;
        self.nodes.clear();
        self.classes.clear();
        self.root = self.spawn_node();
        debug!("cleared dictionary");
    }

    /// Verifies the structural invariants of the trie and its classes.
    ///
    /// Checks that every node is reachable exactly once from the root, that
    /// every node points at a live class, that each class list is non-empty,
    /// correctly linked, sized and made only of nodes pointing back at it,
    /// that no node sits in two lists, and that the lifetime counters balance.
    pub fn check_invariants(&self) -> SeqTrieResult<()> {
        let violation = |msg: String| Err(SeqTrieError::InvariantViolation(msg));

        let mut reachable = HashSet::with_capacity(self.nodes.len());
        let mut pending = vec![self.root];
        while let Some(key) = pending.pop() {
            if !reachable.insert(key) {
                return violation(format!("node {key:?} is reachable twice"));
            }
            let Some(node) = self.nodes.get(key) else {
                return violation(format!("child link to freed node {key:?}"));
            };
            if !self.classes.contains_key(node.class) {
                return violation(format!("node {key:?} refers to a freed class"));
            }
            pending.extend(node.present_children());
        }
        if reachable.len() != self.nodes.len() {
            return violation(format!(
                "{} nodes allocated but {} reachable",
                self.nodes.len(),
                reachable.len()
            ));
        }

        let mut listed = HashSet::with_capacity(self.nodes.len());
        for (class_key, class) in &self.classes {
            let mut count = 0usize;
            let mut prev = None;
            let mut cursor = Some(class.first);
            while let Some(member) = cursor {
                let Some(node) = self.nodes.get(member) else {
                    return violation(format!("class {class_key:?} lists freed node {member:?}"));
                };
                if node.class != class_key {
                    return violation(format!("node {member:?} is listed under a foreign class"));
                }
                if node.class_prev != prev {
                    return violation(format!("node {member:?} has a broken back link"));
                }
                if !listed.insert(member) {
                    return violation(format!("node {member:?} appears in more than one list"));
                }
                count += 1;
                prev = Some(member);
                cursor = node.class_next;
            }
            if count == 0 || count != class.len {
                return violation(format!(
                    "class {class_key:?} records {} members but lists {count}",
                    class.len
                ));
            }
            if prev != Some(class.last) {
                return violation(format!("class {class_key:?} has a stale tail"));
            }
        }
        if listed.len() != self.nodes.len() {
            return violation(format!(
                "{} nodes allocated but {} listed in classes",
                self.nodes.len(),
                listed.len()
            ));
        }

        let stats = self.stats;
        if stats.nodes_created - stats.nodes_freed != self.nodes.len() as u64
            || stats.classes_created - stats.classes_freed != self.classes.len() as u64
        {
            return violation(format!("lifetime counters out of balance: {stats:?}"));
        }
        Ok(())
    }

    /// Walks from the root along `digits`, returning the final node if every step exists.
    fn resolve(&self, digits: &[Digit]) -> Option<NodeKey> {
        digits
            .iter()
            .try_fold(self.root, |key, &digit| self.nodes.get(key)?.child(digit))
    }

    /// Class key of the node at `path`, if the path exists.
    fn class_of(&self, path: &SeqPath) -> Option<ClassKey> {
        self.resolve(path.digits()).map(|key| self.nodes[key].class)
    }

    /// Allocates a childless node in a fresh unnamed singleton class.
    fn spawn_node(&mut self) -> NodeKey {
        let key = self.nodes.insert(SeqNode::new(ClassKey::default()));
        let class = self.classes.insert(EquivalenceClass::singleton(key));
        self.nodes[key].class = class;
        self.stats.nodes_created += 1;
        self.stats.classes_created += 1;
        key
    }

    /// Frees `top` and all of its descendants, children before parents.
    ///
    /// Returns the number of nodes freed. The caller clears the parent's link.
    fn delete_subtree(&mut self, top: NodeKey) -> usize {
        let mut pending = vec![top];
        let mut preorder = Vec::new();
        while let Some(key) = pending.pop() {
            preorder.push(key);
            pending.extend(self.nodes[key].present_children());
        }

        for &key in preorder.iter().rev() {
            self.free_node(key);
        }
        preorder.len()
    }

    /// Detaches a node from its class list and frees it.
    fn free_node(&mut self, key: NodeKey) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };
        let (class_key, prev, next) = (node.class, node.class_prev, node.class_next);

        match (prev, next) {
            (None, None) => {
                if self.classes.remove(class_key).is_some() {
                    self.stats.classes_freed += 1;
                }
            }
            (None, Some(next)) => {
                let class = &mut self.classes[class_key];
                class.first = next;
                class.len -= 1;
                self.nodes[next].class_prev = None;
            }
            (Some(prev), None) => {
                let class = &mut self.classes[class_key];
                class.last = prev;
                class.len -= 1;
                self.nodes[prev].class_next = None;
            }
            (Some(prev), Some(next)) => {
                self.classes[class_key].len -= 1;
                self.nodes[prev].class_next = Some(next);
                self.nodes[next].class_prev = Some(prev);
            }
        }

        self.nodes.remove(key);
        self.stats.nodes_freed += 1;
    }
}

impl Default for SequenceDictionary {
    fn default() -> Self {
        Self::new()
    }
}
