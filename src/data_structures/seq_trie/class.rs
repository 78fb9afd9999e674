// Copyright (c) 2025 Triseq Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Equivalence class records.

use super::node::NodeKey;

/// A named bucket of nodes declared equivalent.
///
/// The class does not own its members; it records the two ends of their
/// doubly-linked member list. It exists only while that list is non-empty.
#[derive(Debug, Clone)]
pub struct EquivalenceClass {
    /// Class label; empty means unset
    pub(crate) name: String,

    /// Head of the member list
    pub(crate) first: NodeKey,

    /// Tail of the member list
    pub(crate) last: NodeKey,

    /// Number of members in the list
    pub(crate) len: usize,
}

impl EquivalenceClass {
    /// Creates an unnamed singleton class holding `member`.
    pub fn singleton(member: NodeKey) -> Self {
        Self {
            name: String::new(),
            first: member,
            last: member,
            len: 1,
        }
    }

    /// The class name, or `None` when unset.
    pub fn name(&self) -> Option<&str> {
        if self.name.is_empty() {
            None
        } else {
            Some(&self.name)
        }
    }

    /// Number of member nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false` for a live class.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Applies the merge naming rule with `absorbed` being the name of the
    /// class folded into this one.
    ///
    /// An unset name adopts `absorbed`; two different set names are joined
    /// without a separator; otherwise the current name stays.
    pub(crate) fn merge_name(&mut self, absorbed: String) {
        if absorbed.is_empty() || absorbed == self.name {
            return;
        }
        if self.name.is_empty() {
            self.name = absorbed;
        } else {
            self.name.push_str(&absorbed);
        }
    }
}
