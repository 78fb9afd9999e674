// Copyright (c) 2025 Triseq Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Node implementation for the sequence trie.
//!
//! Nodes live in an arena and refer to each other by key. Child slots own
//! their subtrees; the `class_prev`/`class_next` links are non-owning and
//! thread the node into its equivalence class's member list.

use super::path::{Digit, ARITY};

slotmap::new_key_type! {
    /// Stable handle to a node in the trie arena.
    pub struct NodeKey;

    /// Stable handle to an equivalence class in the class arena.
    pub struct ClassKey;
}

/// A vertex of the ternary trie.
#[derive(Debug, Clone)]
pub struct SeqNode {
    /// Child slots indexed by digit
    pub(crate) children: [Option<NodeKey>; ARITY],

    /// The class this node belongs to
    pub(crate) class: ClassKey,

    /// Previous member of the same class
    pub(crate) class_prev: Option<NodeKey>,

    /// Next member of the same class
    pub(crate) class_next: Option<NodeKey>,
}

impl SeqNode {
    /// Creates a childless node that is the only member of `class`.
    pub fn new(class: ClassKey) -> Self {
        Self {
            children: [None; ARITY],
            class,
            class_prev: None,
            class_next: None,
        }
    }

    /// Returns the child reached by `digit`, if present.
    pub fn child(&self, digit: Digit) -> Option<NodeKey> {
        self.children[digit.index()]
    }

    /// Keys of all present children.
    pub fn present_children(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.children.iter().flatten().copied()
    }
}
