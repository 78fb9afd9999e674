// Copyright (c) 2025 Triseq Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Validated paths over the ternary alphabet.
//!
//! A path names a node by the sequence of child choices taken from the root.
//! It is valid iff it is non-empty and consists solely of `0`, `1` and `2`.

use std::fmt;
use std::str::FromStr;

use super::error::{SeqTrieError, SeqTrieResult};

/// Number of children per node.
pub const ARITY: usize = 3;

/// One symbol of a sequence, selecting a child slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Digit {
    /// `0`, the first child slot
    Zero,
    /// `1`, the middle child slot
    One,
    /// `2`, the last child slot
    Two,
}

impl Digit {
    /// All digits in slot order.
    pub const ALL: [Digit; ARITY] = [Digit::Zero, Digit::One, Digit::Two];

    /// Index of the child slot this digit selects.
    pub fn index(self) -> usize {
        match self {
            Digit::Zero => 0,
            Digit::One => 1,
            Digit::Two => 2,
        }
    }

    /// The character spelling this digit.
    pub fn as_char(self) -> char {
        match self {
            Digit::Zero => '0',
            Digit::One => '1',
            Digit::Two => '2',
        }
    }
}

impl TryFrom<char> for Digit {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0' => Ok(Digit::Zero),
            '1' => Ok(Digit::One),
            '2' => Ok(Digit::Two),
            other => Err(other),
        }
    }
}

/// A non-empty, validated sequence of digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeqPath {
    digits: Vec<Digit>,
}

impl SeqPath {
    /// Parses and validates a path string.
    ///
    /// # Errors
    ///
    /// Returns [`SeqTrieError::InvalidPath`] if the string is empty or contains
    /// any character other than `0`, `1`, `2`.
    pub fn parse(path: &str) -> SeqTrieResult<Self> {
        if path.is_empty() {
            return Err(SeqTrieError::InvalidPath {
                path: String::new(),
                reason: "path is empty".to_string(),
            });
        }

        let digits = path
            .char_indices()
            .map(|(pos, c)| {
                Digit::try_from(c).map_err(|bad| SeqTrieError::InvalidPath {
                    path: path.to_string(),
                    reason: format!("unexpected character {bad:?} at position {pos}"),
                })
            })
            .collect::<SeqTrieResult<Vec<_>>>()?;

        Ok(Self { digits })
    }

    /// The digits of this path, root first.
    pub fn digits(&self) -> &[Digit] {
        &self.digits
    }

    /// Number of digits; always at least one.
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Always `false`: a parsed path has at least one digit.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Splits off the last digit, returning the parent's digits and the final step.
    pub fn split_last(&self) -> (&[Digit], Digit) {
        let (last, parent) = self
            .digits
            .split_last()
            .map(|(last, parent)| (*last, parent))
            .unwrap_or((Digit::Zero, &[]));
        (parent, last)
    }
}

impl FromStr for SeqPath {
    type Err = SeqTrieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<[Digit]> for SeqPath {
    fn as_ref(&self) -> &[Digit] {
        &self.digits
    }
}

impl fmt::Display for SeqPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in &self.digits {
            write!(f, "{}", digit.as_char())?;
        }
        Ok(())
    }
}
