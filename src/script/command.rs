//! Command parsing for triseq scripts.
//!
//! One command per line, arguments separated by whitespace. Blank lines and
//! lines starting with `#` are skipped. Path and name arguments are passed
//! through verbatim; the dictionary validates them so that malformed values
//! come back as per-command results instead of parse failures.

use std::fmt;

use serde::Serialize;

use crate::error::script::ScriptError;

/// A single dictionary command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Command {
    /// Insert a sequence
    Add {
        /// Path to insert
        path: String,
    },
    /// Delete the subtree at a path
    Remove {
        /// Path to delete
        path: String,
    },
    /// Test whether a path exists
    Exists {
        /// Path to test
        path: String,
    },
    /// Name the class of a path
    SetName {
        /// Path whose class is named
        path: String,
        /// New name
        name: String,
    },
    /// Read the class name of a path
    GetName {
        /// Path whose class name is read
        path: String,
    },
    /// Merge the classes of two paths
    Union {
        /// Path whose class survives
        first: String,
        /// Path whose class is absorbed
        second: String,
    },
    /// Report the member count of a path's class
    Size {
        /// Path whose class is measured
        path: String,
    },
    /// Test whether two paths share a class
    Equiv {
        /// First path
        first: String,
        /// Second path
        second: String,
    },
    /// Report lifetime counters
    Stats,
    /// Verify structural invariants
    Check,
    /// Drop every stored sequence
    Clear,
}

impl Command {
    /// Parses one script line.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(command))` - The line holds a command.
    /// * `Ok(None)` - The line is blank or a comment.
    /// * `Err(ScriptError)` - Unknown command word or wrong argument count.
    pub fn parse_line(line_no: usize, line: &str) -> Result<Option<Self>, ScriptError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let mut tokens = trimmed.split_whitespace();
        let word = tokens.next().unwrap_or_default();
        let args: Vec<String> = tokens.map(str::to_string).collect();

        let expect = |expected: usize| -> Result<(), ScriptError> {
            if args.len() == expected {
                Ok(())
            } else {
                Err(ScriptError::Arity {
                    line: line_no,
                    command: word.to_string(),
                    expected,
                    actual: args.len(),
                })
            }
        };

        let command = match word {
            "add" | "remove" | "exists" | "get-name" | "size" => {
                expect(1)?;
                let path = args[0].clone();
                match word {
                    "add" => Self::Add { path },
                    "remove" => Self::Remove { path },
                    "exists" => Self::Exists { path },
                    "get-name" => Self::GetName { path },
                    _ => Self::Size { path },
                }
            }
            "set-name" => {
                expect(2)?;
                Self::SetName {
                    path: args[0].clone(),
                    name: args[1].clone(),
                }
            }
            "union" | "equiv" => {
                expect(2)?;
                let (first, second) = (args[0].clone(), args[1].clone());
                if word == "union" {
                    Self::Union { first, second }
                } else {
                    Self::Equiv { first, second }
                }
            }
            "stats" | "check" | "clear" => {
                expect(0)?;
                match word {
                    "stats" => Self::Stats,
                    "check" => Self::Check,
                    _ => Self::Clear,
                }
            }
            other => {
                return Err(ScriptError::UnknownCommand {
                    line: line_no,
                    command: other.to_string(),
                })
            }
        };

        Ok(Some(command))
    }

    /// Whether the command can change the dictionary.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Add { .. }
                | Self::Remove { .. }
                | Self::SetName { .. }
                | Self::Union { .. }
                | Self::Clear
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add { path } => write!(f, "add {path}"),
            Self::Remove { path } => write!(f, "remove {path}"),
            Self::Exists { path } => write!(f, "exists {path}"),
            Self::SetName { path, name } => write!(f, "set-name {path} {name}"),
            Self::GetName { path } => write!(f, "get-name {path}"),
            Self::Union { first, second } => write!(f, "union {first} {second}"),
            Self::Size { path } => write!(f, "size {path}"),
            Self::Equiv { first, second } => write!(f, "equiv {first} {second}"),
            Self::Stats => write!(f, "stats"),
            Self::Check => write!(f, "check"),
            Self::Clear => write!(f, "clear"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("add 012", Command::Add { path: "012".into() } ; "add")]
    #[test_case("  remove 0  ", Command::Remove { path: "0".into() } ; "remove with padding")]
    #[test_case("exists 21", Command::Exists { path: "21".into() } ; "exists")]
    #[test_case("set-name 1 A", Command::SetName { path: "1".into(), name: "A".into() } ; "set name")]
    #[test_case("get-name 1", Command::GetName { path: "1".into() } ; "get name")]
    #[test_case("union 0\t1", Command::Union { first: "0".into(), second: "1".into() } ; "union with tab")]
    #[test_case("size 2", Command::Size { path: "2".into() } ; "size")]
    #[test_case("equiv 0 2", Command::Equiv { first: "0".into(), second: "2".into() } ; "equiv")]
    #[test_case("stats", Command::Stats ; "stats")]
    #[test_case("check", Command::Check ; "check")]
    #[test_case("clear", Command::Clear ; "clear")]
    fn test_parse_and_display(line: &str, expected: Command) {
        let command = Command::parse_line(1, line).unwrap().unwrap();
        assert_eq!(command, expected);
        assert_eq!(
            Command::parse_line(1, &command.to_string()).unwrap(),
            Some(expected)
        );
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        assert_eq!(Command::parse_line(1, "").unwrap(), None);
        assert_eq!(Command::parse_line(2, "   ").unwrap(), None);
        assert_eq!(Command::parse_line(3, "# add 0").unwrap(), None);
    }

    #[test]
    fn test_invalid_paths_are_not_parse_errors() {
        assert_eq!(
            Command::parse_line(1, "add 0x").unwrap(),
            Some(Command::Add { path: "0x".into() })
        );
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        let err = Command::parse_line(7, "split 0 1").unwrap_err();
        assert!(matches!(err, ScriptError::UnknownCommand { ref command, .. } if command == "split"));
        assert_eq!(err.line(), 7);

        let err = Command::parse_line(9, "union 0").unwrap_err();
        assert!(matches!(
            err,
            ScriptError::Arity { expected: 2, actual: 1, .. }
        ));
        assert_eq!(err.line(), 9);

        let err = Command::parse_line(4, "set-name 0 two words").unwrap_err();
        assert!(matches!(err, ScriptError::Arity { expected: 2, actual: 3, .. }));
    }

    #[test]
    fn test_mutating_commands() {
        assert!(Command::Clear.is_mutating());
        assert!(Command::Add { path: "0".into() }.is_mutating());
        assert!(!Command::Check.is_mutating());
        assert!(!Command::GetName { path: "0".into() }.is_mutating());
    }
}
