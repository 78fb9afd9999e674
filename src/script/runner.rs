//! Script execution against a sequence dictionary.
//!
//! The runner parses each line, applies it to its dictionary and writes one
//! result line per command. Invalid path or name arguments are results, not
//! failures: they print as `-1` and the run goes on.

use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::{debug, info};

use super::command::Command;
use crate::config::{OutputFormat, ScriptConfig};
use crate::data_structures::seq_trie::{SeqTrieConfig, SeqTrieError, SeqTrieStats, SequenceDictionary};
use crate::error::script::ScriptError;
use crate::error::{get_error_reporting, ErrorContext, TriseqResult};

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// A yes/no result (`1`/`0` in text output)
    Flag {
        /// The result
        value: bool,
    },
    /// A class name lookup
    Name {
        /// The name, absent for unnamed classes and unknown paths
        name: Option<String>,
    },
    /// A class size lookup
    Size {
        /// Member count, absent for unknown paths
        members: Option<usize>,
    },
    /// Lifetime counters
    Stats {
        /// Counter snapshot
        stats: SeqTrieStats,
    },
    /// A command with nothing to report completed
    Done,
    /// A path or name argument was rejected
    InvalidArgument {
        /// Why the argument was rejected
        message: String,
    },
    /// The dictionary refused the operation (node budget, broken invariant)
    Failed {
        /// What went wrong
        message: String,
    },
}

impl CommandOutcome {
    fn from_error(err: SeqTrieError) -> Self {
        if err.is_invalid_argument() {
            Self::InvalidArgument {
                message: err.to_string(),
            }
        } else {
            Self::Failed {
                message: err.to_string(),
            }
        }
    }

    /// Text rendering using the dictionary's integer result codes.
    pub fn to_text(&self) -> String {
        match self {
            Self::Flag { value } => u8::from(*value).to_string(),
            Self::Name { name } => name.clone().unwrap_or_else(|| "-".to_string()),
            Self::Size { members } => members.map_or_else(|| "-".to_string(), |n| n.to_string()),
            Self::Stats { stats } => format!(
                "nodes_created={} nodes_freed={} classes_created={} classes_freed={} merges={}",
                stats.nodes_created,
                stats.nodes_freed,
                stats.classes_created,
                stats.classes_freed,
                stats.merges
            ),
            Self::Done => "ok".to_string(),
            Self::InvalidArgument { message } | Self::Failed { message } => format!("-1 {message}"),
        }
    }
}

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Commands executed
    pub commands: usize,
    /// Commands that could change the dictionary
    pub mutations: usize,
    /// Commands rejected for invalid arguments
    pub invalid_arguments: usize,
    /// Commands the dictionary refused
    pub failures: usize,
    /// Lines that failed to parse
    pub parse_errors: usize,
}

/// One JSON output record.
#[derive(Serialize)]
struct Record<'a> {
    line: usize,
    command: &'a Command,
    outcome: &'a CommandOutcome,
}

/// Executes commands against an owned [`SequenceDictionary`].
#[derive(Debug)]
pub struct ScriptRunner {
    dict: SequenceDictionary,
    config: ScriptConfig,
}

impl ScriptRunner {
    /// Creates a runner over a fresh dictionary.
    pub fn new(trie_config: SeqTrieConfig, config: ScriptConfig) -> Self {
        Self::with_dictionary(SequenceDictionary::with_config(trie_config), config)
    }

    /// Creates a runner over an existing dictionary.
    pub fn with_dictionary(dict: SequenceDictionary, config: ScriptConfig) -> Self {
        Self { dict, config }
    }

    /// The dictionary commands are applied to.
    pub fn dictionary(&self) -> &SequenceDictionary {
        &self.dict
    }

    /// Consumes the runner, returning its dictionary.
    pub fn into_dictionary(self) -> SequenceDictionary {
        self.dict
    }

    /// Applies a single command, folding dictionary errors into the outcome.
    pub fn execute(&mut self, command: &Command) -> CommandOutcome {
        self.apply(command).unwrap_or_else(CommandOutcome::from_error)
    }

    fn apply(&mut self, command: &Command) -> Result<CommandOutcome, SeqTrieError> {
        let dict = &mut self.dict;
        match command {
            Command::Add { path } => dict.add(path).map(|value| CommandOutcome::Flag { value }),
            Command::Remove { path } => dict.remove(path).map(|value| CommandOutcome::Flag { value }),
            Command::Exists { path } => dict.exists(path).map(|value| CommandOutcome::Flag { value }),
            Command::SetName { path, name } => dict
                .set_name(path, name)
                .map(|value| CommandOutcome::Flag { value }),
            Command::GetName { path } => dict.get_name(path).map(|name| CommandOutcome::Name {
                name: name.map(str::to_owned),
            }),
            Command::Union { first, second } => dict
                .union(first, second)
                .map(|value| CommandOutcome::Flag { value }),
            Command::Size { path } => dict
                .class_size(path)
                .map(|members| CommandOutcome::Size { members }),
            Command::Equiv { first, second } => dict
                .equivalent(first, second)
                .map(|value| CommandOutcome::Flag { value }),
            Command::Stats => Ok(CommandOutcome::Stats { stats: dict.stats() }),
            Command::Check => dict.check_invariants().map(|()| CommandOutcome::Done),
            Command::Clear => {
                dict.clear();
                Ok(CommandOutcome::Done)
            }
        }
    }

    /// Reads commands from `input` until EOF, writing one result line per command to `output`.
    ///
    /// # Errors
    ///
    /// I/O and serialization failures always abort the run. With
    /// `stop_on_error`, so does the first parse error or refused command.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> TriseqResult<RunSummary> {
        let mut summary = RunSummary::default();

        for (index, line) in input.lines().enumerate() {
            let line_no = index + 1;
            let line = line?;

            let command = match Command::parse_line(line_no, &line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(err) => {
                    summary.parse_errors += 1;
                    if self.config.stop_on_error {
                        return Err(err.into());
                    }
                    get_error_reporting().report(ErrorContext::new(err, "script").with_details(line));
                    continue;
                }
            };

            let (outcome, refused) = match self.apply(&command) {
                Ok(outcome) => (outcome, None),
                Err(err) => {
                    let refused = (!err.is_invalid_argument()).then(|| err.clone());
                    (CommandOutcome::from_error(err), refused)
                }
            };
            summary.commands += 1;
            if command.is_mutating() {
                summary.mutations += 1;
            }
            debug!(line = line_no, %command, ?outcome, "executed command");

            self.write_outcome(&mut output, line_no, &command, &outcome)?;

            match refused {
                Some(source) => {
                    summary.failures += 1;
                    if self.config.stop_on_error {
                        output.flush()?;
                        return Err(ScriptError::Execution {
                            line: line_no,
                            source,
                        }
                        .into());
                    }
                }
                None if matches!(outcome, CommandOutcome::InvalidArgument { .. }) => {
                    summary.invalid_arguments += 1;
                }
                None => {}
            }
        }

        output.flush()?;
        info!(?summary, "script finished");
        Ok(summary)
    }

    fn write_outcome<W: Write>(
        &self,
        output: &mut W,
        line: usize,
        command: &Command,
        outcome: &CommandOutcome,
    ) -> TriseqResult<()> {
        match self.config.output {
            OutputFormat::Text if self.config.echo_commands => {
                writeln!(output, "{command} => {}", outcome.to_text())?
            }
            OutputFormat::Text => writeln!(output, "{}", outcome.to_text())?,
            OutputFormat::Json => {
                let record = Record {
                    line,
                    command,
                    outcome,
                };
                serde_json::to_writer(&mut *output, &record)?;
                writeln!(output)?;
            }
        }
        Ok(())
    }
}
