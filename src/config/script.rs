//! Script runner configuration module.

use super::{ConfigResult, Validate};
use serde::{Deserialize, Serialize};

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One plain line per command using integer result codes
    #[default]
    Text,
    /// One JSON object per command
    Json,
}

/// Script runner configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScriptConfig {
    /// Output format for command results
    pub output: OutputFormat,

    /// Stop at the first parse error or exhausted node budget
    pub stop_on_error: bool,

    /// Prefix each result with the command that produced it
    pub echo_commands: bool,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            output: OutputFormat::Text,
            stop_on_error: false,
            echo_commands: false,
        }
    }
}

impl Validate for ScriptConfig {
    fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }
}
