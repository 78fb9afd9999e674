//! Line-oriented command scripts for driving a sequence dictionary.
//!
//! ```text
//! add 012
//! set-name 012 X
//! union 012 1
//! get-name 1
//! ```

pub mod command;
pub mod runner;

pub use command::Command;
pub use runner::{CommandOutcome, RunSummary, ScriptRunner};
