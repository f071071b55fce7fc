//! Refinement commands typed by the user to edit the process document.
//!
//! Only one grammar is understood:
//!
//! ```text
//! rename the task '<id>' to '<new name>'
//! ```
//!
//! Matching ignores case, but the captured id and name keep the casing the user typed.
//! Anything else parses to [`Command::Unrecognized`].

mod interpreter;

pub use interpreter::*;

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static RENAME_TASK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)rename the task '(.+?)' to '(.+?)'").expect("rename pattern is a valid regex")
});

/// A parsed refinement command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the display name of the element with the given id.
    RenameTask { id: String, new_name: String },
    /// Input that matches no known grammar, kept as typed.
    Unrecognized(String),
}

impl Command {
    pub fn parse(input: &str) -> Self {
        match RENAME_TASK.captures(input) {
            Some(caps) => Command::RenameTask {
                id: caps[1].to_string(),
                new_name: caps[2].to_string(),
            },
            None => Command::Unrecognized(input.to_string()),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::RenameTask { id, new_name } => {
                write!(f, "rename the task '{}' to '{}'", id, new_name)
            }
            Command::Unrecognized(raw) => write!(f, "{}", raw),
        }
    }
}
