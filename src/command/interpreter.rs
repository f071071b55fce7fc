use super::Command;
use crate::error::ParseError;
use crate::process::ProcessDocument;
use serde_yaml::Value;
use std::fmt;
use tracing::{debug, info, warn};

/// What happened when a command was applied.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandStatus {
    Renamed { id: String, new_name: String },
    NodeNotFound { id: String },
    Unrecognized,
    ParseFailed(ParseError),
}

impl CommandStatus {
    /// `true` only when the document text was changed.
    pub fn is_success(&self) -> bool {
        matches!(self, CommandStatus::Renamed { .. })
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandStatus::Renamed { id, new_name } => {
                write!(f, "Task '{}' renamed to '{}'.", id, new_name)
            }
            CommandStatus::NodeNotFound { id } => {
                write!(f, "No element with id '{}' exists in the process.", id)
            }
            CommandStatus::Unrecognized => write!(
                f,
                "Command not recognized. Try: rename the task '<id>' to '<new name>'"
            ),
            CommandStatus::ParseFailed(e) => write!(f, "{}", e),
        }
    }
}

/// The document text to keep after a command, plus the status to show the user.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    pub text: String,
    pub status: CommandStatus,
}

impl CommandOutcome {
    fn unchanged(text: &str, status: CommandStatus) -> Self {
        Self {
            text: text.to_string(),
            status,
        }
    }
}

impl Command {
    /// Applies the command to an in-memory document.
    pub fn apply_to(&self, document: &mut ProcessDocument) -> CommandStatus {
        match self {
            Command::RenameTask { id, new_name } => match document.node_mut(id) {
                Some(node) => {
                    node.name = new_name.clone();
                    CommandStatus::Renamed {
                        id: id.clone(),
                        new_name: new_name.clone(),
                    }
                }
                None => CommandStatus::NodeNotFound { id: id.clone() },
            },
            Command::Unrecognized(_) => CommandStatus::Unrecognized,
        }
    }

    /// Applies the command to the YAML text of a document.
    ///
    /// The returned text is the re-serialized document on success and the input, byte for
    /// byte, in every other case. Keys the process model does not know about are kept.
    pub fn apply(&self, document_text: &str) -> CommandOutcome {
        let (id, new_name) = match self {
            Command::RenameTask { id, new_name } => (id, new_name),
            Command::Unrecognized(raw) => {
                debug!(command = %raw, "unrecognized command");
                return CommandOutcome::unchanged(document_text, CommandStatus::Unrecognized);
            }
        };

        let mut document = match ProcessDocument::from_yaml(document_text) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(error = %e, "command not applied, document does not parse");
                return CommandOutcome::unchanged(document_text, CommandStatus::ParseFailed(e));
            }
        };

        let status = self.apply_to(&mut document);
        if !status.is_success() {
            return CommandOutcome::unchanged(document_text, status);
        }

        match rename_in_tree(document_text, id, new_name) {
            Ok(text) => {
                info!(command = %self, "applied command");
                CommandOutcome { text, status }
            }
            Err(e) => CommandOutcome::unchanged(document_text, CommandStatus::ParseFailed(e)),
        }
    }
}

/// Sets `name` on the element `id` inside the raw YAML tree, so that every other key and the
/// key order survive the rewrite.
fn rename_in_tree(document_text: &str, id: &str, new_name: &str) -> Result<String, ParseError> {
    let mut tree: Value = serde_yaml::from_str(document_text)?;
    let node = tree
        .get_mut("elements")
        .and_then(Value::as_sequence_mut)
        .and_then(|elements| {
            elements
                .iter_mut()
                .find(|node| node.get("id").and_then(Value::as_str) == Some(id))
        })
        .and_then(Value::as_mapping_mut)
        .ok_or_else(|| ParseError::new(format!("element '{}' is not a mapping", id)))?;
    node.insert(
        Value::String("name".to_string()),
        Value::String(new_name.to_string()),
    );
    Ok(serde_yaml::to_string(&tree)?)
}

/// Parses `command` and applies it to `document_text`.
pub fn apply_command(command: &str, document_text: &str) -> CommandOutcome {
    Command::parse(command).apply(document_text)
}
