use thiserror::Error;

/// Errors raised while reading or writing the YAML text of a process document.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid process document YAML: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
        }
    }
}

impl From<serde_yaml::Error> for ParseError {
    fn from(err: serde_yaml::Error) -> Self {
        let location = err.location();
        Self {
            message: err.to_string(),
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
        }
    }
}

/// Structural problems in a parsed process document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedDocumentError {
    #[error("Pool '{pool_id}' is missing the required field '{field}'")]
    MissingField { pool_id: String, field: String },

    #[error("Element '{element_id}' references lane '{lane_id}', which no pool declares")]
    UnknownLane { element_id: String, lane_id: String },

    #[error("Flow '{flow_id}' has {endpoint} '{node_id}', which is not a declared element")]
    DanglingFlow {
        flow_id: String,
        endpoint: String,
        node_id: String,
    },

    #[error("Identifier '{0}' is declared more than once")]
    DuplicateId(String),
}

/// Errors that can occur when converting a custom format into a `ProcessDocument`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Invalid source data: {0}")]
    ValidationError(String),
}

/// Errors raised when the roster lacks data an operation needs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldAccessError {
    #[error("Column '{0}' is not present in the roster")]
    MissingColumn(String),

    #[error("The roster is empty")]
    EmptyRoster,

    #[error("Column '{0}' has no numeric values")]
    NoNumericValues(String),
}

/// Errors raised while reading or writing roster CSV data.
#[derive(Error, Debug, Clone)]
pub enum RosterError {
    #[error("Failed to read roster CSV: {0}")]
    Csv(String),

    #[error("Could not access roster file '{path}': {message}")]
    Io { path: String, message: String },
}

impl From<csv::Error> for RosterError {
    fn from(err: csv::Error) -> Self {
        RosterError::Csv(err.to_string())
    }
}

/// Errors raised by the BPMN exporter.
#[derive(Error, Debug, Clone)]
pub enum ExportError {
    #[error("Cannot export a malformed document: {0}")]
    Malformed(#[from] MalformedDocumentError),

    #[error("Failed to write diagram XML: {0}")]
    Writer(String),
}

/// Errors raised while loading a planner configuration file.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid config YAML: {0}")]
    Yaml(String),
}

/// Top-level error reported at the session boundary.
#[derive(Error, Debug, Clone)]
pub enum PlannerError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Malformed(#[from] MalformedDocumentError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    FieldAccess(#[from] FieldAccessError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No audience has been saved for this session")]
    NoAudience,

    #[error("Unexpected failure while {operation}: {message}")]
    Internal { operation: String, message: String },
}
