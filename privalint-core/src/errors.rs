use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrivalintError {
    #[error("Ontology load failed: {path}: {reason}")]
    OntologyLoad { path: String, reason: String },

    #[error("Invalid ontology pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Extraction line {line} rejected: {reason}")]
    IngestError { line: usize, reason: String },

    #[error("Rule evaluation failed for pair {pair}: {reason}")]
    RuleEvaluation { pair: String, reason: String },

    #[error("Report error: {path}: {reason}")]
    ReportError { path: String, reason: String },

    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    #[error("I/O error: {operation}: {reason}")]
    IoError { operation: String, reason: String },

    #[error("Validation error: {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type PrivalintResult<T> = Result<T, PrivalintError>;

impl From<serde_json::Error> for PrivalintError {
    fn from(err: serde_json::Error) -> Self {
        PrivalintError::SerializationError {
            reason: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for PrivalintError {
    fn from(err: serde_yaml::Error) -> Self {
        PrivalintError::SerializationError {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for PrivalintError {
    fn from(err: std::io::Error) -> Self {
        PrivalintError::IoError {
            operation: "io".to_string(),
            reason: err.to_string(),
        }
    }
}
