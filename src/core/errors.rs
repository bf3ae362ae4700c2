//! Shared error types for the application

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why a source file could not be turned into a syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid syntax at line {line}, column {column}")]
    Syntax { line: usize, column: usize },

    #[error("missing `{token}` at line {line}, column {column}")]
    Missing {
        token: String,
        line: usize,
        column: usize,
    },

    #[error("parser produced no tree")]
    NoTree,

    #[error("failed to load Python grammar: {0}")]
    Grammar(String),
}

/// A single contract violation found in a training sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Dotted location of the offending field, e.g. `reasoning_trace[0].step`.
    pub path: String,
    pub message: String,
}

impl SchemaViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Every violation found while checking one record against the sample contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} schema violation(s): {}", .violations.len(), join_violations(.violations))]
pub struct SchemaError {
    pub violations: Vec<SchemaViolation>,
}

impl SchemaError {
    pub fn new(violations: Vec<SchemaViolation>) -> Self {
        Self { violations }
    }

    /// Whether any violation is reported for exactly `path`.
    pub fn mentions(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}

fn join_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Main error type for docsynth operations
#[derive(Debug, Error)]
pub enum Error {
    /// Scan root absent or nothing extractable under it
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// A generated record broke the sample contract
    #[error("Generated sample `{id}` is invalid: {source}")]
    InvalidSample {
        id: String,
        #[source]
        source: SchemaError,
    },

    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    pub fn missing_input(message: impl Into<String>) -> Self {
        Self::MissingInput(message.into())
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
