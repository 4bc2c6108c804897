use crate::domain::model::RecordKind;
use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Duplicated {kind}: {key}")]
    DuplicateKey { kind: RecordKind, key: String },

    #[error("{kind} not found: {key}")]
    NotFound { kind: RecordKind, key: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidFormat {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid entry type: {0}")]
    InvalidEntryType(String),

    #[error("Resource exhausted: {0}")]
    ResourceExhausted(#[from] TryReserveError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Line {line} rejected ({entry}): {source}")]
    EntryError {
        line: usize,
        entry: String,
        #[source]
        source: Box<CatalogError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Data,
    Validation,
    Resource,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn invalid_format(field: &str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::InvalidFormat {
            field: field.to_string(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn duplicate(kind: RecordKind, key: impl Into<String>) -> Self {
        CatalogError::DuplicateKey {
            kind,
            key: key.into(),
        }
    }

    pub fn not_found(kind: RecordKind, key: impl Into<String>) -> Self {
        CatalogError::NotFound {
            kind,
            key: key.into(),
        }
    }

    /// Wraps an error with the input line it came from.
    pub fn at_line(self, line: usize, entry: &str) -> Self {
        CatalogError::EntryError {
            line,
            entry: entry.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping line wrappers.
    pub fn root(&self) -> &CatalogError {
        match self {
            CatalogError::EntryError { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.root() {
            CatalogError::DuplicateKey { .. } | CatalogError::NotFound { .. } => ErrorCategory::Data,
            CatalogError::InvalidFormat { .. }
            | CatalogError::InvalidEntryType(_)
            | CatalogError::CsvError(_) => ErrorCategory::Validation,
            CatalogError::ResourceExhausted(_) => ErrorCategory::Resource,
            CatalogError::IoError(_) | CatalogError::SerializationError(_) => ErrorCategory::Io,
            CatalogError::ConfigError { .. } => ErrorCategory::Configuration,
            CatalogError::EntryError { .. } => unreachable!("root() never returns a wrapper"),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Medium,
            ErrorCategory::Validation | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Resource => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.root() {
            CatalogError::DuplicateKey { .. } => "Remove the repeated record from the input file",
            CatalogError::NotFound { .. } => {
                "Check the key, and for subscriptions make sure the person is loaded first"
            }
            CatalogError::InvalidFormat { .. } | CatalogError::CsvError(_) => {
                "Fix the field value on the reported line"
            }
            CatalogError::InvalidEntryType(_) => "Use one of PERSON, SUBSCRIPTION or FILM",
            CatalogError::ResourceExhausted(_) => "Free memory or load a smaller input file",
            CatalogError::IoError(_) => "Check that the file exists and is readable",
            CatalogError::SerializationError(_) => "Check the output directory and disk space",
            CatalogError::ConfigError { .. } => "Review the command line arguments or config file",
            CatalogError::EntryError { .. } => unreachable!("root() never returns a wrapper"),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CatalogError::EntryError { line, source, .. } => {
                format!("Input line {} could not be loaded: {}", line, source.root())
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
