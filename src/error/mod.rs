//! Error handling for faqkit.
//!
//! This module provides:
//! - [`FaqError`]: The main error enum for all faqkit operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Serializable error with code, suggestion and context

mod codes;

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;

/// Main error type for faqkit operations.
#[derive(Error, Debug)]
pub enum FaqError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid tenant id: {0}")]
    InvalidTenant(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(i64),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("Dictionary error at line {line}: {reason}")]
    Dictionary { line: usize, reason: String },

    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

impl FaqError {
    /// Get the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) => ErrorCode::EmptyField,
            Self::InvalidTenant(_) => ErrorCode::InvalidTenant,
            Self::EntryNotFound(_) => ErrorCode::EntryNotFound,
            Self::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::Migration(_) => ErrorCode::MigrationFailed,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::SerializationError,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::MissingConfig(_) => ErrorCode::ConfigMissingRequired,
            Self::Dictionary { .. } => ErrorCode::DictionaryInvalid,
            Self::TaskFailed(_) => ErrorCode::TaskFailed,
        }
    }

    /// Whether this error came from the persistence collaborator.
    #[must_use]
    pub const fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::StoreUnavailable(_) | Self::Database(_) | Self::Migration(_)
        )
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::EntryNotFound(id) => Some(serde_json::json!({ "entry_id": id })),
            Self::InvalidTenant(tenant) => Some(serde_json::json!({ "tenant": tenant })),
            Self::MissingConfig(key) => Some(serde_json::json!({ "config_key": key })),
            Self::Dictionary { line, reason } => {
                Some(serde_json::json!({ "line": line, "reason": reason }))
            }
            _ => None,
        }
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_faq_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
///
/// Emitted on stdout in `--robot` mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "EMPTY_FIELD")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 101)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Whether this error is potentially recoverable by the user
    pub recoverable: bool,

    /// Error category (e.g., "validation", "storage")
    pub category: String,
}

impl StructuredError {
    /// Create a new structured error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            numeric_code: code.numeric(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
            code,
            message: message.into(),
        }
    }

    /// Create a structured error from a [`FaqError`].
    #[must_use]
    pub fn from_faq_error(err: &FaqError) -> Self {
        let mut structured = Self::new(err.code(), err.to_string());
        structured.context = err.context();
        structured
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<FaqError> for StructuredError {
    fn from(err: FaqError) -> Self {
        Self::from_faq_error(&err)
    }
}

impl From<&FaqError> for StructuredError {
    fn from(err: &FaqError) -> Self {
        Self::from_faq_error(err)
    }
}

/// Result type alias using FaqError.
pub type Result<T> = std::result::Result<T, FaqError>;
