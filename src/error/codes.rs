//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Entry validation errors
//! - 2xx: Storage errors
//! - 3xx: Config errors
//! - 4xx: Query/tokenizer errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for robot mode output.
///
/// Each variant maps to a numeric code (e.g., `EmptyField` -> E101).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Entry validation errors (1xx)
    // ========================================
    /// E101: Question or answer is empty after trimming
    EmptyField,
    /// E102: Tenant identifier is malformed
    InvalidTenant,
    /// E103: Entry id does not exist in the tenant
    EntryNotFound,

    // ========================================
    // Storage errors (2xx)
    // ========================================
    /// E201: Persistence collaborator failed or is unreachable
    StoreUnavailable,
    /// E202: SQLite operation failed
    DatabaseError,
    /// E203: Schema migration failed
    MigrationFailed,
    /// E204: Serialization/deserialization failed
    SerializationError,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E301: Config file has invalid syntax or values
    ConfigInvalid,
    /// E302: Required config value is missing
    ConfigMissingRequired,

    // ========================================
    // Query/tokenizer errors (4xx)
    // ========================================
    /// E401: Tokenizer dictionary could not be parsed
    DictionaryInvalid,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E901: Background task panicked or was cancelled
    TaskFailed,
    /// E902: IO operation failed
    IoError,
}

impl ErrorCode {
    /// Get the numeric error code (e.g., `EmptyField` -> 101).
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            Self::EmptyField => 101,
            Self::InvalidTenant => 102,
            Self::EntryNotFound => 103,

            Self::StoreUnavailable => 201,
            Self::DatabaseError => 202,
            Self::MigrationFailed => 203,
            Self::SerializationError => 204,

            Self::ConfigInvalid => 301,
            Self::ConfigMissingRequired => 302,

            Self::DictionaryInvalid => 401,

            Self::TaskFailed => 901,
            Self::IoError => 902,
        }
    }

    /// Get the error code as a formatted string (e.g., "E101").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Get the default suggestion for this error code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            Self::EmptyField => "Both the question and the answer must contain non-whitespace text",
            Self::InvalidTenant => "Use a non-empty tenant id without control characters (max 128 chars)",
            Self::EntryNotFound => "Run `faqkit list` to see the ids stored for this tenant",

            Self::StoreUnavailable => "The entry store did not respond. Retry; the last good index is still served",
            Self::DatabaseError => "Check the database path and permissions, or point --db at a fresh file",
            Self::MigrationFailed => "The database schema could not be upgraded. Back up the file and retry",
            Self::SerializationError => "The input is not valid JSON. Expected a list of {question, answer} objects",

            Self::ConfigInvalid => "Check TOML syntax and value ranges in the config file",
            Self::ConfigMissingRequired => "Set the missing value in config.toml or through its FAQKIT_* variable",

            Self::DictionaryInvalid => "Dictionary lines must be `word` or `word frequency`",

            Self::TaskFailed => "A background task failed unexpectedly. Retry the operation",
            Self::IoError => "File operation failed. Check path exists and permissions are correct",
        }
    }

    /// Check if this error is potentially recoverable by the user.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::EmptyField
            | Self::InvalidTenant
            | Self::EntryNotFound
            | Self::StoreUnavailable
            | Self::SerializationError
            | Self::ConfigInvalid
            | Self::ConfigMissingRequired
            | Self::DictionaryInvalid
            | Self::TaskFailed
            | Self::IoError => true,

            Self::DatabaseError | Self::MigrationFailed => false,
        }
    }

    /// Get the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self.numeric() / 100 {
            1 => "validation",
            2 => "storage",
            3 => "config",
            4 => "query",
            9 => "internal",
            _ => "unknown",
        }
    }

    /// Iterate over all error codes.
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::EmptyField,
            Self::InvalidTenant,
            Self::EntryNotFound,
            Self::StoreUnavailable,
            Self::DatabaseError,
            Self::MigrationFailed,
            Self::SerializationError,
            Self::ConfigInvalid,
            Self::ConfigMissingRequired,
            Self::DictionaryInvalid,
            Self::TaskFailed,
            Self::IoError,
        ]
        .into_iter()
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}
