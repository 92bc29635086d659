//! Question/answer entry data structures

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FaqError, Result};

/// Longest tenant identifier accepted.
pub const MAX_TENANT_LEN: usize = 128;

/// Stable entry identifier assigned by the persistence layer.
///
/// Ids are never recomputed from position; a rebuild reuses whatever the
/// store hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl EntryId {
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntryId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Isolation boundary for a knowledge base (one chat group's FAQ set).
///
/// Tenant ids are only ever used as a namespace key; storage backends bind
/// them as parameters and never splice them into identifiers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenantId(String);

impl TenantId {
    /// Validate and wrap a tenant id.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FaqError::InvalidTenant("tenant id is empty".to_string()));
        }
        if trimmed.chars().count() > MAX_TENANT_LEN {
            return Err(FaqError::InvalidTenant(format!(
                "tenant id exceeds {MAX_TENANT_LEN} characters"
            )));
        }
        if trimmed.chars().any(char::is_control) {
            return Err(FaqError::InvalidTenant(
                "tenant id contains control characters".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TenantId {
    type Error = FaqError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<TenantId> for String {
    fn from(value: TenantId) -> Self {
        value.0
    }
}

impl std::str::FromStr for TenantId {
    type Err = FaqError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// A stored question/answer pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaEntry {
    pub id: EntryId,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Question/answer pair without identity, used for import/export files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqDocument {
    pub question: String,
    pub answer: String,
}

impl FaqDocument {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

impl From<&QaEntry> for FaqDocument {
    fn from(entry: &QaEntry) -> Self {
        Self::new(entry.question.clone(), entry.answer.clone())
    }
}

/// Trim a question/answer pair and reject empty fields.
///
/// Invalid entries must never reach the store or the index.
pub fn normalize_pair(question: &str, answer: &str) -> Result<(String, String)> {
    let question = question.trim();
    let answer = answer.trim();
    if question.is_empty() {
        return Err(FaqError::Validation("question is empty".to_string()));
    }
    if answer.is_empty() {
        return Err(FaqError::Validation("answer is empty".to_string()));
    }
    Ok((question.to_string(), answer.to_string()))
}
