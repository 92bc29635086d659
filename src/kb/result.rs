//! Values returned by matching and inspection calls.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::{EntryId, QaEntry, TenantId};
use crate::search::ScoreBreakdown;

/// Outcome of a best-match lookup.
///
/// Always produced, also when nothing matched: then `question`, `answer` and
/// `id` are `None` and `score` is the best score that fell short.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub score: f64,
    pub id: Option<EntryId>,
}

impl QueryResult {
    pub const fn no_match(score: f64) -> Self {
        Self {
            question: None,
            answer: None,
            score,
            id: None,
        }
    }

    pub fn matched(entry: &QaEntry, score: f64) -> Self {
        Self {
            question: Some(entry.question.clone()),
            answer: Some(entry.answer.clone()),
            score,
            id: Some(entry.id),
        }
    }

    pub const fn is_match(&self) -> bool {
        self.id.is_some()
    }
}

/// One ranked candidate with its score components.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredMatch {
    pub id: EntryId,
    pub question: String,
    pub answer: String,
    pub score: f64,
    pub cosine: f64,
    pub edit_ratio: f64,
}

impl ScoredMatch {
    pub fn new(entry: &QaEntry, breakdown: ScoreBreakdown) -> Self {
        Self {
            id: entry.id,
            question: entry.question.clone(),
            answer: entry.answer.clone(),
            score: breakdown.score,
            cosine: breakdown.cosine,
            edit_ratio: breakdown.edit_ratio,
        }
    }
}

/// Whether the index reflects the latest mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexState {
    Clean,
    Dirty,
}

impl std::fmt::Display for IndexState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clean => f.write_str("clean"),
            Self::Dirty => f.write_str("dirty"),
        }
    }
}

/// Snapshot figures for one tenant's knowledge base.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeBaseStats {
    pub tenant: TenantId,
    /// Entries in the current index snapshot
    pub entries: usize,
    /// Distinct tokens in the current index snapshot
    pub vocabulary: usize,
    pub state: IndexState,
    pub rebuilds: u64,
    pub last_rebuild: Option<DateTime<Utc>>,
}
