//! Per-item reporting for batch mutations.

use serde::Serialize;

use crate::core::EntryId;
use crate::error::{ErrorCode, FaqError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BatchStatus {
    Created { id: EntryId },
    Updated { id: EntryId },
    Deleted { id: EntryId },
    NotFound { id: EntryId },
    Rejected { code: ErrorCode, message: String },
}

impl BatchStatus {
    pub fn rejected(err: &FaqError) -> Self {
        Self::Rejected {
            code: err.code(),
            message: err.to_string(),
        }
    }

    /// `true` unless the item was rejected.
    pub const fn is_applied(&self) -> bool {
        !matches!(self, Self::Rejected { .. })
    }
}

/// Result for the item at `index` in the submitted batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub index: usize,
    #[serde(flatten)]
    pub status: BatchStatus,
}

impl BatchOutcome {
    pub const fn new(index: usize, status: BatchStatus) -> Self {
        Self { index, status }
    }
}

/// Counts per status, for summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub not_found: usize,
    pub rejected: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[BatchOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome.status {
                BatchStatus::Created { .. } => summary.created += 1,
                BatchStatus::Updated { .. } => summary.updated += 1,
                BatchStatus::Deleted { .. } => summary.deleted += 1,
                BatchStatus::NotFound { .. } => summary.not_found += 1,
                BatchStatus::Rejected { .. } => summary.rejected += 1,
            }
        }
        summary
    }

    pub const fn total(&self) -> usize {
        self.created + self.updated + self.deleted + self.not_found + self.rejected
    }
}
