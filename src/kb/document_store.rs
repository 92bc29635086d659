//! Tenant-scoped view over a [`QaStore`].

use std::sync::Arc;

use serde::Serialize;

use crate::core::{EntryId, QaEntry, TenantId, normalize_pair};
use crate::error::Result;
use crate::storage::QaStore;

/// Id of an upserted entry and whether it was newly created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Upserted {
    pub id: EntryId,
    pub created: bool,
}

/// Owns entry identity and question uniqueness for one tenant; every write
/// goes straight through to the store.
#[derive(Clone)]
pub struct DocumentStore {
    tenant: TenantId,
    store: Arc<dyn QaStore>,
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("tenant", &self.tenant)
            .finish_non_exhaustive()
    }
}

impl DocumentStore {
    pub fn new(tenant: TenantId, store: Arc<dyn QaStore>) -> Self {
        Self { tenant, store }
    }

    pub fn tenant(&self) -> &TenantId {
        &self.tenant
    }

    /// Insert a question, or replace the answer if the question exists.
    pub fn add_or_update(&self, question: &str, answer: &str) -> Result<EntryId> {
        self.upsert(question, answer).map(|upserted| upserted.id)
    }

    /// Like [`Self::add_or_update`], also reporting whether a new entry was
    /// created.
    ///
    /// Question and answer are trimmed; either being empty afterwards is a
    /// validation error and nothing is written.
    pub fn upsert(&self, question: &str, answer: &str) -> Result<Upserted> {
        let (question, answer) = normalize_pair(question, answer)?;
        let existing = self.store.get_by_question(&self.tenant, &question)?;
        let id = self.store.upsert(&self.tenant, &question, &answer)?;
        Ok(Upserted {
            id,
            created: existing.is_none(),
        })
    }

    pub fn get_id_by_question(&self, question: &str) -> Result<Option<EntryId>> {
        let question = question.trim();
        if question.is_empty() {
            return Ok(None);
        }
        self.store.get_by_question(&self.tenant, question)
    }

    pub fn get(&self, id: EntryId) -> Result<Option<QaEntry>> {
        self.store.get_by_id(&self.tenant, id)
    }

    pub fn delete(&self, id: EntryId) -> Result<bool> {
        self.store.delete(&self.tenant, id)
    }

    /// Every entry of the tenant, ascending by id.
    pub fn list_all(&self) -> Result<Vec<QaEntry>> {
        let mut entries = self.store.get_all(&self.tenant)?;
        entries.sort_by_key(|entry| entry.id);
        Ok(entries)
    }
}
