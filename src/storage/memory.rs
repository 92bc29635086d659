//! In-process store, used by tests and short-lived engines.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use parking_lot::Mutex;

use crate::core::{EntryId, QaEntry, TenantId};
use crate::error::Result;
use crate::storage::QaStore;

#[derive(Debug, Default)]
struct TenantTable {
    entries: BTreeMap<EntryId, QaEntry>,
    by_question: HashMap<String, EntryId>,
}

#[derive(Debug)]
struct Inner {
    next_id: i64,
    tenants: HashMap<TenantId, TenantTable>,
}

/// [`QaStore`] backed by per-tenant maps.
///
/// Ids come from one counter shared by all tenants, so they are unique
/// across the whole store just like SQLite rowids.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_id: 1,
                tenants: HashMap::new(),
            }),
        }
    }

    /// Total entries across every tenant.
    pub fn total_entries(&self) -> usize {
        self.inner
            .lock()
            .tenants
            .values()
            .map(|table| table.entries.len())
            .sum()
    }
}

impl QaStore for MemoryStore {
    fn upsert(&self, tenant: &TenantId, question: &str, answer: &str) -> Result<EntryId> {
        let mut inner = self.inner.lock();
        let now = Utc::now();

        if let Some(table) = inner.tenants.get_mut(tenant) {
            if let Some(&id) = table.by_question.get(question) {
                if let Some(entry) = table.entries.get_mut(&id) {
                    entry.answer = answer.to_string();
                    entry.updated_at = now;
                }
                return Ok(id);
            }
        }

        let id = EntryId(inner.next_id);
        inner.next_id += 1;
        let table = inner.tenants.entry(tenant.clone()).or_default();
        table.by_question.insert(question.to_string(), id);
        table.entries.insert(
            id,
            QaEntry {
                id,
                question: question.to_string(),
                answer: answer.to_string(),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    fn get_by_id(&self, tenant: &TenantId, id: EntryId) -> Result<Option<QaEntry>> {
        let inner = self.inner.lock();
        Ok(inner
            .tenants
            .get(tenant)
            .and_then(|table| table.entries.get(&id))
            .cloned())
    }

    fn get_by_question(&self, tenant: &TenantId, question: &str) -> Result<Option<EntryId>> {
        let inner = self.inner.lock();
        Ok(inner
            .tenants
            .get(tenant)
            .and_then(|table| table.by_question.get(question))
            .copied())
    }

    fn get_all(&self, tenant: &TenantId) -> Result<Vec<QaEntry>> {
        let inner = self.inner.lock();
        Ok(inner
            .tenants
            .get(tenant)
            .map(|table| table.entries.values().cloned().collect())
            .unwrap_or_default())
    }

    fn delete(&self, tenant: &TenantId, id: EntryId) -> Result<bool> {
        let mut inner = self.inner.lock();
        let Some(table) = inner.tenants.get_mut(tenant) else {
            return Ok(false);
        };
        match table.entries.remove(&id) {
            Some(entry) => {
                table.by_question.remove(&entry.question);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
