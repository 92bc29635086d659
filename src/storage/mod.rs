//! Persistence for question/answer entries
//!
//! [`QaStore`] is the contract the knowledge base writes through. Every call
//! is namespaced by [`TenantId`]; the tenant is only ever a bound value, never
//! part of a table or file name.

pub mod memory;
pub mod migrations;
pub mod sqlite;

use crate::core::{EntryId, QaEntry, TenantId};
use crate::error::Result;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Durable, tenant-namespaced storage for question/answer entries.
///
/// Implementations assign ids, enforce question uniqueness per tenant and
/// must never apply a failed write partially.
pub trait QaStore: Send + Sync {
    /// Insert a new entry, or replace the answer of the entry with the same
    /// question. Returns the entry's id either way.
    fn upsert(&self, tenant: &TenantId, question: &str, answer: &str) -> Result<EntryId>;

    fn get_by_id(&self, tenant: &TenantId, id: EntryId) -> Result<Option<QaEntry>>;

    fn get_by_question(&self, tenant: &TenantId, question: &str) -> Result<Option<EntryId>>;

    /// All entries of a tenant in ascending id order.
    fn get_all(&self, tenant: &TenantId) -> Result<Vec<QaEntry>>;

    /// Returns `false` when no entry with that id exists for the tenant.
    fn delete(&self, tenant: &TenantId, id: EntryId) -> Result<bool>;
}
