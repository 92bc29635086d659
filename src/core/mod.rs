//! Core entry types shared by storage, search and the knowledge base

pub mod entry;

pub use entry::{EntryId, FaqDocument, QaEntry, TenantId, normalize_pair};
