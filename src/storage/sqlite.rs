//! SQLite-backed entry store

use std::path::Path;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::core::{EntryId, QaEntry, TenantId};
use crate::error::Result;
use crate::storage::{QaStore, migrations};

/// SQLite database wrapper for question/answer entries.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    schema_version: u32,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("schema_version", &self.schema_version)
            .finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Open or create the database at `path`, creating parent directories and
    /// running pending migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::configure_pragmas(&conn)?;
        let schema_version = migrations::run_migrations(&conn)?;
        tracing::debug!(path = %path.display(), schema_version, "opened entry store");

        Ok(Self {
            conn: Mutex::new(conn),
            schema_version,
        })
    }

    /// Private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let schema_version = migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            schema_version,
        })
    }

    /// Current schema version after migrations.
    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn journal_mode(&self) -> Result<String> {
        let conn = self.conn.lock();
        Ok(conn.query_row("PRAGMA journal_mode;", [], |row| row.get(0))?)
    }

    /// Tenants that have at least one entry.
    pub fn tenants(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock();
        let mut stmt =
            conn.prepare("SELECT DISTINCT tenant FROM qa_entries ORDER BY tenant")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<String>>>()?)
    }

    fn configure_pragmas(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;
             PRAGMA temp_store = MEMORY;",
        )?;
        Ok(())
    }
}

impl QaStore for SqliteStore {
    fn upsert(&self, tenant: &TenantId, question: &str, answer: &str) -> Result<EntryId> {
        let now = Utc::now().to_rfc3339();
        let conn = self.conn.lock();
        let id: i64 = conn.query_row(
            "INSERT INTO qa_entries (tenant, question, answer, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(tenant, question) DO UPDATE SET
                answer = excluded.answer,
                updated_at = excluded.updated_at
             RETURNING id",
            params![tenant.as_str(), question, answer, now],
            |row| row.get(0),
        )?;
        Ok(EntryId(id))
    }

    fn get_by_id(&self, tenant: &TenantId, id: EntryId) -> Result<Option<QaEntry>> {
        let conn = self.conn.lock();
        let entry = conn
            .query_row(
                "SELECT id, question, answer, created_at, updated_at
                 FROM qa_entries WHERE tenant = ?1 AND id = ?2",
                params![tenant.as_str(), id.get()],
                entry_from_row,
            )
            .optional()?;
        Ok(entry)
    }

    fn get_by_question(&self, tenant: &TenantId, question: &str) -> Result<Option<EntryId>> {
        let conn = self.conn.lock();
        let id = conn
            .query_row(
                "SELECT id FROM qa_entries WHERE tenant = ?1 AND question = ?2",
                params![tenant.as_str(), question],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(id.map(EntryId))
    }

    fn get_all(&self, tenant: &TenantId) -> Result<Vec<QaEntry>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, question, answer, created_at, updated_at
             FROM qa_entries WHERE tenant = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map([tenant.as_str()], entry_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn delete(&self, tenant: &TenantId, id: EntryId) -> Result<bool> {
        let conn = self.conn.lock();
        let changed = conn.execute(
            "DELETE FROM qa_entries WHERE tenant = ?1 AND id = ?2",
            params![tenant.as_str(), id.get()],
        )?;
        Ok(changed > 0)
    }
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<QaEntry> {
    Ok(QaEntry {
        id: EntryId(row.get(0)?),
        question: row.get(1)?,
        answer: row.get(2)?,
        created_at: timestamp(row, 3)?,
        updated_at: timestamp(row, 4)?,
    })
}

fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tenant(name: &str) -> TenantId {
        TenantId::new(name).unwrap()
    }

    #[test]
    fn test_database_creation_and_schema_version() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested/faqkit.db");
        let store = SqliteStore::open(&db_path).unwrap();
        assert!(db_path.exists());
        assert_eq!(store.schema_version(), migrations::SCHEMA_VERSION);
    }

    #[test]
    fn test_wal_mode_enabled() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("faqkit.db")).unwrap();
        assert_eq!(store.journal_mode().unwrap().to_lowercase(), "wal");
    }

    #[test]
    fn test_upsert_returns_stable_id() {
        let store = SqliteStore::open_in_memory().unwrap();
        let t = tenant("group-1");
        let first = store.upsert(&t, "A", "1").unwrap();
        let second = store.upsert(&t, "A", "2").unwrap();
        assert_eq!(first, second);

        let entry = store.get_by_id(&t, first).unwrap().unwrap();
        assert_eq!(entry.question, "A");
        assert_eq!(entry.answer, "2");
        assert!(entry.updated_at >= entry.created_at);
    }

    #[test]
    fn test_get_by_question_and_delete() {
        let store = SqliteStore::open_in_memory().unwrap();
        let t = tenant("t");
        let id = store.upsert(&t, "明天放假吗", "不放假").unwrap();
        assert_eq!(store.get_by_question(&t, "明天放假吗").unwrap(), Some(id));
        assert!(store.delete(&t, id).unwrap());
        assert!(!store.delete(&t, id).unwrap());
        assert!(store.get_by_question(&t, "明天放假吗").unwrap().is_none());
    }

    #[test]
    fn test_tenant_namespacing() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = tenant("a");
        let b = tenant("b'; DROP TABLE qa_entries; --");
        let id_a = store.upsert(&a, "same question", "a").unwrap();
        let id_b = store.upsert(&b, "same question", "b").unwrap();
        assert_ne!(id_a, id_b);

        assert!(store.get_by_id(&b, id_a).unwrap().is_none());
        assert!(!store.delete(&b, id_a).unwrap());
        assert_eq!(store.get_all(&a).unwrap().len(), 1);
        assert_eq!(store.get_all(&b).unwrap()[0].answer, "b");
        assert_eq!(store.tenants().unwrap().len(), 2);
    }

    #[test]
    fn test_get_all_ordered_by_id() {
        let store = SqliteStore::open_in_memory().unwrap();
        let t = tenant("t");
        let ids: Vec<_> = ["z", "y", "x"]
            .into_iter()
            .map(|q| store.upsert(&t, q, "ans").unwrap())
            .collect();
        let listed: Vec<_> = store.get_all(&t).unwrap().iter().map(|e| e.id).collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn test_reopen_preserves_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("faqkit.db");
        let t = tenant("t");
        let id = {
            let store = SqliteStore::open(&path).unwrap();
            store.upsert(&t, "persisted?", "yes").unwrap()
        };
        let store = SqliteStore::open(&path).unwrap();
        let entry = store.get_by_id(&t, id).unwrap().unwrap();
        assert_eq!(entry.answer, "yes");
    }
}
