//! Multi-tenant matching front end.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use crate::config::{Config, MatchConfig};
use crate::core::{EntryId, FaqDocument, QaEntry, TenantId};
use crate::error::{FaqError, Result};
use crate::kb::batch::{BatchOutcome, BatchStatus};
use crate::kb::document_store::Upserted;
use crate::kb::knowledge_base::{KnowledgeBase, Revision};
use crate::kb::result::{KnowledgeBaseStats, QueryResult, ScoredMatch};
use crate::search::{Scorer, Tokenizer};
use crate::storage::QaStore;

type SharedKnowledgeBase = Arc<Mutex<KnowledgeBase>>;

/// Routes every call to the knowledge base of its tenant.
///
/// Each tenant has its own lock, so work on one tenant never waits for
/// another. The tenant map lock is only held to look up or insert a
/// knowledge base.
///
/// Write revisions outlive eviction: a handle taken before [`Self::evict`]
/// still dirties the knowledge base that replaces it.
pub struct MatchEngine {
    store: Arc<dyn QaStore>,
    tokenizer: Arc<Tokenizer>,
    scorer: Scorer,
    config: MatchConfig,
    tenants: RwLock<HashMap<TenantId, SharedKnowledgeBase>>,
    revisions: Mutex<HashMap<TenantId, Revision>>,
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("config", &self.config)
            .field("tenants", &self.tenants.read().len())
            .finish_non_exhaustive()
    }
}

impl MatchEngine {
    pub fn new(store: Arc<dyn QaStore>, tokenizer: Tokenizer, config: MatchConfig) -> Self {
        Self {
            store,
            tokenizer: Arc::new(tokenizer),
            scorer: Scorer::from_config(&config),
            config,
            tenants: RwLock::new(HashMap::new()),
            revisions: Mutex::new(HashMap::new()),
        }
    }

    /// Validate `config` and build the tokenizer it describes.
    pub fn from_config(config: &Config, store: Arc<dyn QaStore>) -> Result<Self> {
        config.validate()?;
        let tokenizer = Tokenizer::from_config(&config.tokenizer)?;
        Ok(Self::new(store, tokenizer, config.matching.clone()))
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    fn knowledge_base(&self, tenant: &TenantId) -> SharedKnowledgeBase {
        let existing = self.tenants.read().get(tenant).cloned();
        if let Some(kb) = existing {
            return kb;
        }
        let mut tenants = self.tenants.write();
        let kb = tenants.entry(tenant.clone()).or_insert_with(|| {
            debug!(%tenant, "creating knowledge base");
            let revision = self
                .revisions
                .lock()
                .entry(tenant.clone())
                .or_default()
                .clone();
            Arc::new(Mutex::new(KnowledgeBase::with_revision(
                tenant.clone(),
                Arc::clone(&self.store),
                Arc::clone(&self.tokenizer),
                self.scorer,
                revision,
            )))
        });
        Arc::clone(kb)
    }

    // =========================================================================
    // Entries
    // =========================================================================

    pub fn add_or_update(&self, tenant: &TenantId, question: &str, answer: &str) -> Result<EntryId> {
        self.knowledge_base(tenant).lock().add_or_update(question, answer)
    }

    pub fn upsert(&self, tenant: &TenantId, question: &str, answer: &str) -> Result<Upserted> {
        self.knowledge_base(tenant).lock().upsert(question, answer)
    }

    pub fn delete(&self, tenant: &TenantId, id: EntryId) -> Result<bool> {
        self.knowledge_base(tenant).lock().delete(id)
    }

    pub fn get_id_by_question(&self, tenant: &TenantId, question: &str) -> Result<Option<EntryId>> {
        self.knowledge_base(tenant)
            .lock()
            .documents()
            .get_id_by_question(question)
    }

    pub fn get(&self, tenant: &TenantId, id: EntryId) -> Result<Option<QaEntry>> {
        self.knowledge_base(tenant).lock().documents().get(id)
    }

    pub fn list_all(&self, tenant: &TenantId) -> Result<Vec<QaEntry>> {
        self.knowledge_base(tenant).lock().documents().list_all()
    }

    // =========================================================================
    // Batches
    // =========================================================================

    /// Upsert every document; a failing item is reported and skipped.
    pub fn batch_add(&self, tenant: &TenantId, items: &[FaqDocument]) -> Vec<BatchOutcome> {
        let kb = self.knowledge_base(tenant);
        let mut kb = kb.lock();
        let outcomes: Vec<BatchOutcome> = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let status = match kb.upsert(&item.question, &item.answer) {
                    Ok(Upserted { id, created: true }) => BatchStatus::Created { id },
                    Ok(Upserted { id, created: false }) => BatchStatus::Updated { id },
                    Err(err) => BatchStatus::rejected(&err),
                };
                BatchOutcome::new(index, status)
            })
            .collect();
        info!(
            %tenant,
            items = items.len(),
            applied = outcomes.iter().filter(|o| o.status.is_applied()).count(),
            "batch add"
        );
        outcomes
    }

    /// Delete every id; unknown ids are reported as not found.
    pub fn batch_delete(&self, tenant: &TenantId, ids: &[EntryId]) -> Vec<BatchOutcome> {
        let kb = self.knowledge_base(tenant);
        let mut kb = kb.lock();
        let outcomes: Vec<BatchOutcome> = ids
            .iter()
            .enumerate()
            .map(|(index, &id)| {
                let status = match kb.delete(id) {
                    Ok(true) => BatchStatus::Deleted { id },
                    Ok(false) => BatchStatus::NotFound { id },
                    Err(err) => BatchStatus::rejected(&err),
                };
                BatchOutcome::new(index, status)
            })
            .collect();
        info!(
            %tenant,
            items = ids.len(),
            applied = outcomes.iter().filter(|o| o.status.is_applied()).count(),
            "batch delete"
        );
        outcomes
    }

    /// Read a JSON array of `{question, answer}` documents and add them.
    pub fn import_json<R: Read>(&self, tenant: &TenantId, reader: R) -> Result<Vec<BatchOutcome>> {
        let documents: Vec<FaqDocument> = serde_json::from_reader(reader)?;
        Ok(self.batch_add(tenant, &documents))
    }

    /// Write the tenant's entries as a JSON array of documents.
    pub fn export_json<W: Write>(&self, tenant: &TenantId, writer: W) -> Result<usize> {
        let documents: Vec<FaqDocument> = self
            .list_all(tenant)?
            .iter()
            .map(FaqDocument::from)
            .collect();
        serde_json::to_writer_pretty(writer, &documents)?;
        Ok(documents.len())
    }

    // =========================================================================
    // Matching
    // =========================================================================

    pub fn find_best_match(
        &self,
        tenant: &TenantId,
        query: &str,
        threshold: f64,
    ) -> Result<QueryResult> {
        self.knowledge_base(tenant)
            .lock()
            .find_best_match(query, threshold)
    }

    pub fn find_multiple_matches(
        &self,
        tenant: &TenantId,
        query: &str,
        min_score: f64,
        max_results: usize,
    ) -> Result<Vec<ScoredMatch>> {
        self.knowledge_base(tenant)
            .lock()
            .find_multiple_matches(query, min_score, max_results)
    }

    /// Best match at the configured threshold.
    pub fn query(&self, tenant: &TenantId, query: &str) -> Result<QueryResult> {
        self.find_best_match(tenant, query, self.config.threshold)
    }

    /// Ranked matches with the configured `min_score` and `max_results`.
    pub fn top_matches(&self, tenant: &TenantId, query: &str) -> Result<Vec<ScoredMatch>> {
        self.find_multiple_matches(tenant, query, self.config.min_score, self.config.max_results)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub fn rebuild(&self, tenant: &TenantId) -> Result<KnowledgeBaseStats> {
        let kb = self.knowledge_base(tenant);
        let mut kb = kb.lock();
        kb.rebuild()?;
        Ok(kb.stats())
    }

    pub fn stats(&self, tenant: &TenantId) -> KnowledgeBaseStats {
        self.knowledge_base(tenant).lock().stats()
    }

    /// Tenants with a live knowledge base, sorted.
    pub fn tenants(&self) -> Vec<TenantId> {
        let mut tenants: Vec<TenantId> = self.tenants.read().keys().cloned().collect();
        tenants.sort();
        tenants
    }

    /// Drop a tenant's in-memory state. Stored entries are untouched and are
    /// reloaded on the next call for that tenant.
    pub fn evict(&self, tenant: &TenantId) -> bool {
        let removed = self.tenants.write().remove(tenant).is_some();
        if removed {
            debug!(%tenant, "evicted knowledge base");
        }
        removed
    }

    // =========================================================================
    // Async offload
    // =========================================================================

    /// [`Self::rebuild`] on tokio's blocking pool.
    pub async fn rebuild_offloaded(&self, tenant: &TenantId) -> Result<KnowledgeBaseStats> {
        let kb = self.knowledge_base(tenant);
        run_blocking(move || {
            let mut kb = kb.lock();
            kb.rebuild()?;
            Ok(kb.stats())
        })
        .await
    }

    /// [`Self::find_multiple_matches`] on tokio's blocking pool.
    pub async fn find_multiple_matches_offloaded(
        &self,
        tenant: &TenantId,
        query: String,
        min_score: f64,
        max_results: usize,
    ) -> Result<Vec<ScoredMatch>> {
        let kb = self.knowledge_base(tenant);
        run_blocking(move || {
            kb.lock()
                .find_multiple_matches(&query, min_score, max_results)
        })
        .await
    }
}

async fn run_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|err| FaqError::TaskFailed(format!("blocking task join failed: {err}")))?
}
