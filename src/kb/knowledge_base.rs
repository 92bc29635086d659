//! One tenant's entries, index and scoring state.
//!
//! The index is rebuilt lazily: mutations only bump the tenant's
//! [`Revision`], which leaves the state [`IndexState::Dirty`], and the next query (or an explicit
//! [`KnowledgeBase::rebuild`]) reloads the entries from the store and builds a
//! fresh [`InvertedIndex`] and [`VectorSpaceModel`] off to the side. The new
//! snapshot replaces the old one only once it is complete, so a failed reload
//! leaves the previous snapshot serving queries.
//!
//! The revision can be shared between several knowledge bases of the same
//! tenant, so a write through any of them dirties all of them.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::core::{EntryId, QaEntry, TenantId};
use crate::error::{FaqError, Result};
use crate::kb::document_store::{DocumentStore, Upserted};
use crate::kb::result::{IndexState, KnowledgeBaseStats, QueryResult, ScoredMatch};
use crate::search::{InvertedIndex, Scorer, TokenizedEntry, Tokenizer, VectorSpaceModel};
use crate::storage::QaStore;

#[derive(Debug, Default)]
struct Snapshot {
    entries: HashMap<EntryId, QaEntry>,
    index: InvertedIndex,
    model: VectorSpaceModel,
}

impl Snapshot {
    fn build(entries: Vec<QaEntry>, tokenizer: &Tokenizer) -> Self {
        let tokenized: Vec<TokenizedEntry> = entries
            .iter()
            .map(|entry| TokenizedEntry::new(entry.id, tokenizer.tokenize(&entry.question)))
            .collect();
        Self {
            index: InvertedIndex::build(&tokenized),
            model: VectorSpaceModel::build(&tokenized),
            entries: entries.into_iter().map(|entry| (entry.id, entry)).collect(),
        }
    }
}

/// Write counter for one tenant's stored entries.
///
/// Clones share the counter.
#[derive(Debug, Clone, Default)]
pub struct Revision(Arc<AtomicU64>);

impl Revision {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }
}

#[derive(Debug)]
pub struct KnowledgeBase {
    documents: DocumentStore,
    tokenizer: Arc<Tokenizer>,
    scorer: Scorer,
    snapshot: Snapshot,
    revision: Revision,
    /// Revision the snapshot was loaded at.
    built: Option<u64>,
    rebuilds: u64,
    last_rebuild: Option<DateTime<Utc>>,
}

impl KnowledgeBase {
    /// Starts Dirty, so the first query loads whatever the store holds.
    pub fn new(
        tenant: TenantId,
        store: Arc<dyn QaStore>,
        tokenizer: Arc<Tokenizer>,
        scorer: Scorer,
    ) -> Self {
        Self::with_revision(tenant, store, tokenizer, scorer, Revision::new())
    }

    /// Like [`Self::new`], tracking writes in a revision shared with other
    /// knowledge bases of the same tenant.
    pub fn with_revision(
        tenant: TenantId,
        store: Arc<dyn QaStore>,
        tokenizer: Arc<Tokenizer>,
        scorer: Scorer,
        revision: Revision,
    ) -> Self {
        Self {
            documents: DocumentStore::new(tenant, store),
            tokenizer,
            scorer,
            snapshot: Snapshot::default(),
            revision,
            built: None,
            rebuilds: 0,
            last_rebuild: None,
        }
    }

    pub fn tenant(&self) -> &TenantId {
        self.documents.tenant()
    }

    /// Clean only while no write has landed since the snapshot was loaded.
    pub fn state(&self) -> IndexState {
        if self.built == Some(self.revision.current()) {
            IndexState::Clean
        } else {
            IndexState::Dirty
        }
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub fn add_or_update(&mut self, question: &str, answer: &str) -> Result<EntryId> {
        self.upsert(question, answer).map(|upserted| upserted.id)
    }

    pub fn upsert(&mut self, question: &str, answer: &str) -> Result<Upserted> {
        let upserted = self.documents.upsert(question, answer).inspect_err(|err| {
            warn!(tenant = %self.tenant(), error = %err, "upsert failed");
        })?;
        self.revision.bump();
        debug!(
            tenant = %self.tenant(),
            id = %upserted.id,
            created = upserted.created,
            "entry stored"
        );
        Ok(upserted)
    }

    pub fn delete(&mut self, id: EntryId) -> Result<bool> {
        let deleted = self.documents.delete(id).inspect_err(|err| {
            warn!(tenant = %self.tenant(), error = %err, "delete failed");
        })?;
        if deleted {
            self.revision.bump();
            debug!(tenant = %self.tenant(), %id, "entry deleted");
        }
        Ok(deleted)
    }

    // =========================================================================
    // Index lifecycle
    // =========================================================================

    /// Reload entries and rebuild the index and vector model.
    ///
    /// On a store failure the previous snapshot stays in place and the state
    /// stays Dirty.
    pub fn rebuild(&mut self) -> Result<()> {
        let started = Instant::now();
        // Read before loading: a write landing mid-load leaves us Dirty.
        let revision = self.revision.current();
        let entries = self.documents.list_all().map_err(|err| {
            warn!(tenant = %self.tenant(), error = %err, "rebuild failed, keeping previous index");
            FaqError::StoreUnavailable(format!("reload entries for tenant {}: {err}", self.tenant()))
        })?;

        let snapshot = Snapshot::build(entries, &self.tokenizer);
        self.snapshot = snapshot;
        self.built = Some(revision);
        self.rebuilds += 1;
        self.last_rebuild = Some(Utc::now());

        info!(
            tenant = %self.tenant(),
            entries = self.snapshot.entries.len(),
            vocabulary = self.snapshot.index.vocabulary_len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "index rebuilt"
        );
        Ok(())
    }

    fn ensure_clean(&mut self) -> Result<()> {
        if self.state() == IndexState::Dirty {
            self.rebuild()?;
        }
        Ok(())
    }

    pub fn stats(&self) -> KnowledgeBaseStats {
        KnowledgeBaseStats {
            tenant: self.tenant().clone(),
            entries: self.snapshot.entries.len(),
            vocabulary: self.snapshot.index.vocabulary_len(),
            state: self.state(),
            rebuilds: self.rebuilds,
            last_rebuild: self.last_rebuild,
        }
    }

    // =========================================================================
    // Matching
    // =========================================================================

    /// Best single answer for `query`.
    ///
    /// `query` is trimmed before it is tokenized and before the edit ratio
    /// compares it with the stored (trimmed) question.
    ///
    /// The candidate with the highest cosine similarity (lowest id on ties)
    /// is verified with the combined score; below `threshold` the result
    /// carries only that score.
    pub fn find_best_match(&mut self, query: &str, threshold: f64) -> Result<QueryResult> {
        self.ensure_clean()?;
        if self.snapshot.entries.is_empty() {
            return Ok(QueryResult::no_match(0.0));
        }

        let query = query.trim();
        let tokens = self.tokenizer.tokenize(query);
        if tokens.is_empty() {
            return Ok(QueryResult::no_match(0.0));
        }

        let candidates = self.snapshot.index.candidates(&tokens);
        let query_vector = self.snapshot.model.transform(&tokens);

        let mut best: Option<(EntryId, f64)> = None;
        for &id in &candidates {
            let similarity = self.snapshot.model.similarity(&query_vector, id);
            if best.is_none_or(|(_, current)| similarity > current) {
                best = Some((id, similarity));
            }
        }

        let Some((id, cosine)) = best else {
            return Ok(QueryResult::no_match(0.0));
        };
        let Some(entry) = self.snapshot.entries.get(&id) else {
            return Ok(QueryResult::no_match(0.0));
        };

        let breakdown = self.scorer.score(query, &entry.question, cosine);
        debug!(
            tenant = %self.tenant(),
            candidates = candidates.len(),
            %id,
            score = breakdown.score,
            cosine = breakdown.cosine,
            edit_ratio = breakdown.edit_ratio,
            "best match scored"
        );

        if breakdown.score >= threshold {
            Ok(QueryResult::matched(entry, breakdown.score))
        } else {
            Ok(QueryResult::no_match(breakdown.score))
        }
    }

    /// Every candidate scored with the combined score, keeping those at or
    /// above `min_score`, best first (lower id first on ties), at most
    /// `max_results` long. `query` is trimmed as in [`Self::find_best_match`].
    pub fn find_multiple_matches(
        &mut self,
        query: &str,
        min_score: f64,
        max_results: usize,
    ) -> Result<Vec<ScoredMatch>> {
        self.ensure_clean()?;
        if self.snapshot.entries.is_empty() || max_results == 0 {
            return Ok(Vec::new());
        }

        let query = query.trim();
        let tokens = self.tokenizer.tokenize(query);
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let candidates: Vec<EntryId> = self
            .snapshot
            .index
            .candidates(&tokens)
            .into_iter()
            .collect();
        let query_vector = self.snapshot.model.transform(&tokens);
        let snapshot = &self.snapshot;
        let scorer = self.scorer;

        let mut matches: Vec<ScoredMatch> = candidates
            .par_iter()
            .filter_map(|id| {
                let entry = snapshot.entries.get(id)?;
                let cosine = snapshot.model.similarity(&query_vector, *id);
                let breakdown = scorer.score(query, &entry.question, cosine);
                (breakdown.score >= min_score).then(|| ScoredMatch::new(entry, breakdown))
            })
            .collect();

        matches.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.id.cmp(&b.id)));
        matches.truncate(max_results);

        debug!(
            tenant = %self.tenant(),
            candidates = candidates.len(),
            returned = matches.len(),
            "ranked matches"
        );
        Ok(matches)
    }
}
