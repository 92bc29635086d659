//! Inverted index for candidate narrowing.
//!
//! Maps tokens to the set of entry ids whose question produced them. The
//! index is rebuilt wholesale from the current entry set; there is no
//! incremental posting maintenance.

use std::collections::{BTreeSet, HashMap};

use crate::core::EntryId;

/// A question's id together with its tokens, the unit both the inverted
/// index and the vector model are built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedEntry {
    pub id: EntryId,
    pub tokens: Vec<String>,
}

impl TokenizedEntry {
    pub fn new(id: EntryId, tokens: Vec<String>) -> Self {
        Self { id, tokens }
    }
}

/// Token → posting list.
#[derive(Debug, Clone, Default)]
pub struct InvertedIndex {
    postings: HashMap<String, BTreeSet<EntryId>>,
    all_ids: BTreeSet<EntryId>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh index from tokenized entries.
    ///
    /// Returns a new value rather than mutating in place, so the caller can
    /// swap it in only once it is complete.
    pub fn build(entries: &[TokenizedEntry]) -> Self {
        let mut postings: HashMap<String, BTreeSet<EntryId>> = HashMap::new();
        let mut all_ids = BTreeSet::new();

        for entry in entries {
            all_ids.insert(entry.id);
            for token in &entry.tokens {
                postings.entry(token.clone()).or_default().insert(entry.id);
            }
        }

        Self { postings, all_ids }
    }

    /// Union of the postings for every query token.
    ///
    /// When no token overlaps the vocabulary the full entry set is returned
    /// instead, trading scoring cost for recall on short or unusual queries.
    pub fn candidates(&self, query_tokens: &[String]) -> BTreeSet<EntryId> {
        let mut candidates = BTreeSet::new();
        for token in query_tokens {
            if let Some(ids) = self.postings.get(token) {
                candidates.extend(ids.iter().copied());
            }
        }

        if candidates.is_empty() {
            return self.all_ids.clone();
        }
        candidates
    }

    pub fn postings(&self, token: &str) -> Option<&BTreeSet<EntryId>> {
        self.postings.get(token)
    }

    /// Number of distinct tokens.
    pub fn vocabulary_len(&self) -> usize {
        self.postings.len()
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.all_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_ids.is_empty()
    }
}
