//! TF-IDF vector space model
//!
//! Document vectors are built from entry questions only. Weights are
//! `tf · idf` with raw term counts and the smoothed inverse document
//! frequency
//!
//! ```text
//! idf(t) = ln((1 + N) / (1 + df(t))) + 1
//! ```
//!
//! which keeps terms that occur in every document above zero, so even a
//! one-entry corpus produces usable vectors. Vectors are L2-normalized, and
//! cosine similarity reduces to a sparse dot product.

use std::collections::HashMap;

use crate::core::EntryId;
use crate::search::inverted::TokenizedEntry;

/// Sparse, L2-normalized weight vector sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    terms: Vec<(u32, f64)>,
}

impl SparseVector {
    fn from_counts(counts: HashMap<u32, u32>, idf: &[f64]) -> Self {
        let mut terms: Vec<(u32, f64)> = counts
            .into_iter()
            .map(|(term, count)| (term, f64::from(count) * idf[term as usize]))
            .collect();
        terms.sort_unstable_by_key(|(term, _)| *term);
        let mut vector = Self { terms };
        vector.normalize();
        vector
    }

    fn normalize(&mut self) {
        let norm = self.terms.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut self.terms {
                *weight /= norm;
            }
        }
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of non-zero terms.
    pub fn nnz(&self) -> usize {
        self.terms.len()
    }

    pub fn weight(&self, term: u32) -> f64 {
        self.terms
            .binary_search_by_key(&term, |(t, _)| *t)
            .map_or(0.0, |idx| self.terms[idx].1)
    }

    fn dot(&self, other: &Self) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.terms.len() && j < other.terms.len() {
            let (a_term, a_weight) = self.terms[i];
            let (b_term, b_weight) = other.terms[j];
            match a_term.cmp(&b_term) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_weight * b_weight;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Vocabulary, idf weights and per-document vectors from the last build.
#[derive(Debug, Clone, Default)]
pub struct VectorSpaceModel {
    vocabulary: HashMap<String, u32>,
    idf: Vec<f64>,
    documents: HashMap<EntryId, SparseVector>,
}

impl VectorSpaceModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute tf, idf and normalized document vectors for the corpus.
    pub fn build(entries: &[TokenizedEntry]) -> Self {
        let mut vocabulary: HashMap<String, u32> = HashMap::new();
        let mut doc_freq: Vec<u32> = Vec::new();
        let mut counts: Vec<(EntryId, HashMap<u32, u32>)> = Vec::with_capacity(entries.len());

        for entry in entries {
            let mut tf: HashMap<u32, u32> = HashMap::new();
            for token in &entry.tokens {
                let next = vocabulary.len() as u32;
                let term = *vocabulary.entry(token.clone()).or_insert(next);
                if term as usize == doc_freq.len() {
                    doc_freq.push(0);
                }
                let count = tf.entry(term).or_insert(0);
                if *count == 0 {
                    doc_freq[term as usize] += 1;
                }
                *count += 1;
            }
            counts.push((entry.id, tf));
        }

        let n = entries.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + f64::from(df))).ln() + 1.0)
            .collect();

        let documents = counts
            .into_iter()
            .map(|(id, tf)| (id, SparseVector::from_counts(tf, &idf)))
            .collect();

        Self {
            vocabulary,
            idf,
            documents,
        }
    }

    /// Vectorize query tokens with the vocabulary and idf of the last build.
    ///
    /// Out-of-vocabulary tokens are ignored; queries never grow the
    /// vocabulary.
    pub fn transform(&self, query_tokens: &[String]) -> SparseVector {
        let mut tf: HashMap<u32, u32> = HashMap::new();
        for token in query_tokens {
            if let Some(&term) = self.vocabulary.get(token) {
                *tf.entry(term).or_insert(0) += 1;
            }
        }
        SparseVector::from_counts(tf, &self.idf)
    }

    pub fn document(&self, id: EntryId) -> Option<&SparseVector> {
        self.documents.get(&id)
    }

    /// Cosine similarity between a query vector and a stored document.
    ///
    /// Unknown documents score 0.0.
    pub fn similarity(&self, query: &SparseVector, id: EntryId) -> f64 {
        self.document(id).map_or(0.0, |doc| cosine(query, doc))
    }

    pub fn idf(&self, token: &str) -> Option<f64> {
        self.vocabulary
            .get(token)
            .map(|&term| self.idf[term as usize])
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Cosine similarity of two normalized vectors, clamped to `[0, 1]`.
///
/// A zero vector on either side scores 0.0. Equal vectors score exactly
/// 1.0; the dot product of a normalized vector with itself can land an ulp
/// short.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    if a.is_zero() || b.is_zero() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }
    a.dot(b).clamp(0.0, 1.0)
}
