//! Score fusion: TF-IDF cosine + edit-distance ratio
//!
//! ```text
//! combined(q, d) = w_tfidf · cosine(q, d) + w_edit · edit_ratio(q, d)
//! ```
//!
//! The edit ratio compares raw strings, independent of tokenization, so it
//! catches near-verbatim restatements that token overlap misses. Defaults
//! weight it at 0.7 against 0.3 for the cosine term; both are configurable.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;

/// Rounding slack absorbed when a fused score lands next to 1.0.
pub const UNIT_TOLERANCE: f64 = 1e-12;

/// Fusion weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the TF-IDF cosine similarity
    pub tfidf: f64,
    /// Weight of the edit-distance ratio
    pub edit: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            tfidf: 0.3,
            edit: 0.7,
        }
    }
}

impl ScoreWeights {
    pub const fn new(tfidf: f64, edit: f64) -> Self {
        Self { tfidf, edit }
    }
}

/// The fused score with its components, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub score: f64,
    pub cosine: f64,
    pub edit_ratio: f64,
}

/// Combines cosine similarity and edit ratio into one score.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    weights: ScoreWeights,
}

impl Scorer {
    pub const fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub const fn from_config(config: &MatchConfig) -> Self {
        Self::new(ScoreWeights::new(config.tfidf_weight, config.edit_weight))
    }

    pub const fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Weighted sum of the two similarity signals.
    ///
    /// Sums within [`UNIT_TOLERANCE`] of 1.0 are reported as exactly 1.0, so
    /// a perfect match passes a threshold of 1.0 whatever the weights.
    pub fn combined(&self, cosine: f64, edit_ratio: f64) -> f64 {
        let score = self.weights.tfidf * cosine + self.weights.edit * edit_ratio;
        if (score - 1.0).abs() <= UNIT_TOLERANCE {
            1.0
        } else {
            score
        }
    }

    /// Score a raw query against a raw candidate question given their cosine.
    pub fn score(&self, query: &str, question: &str, cosine: f64) -> ScoreBreakdown {
        let edit_ratio = edit_ratio(query, question);
        ScoreBreakdown {
            score: self.combined(cosine, edit_ratio),
            cosine,
            edit_ratio,
        }
    }
}

/// Ratcliff/Obershelp similarity: `2·M / (|a| + |b|)`.
///
/// `M` is the total length of matching blocks, found by taking the longest
/// common block and recursing on the pieces to its left and right. Lengths
/// are counted in Unicode scalar values. Two empty strings are identical
/// (1.0); one empty string scores 0.0.
pub fn edit_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches = matching_chars(&a, &b);
    (2 * matches) as f64 / total as f64
}

/// Total size of the matching blocks between `a` and `b`.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, ch) in b.iter().enumerate() {
        b2j.entry(*ch).or_default().push(j);
    }

    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

/// Longest block `a[i..i+k] == b[j..j+k]` inside the given ranges.
///
/// Ties go to the block starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    // j2len[j] = length of the match ending at a[i-1], b[j]
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for i in alo..ahi {
        let mut next: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(&a[i]) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = if j > 0 {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                } else {
                    1
                };
                next.insert(j, k);
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            }
        }
        j2len = next;
    }

    (best_i, best_j, best_k)
}
