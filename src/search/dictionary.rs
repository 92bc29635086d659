//! User word list layered over the segmenter's built-in dictionary
//!
//! Format is one entry per line: `word` or `word frequency`. Blank lines and
//! lines starting with `#` are ignored. A word without a frequency gets
//! [`DEFAULT_FREQUENCY`]. A higher frequency makes the segmenter keep the
//! word whole more eagerly.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{FaqError, Result};

/// Frequency assigned to user words that omit one.
pub const DEFAULT_FREQUENCY: usize = 1000;

/// Upper bound on the summed frequency of all user words.
///
/// The segmenter adds these to its own corpus total, which has to stay
/// representable.
pub const MAX_TOTAL_FREQUENCY: usize = 1 << 30;

/// Word → frequency table merged into the segmenter at startup.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    freqs: HashMap<String, usize>,
    total: usize,
}

impl Dictionary {
    /// No user words: segmentation uses the built-in dictionary alone.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse dictionary text.
    pub fn parse(text: &str) -> Result<Self> {
        let mut dict = Self::default();
        dict.merge_text(text)?;
        Ok(dict)
    }

    /// Merge a dictionary file on top of this one. Later entries win.
    pub fn load_user_dict(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let added = self.merge_text(&raw)?;
        tracing::debug!(path = %path.display(), words = added, "loaded user dictionary");
        Ok(added)
    }

    /// Merge dictionary text, returning the number of entries read.
    ///
    /// Every line is validated before anything is applied, so an error
    /// leaves the dictionary untouched.
    pub fn merge_text(&mut self, text: &str) -> Result<usize> {
        let mut staged: HashMap<String, usize> = HashMap::new();
        let mut total = self.total;
        let mut count = 0;

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else {
                continue;
            };
            let invalid = |reason: String| FaqError::Dictionary {
                line: idx + 1,
                reason,
            };
            let freq = match parts.next() {
                Some(raw) => raw
                    .parse::<usize>()
                    .map_err(|err| invalid(format!("invalid frequency {raw:?}: {err}")))?,
                None => DEFAULT_FREQUENCY,
            };
            if freq == 0 {
                return Err(invalid("frequency must be positive".to_string()));
            }

            let word = word.to_lowercase();
            let previous = staged
                .get(&word)
                .or_else(|| self.freqs.get(&word))
                .copied()
                .unwrap_or(0);
            total = replace_in_total(total, previous, freq).ok_or_else(|| {
                invalid(format!(
                    "frequency total exceeds {MAX_TOTAL_FREQUENCY}"
                ))
            })?;
            staged.insert(word, freq);
            count += 1;
        }

        self.freqs.extend(staged);
        self.total = total;
        Ok(count)
    }

    /// Insert or replace a word.
    pub fn insert(&mut self, word: impl Into<String>, freq: usize) -> Result<()> {
        let word = word.into().to_lowercase();
        if word.is_empty() || freq == 0 {
            return Err(FaqError::Validation(
                "dictionary words need text and a positive frequency".to_string(),
            ));
        }
        let previous = self.freqs.get(&word).copied().unwrap_or(0);
        self.total = replace_in_total(self.total, previous, freq).ok_or_else(|| {
            FaqError::Validation(format!(
                "dictionary frequency total exceeds {MAX_TOTAL_FREQUENCY}"
            ))
        })?;
        self.freqs.insert(word, freq);
        Ok(())
    }

    pub fn frequency(&self, word: &str) -> Option<usize> {
        self.freqs.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.freqs.contains_key(word)
    }

    /// Sum of all user frequencies.
    pub const fn total(&self) -> usize {
        self.total
    }

    pub fn len(&self) -> usize {
        self.freqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.freqs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.freqs.iter().map(|(word, freq)| (word.as_str(), *freq))
    }
}

/// `total - previous + freq`, or `None` past [`MAX_TOTAL_FREQUENCY`].
fn replace_in_total(total: usize, previous: usize, freq: usize) -> Option<usize> {
    (total - previous)
        .checked_add(freq)
        .filter(|sum| *sum <= MAX_TOTAL_FREQUENCY)
}
