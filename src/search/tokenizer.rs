//! Script-aware tokenizer for indexing and scoring
//!
//! Text is NFKC-normalized and lower-cased, then split into runs:
//!
//! - CJK runs (Han, Kana, Hangul) are segmented by jieba's dictionary
//!   DAG, taking the route with the highest summed log-frequency. Common
//!   multi-character words stay whole; characters the dictionary does not
//!   know become single-character tokens. HMM discovery of unseen words is
//!   off, so output depends only on the dictionary contents.
//! - Alphanumeric runs in other scripts are emitted as one token each.
//! - Whitespace is dropped. Punctuation is dropped unless
//!   `keep_punctuation` is set, in which case each mark is its own token.

use std::fmt;
use std::sync::{Arc, LazyLock};

use jieba_rs::Jieba;
use unicode_normalization::UnicodeNormalization;

use crate::config::TokenizerConfig;
use crate::error::Result;
use crate::search::dictionary::Dictionary;

/// jieba's bundled dictionary, loaded once and shared by every tokenizer
/// without user words.
static BUILTIN: LazyLock<Arc<Jieba>> = LazyLock::new(|| Arc::new(Jieba::new()));

/// Tokenizer options that do not live in the dictionary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizerOptions {
    pub keep_punctuation: bool,
}

/// Dictionary-backed tokenizer.
#[derive(Clone)]
pub struct Tokenizer {
    segmenter: Arc<Jieba>,
    user_words: usize,
    options: TokenizerOptions,
}

impl fmt::Debug for Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokenizer")
            .field("user_words", &self.user_words)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(Dictionary::empty(), TokenizerOptions::default())
    }
}

impl Tokenizer {
    /// Built-in dictionary with `user_words` layered on top.
    ///
    /// A user word replaces the built-in frequency of the same word.
    pub fn new(user_words: Dictionary, options: TokenizerOptions) -> Self {
        let segmenter = if user_words.is_empty() {
            Arc::clone(&BUILTIN)
        } else {
            let mut jieba = Jieba::clone(&BUILTIN);
            for (word, freq) in user_words.iter() {
                jieba.add_word(word, Some(freq), None);
            }
            Arc::new(jieba)
        };
        Self {
            segmenter,
            user_words: user_words.len(),
            options,
        }
    }

    /// Build from config: built-in dictionary plus the optional user dictionary.
    pub fn from_config(config: &TokenizerConfig) -> Result<Self> {
        let mut dictionary = Dictionary::empty();
        if let Some(path) = &config.user_dict {
            dictionary.load_user_dict(path)?;
        }
        Ok(Self::new(
            dictionary,
            TokenizerOptions {
                keep_punctuation: config.keep_punctuation,
            },
        ))
    }

    /// Number of user words layered over the built-in dictionary.
    pub const fn user_words(&self) -> usize {
        self.user_words
    }

    /// Split text into an ordered token sequence.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized: String = text.nfkc().collect::<String>().to_lowercase();
        let mut tokens = Vec::new();
        let mut run = String::new();
        let mut run_kind = RunKind::None;

        for ch in normalized.chars() {
            let kind = classify(ch);
            if kind != run_kind && !run.is_empty() {
                self.flush(run_kind, &run, &mut tokens);
                run.clear();
            }
            run_kind = kind;
            match kind {
                RunKind::Cjk | RunKind::Word => run.push(ch),
                RunKind::Punctuation => {
                    if self.options.keep_punctuation {
                        tokens.push(ch.to_string());
                    }
                }
                RunKind::Space | RunKind::None => {}
            }
        }
        if !run.is_empty() {
            self.flush(run_kind, &run, &mut tokens);
        }

        tokens
    }

    fn flush(&self, kind: RunKind, run: &str, tokens: &mut Vec<String>) {
        match kind {
            RunKind::Cjk => tokens.extend(
                self.segmenter
                    .cut(run, false)
                    .into_iter()
                    .filter(|word| !word.trim().is_empty())
                    .map(str::to_string),
            ),
            RunKind::Word => tokens.push(run.to_string()),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunKind {
    None,
    Cjk,
    Word,
    Space,
    Punctuation,
}

fn classify(ch: char) -> RunKind {
    if is_cjk(ch) {
        RunKind::Cjk
    } else if ch.is_alphanumeric() {
        RunKind::Word
    } else if ch.is_whitespace() {
        RunKind::Space
    } else {
        RunKind::Punctuation
    }
}

/// Scripts written without spaces between words.
pub fn is_cjk(ch: char) -> bool {
    matches!(
        ch as u32,
        0x3040..=0x30FF       // Hiragana, Katakana
            | 0x3400..=0x4DBF // CJK Extension A
            | 0x4E00..=0x9FFF // CJK Unified Ideographs
            | 0xAC00..=0xD7AF // Hangul syllables
            | 0xF900..=0xFAFF // CJK Compatibility Ideographs
            | 0x20000..=0x2A6DF
            | 0x2A700..=0x2EBEF
    )
}
