//! Lexical retrieval primitives for FAQ matching
//!
//! Implements hybrid lexical scoring: TF-IDF cosine + edit-distance ratio.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                     Query text (raw)                           │
//! └────────────────────────────────────────────────────────────────┘
//!                     │                          │
//!                     ▼                          │
//! ┌──────────────────────────────┐               │
//! │   Tokenizer (+ Dictionary)   │               │
//! └──────────────────────────────┘               │
//!                     │                          │
//!                     ▼                          │
//! ┌──────────────────────────────┐               │
//! │   InvertedIndex.candidates   │               │
//! └──────────────────────────────┘               │
//!                     │                          │
//!                     ▼                          ▼
//! ┌──────────────────────────────┐  ┌──────────────────────────────┐
//! │  VectorSpaceModel (cosine)   │  │   edit_ratio (raw strings)   │
//! └──────────────────────────────┘  └──────────────────────────────┘
//!                     │                          │
//!                     └──────────┬───────────────┘
//!                                ▼
//!                ┌───────────────────────────────┐
//!                │   Scorer (weighted fusion)    │
//!                └───────────────────────────────┘
//! ```

pub mod dictionary;
pub mod inverted;
pub mod scorer;
pub mod tfidf;
pub mod tokenizer;

pub use dictionary::Dictionary;
pub use inverted::{InvertedIndex, TokenizedEntry};
pub use scorer::{ScoreBreakdown, ScoreWeights, Scorer, edit_ratio};
pub use tfidf::{SparseVector, VectorSpaceModel, cosine};
pub use tokenizer::{Tokenizer, TokenizerOptions};
