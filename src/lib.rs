//! Hybrid lexical FAQ retrieval.
//!
//! Per-tenant knowledge bases of question/answer pairs, matched against
//! free-text queries by fusing TF-IDF cosine similarity with an
//! edit-distance ratio.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod kb;
pub mod search;
pub mod storage;
pub mod test_utils;

pub use error::{FaqError, Result};
pub use kb::{MatchEngine, QueryResult, ScoredMatch};

/// Package version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
