//! Tenant knowledge bases and the engine that serves them

pub mod batch;
pub mod document_store;
pub mod engine;
pub mod knowledge_base;
pub mod result;

pub use batch::{BatchOutcome, BatchStatus, BatchSummary};
pub use document_store::{DocumentStore, Upserted};
pub use engine::MatchEngine;
pub use knowledge_base::{KnowledgeBase, Revision};
pub use result::{IndexState, KnowledgeBaseStats, QueryResult, ScoredMatch};
