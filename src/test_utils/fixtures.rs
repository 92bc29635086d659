use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::MatchConfig;
use crate::core::{EntryId, FaqDocument, QaEntry, TenantId};
use crate::error::{FaqError, Result};
use crate::kb::MatchEngine;
use crate::search::Tokenizer;
use crate::storage::{MemoryStore, QaStore};

/// The two-entry knowledge base the matching scenarios are written against.
pub const SCENARIO_CORPUS: &[(&str, &str)] = &[
    ("今天天气怎么样", "晴天"),
    ("明天放假吗", "不放假"),
];

/// A broader mixed-script corpus for ranking tests and benchmarks.
pub const CAMPUS_CORPUS: &[(&str, &str)] = &[
    ("今天天气怎么样", "晴天"),
    ("明天天气怎么样", "多云转小雨"),
    ("明天放假吗", "不放假"),
    ("国庆节放假几天", "七天"),
    ("图书馆几点开门", "早上八点"),
    ("图书馆周末开门吗", "周末也开门"),
    ("食堂几点关门", "晚上九点"),
    ("wifi密码是多少", "12345678"),
    ("校园网怎么登录", "用学号登录"),
    ("How do I reset my password?", "Use the self-service portal."),
    ("Where is the library?", "Next to the main gate."),
    ("考试时间是什么时候", "下周一"),
];

pub fn tenant(name: &str) -> TenantId {
    TenantId::new(name).expect("valid tenant id")
}

pub fn documents(corpus: &[(&str, &str)]) -> Vec<FaqDocument> {
    corpus
        .iter()
        .map(|(question, answer)| FaqDocument::new(*question, *answer))
        .collect()
}

/// Engine over a fresh [`MemoryStore`] with default settings.
pub fn memory_engine() -> MatchEngine {
    MatchEngine::new(
        Arc::new(MemoryStore::new()),
        Tokenizer::default(),
        MatchConfig::default(),
    )
}

/// Engine with `corpus` loaded into `tenant`.
pub fn seeded_engine(tenant: &TenantId, corpus: &[(&str, &str)]) -> MatchEngine {
    let engine = memory_engine();
    for (question, answer) in corpus {
        engine
            .add_or_update(tenant, question, answer)
            .expect("seed entry");
    }
    engine
}

/// [`MemoryStore`] whose reads and writes can be switched to fail with
/// [`FaqError::StoreUnavailable`].
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_read(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(FaqError::StoreUnavailable("injected read failure".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(FaqError::StoreUnavailable("injected write failure".to_string()));
        }
        Ok(())
    }
}

impl QaStore for FlakyStore {
    fn upsert(&self, tenant: &TenantId, question: &str, answer: &str) -> Result<EntryId> {
        self.check_write()?;
        self.inner.upsert(tenant, question, answer)
    }

    fn get_by_id(&self, tenant: &TenantId, id: EntryId) -> Result<Option<QaEntry>> {
        self.check_read()?;
        self.inner.get_by_id(tenant, id)
    }

    fn get_by_question(&self, tenant: &TenantId, question: &str) -> Result<Option<EntryId>> {
        self.check_read()?;
        self.inner.get_by_question(tenant, question)
    }

    fn get_all(&self, tenant: &TenantId) -> Result<Vec<QaEntry>> {
        self.check_read()?;
        self.inner.get_all(tenant)
    }

    fn delete(&self, tenant: &TenantId, id: EntryId) -> Result<bool> {
        self.check_write()?;
        self.inner.delete(tenant, id)
    }
}
