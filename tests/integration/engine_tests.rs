use std::sync::Arc;

use faqkit::config::MatchConfig;
use faqkit::core::{EntryId, FaqDocument};
use faqkit::error::FaqError;
use faqkit::kb::{BatchStatus, IndexState, MatchEngine, QueryResult};
use faqkit::search::Tokenizer;
use faqkit::test_utils::assert_score_eq;
use faqkit::test_utils::fixtures::{
    CAMPUS_CORPUS, FlakyStore, SCENARIO_CORPUS, memory_engine, seeded_engine, tenant,
};

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn scenario_exact_question_returns_answer() {
    let t = tenant("scenario-a");
    let engine = seeded_engine(&t, SCENARIO_CORPUS);

    let result = engine.query(&t, "今天天气怎么样").unwrap();
    assert_eq!(result.question.as_deref(), Some("今天天气怎么样"));
    assert_eq!(result.answer.as_deref(), Some("晴天"));
    assert!(result.id.is_some());
    assert_eq!(result.score, 1.0);
}

#[test]
fn scenario_unrelated_query_is_below_threshold() {
    let t = tenant("scenario-b");
    let engine = seeded_engine(&t, SCENARIO_CORPUS);

    let result = engine.query(&t, "完全不相关的内容").unwrap();
    assert!(!result.is_match());
    assert!(result.question.is_none());
    assert!(result.answer.is_none());
    assert!(result.score < engine.config().threshold);
}

#[test]
fn scenario_empty_knowledge_base() {
    let engine = memory_engine();
    let result = engine.query(&tenant("scenario-c"), "今天天气怎么样").unwrap();
    assert_eq!(result, QueryResult::no_match(0.0));
    assert!(engine
        .top_matches(&tenant("scenario-c"), "今天天气怎么样")
        .unwrap()
        .is_empty());
}

#[test]
fn scenario_re_adding_question_updates_answer() {
    let engine = memory_engine();
    let t = tenant("scenario-d");
    let first = engine.add_or_update(&t, "A", "1").unwrap();
    let second = engine.add_or_update(&t, "A", "2").unwrap();

    assert_eq!(first, second);
    let entries = engine.list_all(&t).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].answer, "2");
    assert_eq!(engine.query(&t, "A").unwrap().answer.as_deref(), Some("2"));
}

// =========================================================================
// Entry lifecycle
// =========================================================================

#[test]
fn identical_add_is_idempotent() {
    let engine = memory_engine();
    let t = tenant("idempotent");
    let a = engine.add_or_update(&t, "明天放假吗", "不放假").unwrap();
    let b = engine.add_or_update(&t, "明天放假吗", "不放假").unwrap();
    assert_eq!(a, b);
    assert_eq!(engine.list_all(&t).unwrap().len(), 1);
}

#[test]
fn deleted_entry_is_no_longer_returned() {
    let t = tenant("delete");
    let engine = seeded_engine(&t, SCENARIO_CORPUS);
    let id = engine.get_id_by_question(&t, "明天放假吗").unwrap().unwrap();
    assert_eq!(engine.query(&t, "明天放假吗").unwrap().id, Some(id));

    assert!(engine.delete(&t, id).unwrap());
    let result = engine.query(&t, "明天放假吗").unwrap();
    assert_ne!(result.id, Some(id));
    assert!(engine.get(&t, id).unwrap().is_none());
}

#[test]
fn mutation_marks_dirty_and_query_cleans() {
    let t = tenant("state");
    let engine = seeded_engine(&t, SCENARIO_CORPUS);
    assert_eq!(engine.stats(&t).state, IndexState::Dirty);
    engine.query(&t, "明天放假吗").unwrap();
    assert_eq!(engine.stats(&t).state, IndexState::Clean);
    engine.add_or_update(&t, "后天放假吗", "放假").unwrap();
    assert_eq!(engine.stats(&t).state, IndexState::Dirty);
}

#[test]
fn validation_errors_are_reported() {
    let engine = memory_engine();
    let err = engine.add_or_update(&tenant("v"), "", "answer").unwrap_err();
    assert!(matches!(err, FaqError::Validation(_)));
    assert!(engine.list_all(&tenant("v")).unwrap().is_empty());
}

// =========================================================================
// Thresholds and ranking
// =========================================================================

#[test]
fn threshold_boundary_is_inclusive() {
    let t = tenant("threshold");
    let engine = seeded_engine(&t, SCENARIO_CORPUS);
    let query = "明天放假么";

    let unmatched = engine.find_best_match(&t, query, 2.0).unwrap();
    assert!(!unmatched.is_match());
    let score = unmatched.score;
    assert!(score > 0.0 && score < 1.0);

    let at = engine.find_best_match(&t, query, score).unwrap();
    assert!(at.is_match());
    assert_eq!(at.score, score);

    let above = engine.find_best_match(&t, query, score + 1e-9).unwrap();
    assert!(!above.is_match());
    assert_eq!(above.score, score);
}

#[test]
fn near_paraphrase_matches_at_default_threshold() {
    let t = tenant("paraphrase");
    let engine = seeded_engine(&t, CAMPUS_CORPUS);
    let result = engine.query(&t, "图书馆几点开门呢").unwrap();
    assert_eq!(result.answer.as_deref(), Some("早上八点"));
    assert!(result.score >= 0.6);
}

#[test]
fn top_matches_are_bounded_and_sorted() {
    let t = tenant("ranking");
    let engine = seeded_engine(&t, CAMPUS_CORPUS);

    for max_results in [1, 3, 20] {
        let matches = engine
            .find_multiple_matches(&t, "明天天气怎么样", 0.0, max_results)
            .unwrap();
        assert!(matches.len() <= max_results);
        assert!(!matches.is_empty());
        for pair in matches.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                assert!(pair[0].id < pair[1].id);
            }
        }
    }

    let best = &engine
        .find_multiple_matches(&t, "明天天气怎么样", 0.0, 1)
        .unwrap()[0];
    assert_eq!(best.answer, "多云转小雨");
    assert_eq!(best.score, 1.0);
}

#[test]
fn top_matches_respect_min_score() {
    let t = tenant("min-score");
    let engine = seeded_engine(&t, CAMPUS_CORPUS);
    let matches = engine
        .find_multiple_matches(&t, "图书馆周末开门吗", 0.5, 20)
        .unwrap();
    assert!(matches.iter().all(|m| m.score >= 0.5));
    assert!(matches.iter().any(|m| m.answer == "周末也开门"));
}

#[test]
fn score_components_are_reported() {
    let t = tenant("components");
    let engine = seeded_engine(&t, SCENARIO_CORPUS);
    let matches = engine.top_matches(&t, "今天天气怎么样").unwrap();
    let top = &matches[0];
    assert_eq!(top.cosine, 1.0);
    assert_eq!(top.edit_ratio, 1.0);
    assert_score_eq(top.score, 0.3 * top.cosine + 0.7 * top.edit_ratio);
}

#[test]
fn custom_weights_change_scores() {
    let store = Arc::new(faqkit::storage::MemoryStore::new());
    let config = MatchConfig {
        tfidf_weight: 1.0,
        edit_weight: 0.0,
        ..MatchConfig::default()
    };
    let engine = MatchEngine::new(store, Tokenizer::default(), config);
    let t = tenant("weights");
    engine.add_or_update(&t, "How do I reset my password?", "Portal").unwrap();

    // Same tokens in a different order: full cosine, imperfect edit ratio.
    let result = engine.query(&t, "password reset my I do how").unwrap();
    assert!(result.is_match());
    assert_eq!(result.score, 1.0);
}

#[test]
fn mixed_script_question_matches() {
    let t = tenant("mixed");
    let engine = seeded_engine(&t, CAMPUS_CORPUS);
    let result = engine.query(&t, "WiFi密码是多少？").unwrap();
    assert_eq!(result.answer.as_deref(), Some("12345678"));
}

#[test]
fn every_stored_question_matches_itself_at_threshold_one() {
    let t = tenant("exact");
    let engine = seeded_engine(&t, CAMPUS_CORPUS);
    for (question, answer) in CAMPUS_CORPUS {
        let result = engine.find_best_match(&t, question, 1.0).unwrap();
        assert_eq!(result.answer.as_deref(), Some(*answer), "{question}");
        assert_eq!(result.score, 1.0, "{question}");
    }
}

#[test]
fn unseen_vocabulary_segments_into_words() {
    let t = tenant("vocabulary");
    let engine = seeded_engine(
        &t,
        &[
            ("银行卡怎么办理", "带身份证去柜台"),
            ("学费可以分期吗", "可以分两期"),
            ("宽带坏了找谁修", "联系网络中心"),
        ],
    );
    let result = engine.query(&t, "学费能分期吗").unwrap();
    assert_eq!(result.answer.as_deref(), Some("可以分两期"));
    let result = engine.query(&t, "宽带坏了找谁").unwrap();
    assert_eq!(result.answer.as_deref(), Some("联系网络中心"));
}

// =========================================================================
// Tenants, batches and failures
// =========================================================================

#[test]
fn tenants_never_see_each_other() {
    let engine = memory_engine();
    let a = tenant("group-a");
    let b = tenant("group-b");
    engine.add_or_update(&a, "今天天气怎么样", "晴天").unwrap();

    let result = engine.query(&b, "今天天气怎么样").unwrap();
    assert_eq!(result, QueryResult::no_match(0.0));
    assert!(engine.list_all(&b).unwrap().is_empty());

    engine.add_or_update(&b, "今天天气怎么样", "下雨").unwrap();
    assert_eq!(engine.query(&a, "今天天气怎么样").unwrap().answer.as_deref(), Some("晴天"));
    assert_eq!(engine.query(&b, "今天天气怎么样").unwrap().answer.as_deref(), Some("下雨"));
}

#[test]
fn batch_items_fail_independently() {
    let engine = memory_engine();
    let t = tenant("batch");
    let outcomes = engine.batch_add(
        &t,
        &[
            FaqDocument::new("q1", "a1"),
            FaqDocument::new("q2", ""),
            FaqDocument::new("q3", "a3"),
        ],
    );
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].status.is_applied());
    assert!(!outcomes[1].status.is_applied());
    assert!(outcomes[2].status.is_applied());
    assert_eq!(engine.list_all(&t).unwrap().len(), 2);

    let ids: Vec<EntryId> = engine.list_all(&t).unwrap().iter().map(|e| e.id).collect();
    let deleted = engine.batch_delete(&t, &[ids[0], EntryId(-1), ids[1]]);
    assert_eq!(deleted[0].status, BatchStatus::Deleted { id: ids[0] });
    assert_eq!(deleted[1].status, BatchStatus::NotFound { id: EntryId(-1) });
    assert_eq!(deleted[2].status, BatchStatus::Deleted { id: ids[1] });
}

#[test]
fn store_failure_during_rebuild_keeps_previous_answers() {
    let store = Arc::new(FlakyStore::new());
    let engine = MatchEngine::new(store.clone(), Tokenizer::default(), MatchConfig::default());
    let t = tenant("flaky");
    engine.add_or_update(&t, "今天天气怎么样", "晴天").unwrap();
    engine.rebuild(&t).unwrap();

    engine.add_or_update(&t, "明天放假吗", "不放假").unwrap();
    store.set_fail_reads(true);
    let err = engine.query(&t, "今天天气怎么样").unwrap_err();
    assert!(err.is_storage_failure());
    assert_eq!(engine.stats(&t).state, IndexState::Dirty);
    assert_eq!(engine.stats(&t).entries, 1);

    store.set_fail_reads(false);
    assert_eq!(engine.query(&t, "明天放假吗").unwrap().answer.as_deref(), Some("不放假"));
}

#[test]
fn store_failure_during_batch_is_reported_per_item() {
    let store = Arc::new(FlakyStore::new());
    let engine = MatchEngine::new(store.clone(), Tokenizer::default(), MatchConfig::default());
    let t = tenant("flaky-batch");
    store.set_fail_writes(true);
    let outcomes = engine.batch_add(&t, &[FaqDocument::new("q", "a")]);
    assert!(matches!(
        outcomes[0].status,
        BatchStatus::Rejected { code: faqkit::error::ErrorCode::StoreUnavailable, .. }
    ));
    store.set_fail_writes(false);
    assert!(engine.list_all(&t).unwrap().is_empty());
}
