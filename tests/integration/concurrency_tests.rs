use std::sync::Arc;
use std::thread;

use faqkit::storage::SqliteStore;
use faqkit::kb::MatchEngine;
use faqkit::config::Config;
use faqkit::test_utils::fixtures::{CAMPUS_CORPUS, memory_engine, seeded_engine, tenant};

#[test]
fn tenants_progress_in_parallel() {
    let engine = Arc::new(memory_engine());

    thread::scope(|scope| {
        for worker in 0..8 {
            let engine = Arc::clone(&engine);
            scope.spawn(move || {
                let t = tenant(&format!("tenant-{worker}"));
                for (question, answer) in CAMPUS_CORPUS {
                    engine.add_or_update(&t, question, answer).unwrap();
                }
                let result = engine.query(&t, "明天放假吗").unwrap();
                assert_eq!(result.answer.as_deref(), Some("不放假"));
            });
        }
    });

    assert_eq!(engine.tenants().len(), 8);
    for worker in 0..8 {
        let t = tenant(&format!("tenant-{worker}"));
        assert_eq!(engine.list_all(&t).unwrap().len(), CAMPUS_CORPUS.len());
    }
}

#[test]
fn queries_interleave_with_writes_on_one_tenant() {
    let t = tenant("shared");
    let engine = Arc::new(seeded_engine(&t, CAMPUS_CORPUS));

    thread::scope(|scope| {
        let writer = Arc::clone(&engine);
        let writer_tenant = t.clone();
        scope.spawn(move || {
            for i in 0..50 {
                writer
                    .add_or_update(&writer_tenant, &format!("第{i}个问题"), "答案")
                    .unwrap();
            }
        });

        for _ in 0..4 {
            let reader = Arc::clone(&engine);
            let reader_tenant = t.clone();
            scope.spawn(move || {
                for _ in 0..25 {
                    let result = reader.query(&reader_tenant, "今天天气怎么样").unwrap();
                    assert_eq!(result.answer.as_deref(), Some("晴天"));
                    let ranked = reader.top_matches(&reader_tenant, "图书馆几点开门").unwrap();
                    assert!(ranked.len() <= reader.config().max_results);
                }
            });
        }
    });

    assert_eq!(engine.list_all(&t).unwrap().len(), CAMPUS_CORPUS.len() + 50);
}

#[test]
fn sqlite_store_is_shared_across_threads() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteStore::open(dir.path().join("faqkit.db")).unwrap());
    let engine = Arc::new(MatchEngine::from_config(&Config::default(), store).unwrap());

    thread::scope(|scope| {
        for worker in 0..4 {
            let engine = Arc::clone(&engine);
            scope.spawn(move || {
                let t = tenant(&format!("sqlite-{worker}"));
                for i in 0..10 {
                    engine
                        .add_or_update(&t, &format!("question {i}"), &format!("answer {worker}-{i}"))
                        .unwrap();
                }
            });
        }
    });

    for worker in 0..4 {
        let t = tenant(&format!("sqlite-{worker}"));
        let result = engine.query(&t, "question 3").unwrap();
        assert_eq!(result.answer, Some(format!("answer {worker}-3")));
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn offloaded_work_runs_on_blocking_pool() {
    let t = tenant("async");
    let engine = Arc::new(seeded_engine(&t, CAMPUS_CORPUS));

    let stats = engine.rebuild_offloaded(&t).await.unwrap();
    assert_eq!(stats.entries, CAMPUS_CORPUS.len());

    let mut handles = Vec::new();
    for query in ["今天天气怎么样", "食堂几点关门", "wifi密码是多少"] {
        let engine = Arc::clone(&engine);
        let t = t.clone();
        handles.push(tokio::spawn(async move {
            engine
                .find_multiple_matches_offloaded(&t, query.to_string(), 0.3, 3)
                .await
        }));
    }
    for handle in handles {
        let matches = handle.await.unwrap().unwrap();
        assert!(!matches.is_empty());
        assert!(matches.len() <= 3);
    }
}
