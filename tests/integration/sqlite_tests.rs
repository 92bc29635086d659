use std::sync::Arc;

use tempfile::tempdir;

use faqkit::config::Config;
use faqkit::kb::MatchEngine;
use faqkit::storage::{QaStore, SqliteStore};
use faqkit::test_utils::fixtures::{SCENARIO_CORPUS, tenant};

fn sqlite_engine(store: Arc<SqliteStore>) -> MatchEngine {
    MatchEngine::from_config(&Config::default(), store).unwrap()
}

#[test]
fn entries_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("faqkit.db");
    let t = tenant("persisted");

    let id = {
        let engine = sqlite_engine(Arc::new(SqliteStore::open(&path).unwrap()));
        for (question, answer) in SCENARIO_CORPUS {
            engine.add_or_update(&t, question, answer).unwrap();
        }
        engine.get_id_by_question(&t, "今天天气怎么样").unwrap().unwrap()
    };

    let engine = sqlite_engine(Arc::new(SqliteStore::open(&path).unwrap()));
    let result = engine.query(&t, "今天天气怎么样").unwrap();
    assert_eq!(result.id, Some(id));
    assert_eq!(result.answer.as_deref(), Some("晴天"));
    assert_eq!(result.score, 1.0);
}

#[test]
fn update_keeps_id_across_engines() {
    let dir = tempdir().unwrap();
    let store = Arc::new(SqliteStore::open(dir.path().join("faqkit.db")).unwrap());
    let t = tenant("update");

    let first = sqlite_engine(store.clone());
    let id = first.add_or_update(&t, "A", "1").unwrap();

    let second = sqlite_engine(store.clone());
    let upserted = second.upsert(&t, "A", "2").unwrap();
    assert!(!upserted.created);
    assert_eq!(upserted.id, id);
    assert_eq!(store.get_by_id(&t, id).unwrap().unwrap().answer, "2");
}

#[test]
fn tenants_are_namespaced_in_one_table() {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    let engine = sqlite_engine(store.clone());
    let a = tenant("a");
    let b = tenant("b");

    engine.add_or_update(&a, "明天放假吗", "不放假").unwrap();
    engine.add_or_update(&b, "明天放假吗", "放三天").unwrap();

    assert_eq!(engine.query(&a, "明天放假吗").unwrap().answer.as_deref(), Some("不放假"));
    assert_eq!(engine.query(&b, "明天放假吗").unwrap().answer.as_deref(), Some("放三天"));
    assert_eq!(store.tenants().unwrap(), vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn export_import_roundtrip_through_sqlite() {
    let dir = tempdir().unwrap();
    let store = Arc::new(SqliteStore::open(dir.path().join("faqkit.db")).unwrap());
    let engine = sqlite_engine(store);
    let source = tenant("source");
    let target = tenant("target");
    for (question, answer) in SCENARIO_CORPUS {
        engine.add_or_update(&source, question, answer).unwrap();
    }

    let export_path = dir.path().join("export.json");
    let file = std::fs::File::create(&export_path).unwrap();
    assert_eq!(engine.export_json(&source, file).unwrap(), 2);

    let file = std::fs::File::open(&export_path).unwrap();
    let outcomes = engine.import_json(&target, file).unwrap();
    assert_eq!(outcomes.len(), 2);

    let questions: Vec<String> = engine
        .list_all(&target)
        .unwrap()
        .into_iter()
        .map(|e| e.question)
        .collect();
    assert_eq!(questions, vec!["今天天气怎么样", "明天放假吗"]);
}
