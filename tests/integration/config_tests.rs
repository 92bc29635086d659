use std::sync::Arc;

use tempfile::TempDir;

use faqkit::config::{Config, PROJECT_CONFIG_FILE};
use faqkit::kb::MatchEngine;
use faqkit::storage::MemoryStore;
use faqkit::test_utils::fixtures::tenant;

#[test]
fn explicit_config_drives_engine() {
    let temp = TempDir::new().unwrap();
    let dict = temp.path().join("user.dict");
    std::fs::write(&dict, "# campus words\n开门时间 50000\n").unwrap();
    let config_path = temp.path().join("faqkit.custom.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[matching]
threshold = 0.9
max_results = 2

[tokenizer]
user_dict = "{}"
"#,
            dict.display().to_string().replace('\\', "\\\\")
        ),
    )
    .unwrap();

    let config = Config::load(Some(&config_path), temp.path()).unwrap();
    assert_eq!(config.matching.threshold, 0.9);
    assert_eq!(config.matching.max_results, 2);

    let engine = MatchEngine::from_config(&config, Arc::new(MemoryStore::new())).unwrap();
    assert_eq!(engine.tokenizer().tokenize("图书馆开门时间"), vec!["图书馆", "开门时间"]);

    let t = tenant("configured");
    engine.add_or_update(&t, "明天放假吗", "不放假").unwrap();
    // 0.8 edit ratio is not enough at a 0.9 threshold.
    assert!(!engine.query(&t, "明天放假么").unwrap().is_match());
}

#[test]
fn project_file_in_root_is_layered() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join(PROJECT_CONFIG_FILE),
        "[matching]\nmin_score = 0.1\n",
    )
    .unwrap();

    let config = Config::load(None, temp.path()).unwrap();
    assert_eq!(config.matching.min_score, 0.1);
}

#[test]
fn broken_user_dictionary_fails_engine_construction() {
    let temp = TempDir::new().unwrap();
    let dict = temp.path().join("user.dict");
    std::fs::write(&dict, "开门时间 not-a-number\n").unwrap();

    let mut config = Config::default();
    config.tokenizer.user_dict = Some(dict);
    let err = MatchEngine::from_config(&config, Arc::new(MemoryStore::new())).unwrap_err();
    assert!(matches!(err, faqkit::FaqError::Dictionary { line: 1, .. }));
}
