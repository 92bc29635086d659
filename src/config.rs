use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FaqError, Result};

/// Project-level config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "faqkit.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub matching: MatchConfig,
    #[serde(default)]
    pub tokenizer: TokenizerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Resolve the effective configuration.
    ///
    /// An explicit path (or `FAQKIT_CONFIG`) replaces the file layers
    /// entirely; otherwise the global file is applied first and the project
    /// file in `root` on top. Environment overrides always apply last.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| env_string("FAQKIT_CONFIG").map(PathBuf::from));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(FaqError::MissingConfig(format!(
                    "config file {} not found",
                    path.display()
                )));
            }
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        tracing::debug!(
            tfidf_weight = config.matching.tfidf_weight,
            edit_weight = config.matching.edit_weight,
            threshold = config.matching.threshold,
            db = %config.storage.db_path.display(),
            "configuration resolved"
        );

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        // No config dir on this platform means no global layer.
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("faqkit/config.toml"))
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&root.join(PROJECT_CONFIG_FILE))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| FaqError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| FaqError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.matching {
            self.matching.merge(patch);
        }
        if let Some(patch) = patch.tokenizer {
            self.tokenizer.merge(patch);
        }
        if let Some(patch) = patch.storage {
            self.storage.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_f64("FAQKIT_TFIDF_WEIGHT")? {
            self.matching.tfidf_weight = value;
        }
        if let Some(value) = env_f64("FAQKIT_EDIT_WEIGHT")? {
            self.matching.edit_weight = value;
        }
        if let Some(value) = env_f64("FAQKIT_THRESHOLD")? {
            self.matching.threshold = value;
        }
        if let Some(value) = env_f64("FAQKIT_MIN_SCORE")? {
            self.matching.min_score = value;
        }
        if let Some(value) = env_usize("FAQKIT_MAX_RESULTS")? {
            self.matching.max_results = value;
        }

        if let Some(value) = env_string("FAQKIT_USER_DICT") {
            self.tokenizer.user_dict = Some(PathBuf::from(value));
        }
        if let Some(value) = env_bool("FAQKIT_KEEP_PUNCTUATION") {
            self.tokenizer.keep_punctuation = value;
        }

        if let Some(value) = env_string("FAQKIT_DB") {
            self.storage.db_path = PathBuf::from(value);
        }

        Ok(())
    }

    /// Reject settings the engine cannot score with.
    pub fn validate(&self) -> Result<()> {
        self.matching.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Weight of the TF-IDF cosine term in the combined score
    pub tfidf_weight: f64,
    /// Weight of the edit-distance ratio term
    pub edit_weight: f64,
    /// Minimum combined score for a best-match answer
    pub threshold: f64,
    /// Minimum combined score for a ranked result
    pub min_score: f64,
    /// Default number of ranked results
    pub max_results: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            tfidf_weight: 0.3,
            edit_weight: 0.7,
            threshold: 0.6,
            min_score: 0.3,
            max_results: 5,
        }
    }
}

impl MatchConfig {
    fn merge(&mut self, patch: MatchPatch) {
        if let Some(value) = patch.tfidf_weight {
            self.tfidf_weight = value;
        }
        if let Some(value) = patch.edit_weight {
            self.edit_weight = value;
        }
        if let Some(value) = patch.threshold {
            self.threshold = value;
        }
        if let Some(value) = patch.min_score {
            self.min_score = value;
        }
        if let Some(value) = patch.max_results {
            self.max_results = value;
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("tfidf_weight", self.tfidf_weight),
            ("edit_weight", self.edit_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(FaqError::Config(format!(
                    "matching.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.tfidf_weight + self.edit_weight <= 0.0 {
            return Err(FaqError::Config(
                "matching weights must not both be zero".to_string(),
            ));
        }
        for (name, value) in [("threshold", self.threshold), ("min_score", self.min_score)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(FaqError::Config(format!(
                    "matching.{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.max_results == 0 {
            return Err(FaqError::Config(
                "matching.max_results must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Extra `word [frequency]` dictionary merged over the built-in one
    pub user_dict: Option<PathBuf>,
    pub keep_punctuation: bool,
}

impl TokenizerConfig {
    fn merge(&mut self, patch: TokenizerPatch) {
        if let Some(value) = patch.user_dict {
            self.user_dict = Some(value);
        }
        if let Some(value) = patch.keep_punctuation {
            self.keep_punctuation = value;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

impl StorageConfig {
    fn merge(&mut self, patch: StoragePatch) {
        if let Some(value) = patch.db_path {
            self.db_path = value;
        }
    }
}

/// `<data_dir>/faqkit/faqkit.db`, or `./.faqkit/faqkit.db` without a data dir.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("faqkit"))
        .unwrap_or_else(|| PathBuf::from(".faqkit"))
        .join("faqkit.db")
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub matching: Option<MatchPatch>,
    pub tokenizer: Option<TokenizerPatch>,
    pub storage: Option<StoragePatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct MatchPatch {
    pub tfidf_weight: Option<f64>,
    pub edit_weight: Option<f64>,
    pub threshold: Option<f64>,
    pub min_score: Option<f64>,
    pub max_results: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct TokenizerPatch {
    pub user_dict: Option<PathBuf>,
    pub keep_punctuation: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StoragePatch {
    pub db_path: Option<PathBuf>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|value| {
        matches!(
            value.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_f64(key: &str) -> Result<Option<f64>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<f64>().map(Some).map_err(|err| {
            FaqError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<usize>().map(Some).map_err(|err| {
            FaqError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}
