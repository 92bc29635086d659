//! Shared state for command handlers.

use std::path::Path;
use std::sync::Arc;

use crate::cli::Cli;
use crate::config::Config;
use crate::core::TenantId;
use crate::error::Result;
use crate::kb::MatchEngine;
use crate::storage::SqliteStore;

pub struct AppContext {
    pub config: Config,
    pub store: Arc<SqliteStore>,
    pub engine: MatchEngine,
    pub tenant: TenantId,
    pub robot_mode: bool,
}

impl AppContext {
    /// Resolve config, open the database and build the engine.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = load_config(cli)?;
        if let Some(db) = &cli.db {
            config.storage.db_path = db.clone();
        }
        let tenant = TenantId::new(cli.tenant.as_str())?;

        let store = Arc::new(SqliteStore::open(&config.storage.db_path)?);
        let engine = MatchEngine::from_config(&config, store.clone())?;

        Ok(Self {
            config,
            store,
            engine,
            tenant,
            robot_mode: cli.robot,
        })
    }
}

/// Config for `cli`, layered over the current directory.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| Path::new(".").to_path_buf());
    Config::load(cli.config.as_deref(), &cwd)
}
