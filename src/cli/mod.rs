//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;
pub mod context;
pub mod output;

pub use context::AppContext;

/// faqkit - answer questions from a per-tenant FAQ knowledge base
#[derive(Parser, Debug)]
#[command(name = "faqkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Emit JSON on stdout for machine consumption
    #[arg(long, global = true)]
    pub robot: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (default: ~/.config/faqkit/config.toml + ./faqkit.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database path (overrides storage.db_path)
    #[arg(long, global = true, env = "FAQKIT_DB")]
    pub db: Option<PathBuf>,

    /// Tenant whose knowledge base to use
    #[arg(long, short, global = true, env = "FAQKIT_TENANT", default_value = "default")]
    pub tenant: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a question, or update the answer of an existing one
    Add(commands::add::AddArgs),

    /// Delete entries by id
    Delete(commands::delete::DeleteArgs),

    /// Show one entry
    Get(commands::get::GetArgs),

    /// List all entries
    List(commands::list::ListArgs),

    /// Find the best answer for a question
    Query(commands::query::QueryArgs),

    /// Rank the closest stored questions
    Top(commands::top::TopArgs),

    /// Import entries from a JSON file
    Import(commands::import::ImportArgs),

    /// Export entries as JSON
    Export(commands::export::ExportArgs),

    /// Show how text is tokenized
    Tokenize(commands::tokenize::TokenizeArgs),

    /// Rebuild the index and show knowledge base statistics
    Stats(commands::stats::StatsArgs),
}
