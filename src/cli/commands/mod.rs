//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use crate::cli::{AppContext, Commands};
use crate::error::Result;

pub mod add;
pub mod delete;
pub mod export;
pub mod get;
pub mod import;
pub mod list;
pub mod query;
pub mod stats;
pub mod tokenize;
pub mod top;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Add(args) => add::run(ctx, args),
        Commands::Delete(args) => delete::run(ctx, args),
        Commands::Get(args) => get::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Query(args) => query::run(ctx, args),
        Commands::Top(args) => top::run(ctx, args),
        Commands::Import(args) => import::run(ctx, args),
        Commands::Export(args) => export::run(ctx, args),
        Commands::Stats(args) => stats::run(ctx, args),
        // Needs no database; dispatched before the context is built.
        Commands::Tokenize(args) => tokenize::run_with_config(&ctx.config, ctx.robot_mode, args),
    }
}
