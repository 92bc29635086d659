//! faqkit stats - Rebuild and summarize the knowledge base

use clap::Args;
use colored::Colorize;

use crate::cli::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Also list every tenant stored in the database
    #[arg(long)]
    pub all_tenants: bool,
}

pub fn run(ctx: &AppContext, args: &StatsArgs) -> Result<()> {
    let stats = ctx.engine.rebuild(&ctx.tenant)?;
    let tenants = if args.all_tenants {
        Some(ctx.store.tenants()?)
    } else {
        None
    };

    if ctx.robot_mode {
        return emit_robot(&robot_ok(serde_json::json!({
            "stats": stats,
            "schema_version": ctx.store.schema_version(),
            "db_path": ctx.config.storage.db_path,
            "tenants": tenants,
        })));
    }

    println!("{} {}", "Knowledge base".bold(), stats.tenant.as_str().cyan());
    println!("{:14} {}", "entries".dimmed(), stats.entries);
    println!("{:14} {}", "vocabulary".dimmed(), stats.vocabulary);
    println!("{:14} {}", "state".dimmed(), stats.state);
    println!(
        "{:14} {}",
        "database".dimmed(),
        ctx.config.storage.db_path.display()
    );
    if let Some(tenants) = tenants {
        println!("{:14} {}", "tenants".dimmed(), tenants.join(", "));
    }
    Ok(())
}
