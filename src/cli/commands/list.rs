//! faqkit list - List the tenant's entries

use clap::Args;
use colored::Colorize;

use crate::cli::AppContext;
use crate::cli::output::{emit_robot, robot_ok, truncate};
use crate::core::QaEntry;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Maximum number of entries to show
    #[arg(long, short = 'n', default_value = "50")]
    pub limit: usize,

    /// Offset for pagination
    #[arg(long, default_value = "0")]
    pub offset: usize,
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let entries = ctx.engine.list_all(&ctx.tenant)?;
    let total = entries.len();
    let page: Vec<QaEntry> = entries
        .into_iter()
        .skip(args.offset)
        .take(args.limit)
        .collect();

    if ctx.robot_mode {
        return emit_robot(&robot_ok(serde_json::json!({
            "tenant": ctx.tenant,
            "total": total,
            "count": page.len(),
            "entries": page,
        })));
    }

    if page.is_empty() {
        println!("{}", "No entries found".dimmed());
        println!();
        println!("Add one with: faqkit add <question> <answer>");
        return Ok(());
    }

    println!("{:>6}  {:32}  {}", "ID".bold(), "QUESTION".bold(), "ANSWER".bold());
    println!("{}", "─".repeat(72).dimmed());
    for entry in &page {
        println!(
            "{:>6}  {:32}  {}",
            entry.id,
            truncate(&entry.question, 30),
            truncate(&entry.answer, 30)
        );
    }
    println!();
    println!(
        "{} {} of {} entries (limit: {}, offset: {})",
        "Showing:".dimmed(),
        page.len(),
        total,
        args.limit,
        args.offset
    );
    Ok(())
}
