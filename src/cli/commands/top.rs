//! faqkit top - Rank the closest stored questions

use clap::Args;
use colored::Colorize;

use crate::cli::AppContext;
use crate::cli::output::{emit_robot, format_score, robot_ok, truncate};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct TopArgs {
    /// Free-text question
    pub text: String,

    /// Maximum number of results (default: matching.max_results)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Minimum combined score (default: matching.min_score)
    #[arg(long)]
    pub min_score: Option<f64>,

    /// Show the cosine and edit-ratio components
    #[arg(long)]
    pub explain: bool,
}

pub fn run(ctx: &AppContext, args: &TopArgs) -> Result<()> {
    let config = ctx.engine.config();
    let matches = ctx.engine.find_multiple_matches(
        &ctx.tenant,
        &args.text,
        args.min_score.unwrap_or(config.min_score),
        args.limit.unwrap_or(config.max_results),
    )?;

    if ctx.robot_mode {
        return emit_robot(&robot_ok(serde_json::json!({
            "query": args.text,
            "count": matches.len(),
            "matches": matches,
        })));
    }

    if matches.is_empty() {
        println!("{}", "No matches".dimmed());
        return Ok(());
    }

    for (rank, m) in matches.iter().enumerate() {
        println!(
            "{:>2}. {} {} {}",
            rank + 1,
            format_score(m.score),
            truncate(&m.question, 40).bold(),
            format!("(id {})", m.id).dimmed()
        );
        println!("    {}", truncate(&m.answer, 70));
        if args.explain {
            println!(
                "    {}",
                format!("cosine {:.3}  edit {:.3}", m.cosine, m.edit_ratio).dimmed()
            );
        }
    }
    Ok(())
}
