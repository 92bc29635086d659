//! faqkit query - Answer a question from the knowledge base

use clap::Args;
use colored::Colorize;

use crate::cli::AppContext;
use crate::cli::output::{emit_robot, format_score, robot_ok};
use crate::error::{FaqError, Result};

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Free-text question
    pub text: String,

    /// Minimum score for an answer (default: matching.threshold)
    #[arg(long)]
    pub threshold: Option<f64>,
}

pub fn run(ctx: &AppContext, args: &QueryArgs) -> Result<()> {
    let threshold = args.threshold.unwrap_or(ctx.engine.config().threshold);
    if !(0.0..=1.0).contains(&threshold) {
        return Err(FaqError::Validation(format!(
            "threshold must be within [0, 1], got {threshold}"
        )));
    }

    let result = ctx
        .engine
        .find_best_match(&ctx.tenant, &args.text, threshold)?;

    if ctx.robot_mode {
        return emit_robot(&robot_ok(&result));
    }

    match (&result.question, &result.answer, result.id) {
        (Some(question), Some(answer), Some(id)) => {
            println!("{answer}");
            println!();
            println!(
                "{} {} {} {}",
                "matched".dimmed(),
                question.cyan(),
                format!("(id {id})").dimmed(),
                format_score(result.score)
            );
        }
        _ => {
            println!(
                "{} best score {} below threshold {threshold:.3}",
                "No match:".yellow(),
                format_score(result.score)
            );
        }
    }
    Ok(())
}
