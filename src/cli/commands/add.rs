//! faqkit add - Store a question and its answer

use clap::Args;
use colored::Colorize;

use crate::cli::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Question text; an existing identical question gets its answer replaced
    pub question: String,

    /// Answer text
    pub answer: String,
}

pub fn run(ctx: &AppContext, args: &AddArgs) -> Result<()> {
    let upserted = ctx
        .engine
        .upsert(&ctx.tenant, &args.question, &args.answer)?;

    if ctx.robot_mode {
        return emit_robot(&robot_ok(upserted));
    }

    let verb = if upserted.created { "Created" } else { "Updated" };
    println!(
        "{} {} entry {} in {}",
        "✓".green(),
        verb,
        upserted.id.to_string().bold(),
        ctx.tenant.as_str().cyan()
    );
    Ok(())
}
