//! faqkit delete - Remove entries by id

use clap::Args;
use colored::Colorize;

use crate::cli::AppContext;
use crate::cli::output::{emit_robot, robot_partial};
use crate::core::EntryId;
use crate::error::Result;
use crate::kb::{BatchOutcome, BatchStatus, BatchSummary};

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Entry ids to delete
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<i64>,
}

pub fn run(ctx: &AppContext, args: &DeleteArgs) -> Result<()> {
    let ids: Vec<EntryId> = args.ids.iter().copied().map(EntryId).collect();
    let outcomes = ctx.engine.batch_delete(&ctx.tenant, &ids);
    let summary = BatchSummary::from_outcomes(&outcomes);

    if ctx.robot_mode {
        return emit_robot(&robot_partial(
            &outcomes,
            summary.total() - summary.rejected,
            summary.rejected,
        ));
    }

    print_outcomes(&outcomes);
    println!(
        "{} {} deleted, {} not found, {} failed",
        "Total:".dimmed(),
        summary.deleted,
        summary.not_found,
        summary.rejected
    );
    Ok(())
}

pub(crate) fn print_outcomes(outcomes: &[BatchOutcome]) {
    for outcome in outcomes {
        match &outcome.status {
            BatchStatus::Created { id } => println!("{} created {id}", "+".green()),
            BatchStatus::Updated { id } => println!("{} updated {id}", "~".yellow()),
            BatchStatus::Deleted { id } => println!("{} deleted {id}", "-".green()),
            BatchStatus::NotFound { id } => println!("{} {id} not found", "?".yellow()),
            BatchStatus::Rejected { code, message } => println!(
                "{} item {}: [{}] {}",
                "✗".red(),
                outcome.index,
                code,
                message
            ),
        }
    }
}
