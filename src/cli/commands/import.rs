//! faqkit import - Load entries from a JSON document list
//!
//! Input is an array of `{"question": ..., "answer": ...}` objects. Items are
//! applied one by one; invalid items are reported and skipped.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use crate::cli::AppContext;
use crate::cli::commands::delete::print_outcomes;
use crate::cli::output::{emit_robot, robot_partial};
use crate::error::Result;
use crate::kb::BatchSummary;

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// JSON file to read, or `-` for stdin
    pub path: PathBuf,
}

pub fn run(ctx: &AppContext, args: &ImportArgs) -> Result<()> {
    let outcomes = if args.path.as_os_str() == "-" {
        ctx.engine.import_json(&ctx.tenant, io::stdin().lock())?
    } else {
        let file = File::open(&args.path)?;
        ctx.engine.import_json(&ctx.tenant, BufReader::new(file))?
    };
    let summary = BatchSummary::from_outcomes(&outcomes);

    if ctx.robot_mode {
        return emit_robot(&robot_partial(
            serde_json::json!({ "summary": summary, "items": outcomes }),
            summary.total() - summary.rejected,
            summary.rejected,
        ));
    }

    if summary.rejected > 0 {
        print_outcomes(&outcomes);
    }
    println!(
        "{} Imported into {}: {} created, {} updated, {} rejected",
        "✓".green(),
        ctx.tenant.as_str().cyan(),
        summary.created,
        summary.updated,
        summary.rejected
    );
    Ok(())
}
