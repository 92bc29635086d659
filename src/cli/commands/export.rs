//! faqkit export - Write entries as a JSON document list

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use crate::cli::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file (default: stdout)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(ctx: &AppContext, args: &ExportArgs) -> Result<()> {
    let Some(path) = &args.output else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        ctx.engine.export_json(&ctx.tenant, &mut handle)?;
        writeln!(handle)?;
        return Ok(());
    };

    let mut writer = BufWriter::new(File::create(path)?);
    let count = ctx.engine.export_json(&ctx.tenant, &mut writer)?;
    writer.flush()?;

    if ctx.robot_mode {
        return emit_robot(&robot_ok(serde_json::json!({
            "path": path,
            "count": count,
        })));
    }
    println!(
        "{} Exported {count} entries to {}",
        "✓".green(),
        path.display()
    );
    Ok(())
}
