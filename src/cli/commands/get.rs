//! faqkit get - Show a single entry

use clap::Args;
use colored::Colorize;

use crate::cli::AppContext;
use crate::cli::output::{emit_robot, robot_ok};
use crate::core::{EntryId, QaEntry};
use crate::error::{FaqError, Result};

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Entry id
    #[arg(required_unless_present = "question", conflicts_with = "question")]
    pub id: Option<i64>,

    /// Look the entry up by its exact question instead
    #[arg(long)]
    pub question: Option<String>,
}

pub fn run(ctx: &AppContext, args: &GetArgs) -> Result<()> {
    let id = match (&args.question, args.id) {
        (Some(question), _) => ctx
            .engine
            .get_id_by_question(&ctx.tenant, question)?
            .ok_or_else(|| FaqError::Validation(format!("no entry with question {question:?}")))?,
        (None, Some(id)) => EntryId(id),
        (None, None) => {
            return Err(FaqError::Validation(
                "either an id or --question is required".to_string(),
            ));
        }
    };

    let entry = ctx
        .engine
        .get(&ctx.tenant, id)?
        .ok_or(FaqError::EntryNotFound(id.get()))?;

    if ctx.robot_mode {
        return emit_robot(&robot_ok(&entry));
    }
    print_entry(&entry);
    Ok(())
}

fn print_entry(entry: &QaEntry) {
    println!("{} {}", "Entry".bold(), entry.id.to_string().bold());
    println!("{:10} {}", "question".dimmed(), entry.question);
    println!("{:10} {}", "answer".dimmed(), entry.answer);
    println!("{:10} {}", "created".dimmed(), entry.created_at.to_rfc3339());
    println!("{:10} {}", "updated".dimmed(), entry.updated_at.to_rfc3339());
}
