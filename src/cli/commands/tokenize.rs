//! faqkit tokenize - Show the tokens indexing and matching see

use clap::Args;

use crate::cli::Cli;
use crate::cli::context::load_config;
use crate::cli::output::{emit_robot, robot_ok};
use crate::config::Config;
use crate::error::Result;
use crate::search::Tokenizer;

#[derive(Args, Debug)]
pub struct TokenizeArgs {
    /// Text to tokenize
    pub text: String,
}

/// Entry point that skips opening the database.
pub fn run_without_context(cli: &Cli, args: &TokenizeArgs) -> Result<()> {
    let config = load_config(cli)?;
    run_with_config(&config, cli.robot, args)
}

pub fn run_with_config(config: &Config, robot: bool, args: &TokenizeArgs) -> Result<()> {
    let tokenizer = Tokenizer::from_config(&config.tokenizer)?;
    let tokens = tokenizer.tokenize(&args.text);

    if robot {
        return emit_robot(&robot_ok(serde_json::json!({
            "text": args.text,
            "tokens": tokens,
        })));
    }
    println!("{}", tokens.join(" | "));
    Ok(())
}
