//! faqkit - FAQ retrieval from the command line
//!
//! Stores question/answer pairs per tenant and answers free-text questions
//! with the closest stored entry.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use faqkit::Result;
use faqkit::cli::output::{emit_robot, robot_error_structured};
use faqkit::cli::{AppContext, Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.robot {
                // Robot mode: JSON error envelope to stdout
                if emit_robot(&robot_error_structured(&e)).is_err() {
                    eprintln!("Error: {e}");
                }
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    if let Commands::Tokenize(args) = &cli.command {
        return faqkit::cli::commands::tokenize::run_without_context(cli, args);
    }
    let ctx = AppContext::from_cli(cli)?;
    faqkit::cli::commands::run(&ctx, &cli.command)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,faqkit=info",
        1 => "info,faqkit=debug",
        2 => "debug,faqkit=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.robot {
        // JSON logging for robot mode
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
