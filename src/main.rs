mod cli;
mod commands;
mod model;
mod util;

use anyhow::Result;
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() {
    init_tracing();
    report_env_file(dotenvy::dotenv());

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Prepare(args) => commands::prepare::run(args),
        Commands::Sample(args) => commands::sample::run(args),
        Commands::Classify(args) => commands::classify::run(args),
        Commands::Score(args) => commands::score::run(args),
    }
}

/// A missing `.env` is normal; anything else is logged and otherwise ignored.
/// Returns whether a problem was reported.
fn report_env_file<T>(result: dotenvy::Result<T>) -> bool {
    match result {
        Ok(_) => false,
        Err(err) if err.not_found() => false,
        Err(err) => {
            warn!(error = %err, "failed to load .env file");
            true
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
