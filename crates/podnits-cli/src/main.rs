use std::error::Error;
use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use commands::check::{self, CheckArgs};

mod commands;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "PODNITS_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "podnits",
    version,
    about = "Check manual pages for structural nits and undocumented exports"
)]
struct Cli {
    #[command(flatten)]
    check: CheckArgs,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if cli.check.options().is_idle() {
        Cli::command().print_help()?;
        return Ok(());
    }
    check::run(&cli.check)
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("podnits: {err}");
            ExitCode::FAILURE
        }
    }
}
