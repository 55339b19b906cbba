use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod domain;
mod error;
mod pipefy;
mod services;

pub use cli::{Cli, Commands};
pub use commands::{handle_ingest_commands, handle_report_commands};
pub use domain::models::{Card, Month, MonthlyReport, Settings};
pub use error::{error_code, ReportError};
pub use services::aggregate::aggregate;
pub use services::config::{load_settings, redacted};
pub use services::dashboard::{monthly_completion, open_summary};
pub use services::matcher::filter_cards;
pub use services::output::{print_failure, print_one, print_out};
pub use services::report::assemble;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    if handle_ingest_commands(cli)? {
        return Ok(());
    }
    if handle_report_commands(cli)? {
        return Ok(());
    }
    anyhow::bail!("unhandled command: {:?}", cli.command)
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(err) = run(&cli) {
        tracing::debug!(error = ?err, "command failed");
        print_failure(cli.json, error_code(&err), err.to_string());
        std::process::exit(1);
    }
}
