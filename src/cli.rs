use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pipereport", version, about = "Monthly card reports from Pipefy pipes")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Config file (default: ~/.config/pipereport/config.toml)"
    )]
    pub config: Option<PathBuf>,
    #[arg(long, global = true, help = "Pipe id, overrides report.pipe_id")]
    pub pipe: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every card of the pipe
    Cards {
        #[arg(long = "filter", value_name = "NAME=VALUE", help = "Keep cards with this field value (repeatable, all must match)")]
        filters: Vec<String>,
    },
    /// Monthly report payload and chart specs
    Monthly {
        #[arg(long, value_name = "YYYY-MM")]
        month: String,
    },
    /// Per-category totals and concluded counts for a month
    Completion {
        #[arg(long, value_name = "YYYY-MM")]
        month: String,
    },
    /// Cards in scope that are not concluded yet
    Open,
    /// Show the effective configuration
    Config,
}
