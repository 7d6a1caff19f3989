use crate::demo::{run_clean, run_demo, run_market_report, CleanArgs, DemoArgs, MarketReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use jobmarket::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Job Market Analytics",
    about = "Clean, analyze and serve Glassdoor job posting exports from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Clean a postings export or aggregate it into a market report
    Market {
        #[command(subcommand)]
        command: MarketCommand,
    },
    /// Run an end-to-end CLI demo over a bundled sample export
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum MarketCommand {
    /// Clean a raw postings export into the flat analysis CSV
    Clean(CleanArgs),
    /// Aggregate a postings export into a market report
    Report(MarketReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured postings export to serve
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Market {
            command: MarketCommand::Clean(args),
        } => run_clean(args),
        Command::Market {
            command: MarketCommand::Report(args),
        } => run_market_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
