use crate::report::{run_insights, InsightsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_market::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Job Market Insights",
    about = "Aggregate job listings across providers and summarise the market",
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
    /// Fetch listings once and print the market summary
    Insights(InsightsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Insights(args) => run_insights(args).await,
    }
}
