use crate::commands::{run_batch, run_client, run_decide, BatchArgs, ClientArgs, DecideArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_decision::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Decision Engine",
    about = "Serve and run loan decisions from the command line",
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
    /// Decide a single loan request and print the result as JSON
    Decide(DecideArgs),
    /// Decide every row of a CSV file, printing one JSON line per row
    Batch(BatchArgs),
    /// Show the stored birth date for a client
    Client(ClientArgs),
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
        Command::Decide(args) => run_decide(args),
        Command::Batch(args) => run_batch(args),
        Command::Client(args) => run_client(args),
    }
}
