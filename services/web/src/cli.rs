use crate::commands::{run_init_db, run_report, InitDbArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use retention_dashboard::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Employee Retention Dashboard",
    about = "Serve and render employee and team retention risk reports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP dashboard (default command)
    Serve(ServeArgs),
    /// Render one report page to a file or stdout
    Report(ReportArgs),
    /// Create an employee events database seeded with demo data
    InitDb(InitDbArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

/// Overrides for the data locations shared by several commands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct DataArgs {
    /// Path to the employee events SQLite database
    #[arg(long)]
    pub(crate) database: Option<PathBuf>,
    /// Path to a JSON risk model export (defaults to built-in coefficients)
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args).await,
        Command::InitDb(args) => run_init_db(args),
    }
}
