mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use retention_dashboard::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
