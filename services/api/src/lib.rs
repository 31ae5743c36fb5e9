mod cli;
mod infra;
mod report;
mod routes;
mod server;

use job_market::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
