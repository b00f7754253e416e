mod cli;
pub mod error;
mod evaluate;
mod infra;
mod routes;
mod server;
pub mod upload;

use error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
