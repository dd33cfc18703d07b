use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use presale_scripts::cli::Cli;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt().pretty().init();

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("An error occurred: {}", e);
            ExitCode::FAILURE
        }
    }
}
