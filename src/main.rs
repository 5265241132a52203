mod auth;
mod cli;
mod dashboard;
mod error;
mod providers;
mod render;
mod report;
mod server;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting ReviewDash - AI Project Review Dashboard");
    cli.execute().await?;

    Ok(())
}
