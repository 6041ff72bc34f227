mod cli;

use clap::Parser;
use goshop_core::{Dispatcher, GoshopClient};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries only the response body.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let origin = args.origin();
    tracing::debug!(origin = %origin, "resolved service origin");

    let client = GoshopClient::new(Dispatcher::new(origin));
    let response = cli::execute(&client, &args.command).await?;
    cli::render(&mut std::io::stdout().lock(), &response, args.include)
}
