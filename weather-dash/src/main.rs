//! Binary crate for the `weather-dash` command.
//!
//! This crate focuses on:
//! - Serving the weather endpoint over HTTP and the tool over MCP stdio
//! - Interactive unit configuration
//! - Human-friendly dashboard output

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod render;
mod server;
mod tool;

#[cfg(test)]
mod testing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout belongs to the MCP transport and the dashboard output.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
