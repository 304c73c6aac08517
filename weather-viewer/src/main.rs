//! Binary crate for the terminal weather viewer.
//!
//! Polls the weather-server every 10 minutes, renders the selected day plus
//! a strip of upcoming days, and takes selection commands from stdin.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod client;
mod render;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the panel output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
