//! distillery CLI entrypoint

use anyhow::Result;
use clap::Parser;

use distillery::cli::Cli;
use distillery::{config, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::config()?;

    // Initialize tracing (console + run log file)
    let log_file = logging::init(&cli.log_dir(config))?;

    cli.execute(config, &log_file).await
}
