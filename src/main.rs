use anyhow::Result;
use clap::Parser;
use tally::cli::Cli;
use tally::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose);
    cli.run().await
}
