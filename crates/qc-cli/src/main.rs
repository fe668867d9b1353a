//! emrqc CLI - schema introspection and completeness reports for an EMR warehouse

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{families, missing, orphans, report, schema};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Schema(args) => schema::execute(args, &cli.global).await,
        cli::Commands::Report(args) => report::execute(args, &cli.global).await,
        cli::Commands::Orphans(args) => orphans::execute(args, &cli.global).await,
        cli::Commands::Missing(args) => missing::execute(args, &cli.global).await,
        cli::Commands::Families(args) => families::execute(args, &cli.global).await,
    }
}
