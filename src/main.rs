use anyhow::Result;
use clap::Parser;

use netharvest::cli::{Cli, Command};
use netharvest::{cmd, log};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    log::init_logger(&cli)?;

    match cli.command {
        Command::Scan(args) => cmd::scan::run(args, cli.quiet).await,
        Command::Ping(args) => cmd::ping::run(args, cli.quiet).await,
        Command::Interface(args) => cmd::interface::run(args).await,
        Command::Reports(args) => cmd::reports::run(args).await,
        Command::Version(args) => cmd::version::run(args).await,
    }
}
