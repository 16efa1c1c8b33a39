//! tokseg command-line driver

use clap::Parser;
use tokseg_cli::commands::Commands;

/// PTB tokenization and sentence splitting
#[derive(Debug, Parser)]
#[command(name = "tokseg", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
