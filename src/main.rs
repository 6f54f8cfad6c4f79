use clap::Parser;
use manacard::cli::{Cli, Commands};
use manacard::output::Printer;
use miette::Result;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `manacard=debug`).
const LOG_ENV: &str = "MANACARD_LOG";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Render(args) => manacard::cli::render::run(args, &printer)?,
        Commands::Fetch(args) => manacard::cli::fetch::run(args, &printer).await?,
        Commands::Swatch(args) => manacard::cli::swatch::run(args, &printer)?,
    }

    Ok(())
}
