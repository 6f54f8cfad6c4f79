pub mod fetch;
pub mod render;
pub mod swatch;

use clap::{Parser, Subcommand};

/// manacard - Card markup, theming and concurrent card refresh
#[derive(Parser, Debug)]
#[command(name = "manacard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a card's render model and print it as JSON
    Render(render::RenderArgs),

    /// Fetch cards concurrently and publish them into the current-card slot
    Fetch(fetch::FetchArgs),

    /// Write a PNG preview of a colour's gradient theme
    Swatch(swatch::SwatchArgs),
}
