use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::{display_path, Printer};
use crate::render::{resolve, write_swatch};
use crate::types::ThemeRole;

/// Write a PNG preview of a colour's gradient theme
#[derive(Args, Debug)]
pub struct SwatchArgs {
    /// Colour code: one or two letters from R, G, U, B, W, C (e.g. U, UR, U+R)
    #[arg(required = true)]
    pub color: String,

    /// Output PNG file
    #[arg(long, short, default_value = "swatch.png")]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value = "400")]
    pub width: u32,

    /// Height of each gradient band in pixels
    #[arg(long, default_value = "40")]
    pub band: u32,
}

pub fn run(args: SwatchArgs, printer: &Printer) -> Result<()> {
    let gradients = resolve(&args.color)?;

    write_swatch(&gradients, &args.output, args.width, args.band)?;

    for role in ThemeRole::ALL {
        let stops = gradients.get(role).stops();
        let colours: Vec<String> = stops.iter().map(|s| s.colour.to_string()).collect();
        printer.info(&format!("{:?}", role), &colours.join(" "));
    }
    printer.status("Wrote", &display_path(&args.output));

    Ok(())
}
