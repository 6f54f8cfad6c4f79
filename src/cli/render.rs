//! Render command implementation.
//!
//! Reads a JSON card document and prints its render model on stdout.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::error::{CardError, Result};
use crate::output::{display_path, Printer};
use crate::render::{build, RenderableCard, ResourceGlyphs};
use crate::types::{CardRecord, RawRecord};

/// Build a card's render model and print it as JSON
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// JSON card document (omit to render the built-in sample card)
    pub file: Option<PathBuf>,

    /// Include the glyph resource for every symbol
    #[arg(long)]
    pub glyphs: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Serialize)]
struct RenderOutput<'a> {
    #[serde(flatten)]
    card: &'a RenderableCard,
    badge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    glyphs: Option<GlyphOutput>,
}

#[derive(Serialize)]
struct GlyphOutput {
    cost: Vec<&'static str>,
    description: Vec<&'static str>,
}

pub fn run(args: RenderArgs, printer: &Printer) -> Result<()> {
    let record = match &args.file {
        Some(path) => {
            let source = fs::read_to_string(path).map_err(|e| CardError::Io {
                path: path.clone(),
                message: format!("Failed to read file: {}", e),
            })?;
            let raw: RawRecord = serde_json::from_str(&source).map_err(|e| CardError::Parse {
                message: format!("Invalid card document {}: {}", display_path(path), e),
                help: Some("Card documents are JSON objects with card fields".to_string()),
            })?;
            raw.sanitize()
        }
        None => CardRecord::sample(),
    };

    let card = build(&record)?;
    printer.status("Rendered", &card.name);

    let glyphs = args.glyphs.then(|| GlyphOutput {
        cost: card.cost_glyphs(&ResourceGlyphs),
        description: card.description_glyphs(&ResourceGlyphs),
    });
    let output = RenderOutput {
        card: &card,
        badge: card.badge(),
        glyphs,
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .map_err(|e| CardError::Parse {
        message: format!("Failed to serialize card: {}", e),
        help: None,
    })?;

    println!("{}", json);
    Ok(())
}
