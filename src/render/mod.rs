//! Rendering module for manacard.
//!
//! This module turns card records into render-ready models: gradient themes,
//! parsed description spans and cost symbols. Drawing is left to the caller.

mod card;
mod glyph;
mod gradient;
mod swatch;

pub use card::{build, is_creature, RenderableCard};
pub use glyph::{resource_name, GlyphResolver, ResourceGlyphs};
pub use gradient::{color_pair, resolve, CardGradients, ColorStop, ColorStopSet, STOP_POSITIONS};
pub use swatch::{render_swatch, write_swatch};
