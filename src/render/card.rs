//! Render-ready card model.

use serde::Serialize;

use crate::error::Result;
use crate::parser::{parse, parse_cost, Span};
use crate::types::{CardRecord, SymbolId};

use super::glyph::GlyphResolver;
use super::gradient::{resolve, CardGradients};

/// Type-line keyword marking creature cards. Matched case-insensitively as a
/// substring of the type line.
const CREATURE_KEYWORD: &str = "CRIATURA";

/// Everything the paint layer needs to draw a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderableCard {
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub subtype: String,
    pub flavor: String,
    pub cost: Vec<SymbolId>,
    pub description: Vec<Span>,
    pub gradients: CardGradients,
    pub is_creature: bool,
    pub power: i64,
    pub res: i64,
}

impl RenderableCard {
    /// Power/toughness badge text, only for creatures.
    pub fn badge(&self) -> Option<String> {
        self.is_creature.then(|| format!("{}/{}", self.power, self.res))
    }

    /// Whether the flavor divider and text are drawn.
    pub fn has_flavor(&self) -> bool {
        !self.flavor.trim().is_empty()
    }

    /// Resolve every cost symbol through `glyphs`, in order.
    pub fn cost_glyphs<G: GlyphResolver>(&self, glyphs: &G) -> Vec<G::Handle> {
        self.cost.iter().map(|&s| glyphs.resolve_glyph(s)).collect()
    }

    /// Resolve every inline description symbol through `glyphs`, in order.
    pub fn description_glyphs<G: GlyphResolver>(&self, glyphs: &G) -> Vec<G::Handle> {
        self.description
            .iter()
            .filter_map(|span| match span {
                Span::Symbol(s) => Some(glyphs.resolve_glyph(*s)),
                Span::Text(_) => None,
            })
            .collect()
    }
}

/// Build the render model for a record.
///
/// `record` must already be sanitized (see [`CardRecord::sanitized`]); the
/// description is parsed as stored. Fails only when the colour field names an
/// unknown colour code. Every other field is displayed as-is.
pub fn build(record: &CardRecord) -> Result<RenderableCard> {
    let gradients = resolve(&record.color)?;

    Ok(RenderableCard {
        name: record.name.clone(),
        card_type: record.card_type.clone(),
        subtype: record.subtype.clone(),
        flavor: record.flavor.clone(),
        cost: parse_cost(&record.cost).collect(),
        description: parse(&record.description).collect(),
        gradients,
        is_creature: is_creature(&record.card_type),
        power: record.power,
        res: record.res,
    })
}

/// Whether a type line marks a creature card.
pub fn is_creature(card_type: &str) -> bool {
    card_type.to_uppercase().contains(CREATURE_KEYWORD)
}
