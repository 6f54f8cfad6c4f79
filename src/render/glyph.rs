//! Glyph lookup for mana symbols.

use crate::types::{ColorCode, SymbolId};

/// Resolves mana symbols to whatever the paint layer draws them with.
///
/// Implementations must cover the whole symbol alphabet. A missing glyph is
/// the implementation's problem; the card model never checks.
pub trait GlyphResolver {
    type Handle;

    fn resolve_glyph(&self, symbol: SymbolId) -> Self::Handle;
}

/// Resolves symbols to the bundled drawable resource names.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceGlyphs;

impl GlyphResolver for ResourceGlyphs {
    type Handle = &'static str;

    fn resolve_glyph(&self, symbol: SymbolId) -> &'static str {
        resource_name(symbol)
    }
}

/// Drawable resource name for a symbol (`mana_2`, `mana_blue`, ...).
pub fn resource_name(symbol: SymbolId) -> &'static str {
    match symbol {
        SymbolId::Generic(1) => "mana_1",
        SymbolId::Generic(2) => "mana_2",
        SymbolId::Generic(3) => "mana_3",
        SymbolId::Generic(4) => "mana_4",
        SymbolId::Generic(5) => "mana_5",
        SymbolId::Generic(6) => "mana_6",
        SymbolId::Generic(7) => "mana_7",
        SymbolId::Generic(8) => "mana_8",
        SymbolId::Generic(9) => "mana_9",
        SymbolId::Generic(10) => "mana_10",
        SymbolId::Variable => "mana_x",
        SymbolId::Mana(ColorCode::Red) => "mana_red",
        SymbolId::Mana(ColorCode::Green) => "mana_green",
        SymbolId::Mana(ColorCode::Blue) => "mana_blue",
        SymbolId::Mana(ColorCode::Black) => "mana_black",
        SymbolId::Mana(ColorCode::White) => "mana_white",
        // Colorless, and generic values outside 1..=10 (never produced by
        // the parser).
        SymbolId::Mana(ColorCode::Colorless) | SymbolId::Generic(_) => "mana_colorless",
    }
}
