//! Mana symbol identifiers.

use std::fmt;

use serde::{Serialize, Serializer};

use super::ColorCode;

/// A mana symbol drawn inline in a cost or description.
///
/// The alphabet is closed: numerals `1` to `10`, `X`, and the six colour
/// codes. Anything else resolves to the colorless symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolId {
    /// Generic mana, always in `1..=10`.
    Generic(u8),
    /// Variable cost `X`.
    Variable,
    /// Coloured (or colorless) mana.
    Mana(ColorCode),
}

impl SymbolId {
    /// Fallback for tokens outside the alphabet.
    pub const COLORLESS: SymbolId = SymbolId::Mana(ColorCode::Colorless);

    /// Resolve a token, falling back to [`SymbolId::COLORLESS`].
    pub fn resolve(token: &str) -> Self {
        Self::lookup(token).unwrap_or(Self::COLORLESS)
    }

    /// Resolve a token strictly, returning `None` outside the alphabet.
    pub fn lookup(token: &str) -> Option<Self> {
        let id = match token {
            "1" => SymbolId::Generic(1),
            "2" => SymbolId::Generic(2),
            "3" => SymbolId::Generic(3),
            "4" => SymbolId::Generic(4),
            "5" => SymbolId::Generic(5),
            "6" => SymbolId::Generic(6),
            "7" => SymbolId::Generic(7),
            "8" => SymbolId::Generic(8),
            "9" => SymbolId::Generic(9),
            "10" => SymbolId::Generic(10),
            "X" => SymbolId::Variable,
            other => SymbolId::Mana(ColorCode::from_letter(other).ok()?),
        };
        Some(id)
    }

    /// Every symbol in the alphabet.
    pub fn alphabet() -> impl Iterator<Item = SymbolId> {
        (1..=10)
            .map(SymbolId::Generic)
            .chain(std::iter::once(SymbolId::Variable))
            .chain(ColorCode::ALL.into_iter().map(SymbolId::Mana))
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolId::Generic(n) => write!(f, "{}", n),
            SymbolId::Variable => f.write_str("X"),
            SymbolId::Mana(code) => f.write_str(code.letter()),
        }
    }
}

impl Serialize for SymbolId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
