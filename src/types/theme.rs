//! Colour codes and the per-colour theme table.
//!
//! Every card colour maps to three theme colours: the title bar, the
//! description panel background and the border. The table is fixed at
//! compile time and never mutated.

use std::fmt;

use serde::Serialize;

use crate::error::{CardError, Result};

use super::Colour;

/// One of the six card colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ColorCode {
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "W")]
    White,
    #[serde(rename = "C")]
    Colorless,
}

impl ColorCode {
    /// All codes in table order.
    pub const ALL: [ColorCode; 6] = [
        ColorCode::Red,
        ColorCode::Green,
        ColorCode::Blue,
        ColorCode::Black,
        ColorCode::White,
        ColorCode::Colorless,
    ];

    /// Look up a single-letter code.
    pub fn from_letter(letter: &str) -> Result<Self> {
        match letter {
            "R" => Ok(ColorCode::Red),
            "G" => Ok(ColorCode::Green),
            "U" => Ok(ColorCode::Blue),
            "B" => Ok(ColorCode::Black),
            "W" => Ok(ColorCode::White),
            "C" => Ok(ColorCode::Colorless),
            other => Err(CardError::UnknownColorCode {
                code: other.to_string(),
            }),
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            ColorCode::Red => "R",
            ColorCode::Green => "G",
            ColorCode::Blue => "U",
            ColorCode::Black => "B",
            ColorCode::White => "W",
            ColorCode::Colorless => "C",
        }
    }

    /// The theme colours for this code.
    pub fn theme(self) -> &'static Theme {
        &THEME_TABLE[self as usize]
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// The surface a theme colour is painted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeRole {
    Title,
    Description,
    Border,
}

impl ThemeRole {
    pub const ALL: [ThemeRole; 3] = [ThemeRole::Title, ThemeRole::Description, ThemeRole::Border];
}

/// Theme colours for a single colour code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub title: Colour,
    pub description: Colour,
    pub border: Colour,
}

impl Theme {
    pub fn get(&self, role: ThemeRole) -> Colour {
        match role {
            ThemeRole::Title => self.title,
            ThemeRole::Description => self.description,
            ThemeRole::Border => self.border,
        }
    }
}

/// Indexed by `ColorCode as usize`.
///
/// Green's title is the muted gold `#C2B791`; the brighter `#7FBBA0` was
/// superseded in the card data and is never shown.
static THEME_TABLE: [Theme; 6] = [
    // R
    Theme {
        title: Colour::from_argb(0xFFDB8E7B),
        description: Colour::from_argb(0xFFF5A08C),
        border: Colour::from_argb(0xFFC44535),
    },
    // G
    Theme {
        title: Colour::from_argb(0xFFC2B791),
        description: Colour::from_argb(0xFFA7DBB6),
        border: Colour::from_argb(0xFF087334),
    },
    // U
    Theme {
        title: Colour::from_argb(0xFF9DC3E3),
        description: Colour::from_argb(0xFFAED4F5),
        border: Colour::from_argb(0xFF245496),
    },
    // B
    Theme {
        title: Colour::from_argb(0xFF6C717A),
        description: Colour::from_argb(0xFFB5B2BF),
        border: Colour::from_argb(0xFF282A2E),
    },
    // W
    Theme {
        title: Colour::from_argb(0xFFD5D6C1),
        description: Colour::from_argb(0xFFF4F5E6),
        border: Colour::from_argb(0xFFDEDBC8),
    },
    // C
    Theme {
        title: Colour::from_argb(0xFFB3BFC7),
        description: Colour::from_argb(0xFFDFECF5),
        border: Colour::from_argb(0xFFD1DCE6),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_codes_resolve() {
        for code in ColorCode::ALL {
            assert_eq!(ColorCode::from_letter(code.letter()).unwrap(), code);
        }
    }

    #[test]
    fn test_unknown_code() {
        let err = ColorCode::from_letter("P").unwrap_err();
        assert!(matches!(err, CardError::UnknownColorCode { code } if code == "P"));

        assert!(ColorCode::from_letter("").is_err());
        assert!(ColorCode::from_letter("u").is_err());
    }

    #[test]
    fn test_table_lookup() {
        let blue = ColorCode::Blue.theme();
        assert_eq!(blue.title, Colour::from_argb(0xFF9DC3E3));
        assert_eq!(blue.get(ThemeRole::Border), Colour::from_argb(0xFF245496));
    }

    #[test]
    fn test_green_title_uses_later_entry() {
        assert_eq!(ColorCode::Green.theme().title, Colour::rgb(0xC2, 0xB7, 0x91));
    }
}
