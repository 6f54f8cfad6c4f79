//! Two-colour gradient themes.
//!
//! A card's colour field names one or two colour codes. Each theme role gets a
//! horizontal gradient that holds the first colour up to 45%, blends across
//! the middle tenth, and holds the second colour from 55% on. Mono-coloured
//! cards pair the code with itself.

use serde::Serialize;

use crate::error::{CardError, Result};
use crate::parser::markup::SYMBOL_SEPARATOR;
use crate::types::{ColorCode, Colour, ThemeRole};

/// Stop positions shared by every card gradient.
pub const STOP_POSITIONS: [f32; 4] = [0.0, 0.45, 0.55, 1.0];

/// A single gradient stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorStop {
    /// Position along the gradient, in `[0, 1]`.
    pub position: f32,
    pub code: ColorCode,
    pub colour: Colour,
}

/// Ordered gradient stops for one theme role.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ColorStopSet {
    stops: Vec<ColorStop>,
}

impl ColorStopSet {
    /// Build the four-stop set for a colour pair in one role.
    pub fn dual(role: ThemeRole, first: ColorCode, second: ColorCode) -> Self {
        let codes = [first, first, second, second];
        let stops = STOP_POSITIONS
            .iter()
            .zip(codes)
            .map(|(&position, code)| ColorStop {
                position,
                code,
                colour: code.theme().get(role),
            })
            .collect();

        Self { stops }
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Colour at position `t`, blending linearly between neighbouring stops.
    pub fn sample(&self, t: f32) -> Colour {
        let t = t.clamp(0.0, 1.0);

        let Some(first) = self.stops.first() else {
            return Colour::default();
        };
        if t <= first.position {
            return first.colour;
        }

        for pair in self.stops.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if t <= to.position {
                let width = to.position - from.position;
                if width <= f32::EPSILON {
                    return to.colour;
                }
                return from.colour.mix(to.colour, (t - from.position) / width);
            }
        }

        self.stops[self.stops.len() - 1].colour
    }
}

/// Gradient stop sets for every theme role of a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardGradients {
    pub title: ColorStopSet,
    pub description: ColorStopSet,
    pub border: ColorStopSet,
}

impl CardGradients {
    pub fn get(&self, role: ThemeRole) -> &ColorStopSet {
        match role {
            ThemeRole::Title => &self.title,
            ThemeRole::Description => &self.description,
            ThemeRole::Border => &self.border,
        }
    }
}

/// Resolve a card colour field into gradients.
///
/// Accepts `U`, `UR` or `U+R`. Any code outside the theme table fails with
/// [`CardError::UnknownColorCode`]; there is no fallback theme.
pub fn resolve(color: &str) -> Result<CardGradients> {
    let (first, second) = color_pair(color)?;

    Ok(CardGradients {
        title: ColorStopSet::dual(ThemeRole::Title, first, second),
        description: ColorStopSet::dual(ThemeRole::Description, first, second),
        border: ColorStopSet::dual(ThemeRole::Border, first, second),
    })
}

/// Split a colour field into its (possibly self-paired) codes.
pub fn color_pair(color: &str) -> Result<(ColorCode, ColorCode)> {
    let tokens: Vec<&str> = if color.contains(SYMBOL_SEPARATOR) {
        color.split(SYMBOL_SEPARATOR).collect()
    } else {
        color
            .char_indices()
            .map(|(i, c)| &color[i..i + c.len_utf8()])
            .collect()
    };

    match tokens.as_slice() {
        [only] => {
            let code = ColorCode::from_letter(only)?;
            Ok((code, code))
        }
        [first, second] => Ok((ColorCode::from_letter(first)?, ColorCode::from_letter(second)?)),
        _ => Err(CardError::UnknownColorCode {
            code: color.to_string(),
        }),
    }
}
