//! Card records as stored and as displayed.

use serde::{Deserialize, Serialize};

use crate::parser::unescape_newlines;

/// A card as displayed. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CardRecord {
    /// Mana cost, `+`-joined symbols (e.g. `4+U+U`).
    pub cost: String,
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: String,
    pub subtype: String,
    /// Rules text with `*>...*` symbol escapes.
    pub description: String,
    pub flavor: String,
    /// One or two colour codes (`U`, `UR` or `U+R`).
    pub color: String,
    pub power: i64,
    pub res: i64,
}

impl CardRecord {
    /// The card shown before any fetch completes.
    pub fn sample() -> Self {
        Self {
            cost: "4+U+U".to_string(),
            name: "Dragón del archivo".to_string(),
            card_type: "Criatura".to_string(),
            subtype: "Hechicero dragón".to_string(),
            description: "Vuela.\n\nRebatir *>2*\n\n(Siempre que esta criatura sea objetivo de un \
                hechizo o habilidad que controla un oponente, contrarréstalo a menos que ese \
                jugador pague *>2*.)\n\nCuando el Dragón del archivo entre al campo de batalla, \
                adivina 2."
                .to_string(),
            flavor: "\"Fascinante. Aquí dice que los dragones no saben leer.\"".to_string(),
            color: "U".to_string(),
            power: 4,
            res: 6,
        }
    }

    /// Replace escaped `\n` sequences in the description with real newlines.
    pub fn sanitized(self) -> Self {
        Self {
            description: unescape_newlines(&self.description),
            ..self
        }
    }
}

/// A card document as returned by a store. Any field may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub cost: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub card_type: Option<String>,
    pub subtype: Option<String>,
    pub description: Option<String>,
    pub flavor: Option<String>,
    pub color: Option<String>,
    pub power: Option<i64>,
    pub res: Option<i64>,
}

impl RawRecord {
    /// Fill missing fields with defaults and unescape the description.
    pub fn sanitize(self) -> CardRecord {
        CardRecord {
            cost: self.cost.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            card_type: self.card_type.unwrap_or_default(),
            subtype: self.subtype.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            flavor: self.flavor.unwrap_or_default(),
            color: self.color.unwrap_or_default(),
            power: self.power.unwrap_or_default(),
            res: self.res.unwrap_or_default(),
        }
        .sanitized()
    }
}

impl From<CardRecord> for RawRecord {
    fn from(card: CardRecord) -> Self {
        Self {
            cost: Some(card.cost),
            name: Some(card.name),
            card_type: Some(card.card_type),
            subtype: Some(card.subtype),
            description: Some(card.description),
            flavor: Some(card.flavor),
            color: Some(card.color),
            power: Some(card.power),
            res: Some(card.res),
        }
    }
}
