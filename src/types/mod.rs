//! Core domain types for manacard.
//!
//! - `Colour` - RGBA colour values
//! - `ColorCode` / `Theme` - card colours and their theme table
//! - `SymbolId` - mana symbols
//! - `CardRecord` / `RawRecord` - card data as displayed and as stored

mod colour;
mod record;
mod symbol;
mod theme;

pub use colour::Colour;
pub use record::{CardRecord, RawRecord};
pub use symbol::SymbolId;
pub use theme::{ColorCode, Theme, ThemeRole};
