//! manacard - Card markup, theming and concurrent card refresh
//!
//! A library for turning trading-card records into render-ready models
//! (gradient themes, inline mana symbols) and for refreshing the card on
//! display from several stores at once.

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod parser;
pub mod render;
pub mod types;

pub use config::{Manifest, TaskSpec};
pub use error::{CardError, FetchError, Result};
pub use fetch::{
    CardFeed, CardStore, FetchOrchestrator, FetchRun, FetchTask, JsonDirStore, MemoryStore,
    PublishPolicy, Published, SharedCardSlot, TaskReport, TaskState,
};
pub use parser::{parse, parse_cost, unescape_newlines, Span, Spans};
pub use render::{
    build, resolve, CardGradients, ColorStop, ColorStopSet, GlyphResolver, RenderableCard,
    ResourceGlyphs,
};
pub use types::{CardRecord, ColorCode, Colour, RawRecord, SymbolId, Theme, ThemeRole};
