//! Parsers for card text.
//!
//! # Usage
//!
//! ```
//! use manacard::parser::{parse, Span};
//! use manacard::types::SymbolId;
//!
//! let spans: Vec<Span> = parse("Pay *>2*").collect();
//! assert_eq!(spans, vec![Span::text("Pay "), Span::Symbol(SymbolId::Generic(2))]);
//! ```

pub mod markup;

pub use markup::{parse, parse_cost, unescape_newlines, Span, Spans};
