//! Card description markup.
//!
//! Descriptions are plain text with inline mana symbols escaped between
//! asterisks:
//!
//! ```text
//! Counter target spell unless its controller pays *>2*.
//! Add *>1+U* to your mana pool.
//! ```
//!
//! The text is split on `*`. Pieces at even positions are literal text.
//! Pieces at odd positions are symbol escapes when they start with `>`: the
//! marker is dropped and the rest is split on `+`, one symbol per piece.
//! Odd pieces without the marker are kept as literal text. Unbalanced
//! asterisks are not an error, they just shift the even/odd alternation.

use std::str::Split;

use serde::Serialize;

use crate::types::SymbolId;

/// Delimiter around symbol escapes.
const ESCAPE_DELIMITER: char = '*';

/// Marker opening a symbol escape.
const SYMBOL_MARKER: char = '>';

/// Separator between symbols inside an escape and in costs.
pub const SYMBOL_SEPARATOR: char = '+';

/// A parsed unit of description text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Span {
    Text(String),
    Symbol(SymbolId),
}

impl Span {
    pub fn text(text: impl Into<String>) -> Self {
        Span::Text(text.into())
    }

    /// A symbol span, resolved with the colorless fallback.
    pub fn symbol(token: &str) -> Self {
        Span::Symbol(SymbolId::resolve(token))
    }
}

/// Parse a description into spans.
///
/// The returned iterator is lazy and holds no state beyond its position in
/// `description`; cloning it, or calling `parse` again, restarts from the
/// beginning.
pub fn parse(description: &str) -> Spans<'_> {
    Spans {
        pieces: description.split(ESCAPE_DELIMITER),
        index: 0,
        symbols: None,
    }
}

/// Lazy span sequence over a description. See [`parse`].
#[derive(Debug, Clone)]
pub struct Spans<'a> {
    pieces: Split<'a, char>,
    index: usize,
    /// Remaining symbols of the escape currently being expanded.
    symbols: Option<Split<'a, char>>,
}

impl Iterator for Spans<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        loop {
            if let Some(symbols) = &mut self.symbols {
                match symbols.next() {
                    Some(token) => return Some(Span::symbol(token)),
                    None => self.symbols = None,
                }
            }

            let piece = self.pieces.next()?;
            let escaped = self.index % 2 == 1;
            self.index += 1;

            if escaped {
                if let Some(body) = piece.strip_prefix(SYMBOL_MARKER) {
                    self.symbols = Some(body.split(SYMBOL_SEPARATOR));
                    continue;
                }
            }

            if !piece.is_empty() {
                return Some(Span::text(piece));
            }
        }
    }
}

/// Parse a `+`-joined mana cost such as `4+U+U`.
///
/// Every token, empty ones included, resolves independently; unknown tokens
/// become the colorless symbol, so an empty cost is a single colorless glyph.
pub fn parse_cost(cost: &str) -> impl Iterator<Item = SymbolId> + Clone + '_ {
    cost.split(SYMBOL_SEPARATOR).map(SymbolId::resolve)
}

/// Replace each two-character `\n` escape with a real newline.
///
/// Stored documents carry line breaks escaped; this runs once per record,
/// before parsing.
pub fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColorCode;
    use pretty_assertions::assert_eq;

    fn spans(description: &str) -> Vec<Span> {
        parse(description).collect()
    }

    #[test]
    fn test_empty_description() {
        assert_eq!(spans(""), vec![]);
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(spans("Flies."), vec![Span::text("Flies.")]);
    }

    #[test]
    fn test_trailing_symbol() {
        assert_eq!(
            spans("Pay *>2*"),
            vec![Span::text("Pay "), Span::Symbol(SymbolId::Generic(2))]
        );
    }

    #[test]
    fn test_multi_symbol_escape() {
        assert_eq!(
            spans("A*>1+U*B"),
            vec![
                Span::text("A"),
                Span::Symbol(SymbolId::Generic(1)),
                Span::Symbol(SymbolId::Mana(ColorCode::Blue)),
                Span::text("B"),
            ]
        );
    }

    #[test]
    fn test_odd_piece_without_marker_is_text() {
        assert_eq!(
            spans("a *bold* word"),
            vec![Span::text("a "), Span::text("bold"), Span::text(" word")]
        );
    }

    #[test]
    fn test_even_piece_with_marker_is_text() {
        assert_eq!(spans(">2 then"), vec![Span::text(">2 then")]);
        assert_eq!(
            spans("x*y*>2"),
            vec![Span::text("x"), Span::text("y"), Span::text(">2")]
        );
    }

    #[test]
    fn test_unbalanced_delimiter() {
        assert_eq!(
            spans("Pay *>2"),
            vec![Span::text("Pay "), Span::Symbol(SymbolId::Generic(2))]
        );
        assert_eq!(spans("Pay *"), vec![Span::text("Pay ")]);
        assert_eq!(spans("***"), vec![]);
    }

    #[test]
    fn test_unknown_symbol_falls_back() {
        assert_eq!(
            spans("*>Q+*"),
            vec![Span::Symbol(SymbolId::COLORLESS), Span::Symbol(SymbolId::COLORLESS)]
        );
    }

    #[test]
    fn test_parse_is_restartable() {
        let iter = parse("Add *>1+G* and *>X*.");
        let first: Vec<Span> = iter.clone().collect();
        let second: Vec<Span> = iter.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }

    #[test]
    fn test_sanitize_then_parse() {
        let stored = "Flies.\\n\\nCounter *>2*";
        assert_eq!(stored.len(), 22);

        assert_eq!(
            spans(&unescape_newlines(stored)),
            vec![Span::text("Flies.\n\nCounter "), Span::Symbol(SymbolId::Generic(2))]
        );
    }

    #[test]
    fn test_parse_cost() {
        let cost: Vec<SymbolId> = parse_cost("4+U+U").collect();
        assert_eq!(
            cost,
            vec![
                SymbolId::Generic(4),
                SymbolId::Mana(ColorCode::Blue),
                SymbolId::Mana(ColorCode::Blue),
            ]
        );
    }

    #[test]
    fn test_parse_cost_unknown_and_empty() {
        let cost: Vec<SymbolId> = parse_cost("X+?").collect();
        assert_eq!(cost, vec![SymbolId::Variable, SymbolId::COLORLESS]);

        assert_eq!(parse_cost("").collect::<Vec<_>>(), vec![SymbolId::COLORLESS]);
    }

    #[test]
    fn test_parse_cost_empty_tokens_are_colorless() {
        assert_eq!(
            parse_cost("4+").collect::<Vec<_>>(),
            vec![SymbolId::Generic(4), SymbolId::COLORLESS]
        );
        assert_eq!(
            parse_cost("+").collect::<Vec<_>>(),
            vec![SymbolId::COLORLESS, SymbolId::COLORLESS]
        );
    }

    #[test]
    fn test_span_serializes_tagged() {
        let json = serde_json::to_string(&Span::Symbol(SymbolId::Generic(2))).unwrap();
        assert_eq!(json, r#"{"kind":"symbol","value":"2"}"#);
    }
}
