use syntect::highlighting::{
    FontStyle, HighlightIterator, HighlightState, Highlighter, Style, Theme,
};
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};

use super::{TokenLine, TokenSpan};
use crate::app::domain::color::Rgba;

/// Highlight `text` from the top, one `TokenLine` per display line.
///
/// A text ending in a newline (or an empty text) yields a trailing empty
/// line, the way an editor shows it.
pub(super) fn highlight_full(
    text: &str,
    syntax: &SyntaxReference,
    syntax_set: &SyntaxSet,
    theme: &Theme,
) -> Vec<TokenLine> {
    let highlighter = Highlighter::new(theme);
    let mut parse_state = ParseState::new(syntax);
    let mut highlight_state = HighlightState::new(&highlighter, ScopeStack::new());
    let fallback = theme
        .settings
        .foreground
        .map(Rgba::from)
        .unwrap_or(Rgba::WHITE);

    let mut lines = Vec::new();
    for (idx, line) in LinesWithEndings::new(text).enumerate() {
        let spans = match parse_state.parse_line(line, syntax_set) {
            Ok(ops) => {
                let mut remaining = line_body(line).len();
                HighlightIterator::new(&mut highlight_state, &ops, line, &highlighter)
                    .filter_map(|(style, piece)| {
                        let take = piece.len().min(remaining);
                        remaining -= take;
                        to_span(style, &piece[..take])
                    })
                    .collect()
            }
            Err(e) => {
                log::warn!("Tokenizer failed on line {}: {}; showing it unstyled", idx + 1, e);
                plain_line(line, fallback)
            }
        };
        lines.push(spans);
    }

    if text.is_empty() || text.ends_with('\n') {
        lines.push(Vec::new());
    }
    lines
}

/// One span in the theme's foreground color, used when parsing fails.
pub(super) fn plain_line(line: &str, color: Rgba) -> TokenLine {
    to_span(
        Style {
            foreground: syntect::highlighting::Color { r: color.r, g: color.g, b: color.b, a: color.a },
            ..Style::default()
        },
        line_body(line),
    )
    .into_iter()
    .collect()
}

/// `line` without its terminator ("\n" or "\r\n"). A '\r' anywhere else is
/// part of the text.
fn line_body(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(body) => body.strip_suffix('\r').unwrap_or(body),
        None => line,
    }
}

fn to_span(style: Style, text: &str) -> Option<TokenSpan> {
    if text.is_empty() {
        return None;
    }
    Some(TokenSpan {
        text: text.to_string(),
        color: Rgba::from(style.foreground),
        bold: style.font_style.contains(FontStyle::BOLD),
        italic: style.font_style.contains(FontStyle::ITALIC),
    })
}

/// Iterator that yields lines including their line endings.
pub(super) struct LinesWithEndings<'a> {
    text: &'a str,
}

impl<'a> LinesWithEndings<'a> {
    pub(super) fn new(text: &'a str) -> Self {
        Self { text }
    }
}

impl<'a> Iterator for LinesWithEndings<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.text.is_empty() {
            return None;
        }
        let end = self.text.find('\n').map(|i| i + 1).unwrap_or(self.text.len());
        let line = &self.text[..end];
        self.text = &self.text[end..];
        Some(line)
    }
}
