mod highlighter;
mod palette;

use std::collections::HashMap;

use syntect::highlighting::Theme;
use syntect::parsing::SyntaxSet;

use crate::app::domain::color::Rgba;
use crate::app::domain::theme::CodeTheme;

/// A run of text drawn in one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpan {
    pub text: String,
    pub color: Rgba,
    pub bold: bool,
    pub italic: bool,
}

/// The spans of one display line, without its line ending.
pub type TokenLine = Vec<TokenSpan>;

/// Tokenizer output for a whole text.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlighted {
    pub lines: Vec<TokenLine>,
    pub background: Rgba,
    pub foreground: Rgba,
}

/// Maps source text + theme to colored token lines.
pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    themes: HashMap<CodeTheme, Theme>,
    syntax_name: String,
}

impl SyntaxHighlighter {
    /// Create a highlighter for the grammar matching `language` (a syntect
    /// token such as `js` or `rs`). Unknown languages fall back to plain text.
    pub fn new(language: &str) -> Self {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let themes = CodeTheme::all()
            .iter()
            .map(|t| (*t, palette::build_theme(*t)))
            .collect();
        let mut highlighter = Self {
            syntax_set,
            themes,
            syntax_name: String::new(),
        };
        highlighter.set_language(language);
        highlighter
    }

    /// Switch grammar. Returns false (and selects plain text) if unknown.
    pub fn set_language(&mut self, language: &str) -> bool {
        match self.syntax_set.find_syntax_by_token(language) {
            Some(syntax) => {
                self.syntax_name = syntax.name.clone();
                true
            }
            None => {
                log::warn!("No grammar for '{}', highlighting as plain text", language);
                self.syntax_name = self.syntax_set.find_syntax_plain_text().name.clone();
                false
            }
        }
    }

    pub fn syntax_name(&self) -> &str {
        &self.syntax_name
    }

    pub fn highlight(&self, text: &str, theme: CodeTheme) -> Highlighted {
        let theme_def = self.theme(theme);
        let background = self.theme_background(theme);
        let foreground = self.theme_foreground(theme);
        let syntax = self
            .syntax_set
            .find_syntax_by_name(&self.syntax_name)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let lines = highlighter::highlight_full(text, syntax, &self.syntax_set, theme_def);
        Highlighted { lines, background, foreground }
    }

    fn theme(&self, theme: CodeTheme) -> &Theme {
        // Every variant is inserted in `new`.
        &self.themes[&theme]
    }

    /// Background color of the code block for `theme`.
    pub fn theme_background(&self, theme: CodeTheme) -> Rgba {
        self.theme(theme)
            .settings
            .background
            .map(Rgba::from)
            .unwrap_or(Rgba::opaque(255, 255, 255))
    }

    /// Default text color for `theme`.
    pub fn theme_foreground(&self, theme: CodeTheme) -> Rgba {
        self.theme(theme)
            .settings
            .foreground
            .map(Rgba::from)
            .unwrap_or(Rgba::opaque(0, 0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::snapshot::DEFAULT_SOURCE;

    fn joined(line: &TokenLine) -> String {
        line.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_javascript_grammar_is_found() {
        let hl = SyntaxHighlighter::new("js");
        assert_eq!(hl.syntax_name(), "JavaScript");
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_text() {
        let mut hl = SyntaxHighlighter::new("js");
        assert!(!hl.set_language("no-such-language"));
        assert_eq!(hl.syntax_name(), "Plain Text");
    }

    #[test]
    fn test_spans_reassemble_source_lines() {
        let hl = SyntaxHighlighter::new("js");
        let out = hl.highlight(DEFAULT_SOURCE, CodeTheme::Dark);
        let expected: Vec<&str> = DEFAULT_SOURCE.split('\n').collect();
        assert_eq!(out.lines.len(), expected.len());
        for (line, want) in out.lines.iter().zip(expected) {
            assert_eq!(joined(line), want);
        }
    }

    #[test]
    fn test_interior_carriage_returns_are_kept() {
        let hl = SyntaxHighlighter::new("js");
        for src in ["let a = 1;\rlet b = 2;", "var s = \"x\r\";"] {
            let out = hl.highlight(src, CodeTheme::Dark);
            assert_eq!(out.lines.len(), 1);
            assert_eq!(joined(&out.lines[0]), src);
        }

        let out = hl.highlight("let a;\r\nlet b;", CodeTheme::Dark);
        assert_eq!(out.lines.iter().map(joined).collect::<Vec<_>>(), vec!["let a;", "let b;"]);
    }

    #[test]
    fn test_keywords_are_colored_differently_from_plain_text() {
        let hl = SyntaxHighlighter::new("js");
        let out = hl.highlight("export default 42;", CodeTheme::Dark);
        let colors: std::collections::HashSet<Rgba> = out.lines[0].iter().map(|s| s.color).collect();
        assert!(colors.len() > 1, "expected more than one token color, got {:?}", out.lines[0]);
    }

    #[test]
    fn test_theme_changes_styling_only() {
        let hl = SyntaxHighlighter::new("js");
        let dark = hl.highlight(DEFAULT_SOURCE, CodeTheme::Dark);
        let light = hl.highlight(DEFAULT_SOURCE, CodeTheme::Light);
        assert_ne!(dark.background, light.background);
        assert_ne!(dark.lines, light.lines);
        let text = |h: &Highlighted| h.lines.iter().map(joined).collect::<Vec<_>>();
        assert_eq!(text(&dark), text(&light));
    }

    #[test]
    fn test_empty_and_trailing_newline() {
        let hl = SyntaxHighlighter::new("js");
        assert_eq!(hl.highlight("", CodeTheme::Coy).lines, vec![Vec::new()]);
        let out = hl.highlight("a\n", CodeTheme::Coy);
        assert_eq!(out.lines.len(), 2);
        assert!(out.lines[1].is_empty());
    }

    #[test]
    fn test_theme_colors() {
        let hl = SyntaxHighlighter::new("js");
        assert_eq!(hl.theme_background(CodeTheme::Dark), Rgba::opaque(0x1e, 0x1e, 0x1e));
        assert_eq!(hl.theme_foreground(CodeTheme::Dracula), Rgba::opaque(0xf8, 0xf8, 0xf2));
    }
}
