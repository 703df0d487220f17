use std::collections::HashMap;

use fltk::enums::{Color, Font};
use fltk::text::StyleTableEntry;

use crate::app::domain::color::Rgba;
use crate::app::services::syntax::Highlighted;

type StyleKey = (u8, u8, u8, bool, bool);

/// Maps token colors to FLTK style characters for the code editor's
/// highlight buffer. 'A' is always the theme's plain foreground.
pub struct StyleMap {
    key_to_char: HashMap<StyleKey, char>,
    entries: Vec<StyleTableEntry>,
    font_size: i32,
}

impl StyleMap {
    pub fn new(foreground: Rgba, font_size: i32) -> Self {
        let mut map = Self {
            key_to_char: HashMap::new(),
            entries: Vec::new(),
            font_size,
        };
        map.reset(foreground, font_size);
        map
    }

    /// Forget every mapping and start over with a new foreground and size.
    pub fn reset(&mut self, foreground: Rgba, font_size: i32) {
        self.key_to_char.clear();
        self.entries.clear();
        self.font_size = font_size;
        self.get_or_insert(foreground, false, false);
    }

    pub fn get_or_insert(&mut self, color: Rgba, bold: bool, italic: bool) -> char {
        let key = (color.r, color.g, color.b, bold, italic);
        if let Some(&ch) = self.key_to_char.get(&key) {
            return ch;
        }

        let idx = self.entries.len();
        // FLTK style chars run 'A'..'Z'; no palette comes close to that
        if idx >= 26 {
            return (b'A' + 25) as char;
        }
        let ch = (b'A' + idx as u8) as char;
        self.entries.push(StyleTableEntry {
            color: Color::from_rgb(color.r, color.g, color.b),
            font: mono_font(bold, italic),
            size: self.font_size,
        });
        self.key_to_char.insert(key, ch);
        ch
    }

    pub fn entries(&self) -> &[StyleTableEntry] {
        &self.entries
    }

    /// Build the style buffer text for `text`: one style char per byte.
    ///
    /// Token lines do not carry line terminators, so whatever a line holds
    /// beyond its spans (the '\n', a stray '\r') gets the default style.
    pub fn style_text(&mut self, text: &str, highlighted: &Highlighted) -> String {
        let mut out = String::with_capacity(text.len());
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                out.push('A');
            }
            let mut styled = 0;
            if let Some(spans) = highlighted.lines.get(i) {
                for span in spans {
                    let len = span.text.len().min(line.len() - styled);
                    let ch = self.get_or_insert(span.color, span.bold, span.italic);
                    out.extend(std::iter::repeat_n(ch, len));
                    styled += len;
                }
            }
            out.extend(std::iter::repeat_n('A', line.len() - styled));
        }
        out
    }
}

fn mono_font(bold: bool, italic: bool) -> Font {
    match (bold, italic) {
        (true, true) => Font::CourierBoldItalic,
        (true, false) => Font::CourierBold,
        (false, true) => Font::CourierItalic,
        (false, false) => Font::Courier,
    }
}
