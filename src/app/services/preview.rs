//! Layout of the "editor card" that the preview shows and the export
//! captures.
//!
//! `compose` is pure: it turns the widget state plus tokenizer output into a
//! [`CardScene`] with every box, color and text run resolved to logical
//! pixels. Code is laid out on a monospace grid so the layout does not depend
//! on which font ends up painting it.

use crate::app::domain::color::Rgba;
use crate::app::domain::snapshot::SnapshotState;
use crate::app::services::syntax::Highlighted;

pub const CARD_PADDING: f32 = 32.0;
pub const CARD_RADIUS: f32 = 12.0;
pub const GRADIENT_START: Rgba = Rgba::opaque(0xb9, 0x93, 0xd6);
pub const GRADIENT_END: Rgba = Rgba::opaque(0x8c, 0xa6, 0xdb);

pub const TITLE_PADDING: f32 = 8.0;
pub const TITLE_RADIUS: f32 = 8.0;
pub const TITLE_FILL: Rgba = Rgba::new(0, 0, 0, 51);
pub const TITLE_FONT_SIZE: f32 = 16.0;
pub const TITLE_LINE_HEIGHT: f32 = 20.0;
pub const FILE_NAME_WIDTH: f32 = 180.0;
pub const TITLE_GAP: f32 = 16.0;

pub const DOT_SIZE: f32 = 12.0;
pub const DOT_GAP: f32 = 8.0;
pub const DOT_COLORS: [Rgba; 3] = [
    Rgba::opaque(0xff, 0x5f, 0x56),
    Rgba::opaque(0xff, 0xbd, 0x2e),
    Rgba::opaque(0x27, 0xc9, 0x3f),
];

pub const CONTENT_PADDING: f32 = 20.0;
pub const CONTENT_RADIUS: f32 = 8.0;
pub const EDITOR_RADIUS: f32 = 12.0;

/// Code block metrics, in multiples of the font size.
pub const BLOCK_PADDING_EM: f32 = 1.0;
pub const BLOCK_MARGIN_EM: f32 = 0.5;
pub const BLOCK_RADIUS_EM: f32 = 0.3;
pub const LINE_HEIGHT_EM: f32 = 1.5;
pub const ADVANCE_EM: f32 = 0.6;
pub const TAB_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RectF {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Per-corner radii, clockwise from top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corners {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl Corners {
    pub fn all(r: f32) -> Self {
        Self { top_left: r, top_right: r, bottom_right: r, bottom_left: r }
    }

    pub fn top(r: f32) -> Self {
        Self { top_left: r, top_right: r, bottom_right: 0.0, bottom_left: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub color: Rgba,
}

/// Single-line text centered in a box (the file name field).
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub rect: RectF,
    pub text: String,
    pub font_size: f32,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleBar {
    pub rect: RectF,
    pub corners: Corners,
    pub fill: Rgba,
    pub dots: Vec<Dot>,
    pub file_name: TextBox,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentArea {
    pub rect: RectF,
    pub corners: Corners,
    pub background: Rgba,
    pub font_size: f32,
}

/// A token placed on the code grid. `top` is the top of its line box.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRun {
    pub x: f32,
    pub top: f32,
    pub text: String,
    pub color: Rgba,
    pub bold: bool,
    pub italic: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub rect: RectF,
    pub radius: f32,
    pub background: Rgba,
    pub font_size: f32,
    pub line_height: f32,
    pub advance: f32,
    pub line_count: usize,
    pub runs: Vec<GlyphRun>,
}

/// The fully laid-out editor card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardScene {
    pub width: f32,
    pub height: f32,
    pub radius: f32,
    pub gradient: (Rgba, Rgba),
    pub title_bar: TitleBar,
    pub content: ContentArea,
    pub code: CodeBlock,
}

/// Lay out the card for `state`, painting tokens from `highlighted`.
pub fn compose(state: &SnapshotState, highlighted: &Highlighted) -> CardScene {
    let font_size = state.font_size().px() as f32;
    let advance = font_size * ADVANCE_EM;
    let line_height = font_size * LINE_HEIGHT_EM;
    let block_padding = font_size * BLOCK_PADDING_EM;
    let block_margin = font_size * BLOCK_MARGIN_EM;

    let line_count = highlighted.lines.len().max(1);
    let columns = highlighted
        .lines
        .iter()
        .map(|line| line_columns(line.iter().map(|s| s.text.as_str())))
        .max()
        .unwrap_or(0);

    let block_w = columns as f32 * advance + block_padding * 2.0;
    let block_h = line_count as f32 * line_height + block_padding * 2.0;
    let content_w = block_w + CONTENT_PADDING * 2.0;
    let content_h = block_h + block_margin * 2.0 + CONTENT_PADDING * 2.0;

    let title_min_w = TITLE_PADDING * 2.0 + DOT_SIZE * 3.0 + DOT_GAP * 2.0 + TITLE_GAP + FILE_NAME_WIDTH;
    let title_h = TITLE_LINE_HEIGHT + TITLE_PADDING * 2.0;
    let inner_w = content_w.max(title_min_w);

    let width = inner_w + CARD_PADDING * 2.0;
    let height = title_h + content_h + CARD_PADDING * 2.0;

    let title_rect = RectF::new(CARD_PADDING, CARD_PADDING, inner_w, title_h);
    let dot_cy = title_rect.y + title_h / 2.0;
    let dots = DOT_COLORS
        .iter()
        .enumerate()
        .map(|(i, color)| Dot {
            cx: title_rect.x + TITLE_PADDING + DOT_SIZE / 2.0 + i as f32 * (DOT_SIZE + DOT_GAP),
            cy: dot_cy,
            radius: DOT_SIZE / 2.0,
            color: *color,
        })
        .collect();
    let file_name = TextBox {
        rect: RectF::new(
            title_rect.right() - TITLE_PADDING - FILE_NAME_WIDTH,
            title_rect.y + TITLE_PADDING,
            FILE_NAME_WIDTH,
            TITLE_LINE_HEIGHT,
        ),
        text: state.file_name().to_string(),
        font_size: TITLE_FONT_SIZE,
        color: Rgba::WHITE,
    };

    let content_rect = RectF::new(CARD_PADDING, title_rect.bottom(), inner_w, content_h);
    let block_rect = RectF::new(
        content_rect.x + CONTENT_PADDING,
        content_rect.y + CONTENT_PADDING + block_margin,
        inner_w - CONTENT_PADDING * 2.0,
        block_h,
    );

    let origin_x = block_rect.x + block_padding;
    let origin_y = block_rect.y + block_padding;
    let mut runs = Vec::new();
    for (row, line) in highlighted.lines.iter().enumerate() {
        let top = origin_y + row as f32 * line_height;
        let mut col = 0;
        for span in line {
            let (text, next_col) = expand_tabs(&span.text, col);
            if !text.trim().is_empty() {
                runs.push(GlyphRun {
                    x: origin_x + col as f32 * advance,
                    top,
                    text,
                    color: span.color,
                    bold: span.bold,
                    italic: span.italic,
                });
            }
            col = next_col;
        }
    }

    CardScene {
        width,
        height,
        radius: CARD_RADIUS,
        gradient: (GRADIENT_START, GRADIENT_END),
        title_bar: TitleBar {
            rect: title_rect,
            corners: Corners::top(TITLE_RADIUS),
            fill: TITLE_FILL,
            dots,
            file_name,
        },
        content: ContentArea {
            rect: content_rect,
            corners: Corners {
                top_left: CONTENT_RADIUS,
                top_right: CONTENT_RADIUS,
                bottom_right: EDITOR_RADIUS,
                bottom_left: EDITOR_RADIUS,
            },
            background: state.background().to_rgba(),
            font_size,
        },
        code: CodeBlock {
            rect: block_rect,
            radius: font_size * BLOCK_RADIUS_EM,
            background: highlighted.background,
            font_size,
            line_height,
            advance,
            line_count,
            runs,
        },
    }
}

/// Grid columns taken by the concatenated pieces of one line.
fn line_columns<'a>(pieces: impl Iterator<Item = &'a str>) -> usize {
    pieces.fold(0, |col, piece| expand_tabs(piece, col).1)
}

/// Replace tabs with spaces up to the next tab stop, starting at `col`.
/// Returns the expanded text and the column after it.
fn expand_tabs(text: &str, mut col: usize) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == '\t' {
            let width = TAB_WIDTH - col % TAB_WIDTH;
            out.extend(std::iter::repeat_n(' ', width));
            col += width;
        } else {
            out.push(ch);
            col += 1;
        }
    }
    (out, col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::domain::color::HexColor;
    use crate::app::services::syntax::TokenSpan;

    fn span(text: &str) -> TokenSpan {
        TokenSpan { text: text.to_string(), color: Rgba::WHITE, bold: false, italic: false }
    }

    fn highlighted(lines: Vec<Vec<TokenSpan>>) -> Highlighted {
        Highlighted { lines, background: Rgba::opaque(0x1e, 0x1e, 0x1e), foreground: Rgba::WHITE }
    }

    #[test]
    fn test_content_font_size_follows_state() {
        let hl = highlighted(vec![vec![span("x")]]);
        for px in 10..=24 {
            let mut state = SnapshotState::default();
            state.set_font_size(px);
            let scene = compose(&state, &hl);
            assert_eq!(scene.content.font_size, px as f32);
            assert_eq!(scene.code.font_size, px as f32);
            assert_eq!(scene.code.line_height, px as f32 * 1.5);
        }
    }

    #[test]
    fn test_content_background_follows_state() {
        let mut state = SnapshotState::default();
        state.set_background(HexColor::new(0x12, 0x34, 0x56));
        let scene = compose(&state, &highlighted(vec![vec![]]));
        assert_eq!(scene.content.background, Rgba::opaque(0x12, 0x34, 0x56));
        assert_eq!(scene.code.background, Rgba::opaque(0x1e, 0x1e, 0x1e));
    }

    #[test]
    fn test_title_bar_layout() {
        let mut state = SnapshotState::default();
        state.set_file_name("demo");
        let scene = compose(&state, &highlighted(vec![vec![]]));
        let title = &scene.title_bar;

        assert_eq!(title.rect, RectF::new(32.0, 32.0, title.rect.w, 36.0));
        assert_eq!(title.dots.len(), 3);
        assert_eq!(title.dots[0].color, Rgba::opaque(0xff, 0x5f, 0x56));
        assert_eq!(title.dots[1].color, Rgba::opaque(0xff, 0xbd, 0x2e));
        assert_eq!(title.dots[2].color, Rgba::opaque(0x27, 0xc9, 0x3f));
        assert_eq!(title.dots[0].cx, 46.0);
        assert_eq!(title.dots[1].cx - title.dots[0].cx, 20.0);
        assert_eq!(title.dots[0].cy, 50.0);
        assert_eq!(title.file_name.text, "demo");
        assert_eq!(title.file_name.rect.right(), title.rect.right() - TITLE_PADDING);
    }

    #[test]
    fn test_empty_code_still_has_one_line_and_minimum_width() {
        let scene = compose(&SnapshotState::default(), &highlighted(vec![vec![]]));
        assert_eq!(scene.code.line_count, 1);
        assert!(scene.code.runs.is_empty());
        // Title bar minimum: 16 + 36 + 16 + 16 + 180
        assert_eq!(scene.width, 264.0 + 64.0);
        // 36 title + (24 line + 32 padding + 16 margin + 40 content padding) + 64
        assert_eq!(scene.height, 36.0 + 112.0 + 64.0);
    }

    #[test]
    fn test_long_lines_widen_the_card() {
        let line = "x".repeat(100);
        let scene = compose(&SnapshotState::default(), &highlighted(vec![vec![span(&line)]]));
        // 100 columns * 9.6 + 2 * 16 padding + 2 * 20 content padding
        let inner = 100.0 * 9.6 + 32.0 + 40.0;
        assert!((scene.width - (inner + 64.0)).abs() < 0.01);
        assert!((scene.code.rect.w - (inner - 40.0)).abs() < 0.01);
    }

    #[test]
    fn test_runs_are_placed_on_the_grid() {
        let hl = highlighted(vec![
            vec![span("let"), span(" "), span("x")],
            vec![span("\tfoo")],
        ]);
        let scene = compose(&SnapshotState::default(), &hl);
        let runs = &scene.code.runs;
        // whitespace-only spans produce no runs
        assert_eq!(runs.len(), 3);
        let origin_x = scene.code.rect.x + 16.0;
        let origin_y = scene.code.rect.y + 16.0;
        assert_eq!(runs[0].x, origin_x);
        assert_eq!(runs[0].top, origin_y);
        assert!((runs[1].x - (origin_x + 4.0 * 9.6)).abs() < 0.01);
        assert_eq!(runs[2].text, "    foo");
        assert_eq!(runs[2].top, origin_y + 24.0);
    }

    #[test]
    fn test_expand_tabs_aligns_to_stops() {
        assert_eq!(expand_tabs("a\tb", 0), ("a   b".to_string(), 5));
        assert_eq!(expand_tabs("\t", 2), ("  ".to_string(), 4));
        assert_eq!(line_columns(["ab", "\t", "c"].into_iter()), 5);
    }

    #[test]
    fn test_rect_edges() {
        let r = RectF::new(10.0, 10.0, 5.0, 6.0);
        assert_eq!(r.right(), 15.0);
        assert_eq!(r.bottom(), 16.0);
    }
}
