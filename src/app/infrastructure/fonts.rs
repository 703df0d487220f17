//! System font discovery and glyph outlining.
//!
//! Faces are looked up with fontdb and read with ttf-parser; glyph outlines
//! are turned straight into tiny-skia paths so the rasterizer can fill them
//! with token colors.

use std::sync::OnceLock;

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use tiny_skia::{Path, PathBuilder};

/// System font database, loaded once per process.
fn system_database() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        log::debug!("Loaded {} system font faces", db.len());
        db
    })
}

/// An owned font file plus the face index inside it.
pub struct FontFace {
    data: Vec<u8>,
    index: u32,
    family: String,
}

impl FontFace {
    /// Wrap raw font data. Returns `None` when ttf-parser rejects it.
    pub fn from_data(data: Vec<u8>, index: u32, family: impl Into<String>) -> Option<Self> {
        ttf_parser::Face::parse(&data, index).ok()?;
        Some(Self { data, index, family: family.into() })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    fn with_face<T>(&self, f: impl FnOnce(&ttf_parser::Face<'_>) -> T) -> Option<T> {
        let face = ttf_parser::Face::parse(&self.data, self.index).ok()?;
        Some(f(&face))
    }

    /// Ascent and descent (negative) at `size` pixels.
    pub fn vertical_metrics(&self, size: f32) -> (f32, f32) {
        self.with_face(|face| {
            let scale = size / f32::from(face.units_per_em());
            (f32::from(face.ascender()) * scale, f32::from(face.descender()) * scale)
        })
        .unwrap_or((size * 0.8, -size * 0.2))
    }

    /// Baseline that vertically centers the face's ascent/descent in a line box.
    pub fn baseline_in(&self, top: f32, line_height: f32, size: f32) -> f32 {
        let (ascent, descent) = self.vertical_metrics(size);
        top + (line_height - (ascent - descent)) / 2.0 + ascent
    }

    /// Width of `text` using the face's own advances.
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        self.with_face(|face| text.chars().map(|ch| advance(face, ch, size)).sum())
            .unwrap_or(0.0)
    }

    /// Byte length of the longest prefix of `text` no wider than `max_width`.
    pub fn fitting_prefix_len(&self, text: &str, size: f32, max_width: f32) -> usize {
        self.with_face(|face| {
            let mut width = 0.0;
            for (idx, ch) in text.char_indices() {
                width += advance(face, ch, size);
                if width > max_width {
                    return idx;
                }
            }
            text.len()
        })
        .unwrap_or(0)
    }

    /// Outline `text` starting at (`x`, `baseline`).
    ///
    /// With `cell_advance` set every character occupies one grid cell of that
    /// width; otherwise the face's proportional advances are used. Returns
    /// `None` when nothing in the run has a visible outline.
    pub fn outline(&self, text: &str, size: f32, x: f32, baseline: f32, cell_advance: Option<f32>) -> Option<Path> {
        self.with_face(|face| {
            let scale = size / f32::from(face.units_per_em());
            let mut sink = OutlineSink { pb: PathBuilder::new(), scale, x, y: baseline };
            for ch in text.chars() {
                if let Some(gid) = face.glyph_index(ch) {
                    face.outline_glyph(gid, &mut sink);
                }
                sink.x += cell_advance.unwrap_or_else(|| advance(face, ch, size));
            }
            sink.pb.finish()
        })
        .flatten()
    }
}

/// Horizontal advance of `ch` at `size` pixels; half an em when the face
/// has no glyph for it.
fn advance(face: &ttf_parser::Face<'_>, ch: char, size: f32) -> f32 {
    let scale = size / f32::from(face.units_per_em());
    face.glyph_index(ch)
        .and_then(|gid| face.glyph_hor_advance(gid))
        .map(|adv| f32::from(adv) * scale)
        .unwrap_or(size * 0.5)
}

/// Forwards ttf-parser outline commands into a tiny-skia path, flipping the
/// y axis (font units grow upwards, pixels downwards).
struct OutlineSink {
    pb: PathBuilder,
    scale: f32,
    x: f32,
    y: f32,
}

impl OutlineSink {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (self.x + x * self.scale, self.y - y * self.scale)
    }
}

impl ttf_parser::OutlineBuilder for OutlineSink {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.pb.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.pb.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.pb.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.pb.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.pb.close();
    }
}

/// Faces used when painting a card: one for code, one for the title bar.
#[derive(Default)]
pub struct FontBook {
    mono: Option<FontFace>,
    ui: Option<FontFace>,
}

impl FontBook {
    /// A book with no faces; text is skipped when painting.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(mono: Option<FontFace>, ui: Option<FontFace>) -> Self {
        Self { mono, ui }
    }

    /// Resolve faces from the system font database. Preferred family names
    /// are tried first, then the generic monospace / sans-serif families.
    pub fn system(mono_family: Option<&str>, ui_family: Option<&str>) -> Self {
        let db = system_database();
        let mono = load_face(db, mono_family, Family::Monospace);
        let ui = load_face(db, ui_family, Family::SansSerif);

        match &mono {
            Some(face) => log::debug!("Code font: {}", face.family()),
            None => log::warn!("No monospace font found; exported code text will be omitted"),
        }
        Self::new(mono, ui)
    }

    pub fn mono(&self) -> Option<&FontFace> {
        self.mono.as_ref()
    }

    /// Title bar face, falling back to the code face.
    pub fn ui(&self) -> Option<&FontFace> {
        self.ui.as_ref().or(self.mono.as_ref())
    }
}

fn load_face(db: &Database, preferred: Option<&str>, generic: Family<'_>) -> Option<FontFace> {
    let mut families = Vec::with_capacity(2);
    if let Some(name) = preferred {
        families.push(Family::Name(name));
    }
    families.push(generic);

    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db.query(&query)?;
    let family = db
        .face(id)
        .and_then(|info| info.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_default();
    let (data, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
    FontFace::from_data(data, index, family)
}

/// DejaVu Sans Mono, checked in so glyph painting is tested on machines
/// without system fonts.
#[cfg(test)]
pub(crate) fn fixture_face() -> FontFace {
    let data = include_bytes!("../../../tests/fixtures/DejaVuSansMono.ttf");
    FontFace::from_data(data.to_vec(), 0, "DejaVu Sans Mono").unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_book_has_no_faces() {
        let book = FontBook::empty();
        assert!(book.mono().is_none());
        assert!(book.ui().is_none());
    }

    #[test]
    fn test_ui_face_falls_back_to_mono() {
        let book = FontBook::new(Some(fixture_face()), None);
        assert_eq!(book.ui().map(FontFace::family), Some("DejaVu Sans Mono"));
    }

    #[test]
    fn test_from_data_rejects_garbage() {
        assert!(FontFace::from_data(b"definitely not a font".to_vec(), 0, "junk").is_none());
    }

    #[test]
    fn test_outline_and_metrics() {
        let face = fixture_face();
        assert!(face.outline("Hi", 16.0, 0.0, 16.0, Some(9.6)).is_some());
        assert!(face.outline(" ", 16.0, 0.0, 16.0, Some(9.6)).is_none());

        let one = face.measure("a", 16.0);
        assert!(one > 9.0 && one < 10.5, "monospace advance was {}", one);
        assert!((face.measure("abc", 16.0) - 3.0 * one).abs() < 0.01);

        let baseline = face.baseline_in(0.0, 24.0, 16.0);
        assert!(baseline > 0.0 && baseline < 24.0);
    }

    #[test]
    fn test_fitting_prefix_len() {
        let face = fixture_face();
        let one = face.measure("a", 16.0);
        assert_eq!(face.fitting_prefix_len("abcdef", 16.0, 3.0 * one + 0.1), 3);
        assert_eq!(face.fitting_prefix_len("abcdef", 16.0, 1000.0), 6);
        assert_eq!(face.fitting_prefix_len("abcdef", 16.0, 0.0), 0);
        // never splits a multi-byte character
        assert_eq!(face.fitting_prefix_len("ééé", 16.0, 2.0 * one + 0.1), 4);
    }
}
