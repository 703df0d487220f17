//! Rasterization of a [`CardScene`] using tiny-skia.
//!
//! The scene is painted into a premultiplied pixmap at the configured pixel
//! ratio, converted to a straight-alpha `RgbaImage`, then encoded as PNG.

use std::io;
use std::sync::Arc;

use image::RgbaImage;
use tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, Paint, Path, PathBuilder, Pixmap, Point,
    Shader, SpreadMode, Stroke, Transform,
};

use super::preview::{CardScene, Corners, GlyphRun, RectF, TextBox};
use crate::app::domain::color::Rgba;
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::infrastructure::fonts::{FontBook, FontFace};

/// Control point distance for quarter circles drawn as cubic beziers
const BEZIER_K: f32 = 0.552_284_8;

/// Horizontal shear used to fake italics
const ITALIC_SKEW: f32 = 0.2;

pub struct Rasterizer {
    fonts: Arc<FontBook>,
    pixel_ratio: f32,
}

impl Rasterizer {
    pub fn new(fonts: Arc<FontBook>, pixel_ratio: f32) -> Self {
        Self { fonts, pixel_ratio }
    }

    /// Pixel size of the image `scene` rasterizes to.
    pub fn output_size(&self, scene: &CardScene) -> (u32, u32) {
        (
            (scene.width * self.pixel_ratio).ceil().max(0.0) as u32,
            (scene.height * self.pixel_ratio).ceil().max(0.0) as u32,
        )
    }

    /// Paint the card into a straight-alpha RGBA image.
    pub fn render(&self, scene: &CardScene) -> Result<RgbaImage> {
        let (w, h) = self.output_size(scene);
        let mut pixmap = Pixmap::new(w, h)
            .ok_or_else(|| AppError::Render(format!("cannot allocate a {}x{} image", w, h)))?;
        let ts = Transform::from_scale(self.pixel_ratio, self.pixel_ratio);

        self.paint_frame(&mut pixmap, scene, ts);
        self.paint_title_bar(&mut pixmap, scene, ts);

        fill_rounded(&mut pixmap, scene.content.rect, scene.content.corners, scene.content.background, ts);
        fill_rounded(&mut pixmap, scene.code.rect, Corners::all(scene.code.radius), scene.code.background, ts);

        match self.fonts.mono() {
            Some(face) => {
                for run in &scene.code.runs {
                    paint_run(&mut pixmap, face, run, scene, ts);
                }
            }
            None if !scene.code.runs.is_empty() => {
                log::warn!("No code font available; {} token runs not drawn", scene.code.runs.len());
            }
            None => {}
        }

        to_rgba_image(&pixmap)
    }

    /// Paint the card and encode it as PNG.
    pub fn render_png(&self, scene: &CardScene) -> Result<Vec<u8>> {
        let image = self.render(scene)?;
        encode_png(&image)
    }

    fn paint_frame(&self, pixmap: &mut Pixmap, scene: &CardScene, ts: Transform) {
        let rect = RectF::new(0.0, 0.0, scene.width, scene.height);
        let Some(path) = rounded_rect(rect, Corners::all(scene.radius)) else {
            return;
        };
        let (start, end) = scene.gradient;
        let mut paint = Paint::default();
        paint.anti_alias = true;
        // 135deg: top-left towards bottom-right
        paint.shader = LinearGradient::new(
            Point::from_xy(0.0, 0.0),
            Point::from_xy(scene.width, scene.height),
            vec![GradientStop::new(0.0, color(start)), GradientStop::new(1.0, color(end))],
            SpreadMode::Pad,
            Transform::identity(),
        )
        .unwrap_or(Shader::SolidColor(color(start)));
        pixmap.fill_path(&path, &paint, FillRule::Winding, ts, None);
    }

    fn paint_title_bar(&self, pixmap: &mut Pixmap, scene: &CardScene, ts: Transform) {
        let title = &scene.title_bar;
        fill_rounded(pixmap, title.rect, title.corners, title.fill, ts);

        for dot in &title.dots {
            if let Some(path) = PathBuilder::from_circle(dot.cx, dot.cy, dot.radius) {
                pixmap.fill_path(&path, &solid(dot.color), FillRule::Winding, ts, None);
            }
        }

        if let Some(face) = self.fonts.ui() {
            paint_text_box(pixmap, face, &title.file_name, ts);
        }
    }
}

fn paint_run(pixmap: &mut Pixmap, face: &FontFace, run: &GlyphRun, scene: &CardScene, ts: Transform) {
    let size = scene.code.font_size;
    let baseline = face.baseline_in(run.top, scene.code.line_height, size);
    let Some(path) = face.outline(&run.text, size, run.x, baseline, Some(scene.code.advance)) else {
        return;
    };

    let ts = if run.italic {
        ts.pre_concat(Transform::from_row(1.0, 0.0, -ITALIC_SKEW, 1.0, ITALIC_SKEW * baseline, 0.0))
    } else {
        ts
    };

    let paint = solid(run.color);
    pixmap.fill_path(&path, &paint, FillRule::Winding, ts, None);
    if run.bold {
        let stroke = Stroke { width: size / 24.0, ..Stroke::default() };
        pixmap.stroke_path(&path, &paint, &stroke, ts, None);
    }
}

/// Center the text in its box; text wider than the box is cut at the right.
fn paint_text_box(pixmap: &mut Pixmap, face: &FontFace, text_box: &TextBox, ts: Transform) {
    let size = text_box.font_size;
    let text = fit_prefix(face, &text_box.text, size, text_box.rect.w);
    if text.is_empty() {
        return;
    }
    let width = face.measure(text, size);
    let x = text_box.rect.x + (text_box.rect.w - width).max(0.0) / 2.0;
    let baseline = face.baseline_in(text_box.rect.y, text_box.rect.h, size);
    if let Some(path) = face.outline(text, size, x, baseline, None) {
        pixmap.fill_path(&path, &solid(text_box.color), FillRule::Winding, ts, None);
    }
}

/// Longest prefix of `text` that fits in `max_width`.
fn fit_prefix<'a>(face: &FontFace, text: &'a str, size: f32, max_width: f32) -> &'a str {
    &text[..face.fitting_prefix_len(text, size, max_width)]
}

fn fill_rounded(pixmap: &mut Pixmap, rect: RectF, corners: Corners, fill: Rgba, ts: Transform) {
    if let Some(path) = rounded_rect(rect, corners) {
        pixmap.fill_path(&path, &solid(fill), FillRule::Winding, ts, None);
    }
}

/// Build a rectangle path with independently rounded corners.
pub(crate) fn rounded_rect(rect: RectF, corners: Corners) -> Option<Path> {
    if rect.w <= 0.0 || rect.h <= 0.0 {
        return None;
    }
    let max = rect.w.min(rect.h) / 2.0;
    let tl = corners.top_left.clamp(0.0, max);
    let tr = corners.top_right.clamp(0.0, max);
    let br = corners.bottom_right.clamp(0.0, max);
    let bl = corners.bottom_left.clamp(0.0, max);
    let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());
    let k = BEZIER_K;

    let mut pb = PathBuilder::new();
    pb.move_to(left + tl, top);
    pb.line_to(right - tr, top);
    if tr > 0.0 {
        pb.cubic_to(right - tr + tr * k, top, right, top + tr - tr * k, right, top + tr);
    }
    pb.line_to(right, bottom - br);
    if br > 0.0 {
        pb.cubic_to(right, bottom - br + br * k, right - br + br * k, bottom, right - br, bottom);
    }
    pb.line_to(left + bl, bottom);
    if bl > 0.0 {
        pb.cubic_to(left + bl - bl * k, bottom, left, bottom - bl + bl * k, left, bottom - bl);
    }
    pb.line_to(left, top + tl);
    if tl > 0.0 {
        pb.cubic_to(left, top + tl - tl * k, left + tl - tl * k, top, left + tl, top);
    }
    pb.close();
    pb.finish()
}

fn color(c: Rgba) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn solid(c: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(c.r, c.g, c.b, c.a);
    paint.anti_alias = true;
    paint
}

fn to_rgba_image(pixmap: &Pixmap) -> Result<RgbaImage> {
    let mut raw = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        raw.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), raw)
        .ok_or_else(|| AppError::Render("pixel buffer size mismatch".to_string()))
}

/// Encode an RGBA image as an 8-bit RGBA PNG.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_png(&mut buffer, image)?;
    Ok(buffer)
}

fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> std::result::Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}
