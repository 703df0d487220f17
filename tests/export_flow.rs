use std::sync::Arc;

use codeshot::app::domain::snapshot::DEFAULT_SOURCE;
use codeshot::app::infrastructure::fonts::FontBook;
use codeshot::app::services::raster::Rasterizer;
use codeshot::app::services::syntax::SyntaxHighlighter;
use codeshot::app::{CodeImageWidget, CodeTheme, DirectorySink, DownloadSink, HexColor, SnapshotState};

fn widget() -> CodeImageWidget {
    let mut w = CodeImageWidget::with_state(
        SnapshotState::default(),
        SyntaxHighlighter::new("js"),
        Rasterizer::new(Arc::new(FontBook::empty()), 1.0),
    );
    w.mount();
    w
}

fn content_pixel(w: &CodeImageWidget, png: &[u8]) -> [u8; 4] {
    let scene = w.surface().unwrap();
    let x = (scene.content.rect.x + 5.0) as u32;
    let y = (scene.content.rect.y + scene.content.rect.h / 2.0) as u32;
    let img = image::load_from_memory_with_format(png, image::ImageFormat::Png).unwrap().to_rgba8();
    img.get_pixel(x, y).0
}

#[test]
fn test_default_widget_exports_untitled_png() {
    let dir = tempfile::tempdir().unwrap();
    let sink: Arc<dyn DownloadSink> = Arc::new(DirectorySink::new(dir.path()));
    let w = widget();

    assert_eq!(w.state().source_text(), DEFAULT_SOURCE);
    assert_eq!(w.state().theme(), CodeTheme::Dark);

    let receipt = w.export(sink).unwrap().join().unwrap();
    assert_eq!(receipt.path, dir.path().join("Untitled-1.png"));

    let bytes = std::fs::read(&receipt.path).unwrap();
    assert_eq!(content_pixel(&w, &bytes), [0x28, 0x2c, 0x34, 255]);
}

#[test]
fn test_rapid_exports_capture_state_at_trigger_time() {
    let dir = tempfile::tempdir().unwrap();
    let sink: Arc<dyn DownloadSink> = Arc::new(DirectorySink::new(dir.path()));
    let mut w = widget();

    w.set_file_name("first");
    w.set_background(HexColor::new(255, 0, 0));
    let first = w.export(Arc::clone(&sink)).unwrap();

    w.set_file_name("second");
    w.set_background(HexColor::new(0, 0, 255));
    let second = w.export(Arc::clone(&sink)).unwrap();

    // Edits after the trigger must not reach either export
    w.set_background(HexColor::new(0, 255, 0));

    let first = first.join().unwrap();
    let second = second.join().unwrap();
    assert_eq!(first.path, dir.path().join("first.png"));
    assert_eq!(second.path, dir.path().join("second.png"));

    let first_png = std::fs::read(&first.path).unwrap();
    let second_png = std::fs::read(&second.path).unwrap();
    assert_eq!(content_pixel(&w, &first_png), [255, 0, 0, 255]);
    assert_eq!(content_pixel(&w, &second_png), [0, 0, 255, 255]);
}

#[test]
fn test_export_into_missing_directory_creates_it() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let sink: Arc<dyn DownloadSink> = Arc::new(DirectorySink::new(&nested));
    let mut w = widget();
    w.set_file_name("nested");

    let receipt = w.export(sink).unwrap().join().unwrap();
    assert!(receipt.path.starts_with(&nested));
    assert!(receipt.path.exists());
}

#[test]
fn test_export_into_unwritable_target_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where the directory should be
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"x").unwrap();
    let sink: Arc<dyn DownloadSink> = Arc::new(DirectorySink::new(&blocker));

    let w = widget();
    assert!(w.export(sink).unwrap().join().is_err());
}
