use std::sync::Arc;

use super::control_panel::{ControlEvent, font_size_from_control};
use super::export::ExportJob;
use crate::app::domain::color::HexColor;
use crate::app::domain::settings::AppSettings;
use crate::app::domain::snapshot::{FontSize, SnapshotState};
use crate::app::domain::theme::CodeTheme;
use crate::app::infrastructure::download::DownloadSink;
use crate::app::infrastructure::fonts::FontBook;
use crate::app::services::preview::{self, CardScene};
use crate::app::services::raster::Rasterizer;
use crate::app::services::syntax::{Highlighted, SyntaxHighlighter};

/// The code-image widget: state store, preview renderer and export trigger.
///
/// Every setter re-renders the preview before returning. The rendered
/// [`CardScene`] is the surface that exports capture.
pub struct CodeImageWidget {
    state: SnapshotState,
    highlighter: SyntaxHighlighter,
    rasterizer: Arc<Rasterizer>,
    tokens: Option<Highlighted>,
    surface: Option<CardScene>,
    render_generation: u64,
}

impl CodeImageWidget {
    /// Mounted widget with default state, configured from `settings`.
    pub fn new(settings: &AppSettings) -> Self {
        let fonts = FontBook::system(settings.mono_family.as_deref(), settings.ui_family.as_deref());
        let highlighter = SyntaxHighlighter::new(&settings.language);
        log::debug!("Code grammar: {}", highlighter.syntax_name());
        let mut widget = Self::with_state(
            SnapshotState::default(),
            highlighter,
            Rasterizer::new(Arc::new(fonts), settings.pixel_ratio),
        );
        widget.mount();
        widget
    }

    /// Unmounted widget around an existing state; call [`mount`](Self::mount)
    /// to render it.
    pub fn with_state(state: SnapshotState, highlighter: SyntaxHighlighter, rasterizer: Rasterizer) -> Self {
        Self {
            state,
            highlighter,
            rasterizer: Arc::new(rasterizer),
            tokens: None,
            surface: None,
            render_generation: 0,
        }
    }

    pub fn mount(&mut self) {
        if self.surface.is_none() {
            self.rerender();
        }
    }

    /// Drop the rendered surface. Exports become no-ops until remounted.
    pub fn unmount(&mut self) {
        self.surface = None;
        self.tokens = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    pub fn state(&self) -> &SnapshotState {
        &self.state
    }

    /// The rendered card, if mounted.
    pub fn surface(&self) -> Option<&CardScene> {
        self.surface.as_ref()
    }

    /// Token lines behind the current surface.
    pub fn tokens(&self) -> Option<&Highlighted> {
        self.tokens.as_ref()
    }

    /// Number of renders performed so far.
    pub fn render_generation(&self) -> u64 {
        self.render_generation
    }

    pub fn set_source_text(&mut self, text: impl Into<String>) {
        self.state.set_source_text(text);
        self.rerender_if_mounted();
    }

    pub fn set_theme(&mut self, theme: CodeTheme) {
        self.state.set_theme(theme);
        self.rerender_if_mounted();
    }

    pub fn set_font_size(&mut self, size: impl Into<FontSize>) {
        self.state.set_font_size(size);
        self.rerender_if_mounted();
    }

    pub fn set_background(&mut self, color: HexColor) {
        self.state.set_background(color);
        self.rerender_if_mounted();
    }

    pub fn set_file_name(&mut self, name: impl Into<String>) {
        self.state.set_file_name(name);
        self.rerender_if_mounted();
    }

    /// Apply one control interaction. Returns the export job when the
    /// event was an export click on a mounted widget.
    pub fn dispatch(&mut self, event: ControlEvent, sink: &Arc<dyn DownloadSink>) -> Option<ExportJob> {
        match event {
            ControlEvent::SourceEdited(text) => self.set_source_text(text),
            ControlEvent::FileNameEdited(name) => self.set_file_name(name),
            ControlEvent::ThemeSelected(theme) => self.set_theme(theme),
            ControlEvent::FontSizeChanged(value) => self.set_font_size(font_size_from_control(value)),
            ControlEvent::BackgroundPicked(color) => self.set_background(color),
            ControlEvent::ExportClicked => return self.export(Arc::clone(sink)),
        }
        None
    }

    /// Capture the current surface and export it as `<file name>.png` in
    /// the background. Returns `None` when nothing has been rendered yet.
    pub fn export(&self, sink: Arc<dyn DownloadSink>) -> Option<ExportJob> {
        let Some(scene) = self.surface.clone() else {
            log::debug!("Export requested before the widget was rendered; ignoring");
            return None;
        };
        let name = self.state.export_file_name();
        log::debug!("Starting export of {}", name);
        Some(ExportJob::spawn(scene, name, Arc::clone(&self.rasterizer), sink))
    }

    fn rerender_if_mounted(&mut self) {
        if self.is_mounted() {
            self.rerender();
        }
    }

    fn rerender(&mut self) {
        let tokens = self.highlighter.highlight(self.state.source_text(), self.state.theme());
        self.surface = Some(preview::compose(&self.state, &tokens));
        self.tokens = Some(tokens);
        self.render_generation += 1;
        log::debug!("Rendered preview #{}", self.render_generation);
    }
}
