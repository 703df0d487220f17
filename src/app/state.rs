use std::sync::Arc;

use fltk::{
    app::Sender,
    dialog,
    enums::Color,
    prelude::*,
};

use super::controllers::control_panel::ControlEvent;
use super::controllers::widget::CodeImageWidget;
use super::domain::color::HexColor;
use super::infrastructure::download::DownloadSink;
use super::messages::Message;
use crate::ui::buffer::buffer_text_no_leak;
use crate::ui::main_window::MainWidgets;
use crate::ui::style_map::StyleMap;
use crate::ui::theme::{apply_code_theme, to_fltk};
#[cfg(target_os = "windows")]
use crate::ui::theme::set_windows_titlebar_theme;

/// Glue between the FLTK widgets and the [`CodeImageWidget`].
///
/// Runs on the UI thread. Controls send [`Message`]s; `handle` feeds them
/// to the widget and pushes the re-rendered preview back into the editor.
pub struct AppState {
    pub widget: CodeImageWidget,
    pub ui: MainWidgets,
    pub sender: Sender<Message>,
    sink: Arc<dyn DownloadSink>,
    style_map: StyleMap,
    exports_running: usize,
}

impl AppState {
    pub fn new(widget: CodeImageWidget, ui: MainWidgets, sender: Sender<Message>, sink: Arc<dyn DownloadSink>) -> Self {
        let foreground = widget.tokens().map(|t| t.foreground).unwrap_or(crate::app::Rgba::WHITE);
        let font_size = widget.state().font_size().px() as i32;
        let mut state = Self {
            widget,
            ui,
            sender,
            sink,
            style_map: StyleMap::new(foreground, font_size),
            exports_running: 0,
        };
        state.sync_controls();
        state.refresh_preview();
        state
    }

    pub fn show(&mut self) {
        self.ui.wind.show();
        #[cfg(target_os = "windows")]
        set_windows_titlebar_theme(&self.ui.wind, true);
    }

    pub fn handle(&mut self, msg: Message) {
        match msg {
            Message::SourceBufferModified => {
                let text = buffer_text_no_leak(&self.ui.source_buffer);
                self.control(ControlEvent::SourceEdited(text));
            }
            Message::PickBackground => self.pick_background(),
            Message::Control(event) => self.control(event),
            Message::ExportFinished(result) => self.export_finished(result),
        }
    }

    fn control(&mut self, event: ControlEvent) {
        let restyle = !matches!(event, ControlEvent::FileNameEdited(_) | ControlEvent::ExportClicked);
        if let Some(job) = self.widget.dispatch(event, &self.sink) {
            self.exports_running += 1;
            self.set_status(&format!("Exporting {}...", job.suggested_name()));
            let sender = self.sender.clone();
            std::thread::spawn(move || {
                let result = job.join().map(|receipt| receipt.path).map_err(|e| e.to_string());
                sender.send(Message::ExportFinished(result));
            });
        }
        if restyle {
            self.refresh_preview();
        }
    }

    fn pick_background(&mut self) {
        let current = self.widget.state().background();
        let (r, g, b) = dialog::color_chooser_with_default(
            "Background Color",
            dialog::ColorMode::Byte,
            (current.r, current.g, current.b),
        );
        let picked = HexColor::new(r, g, b);
        if picked != current {
            self.control(ControlEvent::BackgroundPicked(picked));
        }
    }

    fn export_finished(&mut self, result: std::result::Result<std::path::PathBuf, String>) {
        self.exports_running = self.exports_running.saturating_sub(1);
        match result {
            Ok(path) => self.set_status(&format!("Saved {}", path.display())),
            Err(e) => {
                self.set_status("Export failed");
                dialog::alert_default(&format!("Failed to export image: {}", e));
            }
        }
    }

    /// Make the controls show the widget's current state.
    fn sync_controls(&mut self) {
        let state = self.widget.state();
        self.ui.file_name_input.set_value(state.file_name());
        self.ui.theme_choice.set_value(state.theme().index() as i32);
        self.ui.font_size_spinner.set_value(state.font_size().px() as f64);
    }

    /// Push the widget's latest render into the editor: colors, size and
    /// the per-byte style buffer.
    fn refresh_preview(&mut self) {
        let Some(tokens) = self.widget.tokens() else {
            return;
        };
        let state = self.widget.state();
        let font_size = state.font_size().px() as i32;
        let background = state.background();

        self.style_map.reset(tokens.foreground, font_size);
        let text = buffer_text_no_leak(&self.ui.source_buffer);
        // The buffer can run ahead of the widget while edits are queued;
        // the next SourceBufferModified restyles it.
        if text == state.source_text() {
            let styles = self.style_map.style_text(&text, tokens);
            self.ui.style_buffer.set_text(&styles);
        }
        self.ui
            .code_editor
            .set_highlight_data(self.ui.style_buffer.clone(), self.style_map.entries().to_vec());

        apply_code_theme(&mut self.ui, tokens, background, font_size);
        self.ui.background_button.set_color(to_fltk(background.to_rgba()));
        self.ui.background_button.redraw();
        if self.ui.background_input.value().parse::<HexColor>() != Ok(background) {
            self.ui.background_input.set_value(&background.to_string());
            self.ui.background_input.set_text_color(Color::Foreground);
        }
    }

    fn set_status(&mut self, text: &str) {
        let label = if self.exports_running > 0 && !text.starts_with("Exporting") {
            format!("{} ({} export(s) still running)", text, self.exports_running)
        } else {
            text.to_string()
        };
        self.ui.status_frame.set_label(&label);
        self.ui.wind.redraw();
    }
}
