use std::sync::Arc;

use fltk::app;

use codeshot::app::messages::Message;
use codeshot::app::state::AppState;
use codeshot::app::{AppSettings, CodeImageWidget, DirectorySink, DownloadSink};
use codeshot::ui::main_window::build_main_window;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = AppSettings::load();
    let app = app::App::default();
    let (sender, receiver) = app::channel::<Message>();

    let widget = CodeImageWidget::new(&settings);
    let ui = build_main_window(widget.state().source_text(), &sender);

    let sink = DirectorySink::or_default(settings.export_dir.as_deref());
    log::info!("Exports go to {}", sink.dir().display());
    let sink: Arc<dyn DownloadSink> = Arc::new(sink);

    let mut state = AppState::new(widget, ui, sender, sink);
    state.show();

    while app.wait() {
        if let Some(msg) = receiver.recv() {
            state.handle(msg);
        }
    }
}
