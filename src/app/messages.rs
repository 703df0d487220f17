use std::path::PathBuf;

use super::controllers::control_panel::ControlEvent;

/// All messages that can be sent through the FLTK channel.
/// Widget callbacks send one of these; the dispatch loop in main handles them.
#[derive(Debug, Clone)]
pub enum Message {
    /// A control changed; forwarded to the widget as-is
    Control(ControlEvent),
    /// The code editor buffer was edited
    SourceBufferModified,
    /// Background button clicked; opens the color chooser
    PickBackground,
    /// A background export finished: saved path or error text
    ExportFinished(Result<PathBuf, String>),
}
