//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Widget state, themes, colors, settings
//! - `controllers/` - The widget itself, control events, export jobs
//! - `services/` - Tokenizing, card layout, rasterizing
//! - `infrastructure/` - Fonts, download sinks, errors
//! - `state.rs`, `messages.rs` - FLTK front-end coordinator (`gui` feature)

pub mod controllers;
pub mod domain;
pub mod infrastructure;
#[cfg(feature = "gui")]
pub mod messages;
pub mod services;
#[cfg(feature = "gui")]
pub mod state;

// Re-exports for convenient external access
pub use controllers::control_panel::{ControlEvent, ThemeOption, theme_options};
pub use controllers::export::{ExportJob, ExportReceipt};
pub use controllers::widget::CodeImageWidget;
pub use domain::{AppSettings, CodeTheme, FontSize, HexColor, Rgba, SnapshotState};
pub use infrastructure::download::{DirectorySink, DownloadSink};
pub use infrastructure::error::{AppError, Result};
pub use services::preview::CardScene;
