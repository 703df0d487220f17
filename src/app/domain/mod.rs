//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - The widget state store and its defaults
//! - The fixed theme set
//! - Colors
//! - Rendering settings

pub mod color;
pub mod settings;
pub mod snapshot;
pub mod theme;

pub use color::{HexColor, Rgba};
pub use settings::AppSettings;
pub use snapshot::{FontSize, SnapshotState};
pub use theme::CodeTheme;
