//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the UI:
//! - The code-image widget
//! - Control panel events
//! - Background exports

pub mod control_panel;
pub mod export;
pub mod widget;
