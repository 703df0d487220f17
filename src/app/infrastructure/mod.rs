//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - System fonts
//! - Download destinations
//! - Error types

pub mod download;
pub mod error;
pub mod fonts;
