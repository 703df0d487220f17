//! Services layer - business operations.
//!
//! - Syntax highlighting
//! - Card layout (the preview)
//! - Rasterizing and PNG encoding

pub mod preview;
pub mod raster;
pub mod syntax;
