//! Turn a snippet of source code into a styled "editor card" and export it
//! as a PNG image.
//!
//! The library holds the whole widget model ([`app::CodeImageWidget`]); the
//! FLTK front-end lives behind the `gui` feature.

pub mod app;
#[cfg(feature = "gui")]
pub mod ui;
