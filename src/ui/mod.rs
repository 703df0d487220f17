pub mod buffer;
pub mod main_window;
pub mod style_map;
pub mod theme;
