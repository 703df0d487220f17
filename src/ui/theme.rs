use fltk::{
    enums::Color,
    prelude::*,
};

use crate::app::domain::color::{HexColor, Rgba};
use crate::app::services::preview::{GRADIENT_END, GRADIENT_START, TITLE_FILL};
use crate::app::services::syntax::Highlighted;

use super::main_window::MainWidgets;

pub const WINDOW_BG: Color = Color::from_rgb(0x1a, 0x1a, 0x1a);
pub const PANEL_BG: Color = Color::from_rgb(0x2c, 0x2c, 0x2c);
pub const PANEL_TEXT: Color = Color::from_rgb(220, 220, 220);
pub const EXPORT_RED: Color = Color::from_rgb(0xff, 0x4d, 0x4d);

pub fn to_fltk(color: Rgba) -> Color {
    Color::from_rgb(color.r, color.g, color.b)
}

/// Flat stand-in for the card gradient: FLTK boxes cannot fill gradients.
pub fn card_color() -> Color {
    to_fltk(mix(GRADIENT_START, GRADIENT_END, 0.5))
}

/// Title bar fill composited over the card color.
pub fn title_bar_color() -> Color {
    let base = mix(GRADIENT_START, GRADIENT_END, 0.5);
    let t = TITLE_FILL.a as f32 / 255.0;
    to_fltk(mix(base, Rgba::opaque(TITLE_FILL.r, TITLE_FILL.g, TITLE_FILL.b), t))
}

fn mix(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Rgba::opaque(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b))
}

/// Recolor the preview card for the current theme, background and font size.
pub fn apply_code_theme(widgets: &mut MainWidgets, highlighted: &Highlighted, background: HexColor, font_size: i32) {
    let editor = &mut widgets.code_editor;
    editor.set_color(to_fltk(highlighted.background));
    editor.set_text_color(to_fltk(highlighted.foreground));
    editor.set_cursor_color(to_fltk(highlighted.foreground));
    editor.set_selection_color(to_fltk(mix(highlighted.background, highlighted.foreground, 0.3)));
    editor.set_text_size(font_size);

    widgets.content.set_color(to_fltk(background.to_rgba()));

    widgets.content.redraw();
    editor.redraw();
}

/// Set Windows title bar theme (Windows 10 build 1809+)
/// Must be called AFTER window.show() to have a valid HWND
#[cfg(target_os = "windows")]
pub fn set_windows_titlebar_theme(window: &fltk::window::Window, is_dark: bool) {
    use std::mem::size_of;
    use std::ptr::from_ref;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::Graphics::Dwm::{DWMWINDOWATTRIBUTE, DwmSetWindowAttribute};

    unsafe {
        let hwnd = HWND(window.raw_handle() as *mut std::ffi::c_void);
        let on: i32 = if is_dark { 1 } else { 0 };

        // DWMWA_USE_IMMERSIVE_DARK_MODE, then the pre-2004 attribute id
        for attribute in [20, 19] {
            let _ = DwmSetWindowAttribute(
                hwnd,
                DWMWINDOWATTRIBUTE(attribute),
                from_ref(&on).cast(),
                size_of::<i32>() as u32,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_endpoints() {
        let a = Rgba::opaque(0, 100, 200);
        let b = Rgba::opaque(200, 100, 0);
        assert_eq!(mix(a, b, 0.0), a);
        assert_eq!(mix(a, b, 1.0), b);
        assert_eq!(mix(a, b, 0.5), Rgba::opaque(100, 100, 100));
    }
}
