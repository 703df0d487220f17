use crate::app::domain::color::HexColor;
use crate::app::domain::snapshot::FontSize;
use crate::app::domain::theme::CodeTheme;

/// One user interaction with a control. Each variant maps to exactly one
/// widget setter (or to the export action).
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    SourceEdited(String),
    FileNameEdited(String),
    ThemeSelected(CodeTheme),
    /// Raw value of the numeric font-size input
    FontSizeChanged(f64),
    BackgroundPicked(HexColor),
    ExportClicked,
}

/// An entry of the theme dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeOption {
    pub theme: CodeTheme,
    pub label: String,
}

pub fn theme_options() -> Vec<ThemeOption> {
    CodeTheme::all()
        .iter()
        .map(|theme| ThemeOption { theme: *theme, label: theme.label() })
        .collect()
}

/// Round and clamp a numeric input value the way a bounded spinner would.
pub fn font_size_from_control(value: f64) -> FontSize {
    if !value.is_finite() {
        return FontSize::default();
    }
    let clamped = value.round().clamp(FontSize::MIN as f64, FontSize::MAX as f64);
    FontSize::new(clamped as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_options_cover_all_themes() {
        let options = theme_options();
        assert_eq!(options.len(), 8);
        assert_eq!(options[0].theme, CodeTheme::Dark);
        assert_eq!(options[0].label, "Dark");
        assert_eq!(options[6].label, "NightOwl");
    }

    #[test]
    fn test_font_size_from_control() {
        assert_eq!(font_size_from_control(16.0).px(), 16);
        assert_eq!(font_size_from_control(16.6).px(), 17);
        assert_eq!(font_size_from_control(-3.0).px(), 10);
        assert_eq!(font_size_from_control(1e9).px(), 24);
        assert_eq!(font_size_from_control(f64::NAN).px(), 16);
    }
}
