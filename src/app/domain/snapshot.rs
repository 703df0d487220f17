use super::color::HexColor;
use super::theme::CodeTheme;

/// Sample shown when the widget is first mounted.
pub const DEFAULT_SOURCE: &str = "import { Detail } from \"@raycast/api\";\n\
export default function Command() {\n  return <Detail markdown=\"Hello World\" />;\n}";

pub const DEFAULT_FILE_NAME: &str = "Untitled-1";

pub const DEFAULT_BACKGROUND: HexColor = HexColor::new(0x28, 0x2c, 0x34);

/// Font size of the code area in pixels, always within
/// [`FontSize::MIN`]..=[`FontSize::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontSize(u32);

impl FontSize {
    pub const MIN: u32 = 10;
    pub const MAX: u32 = 24;
    pub const DEFAULT: FontSize = FontSize(16);

    /// Clamp `px` into the supported range.
    pub fn new(px: u32) -> Self {
        Self(px.clamp(Self::MIN, Self::MAX))
    }

    pub fn px(self) -> u32 {
        self.0
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for FontSize {
    fn from(px: u32) -> Self {
        Self::new(px)
    }
}

/// Everything the user can change in the widget.
///
/// Setters replace the whole field; there is no validation of the source
/// text or the file name.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotState {
    source_text: String,
    theme: CodeTheme,
    font_size: FontSize,
    background: HexColor,
    file_name: String,
}

impl Default for SnapshotState {
    fn default() -> Self {
        Self {
            source_text: DEFAULT_SOURCE.to_string(),
            theme: CodeTheme::default(),
            font_size: FontSize::default(),
            background: DEFAULT_BACKGROUND,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl SnapshotState {
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn theme(&self) -> CodeTheme {
        self.theme
    }

    pub fn font_size(&self) -> FontSize {
        self.font_size
    }

    pub fn background(&self) -> HexColor {
        self.background
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn set_source_text(&mut self, text: impl Into<String>) {
        self.source_text = text.into();
    }

    pub fn set_theme(&mut self, theme: CodeTheme) {
        self.theme = theme;
    }

    pub fn set_font_size(&mut self, size: impl Into<FontSize>) {
        self.font_size = size.into();
    }

    pub fn set_background(&mut self, color: HexColor) {
        self.background = color;
    }

    pub fn set_file_name(&mut self, name: impl Into<String>) {
        self.file_name = name.into();
    }

    /// Name offered to the download mechanism.
    pub fn export_file_name(&self) -> String {
        format!("{}.png", self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = SnapshotState::default();
        assert!(state.source_text().starts_with("import { Detail } from \"@raycast/api\";\n"));
        assert!(state.source_text().ends_with("  return <Detail markdown=\"Hello World\" />;\n}"));
        assert_eq!(state.source_text().lines().count(), 4);
        assert_eq!(state.theme(), CodeTheme::Dark);
        assert_eq!(state.font_size().px(), 16);
        assert_eq!(state.background().to_string(), "#282c34");
        assert_eq!(state.file_name(), "Untitled-1");
    }

    #[test]
    fn test_font_size_clamps() {
        assert_eq!(FontSize::new(0).px(), 10);
        assert_eq!(FontSize::new(10).px(), 10);
        assert_eq!(FontSize::new(17).px(), 17);
        assert_eq!(FontSize::new(24).px(), 24);
        assert_eq!(FontSize::new(99).px(), 24);
    }

    #[test]
    fn test_setters_replace_values() {
        let mut state = SnapshotState::default();
        state.set_source_text("");
        state.set_theme(CodeTheme::Okaidia);
        state.set_font_size(12);
        state.set_background(HexColor::new(1, 2, 3));
        state.set_file_name("");

        assert_eq!(state.source_text(), "");
        assert_eq!(state.theme(), CodeTheme::Okaidia);
        assert_eq!(state.font_size().px(), 12);
        assert_eq!(state.background(), HexColor::new(1, 2, 3));
        assert_eq!(state.file_name(), "");
    }

    #[test]
    fn test_export_file_name_is_not_sanitized() {
        let mut state = SnapshotState::default();
        state.set_file_name("demo");
        assert_eq!(state.export_file_name(), "demo.png");
        state.set_file_name("a:b?c");
        assert_eq!(state.export_file_name(), "a:b?c.png");
    }

    #[test]
    fn test_font_size_from_px_clamps() {
        let size: FontSize = 40.into();
        assert_eq!(size.px(), 24);
    }
}
