use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::AppError;

/// Rendering and export options read from `settings.json`.
///
/// The file is optional and never written by the application; the widget's
/// own state (code, theme, colors) is not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// syntect token for the grammar used by the tokenizer (`js`, `rs`, ...)
    #[serde(default = "default_language")]
    pub language: String,

    /// Device pixel ratio applied when rasterizing the card
    #[serde(default = "default_pixel_ratio")]
    pub pixel_ratio: f32,

    /// Where exported images are written; platform download dir when unset
    #[serde(default)]
    pub export_dir: Option<PathBuf>,

    /// Preferred font family for code, system monospace when unset
    #[serde(default)]
    pub mono_family: Option<String>,

    /// Preferred font family for the title bar, system sans-serif when unset
    #[serde(default)]
    pub ui_family: Option<String>,
}

pub const MIN_PIXEL_RATIO: f32 = 1.0;
pub const MAX_PIXEL_RATIO: f32 = 4.0;

fn default_language() -> String {
    "js".to_string()
}

fn default_pixel_ratio() -> f32 {
    1.0
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            pixel_ratio: default_pixel_ratio(),
            export_dir: None,
            mono_family: None,
            ui_family: None,
        }
    }
}

impl AppSettings {
    /// Load settings from the config dir, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    /// Load settings from `path`. A missing or malformed file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => settings,
            Err(AppError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                log::warn!("Failed to load settings from {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self, AppError> {
        let contents = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&contents)?;
        Ok(settings.normalized())
    }

    /// Clamp numeric options into their supported ranges.
    pub fn normalized(mut self) -> Self {
        self.pixel_ratio = if self.pixel_ratio.is_finite() {
            self.pixel_ratio.clamp(MIN_PIXEL_RATIO, MAX_PIXEL_RATIO)
        } else {
            default_pixel_ratio()
        };
        self
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("codeshot");
        path.push("settings.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.language, "js");
        assert_eq!(settings.pixel_ratio, 1.0);
        assert!(settings.export_dir.is_none());
        assert!(settings.mono_family.is_none());
        assert!(settings.ui_family.is_none());
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{"pixel_ratio": 2.0}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.pixel_ratio, 2.0);
        assert_eq!(settings.language, "js");
    }

    #[test]
    fn test_pixel_ratio_is_clamped() {
        let settings = AppSettings { pixel_ratio: 12.0, ..Default::default() }.normalized();
        assert_eq!(settings.pixel_ratio, MAX_PIXEL_RATIO);
        let settings = AppSettings { pixel_ratio: 0.25, ..Default::default() }.normalized();
        assert_eq!(settings.pixel_ratio, MIN_PIXEL_RATIO);
        let settings = AppSettings { pixel_ratio: f32::NAN, ..Default::default() }.normalized();
        assert_eq!(settings.pixel_ratio, 1.0);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings::load_from(&dir.path().join("nope.json"));
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn test_load_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"{"language": "rs", "pixel_ratio": 9, "export_dir": "/tmp/shots", "mono_family": "Fira Code"}"#,
        )
        .unwrap();

        let settings = AppSettings::load_from(&path);
        assert_eq!(settings.language, "rs");
        assert_eq!(settings.pixel_ratio, MAX_PIXEL_RATIO);
        assert_eq!(settings.export_dir, Some(PathBuf::from("/tmp/shots")));
        assert_eq!(settings.mono_family.as_deref(), Some("Fira Code"));
        assert!(settings.ui_family.is_none());
    }
}
