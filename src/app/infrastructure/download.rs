//! Destinations for exported images.
//!
//! A [`DownloadSink`] plays the part of the host's "save file" mechanism: it
//! receives the suggested file name and the encoded PNG and decides where the
//! bytes end up.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::Result;

pub trait DownloadSink: Send + Sync {
    /// Store `bytes` under `suggested_name` and return where they went.
    fn save(&self, suggested_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Writes every download into one directory, creating it when missing.
///
/// The suggested name is joined as-is; no sanitization is applied.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Sink targeting `dir`, or the user's download folder when `None`.
    pub fn or_default(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => Self::new(dir),
            None => Self::new(default_download_dir()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadSink for DirectorySink {
    fn save(&self, suggested_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(suggested_name);
        fs::write(&path, bytes)?;
        log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

/// Platform downloads folder, then `~/Downloads`, then the working directory.
pub fn default_download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("."))
}
