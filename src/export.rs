//! Export and share targets
//!
//! The "save as file" and clipboard primitives the session writes to.
//! Both sit behind traits so tests can record calls instead of touching
//! the filesystem or the system clipboard.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::render::{RasterSurface, RenderError};

/// Prefix of every exported file name
pub const FILE_PREFIX: &str = "mr-qr";

/// `mr-qr-<unix-ms>.png`
pub fn export_file_name(unix_millis: u128) -> String {
    format!("{}-{}.png", FILE_PREFIX, unix_millis)
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not create export directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

/// Where exported PNG bytes end up
pub trait FileSink: Send {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError>;
}

/// PNG-encode `surface` and hand the bytes to `sink`
pub fn save_surface(
    sink: &mut dyn FileSink,
    surface: &RasterSurface,
    file_name: &str,
) -> Result<PathBuf, ExportError> {
    let bytes = surface.to_png()?;
    sink.save(file_name, &bytes)
}

/// Writes files into a directory, creating it on first use
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl FileSink for DirectorySink {
    fn save(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        fs::create_dir_all(&self.dir).map_err(|source| ExportError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(file_name);
        fs::write(&path, bytes).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Where copied text ends up
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ExportError>;
}

/// The system clipboard, opened on first use
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ExportError> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| ExportError::Clipboard(e.to_string()))?;
            self.inner = Some(clipboard);
        }

        match self.inner.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|e| ExportError::Clipboard(e.to_string())),
            None => Err(ExportError::Clipboard("not initialised".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_pattern() {
        assert_eq!(export_file_name(1_700_000_000_123), "mr-qr-1700000000123.png");
    }

    #[test]
    fn test_directory_sink_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(tmp.path().join("nested").join("out"));

        let path = sink.save("mr-qr-1.png", b"data").unwrap();
        assert_eq!(path, tmp.path().join("nested").join("out").join("mr-qr-1.png"));
        assert_eq!(fs::read(&path).unwrap(), b"data");
    }

    #[test]
    fn test_save_surface_writes_png() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(tmp.path());
        let surface = crate::render::render("export", &crate::settings::Settings::default())
            .unwrap()
            .unwrap();

        let path = save_surface(&mut sink, &surface, "mr-qr-7.png").unwrap();
        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.width(), surface.size());
    }

    #[test]
    fn test_directory_sink_reports_write_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("file");
        fs::write(&blocker, b"x").unwrap();

        // A regular file where the directory should be
        let mut sink = DirectorySink::new(&blocker);
        assert!(matches!(
            sink.save("mr-qr-1.png", b"data"),
            Err(ExportError::CreateDir { .. })
        ));
    }
}
