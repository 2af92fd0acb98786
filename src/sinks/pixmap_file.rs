//! Saving exported canvases to and reading importable images from the file system

use crate::editor::ExportedImage;
use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use image::ImageFormat;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Type hint used for files whose extension is not a known image format
const UNKNOWN_MIME: &str = "application/octet-stream";

/// Something that can store an exported canvas, e.g. a download prompt or a directory
#[async_trait]
pub trait ExportTarget: std::fmt::Debug {
    /// Persist `image` and return where it ended up
    async fn save(&self, image: &ExportedImage) -> anyhow::Result<PathBuf>;
}

/// An [`ExportTarget`] that writes files into a directory
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DirectoryTarget {
    dir: PathBuf,
}

impl DirectoryTarget {
    /// Save exports into `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ExportTarget for DirectoryTarget {
    #[tracing::instrument(skip_all, fields(file = image.file_name.as_str()))]
    async fn save(&self, image: &ExportedImage) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Could not create export directory {}", self.dir.display()))?;
        // the name is sanitized so it cannot escape the directory
        let path = self.dir.join(&image.file_name);
        fs::write(&path, &image.data)
            .await
            .with_context(|| format!("Could not write {}", path.display()))?;
        tracing::info!("Saved {}B to {}", image.data.len(), path.display());
        Ok(path)
    }
}

/// Guess the type hint of a file from its extension, the way a file picker would
pub fn mime_for_path(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_MIME)
}

/// Read a file for importing, returning its content together with its type hint
#[tracing::instrument]
pub async fn load_image_file(path: &Path) -> anyhow::Result<(Bytes, &'static str)> {
    let data = fs::read(path)
        .await
        .with_context(|| format!("Could not read {}", path.display()))?;
    let mime = mime_for_path(path);
    tracing::debug!("Read {}B of {mime} from {}", data.len(), path.display());
    Ok((Bytes::from(data), mime))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::editor::Editor;
    use crate::pixmap::Color;
    use crate::sinks::NoFeedback;
    use crate::tools::PointerEvent;

    #[tokio::test]
    async fn test_store_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut original = Editor::blank((0.0, 0.0), 1.0).unwrap();
        original.tools_mut().set_color(Color(0xAB, 0xAB, 0xAB, 0x80));
        original.handle(PointerEvent::Down { x: 0.5, y: 0.5 }, &mut NoFeedback);
        original.handle(PointerEvent::Move { x: 4.5, y: 4.5 }, &mut NoFeedback);
        original.handle(PointerEvent::Up { x: 4.5, y: 4.5 }, &mut NoFeedback);

        // write data into the directory
        let target = DirectoryTarget::new(dir.path().join("exports"));
        let exported = original.export("sketch: final?.jpeg").unwrap();
        let path = target.save(&exported).await.unwrap();
        assert_eq!(path, dir.path().join("exports").join("sketch-final.png"));

        // restore data from the file
        let (data, mime) = load_image_file(&path).await.unwrap();
        assert_eq!(mime, "image/png");
        let mut restored = Editor::blank((0.0, 0.0), 1.0).unwrap();
        restored.import(data, mime).await.unwrap();

        // compare data
        assert_eq!(restored.pixmap(), original.pixmap());
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("a/b.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("notes.txt")), UNKNOWN_MIME);
        assert_eq!(mime_for_path(Path::new("no_extension")), UNKNOWN_MIME);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_image_file(&dir.path().join("missing.png")).await.is_err());
    }
}
