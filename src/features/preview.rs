//! Selected image file and its preview
//!
//! Reads the picked file, sniffs the format with the `image` crate and keeps
//! the raw bytes for upload. Only the header is inspected, for the preview
//! dimensions; a file without a readable header is still uploaded as-is.

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use image::{ImageFormat, ImageReader};

use crate::features::submission::FilePart;

/// File extensions offered by the picker
pub const PICKER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Decoded image information for the preview pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewInfo {
    pub width: u32,
    pub height: u32,
}

/// A file picked for upload
#[derive(Debug, Clone)]
pub struct SelectedImage {
    pub file_name: String,
    pub mime: String,
    pub bytes: Arc<Vec<u8>>,
    /// `None` if the header could not be read
    pub preview: Option<PreviewInfo>,
}

impl SelectedImage {
    /// Read and inspect `path`
    pub async fn load(path: PathBuf) -> Result<Self> {
        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        // Format sniffing and header parsing are sync work
        tokio::task::spawn_blocking(move || Self::from_bytes(path, bytes))
            .await
            .context("Image inspection task failed")
    }

    pub fn from_bytes(path: PathBuf, bytes: Vec<u8>) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());

        let format = image::guess_format(&bytes)
            .ok()
            .or_else(|| ImageFormat::from_path(&path).ok());
        let mime = format
            .map(|f| f.to_mime_type().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let preview = match read_dimensions(&bytes) {
            Ok((width, height)) => Some(PreviewInfo { width, height }),
            Err(e) => {
                tracing::warn!("No preview for {}: {}", path.display(), e);
                None
            }
        };

        Self {
            file_name,
            mime,
            bytes: Arc::new(bytes),
            preview,
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Form part for the multipart `image` field
    pub fn to_file_part(&self) -> FilePart {
        FilePart {
            file_name: self.file_name.clone(),
            mime: self.mime.clone(),
            bytes: self.bytes.clone(),
        }
    }
}

/// Width and height from the image header, without decoding pixels
fn read_dimensions(bytes: &[u8]) -> image::ImageResult<(u32, u32)> {
    ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_dimensions()
}

/// Open a native file picker restricted to image files
pub async fn pick_image_file() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Choose an image")
        .add_filter("Images", PICKER_EXTENSIONS)
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

/// Human-readable byte size
pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let bytes_f = bytes as f64;
    if bytes_f >= MB {
        format!("{:.1} MB", bytes_f / MB)
    } else if bytes_f >= KB {
        format!("{:.1} KB", bytes_f / KB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    fn encode(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 128]));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), format).unwrap();
        out
    }

    #[test]
    fn test_png_preview() {
        let bytes = encode(ImageFormat::Png, 4, 3);
        let selected = SelectedImage::from_bytes(PathBuf::from("/tmp/cat.png"), bytes);

        assert_eq!(selected.file_name, "cat.png");
        assert_eq!(selected.mime, "image/png");
        assert_eq!(
            selected.preview,
            Some(PreviewInfo {
                width: 4,
                height: 3
            })
        );
    }

    #[test]
    fn test_mime_comes_from_content_not_name() {
        let bytes = encode(ImageFormat::Jpeg, 8, 8);
        let selected = SelectedImage::from_bytes(PathBuf::from("misnamed.png"), bytes);
        assert_eq!(selected.mime, "image/jpeg");
        assert!(selected.preview.is_some());
    }

    #[test]
    fn test_undecodable_file_is_kept_without_preview() {
        let selected = SelectedImage::from_bytes(
            PathBuf::from("notes.jpg"),
            b"definitely not a jpeg".to_vec(),
        );
        assert!(selected.preview.is_none());
        assert_eq!(selected.mime, "image/jpeg");
        assert_eq!(selected.size_bytes(), 21);

        let part = selected.to_file_part();
        assert_eq!(part.file_name, "notes.jpg");
        assert_eq!(part.bytes.len(), 21);
    }

    #[test]
    fn test_read_dimensions() {
        let bytes = encode(ImageFormat::Png, 640, 480);
        assert_eq!(read_dimensions(&bytes).unwrap(), (640, 480));
        assert!(read_dimensions(b"plain text").is_err());
    }

    #[tokio::test]
    async fn test_load_reads_file() {
        let path = std::env::temp_dir().join(format!("craft-admin-{}.png", std::process::id()));
        tokio::fs::write(&path, encode(ImageFormat::Png, 5, 7))
            .await
            .unwrap();

        let selected = SelectedImage::load(path.clone()).await.unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(selected.mime, "image/png");
        assert_eq!(
            selected.preview,
            Some(PreviewInfo {
                width: 5,
                height: 7
            })
        );
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024 + 512 * 1024), "3.5 MB");
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let result = SelectedImage::load(PathBuf::from("/definitely/not/here.png")).await;
        assert!(result.is_err());
    }
}
