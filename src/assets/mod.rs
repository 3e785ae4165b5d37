//! Asset loader: stored relative path -> `ImageData`, with an optional base64 payload.
//!
//! Never fails. A blank path yields no asset at all; a path that does not resolve to a
//! regular file (or any I/O fault) yields a path-only entry without content type.

use crate::domain::ImageData;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::{Component, Path, PathBuf};

pub const OCTET_STREAM: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct AssetLoader {
    root: PathBuf,
}

impl AssetLoader {
    /// Stored paths are resolved relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn load(&self, path: Option<&str>, include_payload: bool) -> Option<ImageData> {
        let path = path.filter(|p| !p.trim().is_empty())?;
        Some(
            self.try_load(path, include_payload)
                .await
                .unwrap_or_else(|_| unavailable(path)),
        )
    }

    async fn try_load(&self, stored: &str, include_payload: bool) -> std::io::Result<ImageData> {
        let Some(full) = self.resolve(stored) else {
            return Ok(unavailable(stored));
        };
        if !tokio::fs::metadata(&full).await?.is_file() {
            return Ok(unavailable(stored));
        }

        // Without a payload the bytes are never read, so only the extension can decide.
        if !include_payload {
            return Ok(ImageData {
                path: stored.to_string(),
                mime_type: Some(mime_from_extension(stored).to_string()),
                base64: None,
            });
        }

        let bytes = tokio::fs::read(&full).await?;
        let mime = sniff_mime(&bytes).unwrap_or_else(|| mime_from_extension(stored));
        Ok(ImageData {
            path: stored.to_string(),
            mime_type: Some(mime.to_string()),
            base64: Some(STANDARD.encode(&bytes)),
        })
    }

    /// Joins a stored path onto the root. Absolute paths and `..` never leave the root.
    fn resolve(&self, stored: &str) -> Option<PathBuf> {
        let rel = Path::new(stored);
        let contained = rel
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        contained.then(|| self.root.join(rel))
    }
}

fn unavailable(path: &str) -> ImageData {
    ImageData {
        path: path.to_string(),
        mime_type: None,
        base64: None,
    }
}

/// Content type from leading magic bytes.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"BM") && has_dib_header(bytes) {
        Some("image/bmp")
    } else {
        None
    }
}

/// A BMP file header is followed by a DIB header whose little-endian size field
/// (bytes 14..18) is one of the known header lengths.
fn has_dib_header(bytes: &[u8]) -> bool {
    let Some(size) = bytes.get(14..18) else {
        return false;
    };
    let size = u32::from_le_bytes([size[0], size[1], size[2], size[3]]);
    matches!(size, 12 | 16 | 40 | 52 | 56 | 64 | 108 | 124)
}

/// Content type from the file extension, falling back to `application/octet-stream`.
pub fn mime_from_extension(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        _ => OCTET_STREAM,
    }
}
