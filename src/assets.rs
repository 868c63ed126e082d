use std::fs;
use std::path::{Path, PathBuf};

use spdlog::{info, warn};
use uuid::Uuid;

use crate::error::{FolioError, Result};

pub const PLACEHOLDER_WIDE: &str = "https://placehold.co/800x600";
pub const PLACEHOLDER_CERTIFICATE: &str = "https://placehold.co/600x400";

/// Turns a stored asset path into a URL the browser can load.
pub fn build_asset_url(base_url: &str, path: Option<&str>) -> Option<String> {
    let path = path.map(|p| p.trim()).filter(|p| !p.is_empty())?;

    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }

    Some(format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/')))
}

pub fn asset_url_or(base_url: &str, path: Option<&str>, placeholder: &str) -> String {
    build_asset_url(base_url, path).unwrap_or_else(|| placeholder.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Thumbnail,
    CertificateImage,
    Cv,
}

impl AssetKind {
    /// Directory under the uploads root, also the first path segment of the stored path.
    pub fn dir_name(&self) -> &'static str {
        match self {
            AssetKind::Thumbnail => "thumbnails",
            AssetKind::CertificateImage => "certifications",
            AssetKind::Cv => "cv",
        }
    }

    /// File extension for an accepted content type.
    pub fn extension_for(&self, content_type: &str) -> Result<&'static str> {
        let mime = content_type.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
        let ext = match self {
            AssetKind::Cv => match mime.as_str() {
                "application/pdf" => Some("pdf"),
                _ => None,
            },
            AssetKind::Thumbnail | AssetKind::CertificateImage => match mime.as_str() {
                "image/png" => Some("png"),
                "image/jpeg" | "image/jpg" => Some("jpg"),
                "image/gif" => Some("gif"),
                "image/webp" => Some("webp"),
                "image/svg+xml" => Some("svg"),
                "image/avif" => Some("avif"),
                _ => None,
            },
        };

        ext.ok_or_else(|| FolioError::UnsupportedMedia(self.rejection(&mime)))
    }

    fn rejection(&self, mime: &str) -> String {
        match self {
            AssetKind::Cv => "Only PDF files are allowed".to_string(),
            _ => format!("Only image files are allowed (got {})", if mime.is_empty() { "nothing" } else { mime }),
        }
    }
}

/// Writes an uploaded file and returns its stored path, relative to the uploads root.
pub fn save_upload(uploads_dir: &Path, kind: AssetKind, content_type: &str, bytes: &[u8]) -> Result<String> {
    let ext = kind.extension_for(content_type)?;
    if bytes.is_empty() {
        return Err(FolioError::UnsupportedMedia("Uploaded file is empty".to_string()));
    }
    if kind == AssetKind::Cv && !bytes.starts_with(b"%PDF") {
        return Err(FolioError::UnsupportedMedia("Only PDF files are allowed".to_string()));
    }

    let dir = uploads_dir.join(kind.dir_name());
    fs::create_dir_all(&dir)?;

    let file_name = format!("{}.{}", Uuid::new_v4(), ext);
    fs::write(dir.join(&file_name), bytes)?;

    let stored = format!("{}/{}", kind.dir_name(), file_name);
    info!("Stored upload {} ({} bytes)", stored, bytes.len());
    Ok(stored)
}

/// Removes a replaced upload. Failing to do so only leaves a stray file behind.
pub fn remove_upload(uploads_dir: &Path, stored: &str) {
    let Some(path) = resolve_upload(uploads_dir, stored) else {
        return;
    };
    if let Err(e) = fs::remove_file(&path) {
        warn!("Could not remove old upload {}: {}", path.display(), e);
    }
}

/// Maps a stored path back onto disk, refusing anything that climbs out of the uploads root.
pub fn resolve_upload(uploads_dir: &Path, stored: &str) -> Option<PathBuf> {
    if stored.starts_with("http://") || stored.starts_with("https://") {
        return None;
    }
    let relative = Path::new(stored.trim_start_matches('/'));
    let climbs = relative.components().any(|c| !matches!(c, std::path::Component::Normal(_)));
    if climbs || relative.as_os_str().is_empty() {
        return None;
    }
    Some(uploads_dir.join(relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_asset_url() {
        assert_eq!(build_asset_url("/uploads", None), None);
        assert_eq!(build_asset_url("/uploads", Some("  ")), None);
        assert_eq!(build_asset_url("/uploads/", Some("/thumbnails/a.png")), Some("/uploads/thumbnails/a.png".to_string()));
        assert_eq!(build_asset_url("https://cdn.x", Some("cv/a.pdf")), Some("https://cdn.x/cv/a.pdf".to_string()));
        assert_eq!(build_asset_url("/uploads", Some("https://img.x/b.png")), Some("https://img.x/b.png".to_string()));
        assert_eq!(asset_url_or("/uploads", None, PLACEHOLDER_WIDE), PLACEHOLDER_WIDE);
    }

    #[test]
    fn test_extension_for() {
        assert_eq!(AssetKind::Thumbnail.extension_for("image/png").unwrap(), "png");
        assert_eq!(AssetKind::CertificateImage.extension_for("IMAGE/JPEG; charset=binary").unwrap(), "jpg");
        assert_eq!(AssetKind::Cv.extension_for("application/pdf").unwrap(), "pdf");

        let err = AssetKind::Cv.extension_for("image/png").err().unwrap();
        assert_eq!(err.to_string(), "Unsupported media type: Only PDF files are allowed");
        assert!(AssetKind::Thumbnail.extension_for("application/pdf").is_err());
    }

    #[test]
    fn test_save_and_remove_upload() {
        let dir = tempfile::tempdir().unwrap();
        let stored = save_upload(dir.path(), AssetKind::Cv, "application/pdf", b"%PDF-1.7 data").unwrap();
        assert!(stored.starts_with("cv/") && stored.ends_with(".pdf"));

        let path = resolve_upload(dir.path(), &stored).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.7 data");

        remove_upload(dir.path(), &stored);
        assert!(!path.exists());
    }

    #[test]
    fn test_save_upload_rejects_bad_content() {
        let dir = tempfile::tempdir().unwrap();
        assert!(save_upload(dir.path(), AssetKind::Cv, "application/pdf", b"not a pdf").is_err());
        assert!(save_upload(dir.path(), AssetKind::Thumbnail, "image/png", b"").is_err());
        assert!(save_upload(dir.path(), AssetKind::Thumbnail, "text/html", b"<html>").is_err());
    }

    #[test]
    fn test_resolve_upload() {
        let root = Path::new("/srv/uploads");
        assert_eq!(resolve_upload(root, "thumbnails/a.png"), Some(PathBuf::from("/srv/uploads/thumbnails/a.png")));
        assert_eq!(resolve_upload(root, "../etc/passwd"), None);
        assert_eq!(resolve_upload(root, "cv/../../x"), None);
        assert_eq!(resolve_upload(root, ""), None);
        assert_eq!(resolve_upload(root, "https://x/y.png"), None);
    }
}
