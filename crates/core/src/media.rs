use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{Result, VidaskError};

/// Extensions offered by the file picker filter. Only a hint: any regular file is accepted.
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "m4v", "mov", "mkv", "webm", "avi", "wmv", "flv", "mpeg", "mpg", "3gp", "ogv",
];

/// A video chosen by the user, either through the picker or by dropping it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    path: PathBuf,
    name: String,
    size: u64,
}

impl SelectedFile {
    /// Resolve a picked or dropped path into a selection
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(VidaskError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        Ok(Self::from_parts(path, metadata.len()))
    }

    pub fn from_parts(path: impl Into<PathBuf>, size: u64) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name, size }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Size in megabytes rounded to one decimal
    pub fn size_megabytes(&self) -> f64 {
        (self.size as f64 / 100_000.0).round() / 10.0
    }

    /// Human readable size, e.g. `12.3 MB` or `4 MB`
    pub fn display_size(&self) -> String {
        format!("{} MB", self.size_megabytes())
    }

    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    pub fn looks_like_video(&self) -> bool {
        self.extension()
            .is_some_and(|ext| VIDEO_EXTENSIONS.contains(&ext.as_str()))
    }

    /// MIME type sent with the upload, derived from the extension
    pub fn mime_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("mp4") => "video/mp4",
            Some("m4v") => "video/x-m4v",
            Some("mov") => "video/quicktime",
            Some("mkv") => "video/x-matroska",
            Some("webm") => "video/webm",
            Some("avi") => "video/x-msvideo",
            Some("wmv") => "video/x-ms-wmv",
            Some("flv") => "video/x-flv",
            Some("mpeg" | "mpg") => "video/mpeg",
            Some("3gp") => "video/3gpp",
            Some("ogv") => "video/ogg",
            _ => "application/octet-stream",
        }
    }
}
