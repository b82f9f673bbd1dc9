//! File selection and local image previews.

use reqwest::Url;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extensions offered by the picker. Advisory only: other files can still be submitted.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["pdf", "png", "jpeg", "jpg"];

#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("could not open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} is not a file", .0.display())]
    NotAFile(PathBuf),
}

/// A document chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    path: PathBuf,
    name: String,
    mime_type: String,
    size: u64,
}

impl SelectedFile {
    /// Open a file for upload. Only existence is checked; size and content are not.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SelectionError> {
        let path = path.as_ref();
        let open_err = |source| SelectionError::Open {
            path: path.to_path_buf(),
            source,
        };

        let path = std::fs::canonicalize(path).map_err(open_err)?;
        let metadata = std::fs::metadata(&path).map_err(open_err)?;
        if !metadata.is_file() {
            return Err(SelectionError::NotAFile(path));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = guess_mime_type(&name).to_string();

        tracing::debug!(file = %path.display(), %mime_type, size = metadata.len(), "file selected");

        Ok(Self {
            path,
            name,
            mime_type,
            size: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Whether the file matches the picker's `.pdf .png .jpeg .jpg` filter
    pub fn matches_accept_filter(&self) -> bool {
        extension(&self.name)
            .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }

    /// Read the whole document for upload
    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

fn extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    Some(ext.to_lowercase())
}

/// Guess MIME type from filename extension.
pub fn guess_mime_type(filename: &str) -> &'static str {
    match extension(filename).as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("tif" | "tiff") => "image/tiff",
        Some("txt") => "text/plain",
        Some("md" | "markdown") => "text/markdown",
        Some("html" | "htm") => "text/html",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        _ => "application/octet-stream",
    }
}

/// Local preview of an image selection.
///
/// Holds a `file://` URL for the duration of the selection. The state owns
/// it alongside the selected file, so replacing or clearing the selection
/// drops the old preview with it.
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewUrl {
    url: String,
    dimensions: Option<(u32, u32)>,
}

impl PreviewUrl {
    /// Create a preview for image files; other files get none
    pub fn create(file: &SelectedFile) -> Option<Self> {
        if !file.is_image() {
            return None;
        }

        let url = Url::from_file_path(file.path())
            .map(String::from)
            .unwrap_or_else(|_| format!("file://{}", file.path().display()));

        let dimensions = match image::image_dimensions(file.path()) {
            Ok(dimensions) => Some(dimensions),
            Err(e) => {
                tracing::debug!(file = %file.path().display(), error = %e, "no preview dimensions");
                None
            }
        };

        Some(Self { url, dimensions })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Pixel width and height, when the image header could be read
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }
}
