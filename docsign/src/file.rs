//! In-memory file content selected for upload.

use std::path::Path;

use bytes::Bytes;

/// Raw content of a file selected for upload.
///
/// Content is held as shared `Bytes`, so cloning a handle never copies the
/// file itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    content: Bytes,
    mime: Option<String>,
}

impl FileHandle {
    /// Create a handle from a filename and its content.
    ///
    /// The MIME type is guessed from the filename extension.
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let name = name.into();
        let mime = mime_for_name(&name).map(str::to_string);
        Self {
            name,
            content: content.into(),
            mime,
        }
    }

    /// Override the MIME type.
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Read a file from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("{} has no file name", path.display()),
                )
            })?;
        let content = tokio::fs::read(path).await?;
        Ok(Self::new(name, content))
    }

    /// The source filename.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The file content.
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// The MIME type, if known.
    pub fn mime(&self) -> Option<&str> {
        self.mime.as_deref()
    }

    /// Size of the content in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns true if the file is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

fn mime_for_name(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => return None,
    };
    Some(mime)
}
