//! Document items and their upload state.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::file::FileHandle;
use crate::signer::SignerList;

/// Upload lifecycle of a document item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadStatus {
    Pending,
    Uploading,
    Done,
    Error,
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Uploading => "uploading",
            Self::Done => "done",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// One file pending or completed upload.
#[derive(Debug, Clone, PartialEq)]
pub struct DocItem {
    pub id: String,
    /// Display name, equal to the source filename.
    pub name: String,
    /// File content; `None` for placeholder items.
    pub file: Option<FileHandle>,
    /// Completion percentage, 0 to 100.
    pub progress: u8,
    pub status: UploadStatus,
    /// Failure reason, set only while `status` is `Error`.
    pub error: Option<String>,
    /// Local preview reference; release it before dropping the item.
    pub preview_url: Option<String>,
    pub signers: SignerList,
}

impl DocItem {
    /// A pending item backed by file content.
    pub fn new(id: impl Into<String>, file: FileHandle) -> Self {
        let mut item = Self::placeholder(id, file.name());
        item.file = Some(file);
        item
    }

    /// A pending item with no content behind it.
    pub fn placeholder(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            file: None,
            progress: 0,
            status: UploadStatus::Pending,
            error: None,
            preview_url: None,
            signers: SignerList::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.file.is_none()
    }

    pub fn is_pending(&self) -> bool {
        self.status == UploadStatus::Pending
    }
}

/// Source of unique identifiers for items and signers.
pub trait IdGenerator: Send + Sync {
    /// Return an identifier never returned before by this generator.
    fn next_id(&self) -> u64;
}

/// Counter-based identifiers starting at 1.
#[derive(Debug, Default)]
pub struct MonotonicIds {
    next: AtomicU64,
}

impl MonotonicIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for MonotonicIds {
    fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed) + 1
    }
}
