//! Upload state transitions.
//!
//! Upload futures never touch a `DocItem` directly. They emit events, and
//! the single owner of the item collection applies them in arrival order.

use super::item::{DocItem, UploadStatus};
use crate::error::ApiError;

/// Fallback failure message when the transport gives no reason.
pub const GENERIC_FAILURE: &str = "Upload failed";

/// A state change reported by an in-flight upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum UploadEvent {
    /// Content is about to be sent.
    Started,
    /// Percentage of the content sent so far.
    Progress(u8),
    /// The upload settled; `Err` carries the failure message.
    Finished(Result<(), String>),
}

impl DocItem {
    /// Apply one upload event to this item.
    pub(crate) fn apply(&mut self, event: &UploadEvent) {
        match event {
            UploadEvent::Started => {
                self.status = UploadStatus::Uploading;
                self.progress = 0;
                self.error = None;
            }
            UploadEvent::Progress(percent) => {
                if self.status == UploadStatus::Uploading && *percent > self.progress {
                    self.progress = (*percent).min(100);
                }
            }
            UploadEvent::Finished(Ok(())) => {
                self.progress = 100;
                self.status = UploadStatus::Done;
                self.error = None;
            }
            UploadEvent::Finished(Err(message)) => {
                self.status = UploadStatus::Error;
                self.error = Some(message.clone());
            }
        }
    }
}

/// Human-readable reason for a failed upload.
///
/// Prefers `HTTP <status>` when the backend answered, then the transport's
/// own message.
pub(crate) fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { status, .. } => format!("HTTP {}", status),
        ApiError::Network(message) | ApiError::InvalidRequest(message) if !message.is_empty() => {
            message.clone()
        }
        ApiError::Decode { .. } => err.to_string(),
        _ => GENERIC_FAILURE.to_string(),
    }
}
