//! Client-side document upload workflow.
//!
//! This module tracks an ordered collection of document items through their
//! upload lifecycle, including:
//! - Document items and their status (`item`)
//! - Event-based state transitions (`events`)
//! - Revocable preview references (`preview`)
//! - Upload endpoints and extra form fields (`target`)
//! - Upload orchestration (`manager`)
//!
//! # Architecture
//!
//! ```text
//! UploadManager
//!         │
//!         ├── run_upload (one future per item)
//!         │       └── emits UploadEvent ──► mpsc channel
//!         │
//!         ├── drive (single owner, applies events to DocItem)
//!         │
//!         ├── HttpClient (multipart POST with progress)
//!         │
//!         └── PreviewRegistry (blob: references)
//! ```
//!
//! Status moves `Pending → Uploading → Done | Error`; placeholder items
//! without content move straight from `Pending` to `Done`.
//!
//! # Example
//!
//! ```ignore
//! use docsign::upload::{UploadManager, UploadTarget};
//!
//! let manager = UploadManager::new(http);
//! let mut items = manager.add_files(&[], files).into_owned();
//! let summary = manager
//!     .upload_all(&mut items, &UploadTarget::project_files(42, ""), |all| {
//!         println!("{} items", all.len());
//!     })
//!     .await;
//! ```

mod events;
mod item;
mod manager;
mod preview;
mod target;

pub use events::GENERIC_FAILURE;
pub use item::{DocItem, IdGenerator, MonotonicIds, UploadStatus};
pub use manager::{all_uploaded, retry_failed, seed_documents, BatchSummary, UploadManager};
pub use preview::PreviewRegistry;
pub use target::UploadTarget;
