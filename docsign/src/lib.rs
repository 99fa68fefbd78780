//! docsign - client for the document e-signature backend
//!
//! This library provides typed access to the backend REST API (auth,
//! projects, documents, users) and the client-side document upload
//! workflow: an ordered collection of documents, each with upload state,
//! progress and an ordered list of signers.
//!
//! # Layout
//!
//! - [`config`]: base URL, timeouts and session cookie resolution
//! - [`http`]: the injectable transport and typed request helpers
//! - [`api`]: one stateless client per backend resource
//! - [`upload`]: document items and the upload manager
//! - [`signer`]: ordered signer lists
//! - [`loaders`]: page data loaders that degrade instead of failing

pub mod api;
pub mod config;
pub mod error;
pub mod file;
pub mod http;
pub mod loaders;
pub mod model;
pub mod signer;
pub mod upload;

pub use api::Api;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, ConfigError};
pub use file::FileHandle;
pub use http::{HttpClient, Transport};
pub use signer::{Signer, SignerList, SignerUpdate};
pub use upload::{DocItem, UploadManager, UploadStatus, UploadTarget};
