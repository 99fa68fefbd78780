//! HTTP client adapter.
//!
//! Every backend call goes through a [`Transport`], the seam that performs the
//! actual exchange. [`ReqwestTransport`] is the production implementation;
//! tests substitute their own. [`HttpClient`] wraps a shared transport and
//! adds typed JSON helpers and status-code mapping on top of it.
//!
//! ```text
//! Resource clients ──► HttpClient ──► dyn Transport ──► backend
//!                                         ├── ReqwestTransport
//!                                         └── (test doubles)
//! ```

mod client;
#[cfg(test)]
pub(crate) mod mock;
mod transport;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ApiResult;
use crate::file::FileHandle;

pub use client::HttpClient;
pub use transport::ReqwestTransport;

/// Upload progress callback: `(bytes_sent, total_bytes)`.
pub type ProgressFn = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// HTTP methods used by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Multipart form carrying one file plus text fields.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartForm {
    /// Form field name for the file part.
    pub file_field: String,
    /// The file; its name is sent as the part filename.
    pub file: FileHandle,
    /// Additional text fields, in order.
    pub fields: Vec<(String, String)>,
}

impl MultipartForm {
    /// Create a form with the file under the `file` field.
    pub fn new(file: FileHandle) -> Self {
        Self {
            file_field: "file".to_string(),
            file,
            fields: Vec::new(),
        }
    }

    /// Append a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Look up a text field by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Request body variants.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

/// A request relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Path relative to the base URL, e.g. `/auth/me`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl HttpRequest {
    /// Create a request with no query and no body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set the body.
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Look up a query parameter by name.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A raw response from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl HttpResponse {
    /// A response with the given status and an empty body.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: Bytes::new(),
        }
    }

    /// A response with a JSON body.
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self {
            status,
            content_type: Some("application/json".to_string()),
            body: Bytes::from(value.to_string()),
        }
    }

    /// A response with a binary body.
    pub fn bytes(status: u16, content_type: &str, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type: Some(content_type.to_string()),
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true if the response declares a JSON body.
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("application/json"))
    }
}

/// Performs HTTP exchanges against the backend.
///
/// Implementations resolve request paths against their base URL, attach
/// credentials, and return the raw response regardless of status. Only
/// failures that produce no response at all are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the raw response.
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse>;

    /// Send a multipart request, reporting upload progress.
    ///
    /// `on_progress` receives `(bytes_sent, total_bytes)` as the body is
    /// streamed out.
    async fn upload(
        &self,
        request: HttpRequest,
        on_progress: Option<ProgressFn>,
    ) -> ApiResult<HttpResponse>;

    /// Absolute URL for a path, used for browser redirects.
    fn url_for(&self, path: &str) -> String;
}
