//! Scripted transport for unit tests.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use super::{HttpRequest, HttpResponse, Method, ProgressFn, RequestBody, Transport};
use crate::error::{ApiError, ApiResult};

/// Transport that records requests and replays canned responses.
///
/// Unscripted routes answer 404. Uploads answer 200 with an empty JSON
/// object unless a response is scripted for the uploaded filename, and emit
/// the configured progress steps before answering.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), ApiResult<HttpResponse>>>,
    uploads: Mutex<HashMap<String, ApiResult<HttpResponse>>>,
    progress_steps: Mutex<Vec<(u64, u64)>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a JSON response for a route.
    pub fn respond_json(self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.respond(method, path, Ok(HttpResponse::json(status, &body)))
    }

    /// Script any response for a route.
    pub fn respond(self, method: Method, path: &str, response: ApiResult<HttpResponse>) -> Self {
        self.routes
            .lock()
            .insert((method, path.to_string()), response);
        self
    }

    /// Script the response to an upload of the given filename.
    pub fn respond_upload(self, file_name: &str, response: ApiResult<HttpResponse>) -> Self {
        self.uploads.lock().insert(file_name.to_string(), response);
        self
    }

    /// Progress events emitted for every upload, as `(loaded, total)`.
    pub fn with_progress(self, steps: Vec<(u64, u64)>) -> Self {
        *self.progress_steps.lock() = steps;
        self
    }

    /// All requests seen so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests seen so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().last().cloned()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        if matches!(request.body, RequestBody::Multipart(_)) {
            return self.upload(request, None).await;
        }

        let key = (request.method, request.path.clone());
        self.requests.lock().push(request);
        self.routes
            .lock()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Ok(HttpResponse::empty(404)))
    }

    async fn upload(
        &self,
        request: HttpRequest,
        on_progress: Option<ProgressFn>,
    ) -> ApiResult<HttpResponse> {
        let file_name = match &request.body {
            RequestBody::Multipart(form) => form.file.name().to_string(),
            _ => {
                return Err(ApiError::InvalidRequest(
                    "upload requires a multipart body".to_string(),
                ))
            }
        };
        self.requests.lock().push(request);

        let steps = self.progress_steps.lock().clone();
        for (loaded, total) in steps {
            if let Some(cb) = &on_progress {
                cb(loaded, total);
            }
            tokio::task::yield_now().await;
        }

        self.uploads
            .lock()
            .get(&file_name)
            .cloned()
            .unwrap_or_else(|| Ok(HttpResponse::json(200, &serde_json::json!({}))))
    }

    fn url_for(&self, path: &str) -> String {
        format!("http://mock.local{}", path)
    }
}
