//! Production transport built on reqwest.

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, COOKIE};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};

use super::{HttpRequest, HttpResponse, Method, ProgressFn, RequestBody, Transport};
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult, ConfigError};

/// Chunk size used when streaming upload bodies (64KB).
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// reqwest-backed transport.
///
/// Configured once from a [`ClientConfig`]: base URL, request timeout,
/// JSON content type by default, a cookie store for session credentials and
/// an optional forwarded cookie header. Multipart uploads use the separate
/// upload timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: ClientConfig,
}

impl ReqwestTransport {
    /// Build a transport from validated configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(cookie)
                .map_err(|e| ConfigError::HttpClient(format!("invalid session cookie: {}", e)))?;
            headers.insert(COOKIE, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// The configuration this transport was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn builder(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        match method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        }
    }

    fn map_send_error(&self, url: &str, timeout_secs: u64, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Network(format!(
                "request to {} timed out after {}s",
                url, timeout_secs
            ))
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        if matches!(request.body, RequestBody::Multipart(_)) {
            return self.upload(request, None).await;
        }

        let url = self.config.url_for(&request.path);
        let mut builder = self.builder(request.method, &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let RequestBody::Json(value) = &request.body {
            builder = builder.json(value);
        }

        let response = builder.send().await.map_err(|e| {
            self.map_send_error(&url, self.config.request_timeout.as_secs(), e)
        })?;
        read_response(response).await
    }

    async fn upload(
        &self,
        request: HttpRequest,
        on_progress: Option<ProgressFn>,
    ) -> ApiResult<HttpResponse> {
        let form = match request.body {
            RequestBody::Multipart(form) => form,
            _ => {
                return Err(ApiError::InvalidRequest(
                    "upload requires a multipart body".to_string(),
                ))
            }
        };

        let total = form.file.len() as u64;
        let body = progress_body(form.file.content().clone(), on_progress);
        let mut part = Part::stream_with_length(body, total).file_name(form.file.name().to_string());
        if let Some(mime) = form.file.mime() {
            part = part
                .mime_str(mime)
                .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        }

        let mut multipart = Form::new().part(form.file_field, part);
        for (name, value) in form.fields {
            multipart = multipart.text(name, value);
        }

        let url = self.config.url_for(&request.path);
        let mut builder = self
            .builder(request.method, &url)
            .timeout(self.config.upload_timeout)
            .multipart(multipart);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        let response = builder.send().await.map_err(|e| {
            self.map_send_error(&url, self.config.upload_timeout.as_secs(), e)
        })?;
        read_response(response).await
    }

    fn url_for(&self, path: &str) -> String {
        self.config.url_for(path)
    }
}

/// Wrap file content in a streaming body that reports bytes handed to the wire.
fn progress_body(content: Bytes, on_progress: Option<ProgressFn>) -> Body {
    let total = content.len() as u64;
    let chunks: Vec<Bytes> = (0..content.len())
        .step_by(UPLOAD_CHUNK_SIZE)
        .map(|start| content.slice(start..(start + UPLOAD_CHUNK_SIZE).min(content.len())))
        .collect();

    let mut sent = 0u64;
    let stream = futures::stream::iter(chunks).map(move |chunk| {
        sent += chunk.len() as u64;
        if let Some(cb) = &on_progress {
            cb(sent, total);
        }
        Ok::<Bytes, std::io::Error>(chunk)
    });

    Body::wrap_stream(stream)
}

async fn read_response(response: reqwest::Response) -> ApiResult<HttpResponse> {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response
        .bytes()
        .await
        .map_err(|e| ApiError::Network(format!("failed to read response: {}", e)))?;

    Ok(HttpResponse {
        status,
        content_type,
        body,
    })
}
