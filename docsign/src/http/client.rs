//! Typed request helpers over a shared transport.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{
    HttpRequest, HttpResponse, Method, MultipartForm, ProgressFn, RequestBody, ReqwestTransport,
    Transport,
};
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult, ConfigError};

/// Injectable HTTP client shared by all resource clients.
///
/// Cloning is cheap; clones share the same transport (and therefore the
/// same cookie store).
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
}

impl HttpClient {
    /// Wrap an existing transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Build a client backed by reqwest from validated configuration.
    pub fn from_config(config: ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(Arc::new(ReqwestTransport::new(config)?)))
    }

    /// Absolute URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        self.transport.url_for(path)
    }

    /// Send a request, mapping non-2xx responses to [`ApiError::Status`].
    pub async fn execute(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let method = request.method;
        let path = request.path.clone();
        tracing::debug!(%method, path = %path, "sending request");

        let response = self.transport.send(request).await.inspect_err(|e| {
            tracing::debug!(%method, path = %path, error = %e, "request failed");
        })?;
        check_status(method, &path, response)
    }

    /// GET a JSON resource.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        let mut request = HttpRequest::new(Method::Get, path);
        for (key, value) in query {
            request = request.query(*key, *value);
        }
        let response = self.execute(request).await?;
        decode(path, &response)
    }

    /// GET a resource, returning the raw response.
    pub async fn get_raw(&self, path: &str, query: &[(&str, &str)]) -> ApiResult<HttpResponse> {
        let mut request = HttpRequest::new(Method::Get, path);
        for (key, value) in query {
            request = request.query(*key, *value);
        }
        self.execute(request).await
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self.send_json(Method::Post, path, body).await?;
        decode(path, &response)
    }

    /// POST a JSON body, ignoring the response body.
    pub async fn post_json_unit<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<()> {
        self.send_json(Method::Post, path, body).await.map(|_| ())
    }

    /// POST with no body, ignoring the response body.
    pub async fn post_empty(&self, path: &str) -> ApiResult<()> {
        self.execute(HttpRequest::new(Method::Post, path))
            .await
            .map(|_| ())
    }

    /// PUT a JSON body and decode the JSON response.
    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self.send_json(Method::Put, path, body).await?;
        decode(path, &response)
    }

    /// DELETE a resource.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.execute(HttpRequest::new(Method::Delete, path))
            .await
            .map(|_| ())
    }

    /// POST a multipart form, reporting upload progress.
    pub async fn upload(
        &self,
        path: &str,
        form: MultipartForm,
        on_progress: Option<ProgressFn>,
    ) -> ApiResult<HttpResponse> {
        let request =
            HttpRequest::new(Method::Post, path).body(RequestBody::Multipart(form));
        tracing::debug!(path = %path, "starting upload");

        let response = self.transport.upload(request, on_progress).await?;
        check_status(Method::Post, path, response)
    }

    async fn send_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<HttpResponse> {
        let value =
            serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.execute(HttpRequest::new(method, path).body(RequestBody::Json(value)))
            .await
    }
}

fn check_status(method: Method, path: &str, response: HttpResponse) -> ApiResult<HttpResponse> {
    if response.is_success() {
        return Ok(response);
    }
    tracing::debug!(%method, path = %path, status = response.status, "backend returned error status");
    Err(ApiError::Status {
        status: response.status,
        body: String::from_utf8_lossy(&response.body).into_owned(),
    })
}

/// Decode a JSON response body.
pub(crate) fn decode<T: DeserializeOwned>(path: &str, response: &HttpResponse) -> ApiResult<T> {
    serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::FileHandle;
    use crate::http::mock::MockTransport;
    use serde_json::json;

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Thing {
        name: String,
    }

    fn client(mock: MockTransport) -> (HttpClient, Arc<MockTransport>) {
        let mock = Arc::new(mock);
        (HttpClient::new(mock.clone()), mock)
    }

    #[tokio::test]
    async fn test_get_json_decodes_and_passes_query() {
        let (client, mock) = client(MockTransport::new().respond_json(
            Method::Get,
            "/things",
            200,
            json!({"name": "a"}),
        ));

        let thing: Thing = client.get_json("/things", &[("q", "x")]).await.unwrap();

        assert_eq!(thing.name, "a");
        assert_eq!(mock.last_request().unwrap().query_param("q"), Some("x"));
    }

    #[tokio::test]
    async fn test_error_status_mapped() {
        let (client, _) = client(MockTransport::new().respond_json(
            Method::Get,
            "/things",
            403,
            json!({"message": "forbidden"}),
        ));

        let err = client.get_json::<Thing>("/things", &[]).await.unwrap_err();

        assert_eq!(err.status(), Some(403));
        assert!(matches!(err, ApiError::Status { ref body, .. } if body.contains("forbidden")));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_decode_error() {
        let (client, _) = client(MockTransport::new().respond_json(
            Method::Get,
            "/things",
            200,
            json!([1, 2, 3]),
        ));

        let err = client.get_json::<Thing>("/things", &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { ref path, .. } if path == "/things"));
    }

    #[tokio::test]
    async fn test_post_json_sends_body() {
        let (client, mock) = client(MockTransport::new().respond_json(
            Method::Post,
            "/things",
            201,
            json!({"name": "created"}),
        ));

        let created: Thing = client
            .post_json("/things", &json!({"name": "created"}))
            .await
            .unwrap();

        assert_eq!(created.name, "created");
        let request = mock.last_request().unwrap();
        assert_eq!(request.body, RequestBody::Json(json!({"name": "created"})));
    }

    #[tokio::test]
    async fn test_upload_reports_progress_and_status() {
        let (client, _) = client(
            MockTransport::new()
                .with_progress(vec![(50, 100), (100, 100)])
                .respond_upload("big.pdf", Ok(HttpResponse::empty(413))),
        );
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = seen.clone();
        let progress: ProgressFn = Arc::new(move |loaded, total| sink.lock().push((loaded, total)));

        let form = MultipartForm::new(FileHandle::new("big.pdf", vec![0u8; 100]));
        let err = client
            .upload("/upload", form, Some(progress))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(413));
        assert_eq!(*seen.lock(), vec![(50, 100), (100, 100)]);
    }
}
