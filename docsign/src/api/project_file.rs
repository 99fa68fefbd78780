use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;

use crate::error::ApiResult;
use crate::file::FileHandle;
use crate::http::{HttpClient, HttpResponse, MultipartForm, ProgressFn};
use crate::model::ProjectSigner;

/// Endpoint accepting multipart project file uploads.
pub const UPLOAD_PATH: &str = "/documents/projects/files/upload";

/// Project file, signer and signature endpoints.
#[derive(Clone)]
pub struct ProjectFileClient {
    http: HttpClient,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewFileSigner {
    project_file_id: i64,
    signer_user_id: i64,
    position: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewFileSignature {
    project_file_id: i64,
    signer_user_id: i64,
}

impl ProjectFileClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Upload a file into a project.
    ///
    /// `on_progress` receives the completed percentage (0-100) whenever the
    /// transport reports progress with a known total.
    #[tracing::instrument(skip(self, file, on_progress), fields(file = %file.name()))]
    pub async fn upload_project_file<F>(
        &self,
        projects_id: i64,
        file: FileHandle,
        description: &str,
        on_progress: Option<F>,
    ) -> ApiResult<HttpResponse>
    where
        F: Fn(u8) + Send + Sync + 'static,
    {
        let form = MultipartForm::new(file)
            .text("projectsId", projects_id.to_string())
            .text("description", description);

        let progress: Option<ProgressFn> = on_progress.map(|cb| {
            Arc::new(move |loaded: u64, total: u64| {
                if let Some(percent) = percent_of(loaded, total) {
                    cb(percent);
                }
            }) as ProgressFn
        });

        self.http.upload(UPLOAD_PATH, form, progress).await
    }

    /// Assign a user to sign a stored file at the given position.
    #[tracing::instrument(skip(self))]
    pub async fn create_file_signer(
        &self,
        project_file_id: i64,
        signer_user_id: i64,
        position: u32,
    ) -> ApiResult<ProjectSigner> {
        self.http
            .post_json(
                "/documents/signers",
                &NewFileSigner {
                    project_file_id,
                    signer_user_id,
                    position,
                },
            )
            .await
    }

    /// Record a signature by a user on a stored file.
    #[tracing::instrument(skip(self))]
    pub async fn create_file_signature(
        &self,
        project_file_id: i64,
        signer_user_id: i64,
    ) -> ApiResult<()> {
        self.http
            .post_json_unit(
                "/documents/signatures",
                &NewFileSignature {
                    project_file_id,
                    signer_user_id,
                },
            )
            .await
    }

    /// Download a stored file's content.
    #[tracing::instrument(skip(self))]
    pub async fn download_project_file(&self, file_id: i64) -> ApiResult<Bytes> {
        let response = self
            .http
            .get_raw(&format!("/documents/files/{}/download", file_id), &[])
            .await?;
        Ok(response.body)
    }

    /// Permanently delete a stored file.
    #[tracing::instrument(skip(self))]
    pub async fn delete_project_file(&self, file_id: i64) -> ApiResult<()> {
        self.http
            .delete(&format!("/documents/files/{}/hard", file_id))
            .await
    }
}

/// Percentage of `loaded` over `total`, rounded; `None` when the total is unknown.
pub(crate) fn percent_of(loaded: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let percent = ((loaded as f64 / total as f64) * 100.0).round();
    Some(percent.clamp(0.0, 100.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockTransport;
    use crate::http::{Method, RequestBody};
    use parking_lot::Mutex;
    use serde_json::json;

    fn client(mock: MockTransport) -> (ProjectFileClient, Arc<MockTransport>) {
        let mock = Arc::new(mock);
        (ProjectFileClient::new(HttpClient::new(mock.clone())), mock)
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(0, 0), None);
        assert_eq!(percent_of(1, 3), Some(33));
        assert_eq!(percent_of(2, 3), Some(67));
        assert_eq!(percent_of(10, 10), Some(100));
        assert_eq!(percent_of(20, 10), Some(100));
    }

    #[tokio::test]
    async fn test_upload_sends_form_fields() {
        let (files, mock) = client(MockTransport::new().with_progress(vec![(1, 4), (4, 4)]));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        files
            .upload_project_file(
                5,
                FileHandle::new("minutes.pdf", vec![0u8; 4]),
                "March minutes",
                Some(move |p| sink.lock().push(p)),
            )
            .await
            .unwrap();

        assert_eq!(*seen.lock(), vec![25, 100]);
        let request = mock.last_request().unwrap();
        assert_eq!(request.path, UPLOAD_PATH);
        match request.body {
            RequestBody::Multipart(form) => {
                assert_eq!(form.file_field, "file");
                assert_eq!(form.file.name(), "minutes.pdf");
                assert_eq!(form.field("projectsId"), Some("5"));
                assert_eq!(form.field("description"), Some("March minutes"));
            }
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_file_signer() {
        let (files, mock) = client(MockTransport::new().respond_json(
            Method::Post,
            "/documents/signers",
            201,
            json!({
                "id": 30,
                "projectFileId": 8,
                "signerUserId": 2,
                "position": 1,
                "userName": "Ann",
                "userEmail": "ann@example.com",
                "signatureStatus": "pending",
                "signedAt": null,
                "createdAt": "2025-03-01T10:00:00.000Z"
            }),
        ));

        let signer = files.create_file_signer(8, 2, 1).await.unwrap();

        assert_eq!(signer.id, 30);
        assert_eq!(
            mock.last_request().unwrap().body,
            RequestBody::Json(json!({"projectFileId": 8, "signerUserId": 2, "position": 1}))
        );
    }

    #[tokio::test]
    async fn test_create_file_signature() {
        let (files, mock) = client(MockTransport::new().respond(
            Method::Post,
            "/documents/signatures",
            Ok(HttpResponse::empty(201)),
        ));

        files.create_file_signature(8, 2).await.unwrap();
        assert_eq!(
            mock.last_request().unwrap().body,
            RequestBody::Json(json!({"projectFileId": 8, "signerUserId": 2}))
        );
    }

    #[tokio::test]
    async fn test_download_and_delete() {
        let (files, mock) = client(
            MockTransport::new()
                .respond(
                    Method::Get,
                    "/documents/files/8/download",
                    Ok(HttpResponse::bytes(200, "application/pdf", b"%PDF-1.7".to_vec())),
                )
                .respond(
                    Method::Delete,
                    "/documents/files/8/hard",
                    Ok(HttpResponse::empty(204)),
                ),
        );

        let content = files.download_project_file(8).await.unwrap();
        assert_eq!(content.as_ref(), b"%PDF-1.7");

        files.delete_project_file(8).await.unwrap();
        assert_eq!(mock.last_request().unwrap().method, Method::Delete);
    }
}
