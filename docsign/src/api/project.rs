use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::http::HttpClient;
use crate::model::{NewProject, Project, ProjectStatus, ProjectWithRelations, QrCode, QrFormat};

const INCLUDE_RELATIONS: (&str, &str) = ("includeRelations", "true");

/// Project endpoints.
#[derive(Clone)]
pub struct ProjectClient {
    http: HttpClient,
}

#[derive(Serialize)]
struct StatusUpdate {
    status: ProjectStatus,
}

/// Shapes accepted for a data-URL QR response.
#[derive(Deserialize)]
#[serde(untagged)]
enum DataUrlBody {
    Plain(String),
    Wrapped {
        #[serde(alias = "data_url", alias = "url", alias = "qr", rename = "dataUrl")]
        data_url: String,
    },
}

impl ProjectClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Projects owned by the signed-in user, with files and signers.
    ///
    /// A `null` body is treated as no projects.
    #[tracing::instrument(skip(self))]
    pub async fn list_own(&self) -> ApiResult<Vec<ProjectWithRelations>> {
        let projects: Option<Vec<ProjectWithRelations>> = self
            .http
            .get_json("/projects/owner/me", &[INCLUDE_RELATIONS])
            .await?;
        Ok(projects.unwrap_or_default())
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i64) -> ApiResult<ProjectWithRelations> {
        self.http
            .get_json(&format!("/projects/{}", id), &[INCLUDE_RELATIONS])
            .await
    }

    /// Look a project up by its share code.
    #[tracing::instrument(skip(self))]
    pub async fn get_by_code(&self, code: &str) -> ApiResult<ProjectWithRelations> {
        let path = format!("/projects/code/{}", urlencoding::encode(code));
        self.http.get_json(&path, &[INCLUDE_RELATIONS]).await
    }

    /// Fetch the project's QR code as a PNG image or a data URL.
    #[tracing::instrument(skip(self))]
    pub async fn qr(&self, id: i64, format: QrFormat, scale: u32) -> ApiResult<QrCode> {
        let path = format!("/projects/{}/qr", id);
        let scale = scale.to_string();
        let response = self
            .http
            .get_raw(&path, &[("format", format.as_str()), ("scale", &scale)])
            .await?;

        match format {
            QrFormat::Png => Ok(QrCode::Png(response.body)),
            QrFormat::DataUrl => {
                if !response.is_json() && response.body.starts_with(b"data:") {
                    return Ok(QrCode::DataUrl(
                        String::from_utf8_lossy(&response.body).into_owned(),
                    ));
                }
                let body: DataUrlBody =
                    serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode {
                        path: path.clone(),
                        reason: e.to_string(),
                    })?;
                let url = match body {
                    DataUrlBody::Plain(url) => url,
                    DataUrlBody::Wrapped { data_url } => data_url,
                };
                Ok(QrCode::DataUrl(url))
            }
        }
    }

    #[tracing::instrument(skip(self, project), fields(name = %project.projects_name))]
    pub async fn create(&self, project: &NewProject) -> ApiResult<Project> {
        self.http.post_json("/projects", project).await
    }

    /// Create an uploaded-document project in draft status.
    pub async fn create_draft(&self, name: &str, number: Option<&str>) -> ApiResult<Project> {
        self.create(&new_project(name, number, ProjectStatus::Draft))
            .await
    }

    /// Create an uploaded-document project that is immediately active.
    pub async fn create_active(&self, name: &str, number: Option<&str>) -> ApiResult<Project> {
        self.create(&new_project(name, number, ProjectStatus::Active))
            .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, id: i64, status: ProjectStatus) -> ApiResult<Project> {
        self.http
            .put_json(&format!("/projects/{}", id), &StatusUpdate { status })
            .await
    }
}

fn new_project(name: &str, number: Option<&str>, status: ProjectStatus) -> NewProject {
    let project = NewProject::uploaded(name, status);
    match number {
        Some(number) => project.with_number(number),
        None => project,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockTransport;
    use crate::http::{HttpResponse, Method, RequestBody};
    use serde_json::json;
    use std::sync::Arc;

    fn project_json(status: &str) -> serde_json::Value {
        json!({
            "id": 12,
            "projectName": "Annual report",
            "projectCode": "X9Y8",
            "ownerId": 1,
            "type": "uploaded",
            "status": status,
            "createdAt": "2025-03-01T10:00:00.000Z"
        })
    }

    fn client(mock: MockTransport) -> (ProjectClient, Arc<MockTransport>) {
        let mock = Arc::new(mock);
        (ProjectClient::new(HttpClient::new(mock.clone())), mock)
    }

    #[tokio::test]
    async fn test_list_own_includes_relations() {
        let (projects, mock) = client(MockTransport::new().respond_json(
            Method::Get,
            "/projects/owner/me",
            200,
            json!([project_json("draft")]),
        ));

        let list = projects.list_own().await.unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(
            mock.last_request().unwrap().query_param("includeRelations"),
            Some("true")
        );
    }

    #[tokio::test]
    async fn test_get_by_code_encodes_code() {
        let (projects, mock) = client(MockTransport::new().respond_json(
            Method::Get,
            "/projects/code/A%2FB",
            200,
            project_json("active"),
        ));

        let project = projects.get_by_code("A/B").await.unwrap();

        assert_eq!(project.project.status, ProjectStatus::Active);
        assert_eq!(mock.last_request().unwrap().path, "/projects/code/A%2FB");
    }

    #[tokio::test]
    async fn test_create_draft_body() {
        let (projects, mock) = client(MockTransport::new().respond_json(
            Method::Post,
            "/projects",
            201,
            project_json("draft"),
        ));

        projects.create_draft("Annual report", Some("AR-1")).await.unwrap();

        assert_eq!(
            mock.last_request().unwrap().body,
            RequestBody::Json(json!({
                "projectsName": "Annual report",
                "projectNumber": "AR-1",
                "type": "uploaded",
                "status": "draft"
            }))
        );
    }

    #[tokio::test]
    async fn test_update_status_puts() {
        let (projects, mock) = client(MockTransport::new().respond_json(
            Method::Put,
            "/projects/12",
            200,
            project_json("archived"),
        ));

        let project = projects
            .update_status(12, ProjectStatus::Archived)
            .await
            .unwrap();

        assert_eq!(project.status, ProjectStatus::Archived);
        assert_eq!(
            mock.last_request().unwrap().body,
            RequestBody::Json(json!({"status": "archived"}))
        );
    }

    #[tokio::test]
    async fn test_qr_png_returns_bytes() {
        let (projects, mock) = client(MockTransport::new().respond(
            Method::Get,
            "/projects/12/qr",
            Ok(HttpResponse::bytes(200, "image/png", vec![0x89, b'P', b'N', b'G'])),
        ));

        let qr = projects.qr(12, QrFormat::Png, 4).await.unwrap();

        assert!(matches!(qr, QrCode::Png(ref bytes) if bytes.starts_with(&[0x89])));
        let request = mock.last_request().unwrap();
        assert_eq!(request.query_param("format"), Some("png"));
        assert_eq!(request.query_param("scale"), Some("4"));
    }

    #[tokio::test]
    async fn test_qr_data_url_shapes() {
        let (projects, _) = client(MockTransport::new().respond_json(
            Method::Get,
            "/projects/12/qr",
            200,
            json!({"dataUrl": "data:image/png;base64,AAAA"}),
        ));
        let qr = projects.qr(12, QrFormat::DataUrl, 2).await.unwrap();
        assert_eq!(qr, QrCode::DataUrl("data:image/png;base64,AAAA".to_string()));

        let (projects, _) = client(MockTransport::new().respond_json(
            Method::Get,
            "/projects/12/qr",
            200,
            json!("data:image/png;base64,BBBB"),
        ));
        let qr = projects.qr(12, QrFormat::DataUrl, 2).await.unwrap();
        assert_eq!(qr, QrCode::DataUrl("data:image/png;base64,BBBB".to_string()));
    }

    #[tokio::test]
    async fn test_get_missing_project_is_status_error() {
        let (projects, _) = client(MockTransport::new());
        let err = projects.get(99).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
