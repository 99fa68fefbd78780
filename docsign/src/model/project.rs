//! Project, project file and signer records.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Draft,
    Active,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            other => Err(format!("unknown project status '{}'", other)),
        }
    }
}

/// How a project's documents were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Uploaded,
    Generated,
}

/// Signing state of one signer on one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureStatus {
    Pending,
    Signed,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub project_name: String,
    pub project_code: String,
    pub owner_id: i64,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub status: ProjectStatus,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub id: i64,
    pub project_id: i64,
    pub file_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

/// A user assigned to sign a stored project file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSigner {
    pub id: i64,
    pub project_file_id: i64,
    pub signer_user_id: i64,
    pub position: u32,
    pub user_name: String,
    pub user_email: String,
    pub signature_status: SignatureStatus,
    #[serde(default)]
    pub signed_at: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub total_files: u32,
    pub total_signers: u32,
    pub signature_completed: u32,
}

/// A project together with its files, signers and summary counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectWithRelations {
    #[serde(flatten)]
    pub project: Project,
    #[serde(default)]
    pub files: Vec<ProjectFile>,
    #[serde(default)]
    pub signers: Vec<ProjectSigner>,
    #[serde(default)]
    pub summary: ProjectSummary,
}

/// Body for `POST /projects`.
///
/// The backend expects the plural `projectsName` key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub projects_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_number: Option<String>,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub status: ProjectStatus,
}

impl NewProject {
    /// An uploaded-document project in the given status.
    pub fn uploaded(name: impl Into<String>, status: ProjectStatus) -> Self {
        Self {
            projects_name: name.into(),
            project_number: None,
            project_type: ProjectType::Uploaded,
            status,
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.project_number = Some(number.into());
        self
    }
}

/// Output format requested from the project QR endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrFormat {
    Png,
    DataUrl,
}

impl QrFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::DataUrl => "dataurl",
        }
    }
}

impl FromStr for QrFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "dataurl" | "data-url" | "data_url" => Ok(Self::DataUrl),
            other => Err(format!("unknown QR format '{}'", other)),
        }
    }
}

/// A project QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrCode {
    /// Raw PNG image bytes.
    Png(Bytes),
    /// A `data:image/png;base64,...` URL.
    DataUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project_json() -> serde_json::Value {
        json!({
            "id": 7,
            "projectName": "Budget 2025",
            "projectCode": "AB12CD",
            "ownerId": 3,
            "type": "uploaded",
            "status": "draft",
            "createdAt": "2025-01-01T00:00:00.000Z",
            "updatedAt": null,
            "deletedAt": null
        })
    }

    #[test]
    fn test_project_deserializes() {
        let project: Project = serde_json::from_value(project_json()).unwrap();
        assert_eq!(project.project_code, "AB12CD");
        assert_eq!(project.project_type, ProjectType::Uploaded);
        assert_eq!(project.status, ProjectStatus::Draft);
        assert!(project.updated_at.is_none());
    }

    #[test]
    fn test_project_with_relations_flattens() {
        let mut value = project_json();
        value["files"] = json!([{
            "id": 1,
            "projectId": 7,
            "fileName": "a.pdf",
            "description": null,
            "createdAt": "2025-01-01T00:00:00.000Z"
        }]);
        value["signers"] = json!([{
            "id": 2,
            "projectFileId": 1,
            "signerUserId": 9,
            "position": 1,
            "userName": "Ann",
            "userEmail": "ann@example.com",
            "signatureStatus": "signed",
            "signedAt": "2025-01-02T00:00:00.000Z",
            "createdAt": "2025-01-01T00:00:00.000Z"
        }]);
        value["summary"] = json!({"totalFiles": 1, "totalSigners": 1, "signatureCompleted": 1});

        let full: ProjectWithRelations = serde_json::from_value(value).unwrap();
        assert_eq!(full.project.id, 7);
        assert_eq!(full.files[0].file_name, "a.pdf");
        assert_eq!(full.signers[0].signature_status, SignatureStatus::Signed);
        assert_eq!(full.summary.signature_completed, 1);
    }

    #[test]
    fn test_relations_default_when_absent() {
        let full: ProjectWithRelations = serde_json::from_value(project_json()).unwrap();
        assert!(full.files.is_empty());
        assert_eq!(full.summary, ProjectSummary::default());
    }

    #[test]
    fn test_new_project_body() {
        let body = serde_json::to_value(NewProject::uploaded("Q1", ProjectStatus::Draft)).unwrap();
        assert_eq!(
            body,
            json!({"projectsName": "Q1", "type": "uploaded", "status": "draft"})
        );

        let body = serde_json::to_value(
            NewProject::uploaded("Q1", ProjectStatus::Active).with_number("2025-001"),
        )
        .unwrap();
        assert_eq!(body["projectNumber"], "2025-001");
        assert_eq!(body["status"], "active");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Active".parse::<ProjectStatus>(), Ok(ProjectStatus::Active));
        assert!("closed".parse::<ProjectStatus>().is_err());
        assert_eq!("data-url".parse::<QrFormat>(), Ok(QrFormat::DataUrl));
    }
}
