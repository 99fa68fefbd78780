//! Where document uploads are sent.

use crate::api::UPLOAD_PATH;

/// Upload endpoint plus extra multipart text fields sent with every file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTarget {
    pub endpoint: String,
    pub fields: Vec<(String, String)>,
}

impl UploadTarget {
    /// A target with no extra fields.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            fields: Vec::new(),
        }
    }

    /// The project file upload endpoint for the given project.
    pub fn project_files(projects_id: i64, description: impl Into<String>) -> Self {
        Self::new(UPLOAD_PATH)
            .with_field("projectsId", projects_id.to_string())
            .with_field("description", description)
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

impl Default for UploadTarget {
    fn default() -> Self {
        Self::new(UPLOAD_PATH)
    }
}
