//! Resource clients for the backend REST API.
//!
//! Each client is a stateless wrapper holding a shared [`HttpClient`]; every
//! method maps to exactly one REST call.

mod auth;
mod project;
mod project_file;
mod user;

pub use auth::AuthClient;
pub use project::ProjectClient;
pub(crate) use project_file::percent_of;
pub use project_file::{ProjectFileClient, UPLOAD_PATH};
pub use user::UserClient;

use crate::http::HttpClient;

/// All resource clients over one shared HTTP client.
#[derive(Clone)]
pub struct Api {
    pub auth: AuthClient,
    pub users: UserClient,
    pub projects: ProjectClient,
    pub files: ProjectFileClient,
}

impl Api {
    pub fn new(http: HttpClient) -> Self {
        Self {
            auth: AuthClient::new(http.clone()),
            users: UserClient::new(http.clone()),
            projects: ProjectClient::new(http.clone()),
            files: ProjectFileClient::new(http),
        }
    }
}
