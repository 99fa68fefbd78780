//! Server-side page data loaders.
//!
//! Each loader forwards the incoming request's cookie header to the backend
//! and never fails: any error is logged and replaced by empty or default
//! data so the page still renders.

use serde::Serialize;

use crate::api::{AuthClient, ProjectClient, UserClient};
use crate::config::ClientConfig;
use crate::error::ConfigError;
use crate::http::HttpClient;
use crate::model::{ProjectWithRelations, SessionUser, UserCount};

/// Builds a client that forwards the given cookie header.
pub trait Connect: Send + Sync {
    fn connect(&self, cookie: Option<&str>) -> Result<HttpClient, ConfigError>;
}

impl Connect for ClientConfig {
    fn connect(&self, cookie: Option<&str>) -> Result<HttpClient, ConfigError> {
        let mut config = self.clone();
        config.session_cookie = cookie.filter(|c| !c.is_empty()).map(str::to_string);
        HttpClient::from_config(config)
    }
}

/// Admin dashboard data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardData {
    pub count: UserCount,
    /// True when the count could not be loaded.
    pub error: bool,
    /// HTTP status of the failed request, when the backend answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// The signed-in user, or `None` when there is no valid session.
pub async fn load_session_user(connect: &dyn Connect, cookie: Option<&str>) -> Option<SessionUser> {
    let http = connected(connect, cookie)?;
    match AuthClient::new(http).me().await {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::warn!(error = %e, "failed to load session user");
            None
        }
    }
}

/// Projects owned by the signed-in user, empty on any failure.
pub async fn load_owned_projects(
    connect: &dyn Connect,
    cookie: Option<&str>,
) -> Vec<ProjectWithRelations> {
    let Some(http) = connected(connect, cookie) else {
        return Vec::new();
    };
    match ProjectClient::new(http).list_own().await {
        Ok(projects) => projects,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load owned projects");
            Vec::new()
        }
    }
}

/// User counts per role, zeroed with `error` set on any failure.
pub async fn load_user_count(connect: &dyn Connect, cookie: Option<&str>) -> DashboardData {
    let Some(http) = connected(connect, cookie) else {
        return DashboardData {
            error: true,
            ..DashboardData::default()
        };
    };
    match UserClient::new(http).count_users().await {
        Ok(count) => DashboardData {
            count,
            error: false,
            status: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, "failed to load user count");
            DashboardData {
                count: UserCount::default(),
                error: true,
                status: e.status(),
            }
        }
    }
}

fn connected(connect: &dyn Connect, cookie: Option<&str>) -> Option<HttpClient> {
    connect
        .connect(cookie)
        .inspect_err(|e| tracing::warn!(error = %e, "failed to build backend client"))
        .ok()
}
