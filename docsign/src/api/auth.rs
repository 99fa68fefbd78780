use crate::error::{ApiError, ApiResult};
use crate::http::HttpClient;
use crate::model::{SessionEnvelope, SessionUser};

/// Session endpoints.
#[derive(Clone)]
pub struct AuthClient {
    http: HttpClient,
}

impl AuthClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// URL the browser is sent to for Google sign-in.
    pub fn login_url(&self) -> String {
        self.http.url_for("/auth/google")
    }

    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> ApiResult<()> {
        self.http.post_empty("/auth/logout").await
    }

    /// The user owning the current session.
    #[tracing::instrument(skip(self))]
    pub async fn me(&self) -> ApiResult<SessionUser> {
        let envelope: SessionEnvelope = self.http.get_json("/auth/me", &[]).await?;
        envelope.user.ok_or_else(|| ApiError::Decode {
            path: "/auth/me".to_string(),
            reason: "response has no user".to_string(),
        })
    }
}
