use crate::error::ApiResult;
use crate::http::HttpClient;
use crate::model::{NewUser, User, UserCount};

/// User administration endpoints.
#[derive(Clone)]
pub struct UserClient {
    http: HttpClient,
}

impl UserClient {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    #[tracing::instrument(skip(self, user), fields(email = %user.email))]
    pub async fn create_user(&self, user: &NewUser) -> ApiResult<User> {
        self.http.post_json("/user", user).await
    }

    /// Look a user up by email address.
    #[tracing::instrument(skip(self))]
    pub async fn get_user(&self, email: &str) -> ApiResult<User> {
        self.http.get_json("/user", &[("email", email)]).await
    }

    /// User totals, overall and per role.
    #[tracing::instrument(skip(self))]
    pub async fn count_users(&self) -> ApiResult<UserCount> {
        self.http.get_json("/user/count", &[]).await
    }
}
