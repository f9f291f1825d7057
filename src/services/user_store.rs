/// Client for the user-account service
///
/// The service is a plain REST store of user records:
/// - `GET /users/{id}` and `PATCH /users/{id}` for one record
/// - `GET /users?email=` and `POST /users` for the authentication flow
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{ItemId, NewUser, UserId, UserPatch, UserRecord},
};
use reqwest::{Client as HttpClient, Response, StatusCode};

/// Read/write access to user records
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Fetches one user record
    async fn get_user(&self, user_id: UserId) -> AppResult<UserRecord>;

    /// Replaces the user's favorites field with exactly `favorites`
    async fn replace_favorites(&self, user_id: UserId, favorites: &[ItemId]) -> AppResult<()>;

    /// Lists the users registered with an email address
    async fn find_by_email(&self, email: &str) -> AppResult<Vec<UserRecord>>;

    /// Creates a user record
    async fn create_user(&self, user: &NewUser) -> AppResult<UserRecord>;
}

#[derive(Clone)]
pub struct HttpUserStore {
    http_client: HttpClient,
    base_url: String,
}

impl HttpUserStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.user_store_url.as_str())
    }

    fn user_url(&self, user_id: UserId) -> String {
        format!("{}/users/{}", self.base_url, user_id)
    }

    /// Turns a non-2xx response into an error
    async fn check_status(response: Response, what: &str) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("{}: {}", what, body)));
        }

        Err(AppError::ExternalApi(format!(
            "User store returned status {} for {}: {}",
            status, what, body
        )))
    }
}

#[async_trait::async_trait]
impl UserStore for HttpUserStore {
    async fn get_user(&self, user_id: UserId) -> AppResult<UserRecord> {
        let response = self.http_client.get(self.user_url(user_id)).send().await?;
        let response = Self::check_status(response, &format!("user {}", user_id)).await?;
        Ok(response.json().await?)
    }

    async fn replace_favorites(&self, user_id: UserId, favorites: &[ItemId]) -> AppResult<()> {
        let response = self
            .http_client
            .patch(self.user_url(user_id))
            .json(&UserPatch::favorites(favorites.to_vec()))
            .send()
            .await?;

        Self::check_status(response, &format!("user {}", user_id)).await?;

        tracing::debug!(
            user_id = %user_id,
            favorites = favorites.len(),
            "Favorites written"
        );

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Vec<UserRecord>> {
        let response = self
            .http_client
            .get(format!("{}/users", self.base_url))
            .query(&[("email", email)])
            .send()
            .await?;

        let response = Self::check_status(response, "email lookup").await?;
        Ok(response.json().await?)
    }

    async fn create_user(&self, user: &NewUser) -> AppResult<UserRecord> {
        let response = self
            .http_client
            .post(format!("{}/users", self.base_url))
            .json(user)
            .send()
            .await?;

        let response = Self::check_status(response, "user creation").await?;
        Ok(response.json().await?)
    }
}
