use chrono::Utc;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{NewUser, Session, UserRecord},
    services::user_store::UserStore,
    session::SessionStore,
};

/// Registration and sign-in against the user store
///
/// The store only supports lookups by email, so credentials are checked
/// client-side against the record it returns.
pub struct AuthService {
    store: Arc<dyn UserStore>,
    sessions: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, sessions: Arc<SessionStore>) -> Self {
        Self { store, sessions }
    }

    /// Creates an account unless the email is already registered
    pub async fn register(&self, mut user: NewUser) -> AppResult<UserRecord> {
        if user.email.trim().is_empty() || user.password.is_empty() {
            return Err(AppError::InvalidInput(
                "Email and password are required".to_string(),
            ));
        }

        let existing = self.store.find_by_email(&user.email).await?;
        if !existing.is_empty() {
            return Err(AppError::Conflict(format!(
                "Email {} is already registered",
                user.email
            )));
        }

        user.created_at = Some(Utc::now());
        let created = self.store.create_user(&user).await?;

        tracing::info!(user_id = %created.id, "User registered");

        Ok(created)
    }

    /// Checks credentials and starts a session
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AppError::InvalidInput(
                "Email and password are required".to_string(),
            ));
        }

        let user = self
            .store
            .find_by_email(email)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Unauthorized("Email does not exist".to_string()))?;

        if user.password != password {
            tracing::info!(user_id = %user.id, "Login rejected");
            return Err(AppError::Unauthorized("Wrong password".to_string()));
        }

        let session = Session::for_user(&user);
        self.sessions.sign_in(session.clone()).await?;

        Ok(session)
    }

    /// Ends the current session
    pub async fn logout(&self) -> AppResult<()> {
        self.sessions.sign_out().await
    }
}
