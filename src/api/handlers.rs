use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{NewUser, UserId, UserPatch, UserRecord},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct UserFilter {
    pub email: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// List users, optionally filtered by exact email
pub async fn list_users(
    State(state): State<AppState>,
    Query(filter): Query<UserFilter>,
) -> Json<Vec<UserRecord>> {
    let inner = state.inner.read().await;
    let users = inner
        .users
        .values()
        .filter(|user| match &filter.email {
            Some(email) => &user.email == email,
            None => true,
        })
        .cloned()
        .collect();
    Json(users)
}

/// Get one user
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
) -> AppResult<Json<UserRecord>> {
    let inner = state.inner.read().await;
    inner
        .users
        .get(&UserId(user_id))
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))
}

/// Create a user
pub async fn create_user(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<NewUser>,
) -> AppResult<(StatusCode, Json<UserRecord>)> {
    if request.email.trim().is_empty() {
        return Err(AppError::InvalidInput("Email is required".to_string()));
    }

    let mut inner = state.inner.write().await;
    let user = UserRecord {
        id: inner.allocate_id(),
        full_name: request.full_name,
        email: request.email,
        password: request.password,
        favorites: request.favorites,
        created_at: request.created_at,
    };
    inner.users.insert(user.id, user.clone());

    tracing::info!(request_id = %request_id, user_id = %user.id, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Replace the fields present in the body
pub async fn patch_user(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<u64>,
    Json(patch): Json<UserPatch>,
) -> AppResult<Json<UserRecord>> {
    let mut inner = state.inner.write().await;
    let user = inner
        .users
        .get_mut(&UserId(user_id))
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

    let favorites = patch.favorites.as_ref().map(Vec::len);
    patch.apply_to(user);

    tracing::info!(
        request_id = %request_id,
        user_id = %user.id,
        favorites = ?favorites,
        "User updated"
    );

    Ok(Json(user.clone()))
}
