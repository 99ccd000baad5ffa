use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    response::ApiResponse,
    users::{self, store, UsernameRequest},
};

/// Create the user identifier for a session.
/// POST /session
pub async fn login(
    State(pool): State<SqlitePool>,
    Json(payload): Json<UsernameRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if !users::is_valid_username(&payload.username) {
        return Err(AppError::Validation("Invalid username".to_string()));
    }

    let user = store::create_user(&pool, &payload.username).await?;

    Ok(ApiResponse::success(user).created())
}

/// Change a user's username
/// PUT /user/:user_id/username
pub async fn set_username(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UsernameRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if !users::is_valid_username(&payload.username) {
        return Err(AppError::Validation("Invalid username".to_string()));
    }

    let user = store::update_user(&pool, user_id, &payload.username).await?;

    Ok(ApiResponse::success(user))
}
