use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{error::AppError, feed::store, response::ApiResponse};

/// Get a user's personalized stream
/// GET /user/:user_id/stream
pub async fn get_stream(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let photos = store::get_stream(&pool, user_id).await?;

    Ok(ApiResponse::success(photos))
}

/// Get a user's profile with aggregates
/// GET /user/:user_id
pub async fn get_user_profile(
    State(pool): State<SqlitePool>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let profile = store::get_user_profile(&pool, user_id).await?;

    Ok(ApiResponse::success(profile))
}
