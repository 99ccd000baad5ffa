use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{error::AppError, graph::store, response::ApiResponse};

/// Follow a user
/// PUT /user/:user_id/following/:followed_id
pub async fn follow_user(
    State(pool): State<SqlitePool>,
    Path((user_id, followed_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    store::follow(&pool, user_id, followed_id).await?;

    Ok(ApiResponse::ok("Now following".to_string()))
}

/// Unfollow a user
/// DELETE /user/:user_id/following/:followed_id
pub async fn unfollow_user(
    State(pool): State<SqlitePool>,
    Path((user_id, followed_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    store::unfollow(&pool, user_id, followed_id).await?;

    Ok(ApiResponse::ok("No longer following".to_string()))
}

/// Ban a user (also removes the follow edge towards them)
/// PUT /user/:user_id/ban/:banned_id
pub async fn ban_user(
    State(pool): State<SqlitePool>,
    Path((user_id, banned_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    store::ban(&pool, user_id, banned_id).await?;

    Ok(ApiResponse::ok("User banned".to_string()))
}

/// Unban a user
/// DELETE /user/:user_id/ban/:banned_id
pub async fn unban_user(
    State(pool): State<SqlitePool>,
    Path((user_id, banned_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    store::unban(&pool, user_id, banned_id).await?;

    Ok(ApiResponse::ok("User unbanned".to_string()))
}
