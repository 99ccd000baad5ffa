use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    interactions::{store, CommentRequest, LikeActionResponse},
    response::ApiResponse,
};

/// Like a photo
/// PUT /photo/:photo_id/like/:user_id
pub async fn like_photo(
    State(pool): State<SqlitePool>,
    Path((photo_id, user_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let likes = store::like_photo(&pool, user_id, photo_id).await?;

    Ok(ApiResponse::success(LikeActionResponse { liked: true, likes }))
}

/// Remove a like from a photo
/// DELETE /photo/:photo_id/like/:user_id
pub async fn unlike_photo(
    State(pool): State<SqlitePool>,
    Path((photo_id, user_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let likes = store::unlike_photo(&pool, user_id, photo_id).await?;

    Ok(ApiResponse::success(LikeActionResponse {
        liked: false,
        likes,
    }))
}

/// Comment on a photo
/// POST /photo/:photo_id/comments/:user_id
pub async fn comment_photo(
    State(pool): State<SqlitePool>,
    Path((photo_id, user_id)): Path<(i64, i64)>,
    Json(payload): Json<CommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let comment = store::comment_photo(&pool, user_id, photo_id, &payload.text).await?;

    Ok(ApiResponse::success(comment).created())
}

/// Delete a comment
/// DELETE /photo/:photo_id/comments/:user_id/:comment_id
pub async fn uncomment_photo(
    State(pool): State<SqlitePool>,
    Path((photo_id, user_id, comment_id)): Path<(i64, i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    store::delete_comment(&pool, comment_id, user_id, photo_id).await?;

    Ok(ApiResponse::ok("Comment deleted".to_string()))
}
