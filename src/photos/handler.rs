use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    error::AppError,
    photos::{storage::ImageStore, store},
    response::ApiResponse,
};

/// Upload a photo (multipart `file` field)
/// POST /user/:user_id/photos
pub async fn upload_photo(
    State(pool): State<SqlitePool>,
    State(images): State<ImageStore>,
    Path(user_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::Validation("Malformed multipart body".to_string()))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("photo").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|_| AppError::Validation("Could not read file field".to_string()))?;
            upload = Some((file_name, bytes));
        }
    }

    let (file_name, bytes) =
        upload.ok_or(AppError::Validation("Missing file field".to_string()))?;

    let image_id = Uuid::new_v4().to_string();
    let unique_name = format!("{}-{}", image_id, file_name);

    let url = images
        .store(user_id, &unique_name, &bytes)
        .await
        .map_err(|e| {
            tracing::error!("Failed to store image file: {:?}", e);
            AppError::InternalServerError
        })?;

    let photo = store::create_photo(&pool, user_id, &image_id, &url, chrono::Utc::now()).await?;

    Ok(ApiResponse::success(photo).created())
}

/// Get a single photo, scoped by its owner
/// GET /user/:user_id/photos/:photo_id
pub async fn get_photo(
    State(pool): State<SqlitePool>,
    Path((user_id, photo_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let photo = store::get_photo(&pool, user_id, photo_id).await?;

    Ok(ApiResponse::success(photo))
}

/// Delete a photo and its stored image
/// DELETE /user/:user_id/photos/:photo_id
pub async fn delete_photo(
    State(pool): State<SqlitePool>,
    State(images): State<ImageStore>,
    Path((user_id, photo_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    let photo = store::get_photo(&pool, user_id, photo_id).await?;

    store::delete_photo(&pool, user_id, photo_id).await?;

    // The row is gone; file removal is best-effort and logged on failure.
    images.remove(&photo.photo_url).await;

    Ok(ApiResponse::ok("Photo deleted".to_string()))
}
