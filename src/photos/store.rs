use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::photos::Photo;

/// Inserts a photo row with a zeroed like counter and returns it with its
/// assigned id. The caller supplies the content uuid, the stored image
/// locator and the creation time.
pub async fn create_photo(
    pool: &SqlitePool,
    owner_id: i64,
    uuid: &str,
    photo_url: &str,
    date: DateTime<Utc>,
) -> Result<Photo, AppError> {
    let result =
        sqlx::query("INSERT INTO photos (uuid, date, user_id, likes, photo_url) VALUES (?, ?, ?, 0, ?)")
            .bind(uuid)
            .bind(date)
            .bind(owner_id)
            .bind(photo_url)
            .execute(pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create photo: {:?}", e);
                AppError::InternalServerError
            })?;

    Ok(Photo {
        id: result.last_insert_rowid(),
        uuid: uuid.to_string(),
        date,
        user_id: owner_id,
        likes: 0,
        photo_url: photo_url.to_string(),
    })
}

/// Looks a photo up by owner and id. Ownership is part of the lookup key:
/// a photo id alone never resolves.
pub async fn get_photo(pool: &SqlitePool, owner_id: i64, photo_id: i64) -> Result<Photo, AppError> {
    sqlx::query_as::<_, Photo>(
        "SELECT id, uuid, date, user_id, likes, photo_url FROM photos WHERE user_id = ? AND id = ?",
    )
    .bind(owner_id)
    .bind(photo_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch photo: {:?}", e);
        AppError::InternalServerError
    })?
    .ok_or(AppError::NotFound("Photo not found".to_string()))
}

/// Deletes the photo row scoped by owner and id. Deleting a row that does
/// not exist is a no-op; the image file is the caller's business.
pub async fn delete_photo(
    pool: &SqlitePool,
    owner_id: i64,
    photo_id: i64,
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM photos WHERE user_id = ? AND id = ?")
        .bind(owner_id)
        .bind(photo_id)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete photo: {:?}", e);
            AppError::InternalServerError
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::users::store::create_user;

    #[tokio::test]
    async fn create_and_get_roundtrip() {
        let pool = test_pool().await;
        let alice = create_user(&pool, "alice").await.unwrap();

        let created = create_photo(&pool, alice.id, "uuid-1", "images/1/uuid-1.jpg", Utc::now())
            .await
            .unwrap();
        assert_eq!(created.likes, 0);

        let fetched = get_photo(&pool, alice.id, created.id).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.uuid, "uuid-1");
        assert_eq!(fetched.photo_url, "images/1/uuid-1.jpg");
        assert_eq!(fetched.user_id, alice.id);
    }

    #[tokio::test]
    async fn get_is_scoped_by_owner() {
        let pool = test_pool().await;
        let alice = create_user(&pool, "alice").await.unwrap();
        let bob = create_user(&pool, "bob").await.unwrap();

        let photo = create_photo(&pool, alice.id, "uuid-1", "images/1/a.jpg", Utc::now())
            .await
            .unwrap();

        let err = get_photo(&pool, bob.id, photo.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let pool = test_pool().await;
        let alice = create_user(&pool, "alice").await.unwrap();

        let photo = create_photo(&pool, alice.id, "uuid-1", "images/1/a.jpg", Utc::now())
            .await
            .unwrap();

        delete_photo(&pool, alice.id, photo.id).await.unwrap();

        let err = get_photo(&pool, alice.id, photo.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        // A second delete is a silent no-op.
        delete_photo(&pool, alice.id, photo.id).await.unwrap();
    }
}
