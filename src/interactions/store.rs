use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::AppError;
use crate::interactions::CommentWithAuthor;

/// Records a like and brings the denormalized counter up to date, as one
/// transaction. A user may hold at most one outstanding like per photo;
/// a second like is a conflict and leaves the counter untouched.
pub async fn like_photo(pool: &SqlitePool, user_id: i64, photo_id: i64) -> Result<i64, AppError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|_| AppError::InternalServerError)?;

    let existing: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE user_id = ? AND photo_id = ?")
            .bind(user_id)
            .bind(photo_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|_| AppError::InternalServerError)?;

    if existing > 0 {
        return Err(AppError::Conflict(
            "The user has already liked this photo".to_string(),
        ));
    }

    sqlx::query("INSERT INTO likes (user_id, photo_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(photo_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert like: {:?}", e);
            AppError::InternalServerError
        })?;

    let likes = recount_likes(&mut tx, photo_id).await?;

    tx.commit()
        .await
        .map_err(|_| AppError::InternalServerError)?;

    Ok(likes)
}

/// Removes a like and brings the counter up to date, as one transaction.
/// Unliking a photo the user never liked is a no-op apart from the recount.
pub async fn unlike_photo(pool: &SqlitePool, user_id: i64, photo_id: i64) -> Result<i64, AppError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|_| AppError::InternalServerError)?;

    sqlx::query("DELETE FROM likes WHERE user_id = ? AND photo_id = ?")
        .bind(user_id)
        .bind(photo_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete like: {:?}", e);
            AppError::InternalServerError
        })?;

    let likes = recount_likes(&mut tx, photo_id).await?;

    tx.commit()
        .await
        .map_err(|_| AppError::InternalServerError)?;

    Ok(likes)
}

/// Recomputes `photos.likes` from the like rows and writes it back. A full
/// recount rather than an increment, so the counter cannot drift when
/// deletes race with inserts.
async fn recount_likes(tx: &mut Transaction<'_, Sqlite>, photo_id: i64) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE photo_id = ?")
        .bind(photo_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|_| AppError::InternalServerError)?;

    sqlx::query("UPDATE photos SET likes = ? WHERE id = ?")
        .bind(count)
        .bind(photo_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to write back like count: {:?}", e);
            AppError::InternalServerError
        })?;

    Ok(count)
}

/// Inserts a comment and returns it enriched with the author's username.
/// The author must exist; the photo's integrity is the schema's business.
pub async fn comment_photo(
    pool: &SqlitePool,
    user_id: i64,
    photo_id: i64,
    text: &str,
) -> Result<CommentWithAuthor, AppError> {
    let username: String = sqlx::query_scalar("SELECT username FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|_| AppError::InternalServerError)?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    let date = chrono::Utc::now();

    let result = sqlx::query("INSERT INTO comments (user_id, photo_id, date, comment) VALUES (?, ?, ?, ?)")
        .bind(user_id)
        .bind(photo_id)
        .bind(date)
        .bind(text)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert comment: {:?}", e);
            AppError::InternalServerError
        })?;

    Ok(CommentWithAuthor {
        id: result.last_insert_rowid(),
        username,
        date,
        text: text.to_string(),
    })
}

/// Deletes a comment scoped by all three keys. No row matching all of them
/// means nothing happens.
pub async fn delete_comment(
    pool: &SqlitePool,
    comment_id: i64,
    user_id: i64,
    photo_id: i64,
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM comments WHERE id = ? AND user_id = ? AND photo_id = ?")
        .bind(comment_id)
        .bind(user_id)
        .bind(photo_id)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete comment: {:?}", e);
            AppError::InternalServerError
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::photos::store::create_photo;
    use crate::users::store::create_user;

    async fn stored_likes(pool: &SqlitePool, photo_id: i64) -> i64 {
        sqlx::query_scalar("SELECT likes FROM photos WHERE id = ?")
            .bind(photo_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn like_rows(pool: &SqlitePool, photo_id: i64) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE photo_id = ?")
            .bind(photo_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn like_counter_follows_like_rows() {
        let pool = test_pool().await;
        let alice = create_user(&pool, "alice").await.unwrap();
        let bob = create_user(&pool, "bob").await.unwrap();
        let photo = create_photo(&pool, bob.id, "u1", "images/b.jpg", chrono::Utc::now())
            .await
            .unwrap();

        assert_eq!(like_photo(&pool, alice.id, photo.id).await.unwrap(), 1);
        assert_eq!(like_photo(&pool, bob.id, photo.id).await.unwrap(), 2);
        assert_eq!(unlike_photo(&pool, alice.id, photo.id).await.unwrap(), 1);

        assert_eq!(stored_likes(&pool, photo.id).await, 1);
        assert_eq!(like_rows(&pool, photo.id).await, 1);
    }

    #[tokio::test]
    async fn second_like_conflicts_and_leaves_counter() {
        let pool = test_pool().await;
        let alice = create_user(&pool, "alice").await.unwrap();
        let photo = create_photo(&pool, alice.id, "u1", "images/a.jpg", chrono::Utc::now())
            .await
            .unwrap();

        like_photo(&pool, alice.id, photo.id).await.unwrap();
        let err = like_photo(&pool, alice.id, photo.id).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(stored_likes(&pool, photo.id).await, 1);
    }

    #[tokio::test]
    async fn unlike_never_liked_photo_is_noop() {
        let pool = test_pool().await;
        let alice = create_user(&pool, "alice").await.unwrap();
        let photo = create_photo(&pool, alice.id, "u1", "images/a.jpg", chrono::Utc::now())
            .await
            .unwrap();

        assert_eq!(unlike_photo(&pool, alice.id, photo.id).await.unwrap(), 0);
        assert_eq!(stored_likes(&pool, photo.id).await, 0);
    }

    #[tokio::test]
    async fn comment_returns_author_username() {
        let pool = test_pool().await;
        let alice = create_user(&pool, "alice").await.unwrap();
        let photo = create_photo(&pool, alice.id, "u1", "images/a.jpg", chrono::Utc::now())
            .await
            .unwrap();

        let comment = comment_photo(&pool, alice.id, photo.id, "nice shot")
            .await
            .unwrap();

        assert_eq!(comment.username, "alice");
        assert_eq!(comment.text, "nice shot");
    }

    #[tokio::test]
    async fn comment_by_missing_user_is_not_found() {
        let pool = test_pool().await;
        let alice = create_user(&pool, "alice").await.unwrap();
        let photo = create_photo(&pool, alice.id, "u1", "images/a.jpg", chrono::Utc::now())
            .await
            .unwrap();

        let err = comment_photo(&pool, 999, photo.id, "ghost comment")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_comment_requires_all_three_keys() {
        let pool = test_pool().await;
        let alice = create_user(&pool, "alice").await.unwrap();
        let photo = create_photo(&pool, alice.id, "u1", "images/a.jpg", chrono::Utc::now())
            .await
            .unwrap();

        let comment = comment_photo(&pool, alice.id, photo.id, "hello")
            .await
            .unwrap();

        // Wrong photo id: nothing happens.
        delete_comment(&pool, comment.id, alice.id, photo.id + 1)
            .await
            .unwrap();
        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE id = ?")
            .bind(comment.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 1);

        delete_comment(&pool, comment.id, alice.id, photo.id)
            .await
            .unwrap();
        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE id = ?")
            .bind(comment.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }
}
