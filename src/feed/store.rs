use sqlx::SqlitePool;

use crate::error::AppError;
use crate::feed::{Profile, ProfilePhoto};
use crate::photos::Photo;

/// Returns the personalized stream: every photo authored by someone the
/// user follows, minus photos authored by anyone the user has banned,
/// most recent first. One relational predicate, no pagination.
pub async fn get_stream(pool: &SqlitePool, user_id: i64) -> Result<Vec<Photo>, AppError> {
    sqlx::query_as::<_, Photo>(
        r#"
        SELECT id, uuid, date, user_id, likes, photo_url
        FROM photos
        WHERE user_id IN (SELECT followed_id FROM followers WHERE follower_id = ?)
          AND user_id NOT IN (SELECT banned_user FROM bans WHERE user_id = ?)
        ORDER BY date DESC
        "#,
    )
    .bind(user_id)
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch stream: {:?}", e);
        AppError::InternalServerError
    })
}

/// Assembles a user's profile: username, post/follower/following counts and
/// the owned photos with their like counters.
pub async fn get_user_profile(pool: &SqlitePool, user_id: i64) -> Result<Profile, AppError> {
    let username: String = sqlx::query_scalar("SELECT username FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|_| AppError::InternalServerError)?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    let post_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM photos WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(|_| AppError::InternalServerError)?;

    let follower_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM followers WHERE followed_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .map_err(|_| AppError::InternalServerError)?;

    let following_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM followers WHERE follower_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .map_err(|_| AppError::InternalServerError)?;

    let photos =
        sqlx::query_as::<_, ProfilePhoto>("SELECT photo_url, likes FROM photos WHERE user_id = ?")
            .bind(user_id)
            .fetch_all(pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch profile photos: {:?}", e);
                AppError::InternalServerError
            })?;

    Ok(Profile {
        username,
        post_count,
        follower_count,
        following_count,
        photos,
    })
}
