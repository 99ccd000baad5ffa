use sqlx::SqlitePool;

use crate::error::{is_unique_violation, AppError};

/// Creates a follow edge. Self-follow is rejected, and a duplicate edge is a
/// conflict (the composite primary key raises a unique violation).
pub async fn follow(pool: &SqlitePool, follower_id: i64, followed_id: i64) -> Result<(), AppError> {
    if follower_id == followed_id {
        return Err(AppError::Validation(
            "You cannot follow yourself".to_string(),
        ));
    }

    sqlx::query("INSERT INTO followers (follower_id, followed_id) VALUES (?, ?)")
        .bind(follower_id)
        .bind(followed_id)
        .execute(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Already following this user".to_string())
            } else {
                tracing::error!("Failed to create follow edge: {:?}", e);
                AppError::InternalServerError
            }
        })?;

    Ok(())
}

/// Deletes a follow edge. Removing an edge that does not exist is a no-op.
pub async fn unfollow(
    pool: &SqlitePool,
    follower_id: i64,
    followed_id: i64,
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM followers WHERE follower_id = ? AND followed_id = ?")
        .bind(follower_id)
        .bind(followed_id)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete follow edge: {:?}", e);
            AppError::InternalServerError
        })?;

    Ok(())
}

/// Creates a ban edge and removes the banner's follow edge towards the
/// banned user, as one transaction. A ban implies the banner stops
/// following the banned user.
pub async fn ban(pool: &SqlitePool, banner_id: i64, banned_id: i64) -> Result<(), AppError> {
    if banner_id == banned_id {
        return Err(AppError::Validation("You cannot ban yourself".to_string()));
    }

    let mut tx = pool
        .begin()
        .await
        .map_err(|_| AppError::InternalServerError)?;

    sqlx::query("INSERT INTO bans (user_id, banned_user) VALUES (?, ?)")
        .bind(banner_id)
        .bind(banned_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Already banned this user".to_string())
            } else {
                tracing::error!("Failed to create ban edge: {:?}", e);
                AppError::InternalServerError
            }
        })?;

    sqlx::query("DELETE FROM followers WHERE follower_id = ? AND followed_id = ?")
        .bind(banner_id)
        .bind(banned_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to remove follow edge on ban: {:?}", e);
            AppError::InternalServerError
        })?;

    tx.commit()
        .await
        .map_err(|_| AppError::InternalServerError)?;

    Ok(())
}

/// Deletes a ban edge. Unbanning a user who was never banned is a conflict.
pub async fn unban(pool: &SqlitePool, banner_id: i64, banned_id: i64) -> Result<(), AppError> {
    if banner_id == banned_id {
        return Err(AppError::Validation(
            "You cannot unban yourself".to_string(),
        ));
    }

    let result = sqlx::query("DELETE FROM bans WHERE user_id = ? AND banned_user = ?")
        .bind(banner_id)
        .bind(banned_id)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete ban edge: {:?}", e);
            AppError::InternalServerError
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::Conflict("No ban to remove".to_string()));
    }

    Ok(())
}
