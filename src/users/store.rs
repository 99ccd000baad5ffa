use sqlx::SqlitePool;

use crate::error::{is_unique_violation, AppError};
use crate::users::User;

/// Inserts a new user and returns it with its assigned id.
///
/// Username uniqueness is enforced by the storage constraint; a violation
/// maps to `Conflict`. No separate existence check, so two racing creations
/// cannot both succeed.
pub async fn create_user(pool: &SqlitePool, username: &str) -> Result<User, AppError> {
    let result = sqlx::query("INSERT INTO users (username) VALUES (?)")
        .bind(username)
        .execute(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Username already taken".to_string())
            } else {
                tracing::error!("Failed to create user: {:?}", e);
                AppError::InternalServerError
            }
        })?;

    Ok(User {
        id: result.last_insert_rowid(),
        username: username.to_string(),
    })
}

/// Replaces the username in place. Zero affected rows means the user does
/// not exist.
pub async fn update_user(pool: &SqlitePool, id: i64, username: &str) -> Result<User, AppError> {
    let result = sqlx::query("UPDATE users SET username = ? WHERE id = ?")
        .bind(username)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Username already taken".to_string())
            } else {
                tracing::error!("Failed to update user: {:?}", e);
                AppError::InternalServerError
            }
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(User {
        id,
        username: username.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn create_assigns_fresh_ids() {
        let pool = test_pool().await;

        let alice = create_user(&pool, "alice").await.unwrap();
        let bob = create_user(&pool, "bob").await.unwrap();

        assert_eq!(alice.username, "alice");
        assert_ne!(alice.id, bob.id);
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let pool = test_pool().await;

        create_user(&pool, "alice").await.unwrap();
        let err = create_user(&pool, "alice").await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_replaces_username() {
        let pool = test_pool().await;

        let alice = create_user(&pool, "alice").await.unwrap();
        let renamed = update_user(&pool, alice.id, "alice2").await.unwrap();
        assert_eq!(renamed.username, "alice2");

        let stored: String = sqlx::query_scalar("SELECT username FROM users WHERE id = ?")
            .bind(alice.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(stored, "alice2");
    }

    #[tokio::test]
    async fn update_missing_user_is_not_found() {
        let pool = test_pool().await;

        let err = update_user(&pool, 999, "ghost").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
