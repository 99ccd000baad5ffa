use serde::{Deserialize, Serialize};
use validator::Validate;

pub mod handler;
pub mod store;

/// Database model for a user
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// Request payload carrying a username (login and rename)
#[derive(Debug, Deserialize, Validate)]
pub struct UsernameRequest {
    #[validate(length(
        min = 3,
        max = 16,
        message = "Username must be between 3 and 16 characters"
    ))]
    pub username: String,
}

/// Usernames are 3 to 16 characters from `[A-Za-z0-9_-]`.
pub fn is_valid_username(username: &str) -> bool {
    (3..=16).contains(&username.len())
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
