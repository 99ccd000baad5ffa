use serde::{Deserialize, Serialize};

pub mod handler;
pub mod storage;
pub mod store;

/// Database model for a photo. `likes` is a denormalized cache of the like
/// rows referencing this photo; the interaction store keeps it in sync.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Photo {
    pub id: i64,
    pub uuid: String,
    pub date: chrono::DateTime<chrono::Utc>,
    pub user_id: i64,
    pub likes: i64,
    pub photo_url: String,
}
