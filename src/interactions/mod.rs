use serde::{Deserialize, Serialize};
use validator::Validate;

pub mod handler;
pub mod store;

/// Request payload for commenting on a photo
#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(
        min = 1,
        max = 500,
        message = "Comment must be between 1 and 500 characters"
    ))]
    pub text: String,
}

/// A stored comment enriched with its author's username
#[derive(Debug, Serialize)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub username: String,
    pub date: chrono::DateTime<chrono::Utc>,
    pub text: String,
}

/// Response for like/unlike actions, carrying the recomputed counter
#[derive(Debug, Serialize)]
pub struct LikeActionResponse {
    pub liked: bool,
    pub likes: i64,
}
