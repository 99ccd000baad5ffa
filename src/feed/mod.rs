use serde::Serialize;

pub mod handler;
pub mod store;

/// Profile aggregates for a user, derived from the graph and content stores
#[derive(Debug, Serialize)]
pub struct Profile {
    pub username: String,
    pub post_count: i64,
    pub follower_count: i64,
    pub following_count: i64,
    pub photos: Vec<ProfilePhoto>,
}

/// The slice of a photo shown on a profile page
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct ProfilePhoto {
    pub photo_url: String,
    pub likes: i64,
}
