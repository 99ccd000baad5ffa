use axum::{
    extract::FromRef,
    routing::{delete, get, post, put},
    Router,
};
use dotenv::dotenv;
use sqlx::SqlitePool;
use tracing::info;

mod config;
mod db;
mod error;
mod feed;
mod graph;
mod interactions;
mod photos;
mod response;
mod users;

use config::settings::Settings;
use photos::storage::ImageStore;

#[derive(Clone)]
pub struct AppState {
    pool: SqlitePool,
    settings: Settings,
    images: ImageStore,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> SqlitePool {
        app_state.pool.clone()
    }
}

impl FromRef<AppState> for Settings {
    fn from_ref(app_state: &AppState) -> Settings {
        app_state.settings.clone()
    }
}

impl FromRef<AppState> for ImageStore {
    fn from_ref(app_state: &AppState) -> ImageStore {
        app_state.images.clone()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let settings = Settings::new();

    let pool = db::connect(&settings.database_url).await?;

    info!("database connected");

    let app_state = AppState {
        pool,
        settings: settings.clone(),
        images: ImageStore::new(&settings.images_dir),
    };

    let user_router = Router::new()
        .route("/:user_id", get(feed::handler::get_user_profile))
        .route("/:user_id/username", put(users::handler::set_username))
        .route("/:user_id/stream", get(feed::handler::get_stream))
        .route(
            "/:user_id/following/:followed_id",
            put(graph::handler::follow_user).delete(graph::handler::unfollow_user),
        )
        .route(
            "/:user_id/ban/:banned_id",
            put(graph::handler::ban_user).delete(graph::handler::unban_user),
        )
        .route("/:user_id/photos", post(photos::handler::upload_photo))
        .route(
            "/:user_id/photos/:photo_id",
            get(photos::handler::get_photo).delete(photos::handler::delete_photo),
        );

    let photo_router = Router::new()
        .route(
            "/:photo_id/like/:user_id",
            put(interactions::handler::like_photo).delete(interactions::handler::unlike_photo),
        )
        .route(
            "/:photo_id/comments/:user_id",
            post(interactions::handler::comment_photo),
        )
        .route(
            "/:photo_id/comments/:user_id/:comment_id",
            delete(interactions::handler::uncomment_photo),
        );

    let app = Router::new()
        .route("/liveness", get(|| async { "OK" }))
        .route("/session", post(users::handler::login))
        .nest("/user", user_router)
        .nest("/photo", photo_router)
        .with_state(app_state);

    info!("Server running on http://localhost:{}", settings.port);

    let listener = tokio::net::TcpListener::bind(settings.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
