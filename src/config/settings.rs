use std::env;
use std::net::SocketAddr;

#[derive(Clone)]
pub struct Settings {
    pub port: u16,
    pub addr: SocketAddr,
    pub database_url: String,
    pub images_dir: String,
}

impl Settings {
    pub fn new() -> Self {
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://photoshare.db".to_string());
        let images_dir = env::var("IMAGES_DIR").unwrap_or_else(|_| "images".to_string());

        Self {
            port,
            addr,
            database_url,
            images_dir,
        }
    }
}
