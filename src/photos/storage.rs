use std::path::PathBuf;

use tokio::fs;

/// Filesystem collaborator for image bytes. The relational core only ever
/// sees the locator this store returns; it never reads the bytes back.
#[derive(Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Writes the uploaded bytes under `<root>/<owner_id>/<file_name>` and
    /// returns the resulting locator.
    pub async fn store(
        &self,
        owner_id: i64,
        file_name: &str,
        bytes: &[u8],
    ) -> std::io::Result<String> {
        let dir = self.root.join(owner_id.to_string());
        fs::create_dir_all(&dir).await?;

        let path = dir.join(file_name);
        fs::write(&path, bytes).await?;

        Ok(path.to_string_lossy().into_owned())
    }

    /// Best-effort removal of a stored image. A failure is logged, never
    /// surfaced: the photo row is already gone by the time this runs.
    pub async fn remove(&self, url: &str) {
        if let Err(err) = fs::remove_file(url).await {
            tracing::warn!("Could not remove image file {}: {:?}", url, err);
        }
    }
}
