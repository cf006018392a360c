use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context as _;
use uuid::Uuid;

use crate::domain::repository::MediaStore;
use crate::domain::types::{DecodedImage, MediaKind};
use crate::error::FoodgramError;

/// Stores images on the local filesystem under `root`.
#[derive(Clone)]
pub struct FsMediaStore {
    pub root: PathBuf,
}

impl MediaStore for FsMediaStore {
    async fn save(&self, kind: MediaKind, image: &DecodedImage) -> Result<String, FoodgramError> {
        let dir = self.root.join(kind.directory());
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create media directory {}", dir.display()))?;

        let file_name = format!("{}.{}", Uuid::new_v4(), image.extension);
        tokio::fs::write(dir.join(&file_name), &image.bytes)
            .await
            .context("write media file")?;

        let path = format!("{}/{file_name}", kind.directory());
        tracing::debug!(path, bytes = image.bytes.len(), "media stored");
        Ok(path)
    }

    async fn remove(&self, path: &str) {
        // Stored paths are always `<dir>/<uuid>.<ext>`; refuse anything else.
        if path.split('/').any(|part| part.is_empty() || part == "..") {
            tracing::warn!(path, "refusing to remove suspicious media path");
            return;
        }
        match tokio::fs::remove_file(self.root.join(path)).await {
            Ok(()) => tracing::debug!(path, "media removed"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path, error = %e, "failed to remove media file"),
        }
    }
}
