use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Result, ServiceError};
use crate::ports::image_store::ImageStore;

/// Stores each image as one file named after its id.
pub struct FileImageStore {
    root: PathBuf,
}

impl FileImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> Result<PathBuf> {
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(ServiceError::Image {
                reason: format!("invalid image id '{id}'"),
            });
        }
        Ok(self.root.join(id))
    }
}

#[async_trait]
impl ImageStore for FileImageStore {
    async fn write(&self, id: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_for(id)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, bytes).await?;
        debug!(id, bytes = bytes.len(), path = %path.display(), "Image written");
        Ok(())
    }

    async fn read(&self, id: &str) -> Result<Vec<u8>> {
        let path = self.path_for(id)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ServiceError::NotFound {
                entity: "Image",
                id: id.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let path = self.path_for(id)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(id, "Image removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
