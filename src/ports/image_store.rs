use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn write(&self, id: &str, bytes: &[u8]) -> Result<()>;
    async fn read(&self, id: &str) -> Result<Vec<u8>>;
    /// Remove an image. Removing an image that does not exist succeeds.
    async fn delete(&self, id: &str) -> Result<()>;
}
