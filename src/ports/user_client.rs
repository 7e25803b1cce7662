use async_trait::async_trait;

use crate::domain::user::UserProfile;
use crate::error::Result;

#[async_trait]
pub trait UserClient: Send + Sync {
    async fn get_user_by_id(&self, id: &str) -> Result<UserProfile>;
}
