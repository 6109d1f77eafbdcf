use crate::errors::ServiceError;
use async_trait::async_trait;
use std::sync::Arc;

pub type DynHashing = Arc<dyn HashingTrait + Send + Sync>;

/// Password hashing; implementations run the hash off the async runtime.
#[async_trait]
pub trait HashingTrait {
    async fn hash_password(&self, password: &str) -> Result<String, ServiceError>;
    /// Fails with [`ServiceError::InvalidCredentials`] when `password` does not match.
    async fn compare_password(&self, hashed: &str, password: &str) -> Result<(), ServiceError>;
}
