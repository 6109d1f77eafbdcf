use crate::{
    config::AdminSeedConfig,
    domain::{
        requests::{LoginRequest, RegisterRequest},
        responses::{ApiResponse, TokenResponse, UserResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynAuthService = Arc<dyn AuthServiceTrait + Send + Sync>;

#[async_trait]
pub trait AuthServiceTrait {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<TokenResponse>, ServiceError>;
    async fn me(&self, user_id: i32) -> Result<ApiResponse<UserResponse>, ServiceError>;
    /// Creates the configured admin account unless the username is taken.
    async fn bootstrap_admin(&self, seed: &AdminSeedConfig) -> Result<bool, ServiceError>;
}
