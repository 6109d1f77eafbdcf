use crate::{config::Claims, errors::ServiceError, model::Role};
use std::sync::Arc;

pub type DynJwtService = Arc<dyn JwtServiceTrait + Send + Sync>;

pub trait JwtServiceTrait: Send + Sync + std::fmt::Debug {
    fn generate_token(&self, claims: &Claims) -> Result<String, ServiceError>;
    fn issue(
        &self,
        id: i32,
        username: &str,
        email: &str,
        role: Role,
        is_active: bool,
    ) -> Result<String, ServiceError>;
    fn verify_token(&self, token: &str) -> Result<Claims, ServiceError>;
    fn expires_in_seconds(&self) -> i64;
}
