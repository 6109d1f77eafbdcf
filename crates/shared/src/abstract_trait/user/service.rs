use crate::{
    domain::{
        Actor,
        requests::{CreateUserRequest, PatchUserRequest},
        responses::{ApiResponse, UserResponse},
    },
    errors::ServiceError,
    model::Role,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserQueryService = Arc<dyn UserQueryServiceTrait + Send + Sync>;
pub type DynUserCommandService = Arc<dyn UserCommandServiceTrait + Send + Sync>;

/// Every operation takes a `scope`: `None` for plain accounts, or the role a
/// seller/admin controller is restricted to. Accounts outside the scope are
/// reported as not found.
#[async_trait]
pub trait UserQueryServiceTrait {
    async fn find_all(
        &self,
        scope: Option<Role>,
    ) -> Result<ApiResponse<Vec<UserResponse>>, ServiceError>;
    async fn find_active(
        &self,
        scope: Option<Role>,
    ) -> Result<ApiResponse<Vec<UserResponse>>, ServiceError>;
    async fn search(
        &self,
        scope: Option<Role>,
        term: &str,
    ) -> Result<ApiResponse<Vec<UserResponse>>, ServiceError>;
    async fn find_by_id(
        &self,
        actor: &Actor,
        scope: Option<Role>,
        id: i32,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn find_by_username(
        &self,
        scope: Option<Role>,
        username: &str,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn find_by_seller_code(
        &self,
        code: &str,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
}

#[async_trait]
pub trait UserCommandServiceTrait {
    async fn create(
        &self,
        scope: Option<Role>,
        req: &CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn update(
        &self,
        actor: &Actor,
        scope: Option<Role>,
        id: i32,
        req: &PatchUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn toggle_status(
        &self,
        scope: Option<Role>,
        id: i32,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn delete(
        &self,
        actor: &Actor,
        scope: Option<Role>,
        id: i32,
    ) -> Result<ApiResponse<UserResponse>, ServiceError>;
}
