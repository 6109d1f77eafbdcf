use crate::{
    domain::requests::{NewUser, UserChanges},
    errors::RepositoryError,
    model::{Role, User},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUserQueryRepository = Arc<dyn UserQueryRepositoryTrait + Send + Sync>;
pub type DynUserCommandRepository = Arc<dyn UserCommandRepositoryTrait + Send + Sync>;

/// `role = None` spans every account; `Some(role)` restricts to that role.
#[async_trait]
pub trait UserQueryRepositoryTrait {
    async fn find_all(&self, role: Option<Role>) -> Result<Vec<User>, RepositoryError>;
    async fn find_active(&self, role: Option<Role>) -> Result<Vec<User>, RepositoryError>;
    async fn search(&self, role: Option<Role>, term: &str) -> Result<Vec<User>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError>;
    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, RepositoryError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    async fn find_by_seller_code(&self, code: &str) -> Result<Option<User>, RepositoryError>;
}

#[async_trait]
pub trait UserCommandRepositoryTrait {
    async fn create_user(&self, user: &NewUser) -> Result<User, RepositoryError>;
    async fn update_user(&self, id: i32, changes: &UserChanges) -> Result<User, RepositoryError>;
    async fn toggle_status(&self, id: i32) -> Result<User, RepositoryError>;
    async fn delete_user(&self, id: i32) -> Result<User, RepositoryError>;
}
