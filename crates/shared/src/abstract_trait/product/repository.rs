use crate::{
    domain::requests::{NewProduct, ProductChanges},
    errors::RepositoryError,
    model::{OwnerProductCount, Product},
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProductQueryRepository = Arc<dyn ProductQueryRepositoryTrait + Send + Sync>;
pub type DynProductCommandRepository = Arc<dyn ProductCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryRepositoryTrait {
    /// Case-insensitive substring match on the name when `name` is given.
    async fn find_all(&self, name: Option<&str>) -> Result<Vec<Product>, RepositoryError>;
    async fn find_active(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError>;
    async fn find_by_owner(
        &self,
        owner_id: i32,
        active_only: bool,
    ) -> Result<Vec<Product>, RepositoryError>;
    /// Owners with at least one product, largest count first.
    async fn count_grouped_by_owner(&self) -> Result<Vec<OwnerProductCount>, RepositoryError>;
    /// Every seller, including those without products.
    async fn count_per_seller(&self) -> Result<Vec<OwnerProductCount>, RepositoryError>;
}

#[async_trait]
pub trait ProductCommandRepositoryTrait {
    async fn create_product(&self, product: &NewProduct) -> Result<Product, RepositoryError>;
    async fn update_product(
        &self,
        id: i32,
        changes: &ProductChanges,
    ) -> Result<Product, RepositoryError>;
    async fn delete_product(&self, id: i32) -> Result<Product, RepositoryError>;
}
