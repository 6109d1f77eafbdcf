use crate::{
    domain::{
        Actor,
        requests::{CreateProductRequest, ProductChanges},
        responses::{
            ApiResponse, ImageUrlResponse, OwnerProductCountResponse, ProductResponse,
            SellerWithProductsResponse,
        },
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynProductQueryService = Arc<dyn ProductQueryServiceTrait + Send + Sync>;
pub type DynProductCommandService = Arc<dyn ProductCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ProductQueryServiceTrait {
    async fn find_all(
        &self,
        name: Option<&str>,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn find_active(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn find_image(&self, id: i32) -> Result<ApiResponse<ImageUrlResponse>, ServiceError>;
    async fn find_by_owner(
        &self,
        owner_id: i32,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn find_by_owner_username(
        &self,
        username: &str,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
    async fn grouped_by_owner(
        &self,
    ) -> Result<ApiResponse<Vec<OwnerProductCountResponse>>, ServiceError>;
    async fn seller_product_counts(
        &self,
    ) -> Result<ApiResponse<Vec<OwnerProductCountResponse>>, ServiceError>;
    async fn seller_with_products(
        &self,
        seller_id: i32,
    ) -> Result<ApiResponse<SellerWithProductsResponse>, ServiceError>;
    async fn seller_active_products(
        &self,
        seller_id: i32,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError>;
}

#[async_trait]
pub trait ProductCommandServiceTrait {
    async fn create(
        &self,
        actor: &Actor,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn update(
        &self,
        actor: &Actor,
        id: i32,
        changes: ProductChanges,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
    async fn delete(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError>;
}
