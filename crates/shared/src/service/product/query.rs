use crate::{
    abstract_trait::{DynProductQueryRepository, DynUserQueryRepository, ProductQueryServiceTrait},
    domain::responses::{
        ApiResponse, ImageUrlResponse, OwnerProductCountResponse, ProductResponse,
        SellerWithProductsResponse, UserResponse,
    },
    errors::ServiceError,
    model::{Role, User},
    service::product::with_owners,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub struct ProductQueryService {
    query: DynProductQueryRepository,
    users: DynUserQueryRepository,
    metrics: Metrics,
}

impl ProductQueryService {
    pub async fn new(
        query: DynProductQueryRepository,
        users: DynUserQueryRepository,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(
            &mut *registry.lock().await,
            "product_query_service",
            "ProductQueryService",
        );

        Self {
            query,
            users,
            metrics,
        }
    }

    async fn seller(&self, seller_id: i32) -> Result<User, ServiceError> {
        match self.users.find_by_id(seller_id).await? {
            Some(user) if user.role == Role::Seller => Ok(user),
            _ => Err(ServiceError::NotFound(format!(
                "Seller with id {seller_id} not found"
            ))),
        }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(
        &self,
        name: Option<&str>,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        self.metrics
            .observe(Method::Get, async {
                let name = name.map(str::trim).filter(|n| !n.is_empty());
                let products = self.query.find_all(name).await?;
                info!("📦 Listed {} products (filter: {:?})", products.len(), name);

                Ok(ApiResponse::success(
                    "Products retrieved successfully",
                    with_owners(&self.users, products).await?,
                ))
            })
            .await
    }

    async fn find_active(&self) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        self.metrics
            .observe(Method::Get, async {
                let products = self.query.find_active().await?;

                Ok(ApiResponse::success(
                    "Active products retrieved successfully",
                    with_owners(&self.users, products).await?,
                ))
            })
            .await
    }

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        self.metrics
            .observe(Method::Get, async {
                let product = self.query.find_by_id(id).await?.ok_or_else(|| {
                    ServiceError::NotFound(format!("Product with id {id} not found"))
                })?;

                let owner = self.users.find_by_id(product.owner_id).await?;

                Ok(ApiResponse::success(
                    "Product retrieved successfully",
                    ProductResponse::from(product).with_owner(owner.as_ref()),
                ))
            })
            .await
    }

    async fn find_image(&self, id: i32) -> Result<ApiResponse<ImageUrlResponse>, ServiceError> {
        self.metrics
            .observe(Method::Get, async {
                let product = self.query.find_by_id(id).await?.ok_or_else(|| {
                    ServiceError::NotFound(format!("Product with id {id} not found"))
                })?;

                let image_url = product.image_url.ok_or_else(|| {
                    ServiceError::NotFound(format!("Product with id {id} has no image"))
                })?;

                Ok(ApiResponse::success(
                    "Product image retrieved successfully",
                    ImageUrlResponse { image_url },
                ))
            })
            .await
    }

    async fn find_by_owner(
        &self,
        owner_id: i32,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        self.metrics
            .observe(Method::Get, async {
                let owner = self.users.find_by_id(owner_id).await?.ok_or_else(|| {
                    ServiceError::NotFound(format!("Owner with id {owner_id} not found"))
                })?;

                let products = self.query.find_by_owner(owner.id, false).await?;

                Ok(ApiResponse::success(
                    format!("Products of '{}' retrieved successfully", owner.username),
                    products
                        .into_iter()
                        .map(|p| ProductResponse::from(p).with_owner(Some(&owner)))
                        .collect(),
                ))
            })
            .await
    }

    async fn find_by_owner_username(
        &self,
        username: &str,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        self.metrics
            .observe(Method::Get, async {
                let owner = self
                    .users
                    .find_by_username(username)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound(format!("User '{username}' not found")))?;

                let products = self.query.find_by_owner(owner.id, false).await?;

                Ok(ApiResponse::success(
                    format!("Products of '{}' retrieved successfully", owner.username),
                    products
                        .into_iter()
                        .map(|p| ProductResponse::from(p).with_owner(Some(&owner)))
                        .collect(),
                ))
            })
            .await
    }

    async fn grouped_by_owner(
        &self,
    ) -> Result<ApiResponse<Vec<OwnerProductCountResponse>>, ServiceError> {
        self.metrics
            .observe(Method::Get, async {
                let counts = self.query.count_grouped_by_owner().await?;

                Ok(ApiResponse::success(
                    "Product counts per owner retrieved successfully",
                    counts.into_iter().map(Into::into).collect(),
                ))
            })
            .await
    }

    async fn seller_product_counts(
        &self,
    ) -> Result<ApiResponse<Vec<OwnerProductCountResponse>>, ServiceError> {
        self.metrics
            .observe(Method::Get, async {
                let counts = self.query.count_per_seller().await?;

                Ok(ApiResponse::success(
                    "Product counts per seller retrieved successfully",
                    counts.into_iter().map(Into::into).collect(),
                ))
            })
            .await
    }

    async fn seller_with_products(
        &self,
        seller_id: i32,
    ) -> Result<ApiResponse<SellerWithProductsResponse>, ServiceError> {
        self.metrics
            .observe(Method::Get, async {
                let seller = self.seller(seller_id).await?;
                let products = self.query.find_by_owner(seller.id, false).await?;

                Ok(ApiResponse::success(
                    "Seller with products retrieved successfully",
                    SellerWithProductsResponse {
                        products: products.into_iter().map(ProductResponse::from).collect(),
                        seller: UserResponse::from(seller),
                    },
                ))
            })
            .await
    }

    async fn seller_active_products(
        &self,
        seller_id: i32,
    ) -> Result<ApiResponse<Vec<ProductResponse>>, ServiceError> {
        self.metrics
            .observe(Method::Get, async {
                let seller = self.seller(seller_id).await?;
                let products = self.query.find_by_owner(seller.id, true).await?;

                Ok(ApiResponse::success(
                    "Active seller products retrieved successfully",
                    products
                        .into_iter()
                        .map(|p| ProductResponse::from(p).with_owner(Some(&seller)))
                        .collect(),
                ))
            })
            .await
    }
}
