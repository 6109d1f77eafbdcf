use crate::{
    abstract_trait::{
        DynProductCommandRepository, DynProductQueryRepository, DynUserQueryRepository,
        ProductCommandServiceTrait,
    },
    domain::{
        Actor,
        requests::{CreateProductRequest, NewProduct, ProductChanges},
        responses::{ApiResponse, ProductResponse},
    },
    errors::ServiceError,
    model::Product,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub struct ProductCommandService {
    query: DynProductQueryRepository,
    command: DynProductCommandRepository,
    users: DynUserQueryRepository,
    metrics: Metrics,
}

impl ProductCommandService {
    pub async fn new(
        query: DynProductQueryRepository,
        command: DynProductCommandRepository,
        users: DynUserQueryRepository,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(
            &mut *registry.lock().await,
            "product_command_service",
            "ProductCommandService",
        );

        Self {
            query,
            command,
            users,
            metrics,
        }
    }

    /// Loads the product and checks the caller owns it or is an admin.
    async fn owned_product(&self, actor: &Actor, id: i32) -> Result<Product, ServiceError> {
        let product = self
            .query
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product with id {id} not found")))?;

        if !actor.may_access(product.owner_id) {
            warn!(
                "⛔ Account {} tried to modify product {} owned by {}",
                actor.id, product.id, product.owner_id
            );
            return Err(ServiceError::Forbidden(
                "You can only modify your own products".to_string(),
            ));
        }

        Ok(product)
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create(
        &self,
        actor: &Actor,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        self.metrics
            .observe(Method::Post, async {
                let owner_id = match req.owner_id {
                    Some(owner_id) if owner_id != actor.id && !actor.is_admin() => {
                        return Err(ServiceError::Forbidden(
                            "Only administrators can create products for another account"
                                .to_string(),
                        ));
                    }
                    Some(owner_id) => owner_id,
                    None => actor.id,
                };

                let owner = self.users.find_by_id(owner_id).await?.ok_or_else(|| {
                    ServiceError::NotFound(format!("Owner with id {owner_id} not found"))
                })?;

                if !owner.is_active {
                    return Err(ServiceError::Conflict(format!(
                        "Owner '{}' is inactive",
                        owner.username
                    )));
                }

                if !owner.role.can_own_products() {
                    return Err(ServiceError::Conflict(format!(
                        "Owner '{}' must be a seller or admin",
                        owner.username
                    )));
                }

                let product = self
                    .command
                    .create_product(&NewProduct {
                        name: req.name.clone(),
                        description: req.description.clone(),
                        price: req.price,
                        is_active: req.is_active.unwrap_or(true),
                        image_url: req.image_url.clone(),
                        owner_id: owner.id,
                    })
                    .await?;

                info!("✅ Product {} created for {}", product.id, owner.username);

                Ok(ApiResponse::success(
                    "Product created successfully",
                    ProductResponse::from(product).with_owner(Some(&owner)),
                ))
            })
            .await
    }

    async fn update(
        &self,
        actor: &Actor,
        id: i32,
        changes: ProductChanges,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        self.metrics
            .observe(Method::Put, async {
                if changes.is_empty() {
                    return Err(ServiceError::BadRequest("No fields to update".to_string()));
                }

                self.owned_product(actor, id).await?;

                let product = self.command.update_product(id, &changes).await?;
                let owner = self.users.find_by_id(product.owner_id).await?;
                info!("✏️ Product {} updated", product.id);

                Ok(ApiResponse::success(
                    "Product updated successfully",
                    ProductResponse::from(product).with_owner(owner.as_ref()),
                ))
            })
            .await
    }

    async fn delete(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        self.metrics
            .observe(Method::Delete, async {
                self.owned_product(actor, id).await?;

                let product = self.command.delete_product(id).await?;
                warn!("🗑️ Product {} ({}) deleted", product.id, product.name);

                Ok(ApiResponse::success(
                    format!("Product '{}' has been successfully deleted", product.name),
                    ProductResponse::from(product),
                ))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::requests::NewUser,
        model::{Role, User},
        repository::memory::MemoryDb,
    };

    async fn service(db: &MemoryDb) -> ProductCommandService {
        let products = db.product_repository();
        ProductCommandService::new(
            products.query,
            products.command,
            db.user_repository().query,
            Arc::new(Mutex::new(Registry::default())),
        )
        .await
    }

    async fn account(db: &MemoryDb, username: &str, role: Role, is_active: bool) -> User {
        db.user_repository()
            .command
            .create_user(&NewUser {
                username: username.into(),
                email: format!("{username}@example.com"),
                password_hash: "hash".into(),
                phone: "0171".into(),
                full_name: None,
                role,
                is_active,
                seller_code: None,
            })
            .await
            .unwrap()
    }

    fn lamp(owner_id: Option<i32>) -> CreateProductRequest {
        CreateProductRequest {
            name: "Lamp".into(),
            description: "Desk lamp".into(),
            price: 19.99,
            is_active: None,
            image_url: None,
            owner_id,
        }
    }

    #[tokio::test]
    async fn create_resolves_owner_rules() {
        let db = MemoryDb::new();
        let svc = service(&db).await;
        let admin = account(&db, "admin", Role::Admin, true).await;
        let seller = account(&db, "seller", Role::Seller, true).await;
        let sleepy = account(&db, "sleepy", Role::Seller, false).await;
        let buyer = account(&db, "buyer", Role::User, true).await;
        let as_admin = Actor::new(admin.id, Role::Admin);

        let created = svc
            .create(&Actor::new(seller.id, Role::Seller), &lamp(None))
            .await
            .unwrap();
        assert_eq!(created.data.owner_id, seller.id);
        assert_eq!(created.data.owner.unwrap().username, "seller");

        assert!(matches!(
            svc.create(&as_admin, &lamp(Some(4242))).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(
            svc.create(&as_admin, &lamp(Some(sleepy.id))).await,
            Err(ServiceError::Conflict(_))
        ));
        assert!(matches!(
            svc.create(&as_admin, &lamp(Some(buyer.id))).await,
            Err(ServiceError::Conflict(_))
        ));
        assert!(matches!(
            svc.create(&Actor::new(seller.id, Role::Seller), &lamp(Some(admin.id)))
                .await,
            Err(ServiceError::Forbidden(_))
        ));

        let on_behalf = svc.create(&as_admin, &lamp(Some(seller.id))).await.unwrap();
        assert_eq!(on_behalf.data.owner_id, seller.id);
    }

    #[tokio::test]
    async fn only_owner_or_admin_may_modify() {
        let db = MemoryDb::new();
        let svc = service(&db).await;
        let one = account(&db, "one", Role::Seller, true).await;
        let two = account(&db, "two", Role::Seller, true).await;
        let product = svc
            .create(&Actor::new(one.id, Role::Seller), &lamp(None))
            .await
            .unwrap()
            .data;

        let changes = ProductChanges {
            price: Some(25.0),
            ..Default::default()
        };

        let foreign = svc
            .update(&Actor::new(two.id, Role::Seller), product.id, changes.clone())
            .await;
        assert!(matches!(foreign, Err(ServiceError::Forbidden(_))));

        let updated = svc
            .update(&Actor::new(99, Role::Admin), product.id, changes)
            .await
            .unwrap();
        assert_eq!(updated.data.price, 25.0);

        let empty = svc
            .update(
                &Actor::new(one.id, Role::Seller),
                product.id,
                ProductChanges::default(),
            )
            .await;
        assert!(matches!(empty, Err(ServiceError::BadRequest(_))));
    }

    #[tokio::test]
    async fn delete_returns_product_then_it_is_gone() {
        let db = MemoryDb::new();
        let svc = service(&db).await;
        let seller = account(&db, "seller", Role::Seller, true).await;
        let actor = Actor::new(seller.id, Role::Seller);
        let product = svc.create(&actor, &lamp(None)).await.unwrap().data;

        let deleted = svc.delete(&actor, product.id).await.unwrap();
        assert_eq!(deleted.data.id, product.id);
        assert_eq!(deleted.message, "Product 'Lamp' has been successfully deleted");

        assert!(matches!(
            svc.delete(&actor, product.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
