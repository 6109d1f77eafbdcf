use super::PRODUCT_COLUMNS;
use crate::{
    abstract_trait::ProductQueryRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::{OwnerProductCount, Product},
    repository::like_pattern,
};
use async_trait::async_trait;

pub struct ProductQueryRepository {
    db: ConnectionPool,
}

impl ProductQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductQueryRepositoryTrait for ProductQueryRepository {
    async fn find_all(&self, name: Option<&str>) -> Result<Vec<Product>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS} FROM products
            WHERE ($1::TEXT IS NULL OR name ILIKE $1)
            ORDER BY id
            "#
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(name.map(like_pattern))
            .fetch_all(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(products)
    }

    async fn find_active(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql =
            format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE is_active = TRUE ORDER BY id");
        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(products)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(product)
    }

    async fn find_by_owner(
        &self,
        owner_id: i32,
        active_only: bool,
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            SELECT {PRODUCT_COLUMNS} FROM products
            WHERE owner_id = $1 AND (NOT $2 OR is_active = TRUE)
            ORDER BY id
            "#
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(owner_id)
            .bind(active_only)
            .fetch_all(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(products)
    }

    async fn count_grouped_by_owner(&self) -> Result<Vec<OwnerProductCount>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let counts = sqlx::query_as::<_, OwnerProductCount>(
            r#"
            SELECT p.owner_id, u.username, COUNT(p.id) AS product_count
            FROM products p
            JOIN users u ON u.id = p.owner_id
            GROUP BY p.owner_id, u.username
            ORDER BY product_count DESC, p.owner_id
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(counts)
    }

    async fn count_per_seller(&self) -> Result<Vec<OwnerProductCount>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let counts = sqlx::query_as::<_, OwnerProductCount>(
            r#"
            SELECT u.id AS owner_id, u.username, COUNT(p.id) AS product_count
            FROM users u
            LEFT JOIN products p ON p.owner_id = u.id
            WHERE u.role = 'seller'
            GROUP BY u.id, u.username
            ORDER BY product_count DESC, u.id
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(RepositoryError::from)?;

        Ok(counts)
    }
}
