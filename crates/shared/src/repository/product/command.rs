use super::PRODUCT_COLUMNS;
use crate::{
    abstract_trait::ProductCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{NewProduct, ProductChanges},
    errors::RepositoryError,
    model::Product,
};
use async_trait::async_trait;

pub struct ProductCommandRepository {
    db: ConnectionPool,
}

impl ProductCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductCommandRepositoryTrait for ProductCommandRepository {
    async fn create_product(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            INSERT INTO products (
                name,
                description,
                price,
                is_active,
                image_url,
                owner_id,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3::NUMERIC(10, 2), $4, $5, $6, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, Product>(&sql)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.is_active)
            .bind(&product.image_url)
            .bind(product.owner_id)
            .fetch_one(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(created)
    }

    async fn update_product(
        &self,
        id: i32,
        changes: &ProductChanges,
    ) -> Result<Product, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4::NUMERIC(10, 2), price),
                is_active = COALESCE($5, is_active),
                image_url = COALESCE($6, image_url),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        );

        let updated = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.description)
            .bind(changes.price)
            .bind(changes.is_active)
            .bind(&changes.image_url)
            .fetch_one(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(updated)
    }

    async fn delete_product(&self, id: i32) -> Result<Product, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("DELETE FROM products WHERE id = $1 RETURNING {PRODUCT_COLUMNS}");
        let deleted = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(deleted)
    }
}
