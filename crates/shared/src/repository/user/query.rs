use super::USER_COLUMNS;
use crate::{
    abstract_trait::UserQueryRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::{Role, User},
    repository::like_pattern,
};
use async_trait::async_trait;

pub struct UserQueryRepository {
    db: ConnectionPool,
}

impl UserQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn find_one_by(
        &self,
        column: &str,
        value: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(value)
            .fetch_optional(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(user)
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for UserQueryRepository {
    async fn find_all(&self, role: Option<Role>) -> Result<Vec<User>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE ($1::TEXT IS NULL OR role = $1) ORDER BY id"
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(role.map(|r| r.as_str()))
            .fetch_all(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(users)
    }

    async fn find_active(&self, role: Option<Role>) -> Result<Vec<User>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            SELECT {USER_COLUMNS} FROM users
            WHERE is_active = TRUE AND ($1::TEXT IS NULL OR role = $1)
            ORDER BY id
            "#
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(role.map(|r| r.as_str()))
            .fetch_all(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(users)
    }

    async fn search(&self, role: Option<Role>, term: &str) -> Result<Vec<User>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            SELECT {USER_COLUMNS} FROM users
            WHERE ($1::TEXT IS NULL OR role = $1)
              AND (username ILIKE $2 OR full_name ILIKE $2)
            ORDER BY username
            "#
        );
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(role.map(|r| r.as_str()))
            .bind(like_pattern(term))
            .fetch_all(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(users)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(user)
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ANY($1)");
        let users = sqlx::query_as::<_, User>(&sql)
            .bind(ids)
            .fetch_all(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(users)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one_by("username", username).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one_by("email", &email.to_lowercase()).await
    }

    async fn find_by_seller_code(&self, code: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one_by("seller_code", code).await
    }
}
