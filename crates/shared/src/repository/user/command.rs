use super::USER_COLUMNS;
use crate::{
    abstract_trait::UserCommandRepositoryTrait,
    config::ConnectionPool,
    domain::requests::{NewUser, UserChanges},
    errors::RepositoryError,
    model::User,
};
use async_trait::async_trait;

pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create_user(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            INSERT INTO users (
                username,
                email,
                password,
                phone,
                full_name,
                role,
                is_active,
                seller_code,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING {USER_COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, User>(&sql)
            .bind(&user.username)
            .bind(user.email.to_lowercase())
            .bind(&user.password_hash)
            .bind(&user.phone)
            .bind(&user.full_name)
            .bind(user.role.as_str())
            .bind(user.is_active)
            .bind(&user.seller_code)
            .fetch_one(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(created)
    }

    async fn update_user(&self, id: i32, changes: &UserChanges) -> Result<User, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                email = COALESCE($3, email),
                password = COALESCE($4, password),
                phone = COALESCE($5, phone),
                full_name = COALESCE($6, full_name),
                role = COALESCE($7, role),
                is_active = COALESCE($8, is_active),
                seller_code = COALESCE(seller_code, $9),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let updated = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .bind(&changes.username)
            .bind(changes.email.as_ref().map(|e| e.to_lowercase()))
            .bind(&changes.password_hash)
            .bind(&changes.phone)
            .bind(&changes.full_name)
            .bind(changes.role.map(|r| r.as_str()))
            .bind(changes.is_active)
            .bind(&changes.seller_code)
            .fetch_one(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(updated)
    }

    async fn toggle_status(&self, id: i32) -> Result<User, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            UPDATE users
            SET is_active = NOT is_active,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let updated = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(updated)
    }

    async fn delete_user(&self, id: i32) -> Result<User, RepositoryError> {
        let mut conn = self.db.acquire().await.map_err(RepositoryError::from)?;

        let sql = format!("DELETE FROM users WHERE id = $1 RETURNING {USER_COLUMNS}");
        let deleted = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(RepositoryError::from)?;

        Ok(deleted)
    }
}
