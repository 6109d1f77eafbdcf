use crate::{
    abstract_trait::{DynUserQueryRepository, UserQueryServiceTrait},
    domain::{
        Actor,
        responses::{ApiResponse, UserResponse},
    },
    errors::ServiceError,
    model::Role,
    service::{
        scope_label,
        user::{not_found_by_id, scoped},
    },
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub struct UserQueryService {
    query: DynUserQueryRepository,
    metrics: Metrics,
}

impl UserQueryService {
    pub async fn new(query: DynUserQueryRepository, registry: Arc<Mutex<Registry>>) -> Self {
        let metrics = Metrics::new();
        metrics.register(
            &mut *registry.lock().await,
            "user_query_service",
            "UserQueryService",
        );

        Self { query, metrics }
    }
}

fn to_responses(users: Vec<crate::model::User>) -> Vec<UserResponse> {
    users.into_iter().map(UserResponse::from).collect()
}

#[async_trait]
impl UserQueryServiceTrait for UserQueryService {
    async fn find_all(
        &self,
        scope: Option<Role>,
    ) -> Result<ApiResponse<Vec<UserResponse>>, ServiceError> {
        self.metrics
            .observe(Method::Get, async {
                let users = self.query.find_all(scope).await?;
                info!("📋 Listed {} {} accounts", users.len(), scope_label(scope));

                Ok(ApiResponse::success(
                    format!("{}s retrieved successfully", scope_label(scope)),
                    to_responses(users),
                ))
            })
            .await
    }

    async fn find_active(
        &self,
        scope: Option<Role>,
    ) -> Result<ApiResponse<Vec<UserResponse>>, ServiceError> {
        self.metrics
            .observe(Method::Get, async {
                let users = self.query.find_active(scope).await?;

                Ok(ApiResponse::success(
                    format!("Active {}s retrieved successfully", scope_label(scope).to_lowercase()),
                    to_responses(users),
                ))
            })
            .await
    }

    async fn search(
        &self,
        scope: Option<Role>,
        term: &str,
    ) -> Result<ApiResponse<Vec<UserResponse>>, ServiceError> {
        self.metrics
            .observe(Method::Get, async {
                let term = term.trim();
                if term.is_empty() {
                    return Err(ServiceError::BadRequest(
                        "Search term must not be empty".to_string(),
                    ));
                }

                let users = self.query.search(scope, term).await?;
                info!("🔎 Search '{term}' matched {} accounts", users.len());

                Ok(ApiResponse::success(
                    format!(
                        "Found {} matching {}s",
                        users.len(),
                        scope_label(scope).to_lowercase()
                    ),
                    to_responses(users),
                ))
            })
            .await
    }

    async fn find_by_id(
        &self,
        actor: &Actor,
        scope: Option<Role>,
        id: i32,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        self.metrics
            .observe(Method::Get, async {
                if !actor.may_access(id) {
                    return Err(ServiceError::Forbidden(
                        "You can only access your own account".to_string(),
                    ));
                }

                let user = scoped(
                    self.query.find_by_id(id).await?,
                    scope,
                    not_found_by_id(scope, id),
                )?;

                Ok(ApiResponse::success(
                    format!("{} retrieved successfully", scope_label(scope)),
                    UserResponse::from(user),
                ))
            })
            .await
    }

    async fn find_by_username(
        &self,
        scope: Option<Role>,
        username: &str,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        self.metrics
            .observe(Method::Get, async {
                let user = scoped(self.query.find_by_username(username).await?, scope, || {
                    format!("{} '{username}' not found", scope_label(scope))
                })?;

                Ok(ApiResponse::success(
                    format!("{} retrieved successfully", scope_label(scope)),
                    UserResponse::from(user),
                ))
            })
            .await
    }

    async fn find_by_seller_code(
        &self,
        code: &str,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        self.metrics
            .observe(Method::Get, async {
                let seller = scoped(
                    self.query.find_by_seller_code(code).await?,
                    Some(Role::Seller),
                    || format!("Seller with code {code} not found"),
                )?;

                Ok(ApiResponse::success(
                    "Seller retrieved successfully",
                    UserResponse::from(seller),
                ))
            })
            .await
    }
}
