use crate::{
    abstract_trait::{
        AuthServiceTrait, DynHashing, DynJwtService, DynUserCommandRepository,
        DynUserQueryRepository,
    },
    config::AdminSeedConfig,
    domain::{
        requests::{LoginRequest, NewUser, RegisterRequest},
        responses::{ApiResponse, TokenResponse, UserResponse},
    },
    errors::ServiceError,
    model::Role,
    utils::{Method, Metrics, generate_seller_code},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub struct AuthService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    hashing: DynHashing,
    jwt: DynJwtService,
    metrics: Metrics,
}

impl AuthService {
    pub async fn new(
        query: DynUserQueryRepository,
        command: DynUserCommandRepository,
        hashing: DynHashing,
        jwt: DynJwtService,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "auth_service", "AuthService");

        Self {
            query,
            command,
            hashing,
            jwt,
            metrics,
        }
    }

    async fn ensure_unique(&self, username: &str, email: &str) -> Result<(), ServiceError> {
        if self.query.find_by_username(username).await?.is_some() {
            warn!("⚠️ Username already taken: {username}");
            return Err(ServiceError::Conflict("Username already exists".to_string()));
        }

        if self.query.find_by_email(email).await?.is_some() {
            warn!("⚠️ Email already registered: {email}");
            return Err(ServiceError::Conflict("Email already exists".to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl AuthServiceTrait for AuthService {
    async fn register(
        &self,
        req: &RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        self.metrics
            .observe(Method::Post, async {
                info!("📝 Registering account: {}", req.username);

                let role = req.role.unwrap_or_default();
                if role == Role::Admin {
                    return Err(ServiceError::Forbidden(
                        "Admin accounts cannot be created through registration".to_string(),
                    ));
                }

                self.ensure_unique(&req.username, &req.email).await?;

                let password_hash = self.hashing.hash_password(&req.password).await?;

                let user = self
                    .command
                    .create_user(&NewUser {
                        username: req.username.clone(),
                        email: req.email.to_lowercase(),
                        password_hash,
                        phone: req.phone.clone(),
                        full_name: req.full_name.clone(),
                        role,
                        is_active: true,
                        seller_code: (role == Role::Seller).then(generate_seller_code),
                    })
                    .await?;

                info!("✅ Registered account {} with id {}", user.username, user.id);

                Ok(ApiResponse::success(
                    "User registered successfully",
                    UserResponse::from(user),
                ))
            })
            .await
    }

    async fn login(&self, req: &LoginRequest) -> Result<ApiResponse<TokenResponse>, ServiceError> {
        self.metrics
            .observe(Method::Post, async {
                info!("🔐 Attempting login for username: {}", req.username);

                let user = match self.query.find_by_username(&req.username).await? {
                    Some(user) if user.is_active => user,
                    Some(_) => {
                        warn!("❌ Login for inactive account: {}", req.username);
                        return Err(ServiceError::InvalidCredentials);
                    }
                    None => {
                        warn!("❌ Login for unknown account: {}", req.username);
                        return Err(ServiceError::InvalidCredentials);
                    }
                };

                if let Err(err) = self
                    .hashing
                    .compare_password(&user.password, &req.password)
                    .await
                {
                    warn!("❌ Password check failed for {}: {err}", req.username);
                    return Err(ServiceError::InvalidCredentials);
                }

                let access_token = self.jwt.issue(
                    user.id,
                    &user.username,
                    &user.email,
                    user.role,
                    user.is_active,
                )?;

                info!("✅ Login successful for {}", user.username);

                Ok(ApiResponse::success(
                    "Login successful",
                    TokenResponse::bearer(access_token, self.jwt.expires_in_seconds()),
                ))
            })
            .await
    }

    async fn me(&self, user_id: i32) -> Result<ApiResponse<UserResponse>, ServiceError> {
        self.metrics
            .observe(Method::Get, async {
                let user = self
                    .query
                    .find_by_id(user_id)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound("User not found".to_string()))?;

                Ok(ApiResponse::success(
                    "User retrieved successfully",
                    UserResponse::from(user),
                ))
            })
            .await
    }

    async fn bootstrap_admin(&self, seed: &AdminSeedConfig) -> Result<bool, ServiceError> {
        if self.query.find_by_username(&seed.username).await?.is_some() {
            info!("👤 Bootstrap admin {} already present", seed.username);
            return Ok(false);
        }

        let password_hash = self.hashing.hash_password(&seed.password).await?;

        let admin = self
            .command
            .create_user(&NewUser {
                username: seed.username.clone(),
                email: seed.email.to_lowercase(),
                password_hash,
                phone: seed.phone.clone(),
                full_name: None,
                role: Role::Admin,
                is_active: true,
                seller_code: None,
            })
            .await?;

        info!("✅ Bootstrap admin {} created with id {}", admin.username, admin.id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{Hashing, JwtConfig},
        repository::memory::MemoryDb,
    };

    async fn service(db: &MemoryDb) -> AuthService {
        let users = db.user_repository();
        AuthService::new(
            users.query,
            users.command,
            Arc::new(Hashing::new(4)),
            Arc::new(JwtConfig::new("test-secret", 60)),
            Arc::new(Mutex::new(Registry::default())),
        )
        .await
    }

    fn register_request(username: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.into(),
            password: "longenoughpw".into(),
            phone: "01712345678".into(),
            email: email.into(),
            full_name: None,
            role: None,
        }
    }

    #[tokio::test]
    async fn register_twice_conflicts_on_username_then_email() {
        let db = MemoryDb::new();
        let auth = service(&db).await;

        let created = auth
            .register(&register_request("alice123", "a@b.com"))
            .await
            .unwrap();
        assert_eq!(created.data.role, Role::User);
        assert!(created.data.seller_code.is_none());

        match auth.register(&register_request("alice123", "other@b.com")).await {
            Err(ServiceError::Conflict(msg)) => assert_eq!(msg, "Username already exists"),
            other => panic!("unexpected: {other:?}"),
        }

        match auth.register(&register_request("bob_1", "A@B.com")).await {
            Err(ServiceError::Conflict(msg)) => assert_eq!(msg, "Email already exists"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn password_is_stored_hashed() {
        let db = MemoryDb::new();
        let auth = service(&db).await;
        auth.register(&register_request("alice123", "a@b.com"))
            .await
            .unwrap();

        let stored = &db.users()[0];
        assert_ne!(stored.password, "longenoughpw");
        assert!(stored.password.starts_with("$2"));
    }

    #[tokio::test]
    async fn sellers_get_a_code_and_admins_are_refused() {
        let db = MemoryDb::new();
        let auth = service(&db).await;

        let seller = auth
            .register(&RegisterRequest {
                role: Some(Role::Seller),
                ..register_request("shop_one", "shop@b.com")
            })
            .await
            .unwrap();
        assert!(seller.data.seller_code.unwrap().starts_with("SELLER_"));

        let admin = auth
            .register(&RegisterRequest {
                role: Some(Role::Admin),
                ..register_request("root_user", "root@b.com")
            })
            .await;
        assert!(matches!(admin, Err(ServiceError::Forbidden(_))));
    }

    #[tokio::test]
    async fn login_rejects_wrong_password_and_inactive_accounts() {
        let db = MemoryDb::new();
        let auth = service(&db).await;
        let user = auth
            .register(&register_request("alice123", "a@b.com"))
            .await
            .unwrap()
            .data;

        let ok = auth
            .login(&LoginRequest {
                username: "alice123".into(),
                password: "longenoughpw".into(),
            })
            .await
            .unwrap();
        assert_eq!(ok.data.token_type, "Bearer");
        assert_eq!(ok.data.expires_in, 3600);

        let wrong = auth
            .login(&LoginRequest {
                username: "alice123".into(),
                password: "wrongpassword".into(),
            })
            .await;
        assert!(matches!(wrong, Err(ServiceError::InvalidCredentials)));

        db.user_repository()
            .command
            .toggle_status(user.id)
            .await
            .unwrap();
        let inactive = auth
            .login(&LoginRequest {
                username: "alice123".into(),
                password: "longenoughpw".into(),
            })
            .await;
        assert!(matches!(inactive, Err(ServiceError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn bootstrap_admin_runs_once() {
        let db = MemoryDb::new();
        let auth = service(&db).await;
        let seed = AdminSeedConfig {
            username: "admin".into(),
            email: "admin@example.com".into(),
            password: "adminpassword".into(),
            phone: "01000000000".into(),
        };

        assert!(auth.bootstrap_admin(&seed).await.unwrap());
        assert!(!auth.bootstrap_admin(&seed).await.unwrap());

        let users = db.users();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, Role::Admin);
    }
}
