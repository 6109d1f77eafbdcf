use crate::{
    abstract_trait::{
        DynHashing, DynUserCommandRepository, DynUserQueryRepository, UserCommandServiceTrait,
    },
    domain::{
        Actor,
        requests::{CreateUserRequest, NewUser, PatchUserRequest, UserChanges},
        responses::{ApiResponse, UserResponse},
    },
    errors::ServiceError,
    model::Role,
    service::{
        scope_label,
        user::{not_found_by_id, scoped},
    },
    utils::{Method, Metrics, generate_seller_code},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub struct UserCommandService {
    query: DynUserQueryRepository,
    command: DynUserCommandRepository,
    hashing: DynHashing,
    metrics: Metrics,
}

impl UserCommandService {
    pub async fn new(
        query: DynUserQueryRepository,
        command: DynUserCommandRepository,
        hashing: DynHashing,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(
            &mut *registry.lock().await,
            "user_command_service",
            "UserCommandService",
        );

        Self {
            query,
            command,
            hashing,
            metrics,
        }
    }

    /// Rejects a username or email already held by an account other than `id`.
    async fn ensure_unique(
        &self,
        id: Option<i32>,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<(), ServiceError> {
        if let Some(username) = username
            && let Some(existing) = self.query.find_by_username(username).await?
            && Some(existing.id) != id
        {
            return Err(ServiceError::Conflict("Username already exists".to_string()));
        }

        if let Some(email) = email
            && let Some(existing) = self.query.find_by_email(email).await?
            && Some(existing.id) != id
        {
            return Err(ServiceError::Conflict("Email already exists".to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl UserCommandServiceTrait for UserCommandService {
    async fn create(
        &self,
        scope: Option<Role>,
        req: &CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        self.metrics
            .observe(Method::Post, async {
                let role = match (scope, req.role) {
                    (Some(scope), Some(requested)) if scope != requested => {
                        return Err(ServiceError::BadRequest(format!(
                            "Role must be '{scope}' for this endpoint"
                        )));
                    }
                    (Some(scope), _) => scope,
                    (None, requested) => requested.unwrap_or_default(),
                };

                self.ensure_unique(None, Some(&req.username), Some(&req.email))
                    .await?;

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
                        is_active: req.is_active.unwrap_or(true),
                        seller_code: (role == Role::Seller).then(generate_seller_code),
                    })
                    .await?;

                info!("✅ Created {} account {} ({})", role, user.username, user.id);

                Ok(ApiResponse::success(
                    format!("{} created successfully", scope_label(Some(role))),
                    UserResponse::from(user),
                ))
            })
            .await
    }

    async fn update(
        &self,
        actor: &Actor,
        scope: Option<Role>,
        id: i32,
        req: &PatchUserRequest,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        self.metrics
            .observe(Method::Put, async {
                if req.is_empty() {
                    return Err(ServiceError::BadRequest("No fields to update".to_string()));
                }

                if !actor.may_access(id) {
                    return Err(ServiceError::Forbidden(
                        "You can only update your own account".to_string(),
                    ));
                }

                if !actor.is_admin() && (req.role.is_some() || req.is_active.is_some()) {
                    return Err(ServiceError::Forbidden(
                        "Only administrators can change role or status".to_string(),
                    ));
                }

                if let (Some(scope), Some(requested)) = (scope, req.role)
                    && scope != requested
                {
                    return Err(ServiceError::BadRequest(format!(
                        "Role must be '{scope}' for this endpoint"
                    )));
                }

                let existing = scoped(
                    self.query.find_by_id(id).await?,
                    scope,
                    not_found_by_id(scope, id),
                )?;

                self.ensure_unique(Some(id), req.username.as_deref(), req.email.as_deref())
                    .await?;

                let password_hash = match &req.password {
                    Some(password) => Some(self.hashing.hash_password(password).await?),
                    None => None,
                };

                let becomes_seller = req.role.unwrap_or(existing.role) == Role::Seller;
                let seller_code = (becomes_seller && existing.seller_code.is_none())
                    .then(generate_seller_code);

                let changes = UserChanges {
                    username: req.username.clone(),
                    email: req.email.as_ref().map(|e| e.to_lowercase()),
                    password_hash,
                    phone: req.phone.clone(),
                    full_name: req.full_name.clone(),
                    role: req.role,
                    is_active: req.is_active,
                    seller_code,
                };

                let user = self.command.update_user(id, &changes).await?;
                info!("✏️ Updated account {} ({})", user.username, user.id);

                Ok(ApiResponse::success(
                    format!("{} updated successfully", scope_label(scope)),
                    UserResponse::from(user),
                ))
            })
            .await
    }

    async fn toggle_status(
        &self,
        scope: Option<Role>,
        id: i32,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        self.metrics
            .observe(Method::Patch, async {
                scoped(
                    self.query.find_by_id(id).await?,
                    scope,
                    not_found_by_id(scope, id),
                )?;

                let user = self.command.toggle_status(id).await?;
                let state = if user.is_active {
                    "activated"
                } else {
                    "deactivated"
                };
                info!("🔁 Account {} {state}", user.username);

                Ok(ApiResponse::success(
                    format!("{} '{}' has been {state}", scope_label(scope), user.username),
                    UserResponse::from(user),
                ))
            })
            .await
    }

    async fn delete(
        &self,
        actor: &Actor,
        scope: Option<Role>,
        id: i32,
    ) -> Result<ApiResponse<UserResponse>, ServiceError> {
        self.metrics
            .observe(Method::Delete, async {
                if !actor.may_access(id) {
                    return Err(ServiceError::Forbidden(
                        "You can only delete your own account".to_string(),
                    ));
                }

                scoped(
                    self.query.find_by_id(id).await?,
                    scope,
                    not_found_by_id(scope, id),
                )?;

                let user = self.command.delete_user(id).await?;
                warn!("🗑️ Deleted account {} ({})", user.username, user.id);

                Ok(ApiResponse::success(
                    format!(
                        "{} '{}' has been successfully deleted",
                        scope_label(scope),
                        user.username
                    ),
                    UserResponse::from(user),
                ))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Hashing, repository::memory::MemoryDb};

    async fn service(db: &MemoryDb) -> UserCommandService {
        let users = db.user_repository();
        UserCommandService::new(
            users.query,
            users.command,
            Arc::new(Hashing::new(4)),
            Arc::new(Mutex::new(Registry::default())),
        )
        .await
    }

    fn create_request(username: &str, email: &str, role: Option<Role>) -> CreateUserRequest {
        CreateUserRequest {
            username: username.into(),
            password: "longenoughpw".into(),
            phone: "01712345678".into(),
            email: email.into(),
            full_name: None,
            role,
            is_active: None,
        }
    }

    #[tokio::test]
    async fn scoped_create_forces_role() {
        let db = MemoryDb::new();
        let svc = service(&db).await;

        let seller = svc
            .create(Some(Role::Seller), &create_request("shop", "s@b.com", None))
            .await
            .unwrap();
        assert_eq!(seller.data.role, Role::Seller);
        assert!(seller.data.seller_code.is_some());

        let mismatch = svc
            .create(
                Some(Role::Seller),
                &create_request("shop2", "s2@b.com", Some(Role::Admin)),
            )
            .await;
        assert!(matches!(mismatch, Err(ServiceError::BadRequest(_))));
    }

    #[tokio::test]
    async fn non_admin_cannot_touch_others_or_escalate() {
        let db = MemoryDb::new();
        let svc = service(&db).await;
        let alice = svc
            .create(None, &create_request("alice", "a@b.com", None))
            .await
            .unwrap()
            .data;
        let bob = svc
            .create(None, &create_request("bob", "b@b.com", None))
            .await
            .unwrap()
            .data;

        let as_alice = Actor::new(alice.id, Role::User);
        let patch = PatchUserRequest {
            phone: Some("0199".into()),
            ..Default::default()
        };

        let other = svc.update(&as_alice, None, bob.id, &patch).await;
        assert!(matches!(other, Err(ServiceError::Forbidden(_))));

        let escalate = PatchUserRequest {
            role: Some(Role::Admin),
            ..Default::default()
        };
        let result = svc.update(&as_alice, None, alice.id, &escalate).await;
        assert!(matches!(result, Err(ServiceError::Forbidden(_))));

        let own = svc.update(&as_alice, None, alice.id, &patch).await.unwrap();
        assert_eq!(own.data.phone, "0199");
    }

    #[tokio::test]
    async fn update_detects_taken_username() {
        let db = MemoryDb::new();
        let svc = service(&db).await;
        svc.create(None, &create_request("alice", "a@b.com", None))
            .await
            .unwrap();
        let bob = svc
            .create(None, &create_request("bob", "b@b.com", None))
            .await
            .unwrap()
            .data;

        let admin = Actor::new(999, Role::Admin);
        let patch = PatchUserRequest {
            username: Some("alice".into()),
            ..Default::default()
        };

        match svc.update(&admin, None, bob.id, &patch).await {
            Err(ServiceError::Conflict(msg)) => assert_eq!(msg, "Username already exists"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn promoting_to_seller_assigns_code() {
        let db = MemoryDb::new();
        let svc = service(&db).await;
        let user = svc
            .create(None, &create_request("carol", "c@b.com", None))
            .await
            .unwrap()
            .data;
        assert!(user.seller_code.is_none());

        let admin = Actor::new(999, Role::Admin);
        let promoted = svc
            .update(
                &admin,
                None,
                user.id,
                &PatchUserRequest {
                    role: Some(Role::Seller),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(promoted.data.role, Role::Seller);
        assert!(promoted.data.seller_code.is_some());
    }

    #[tokio::test]
    async fn scoped_lookups_hide_other_roles() {
        let db = MemoryDb::new();
        let svc = service(&db).await;
        let user = svc
            .create(None, &create_request("dave", "d@b.com", None))
            .await
            .unwrap()
            .data;

        let admin = Actor::new(999, Role::Admin);
        let result = svc.delete(&admin, Some(Role::Seller), user.id).await;
        match result {
            Err(ServiceError::NotFound(msg)) => {
                assert_eq!(msg, format!("Seller with id {} not found", user.id))
            }
            other => panic!("unexpected: {other:?}"),
        }

        let deleted = svc.delete(&admin, None, user.id).await.unwrap();
        assert_eq!(deleted.message, "User 'dave' has been successfully deleted");
        assert!(db.users().is_empty());
    }

    #[tokio::test]
    async fn toggle_flips_active_flag() {
        let db = MemoryDb::new();
        let svc = service(&db).await;
        let user = svc
            .create(None, &create_request("erin", "e@b.com", None))
            .await
            .unwrap()
            .data;

        let off = svc.toggle_status(None, user.id).await.unwrap();
        assert!(!off.data.is_active);
        let on = svc.toggle_status(None, user.id).await.unwrap();
        assert!(on.data.is_active);
    }
}
