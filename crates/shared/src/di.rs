use crate::{
    abstract_trait::{
        DynAuthService, DynEmailService, DynHashing, DynJwtService, DynMailerService,
        DynProductCommandService, DynProductQueryService, DynUploadService,
        DynUserCommandService, DynUserQueryService,
    },
    repository::{ProductRepository, UserRepository},
    service::{
        AuthService, MailerService, ProductCommandService, ProductQueryService, UploadService,
        UserCommandService, UserQueryService,
    },
};
use prometheus_client::registry::Registry;
use std::{fmt, path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
    pub user_query: DynUserQueryService,
    pub user_command: DynUserCommandService,
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
    pub upload_service: DynUploadService,
    pub mailer_service: DynMailerService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"<AuthService>")
            .field("user_query", &"<UserQueryService>")
            .field("user_command", &"<UserCommandService>")
            .field("product_query", &"<ProductQueryService>")
            .field("product_command", &"<ProductCommandService>")
            .field("upload_service", &"<UploadService>")
            .field("mailer_service", &"<MailerService>")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub user_repository: UserRepository,
    pub product_repository: ProductRepository,
    pub hash: DynHashing,
    pub jwt_config: DynJwtService,
    pub email: DynEmailService,
    pub upload_dir: PathBuf,
    pub registry: Arc<Mutex<Registry>>,
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps) -> Self {
        let DependenciesInjectDeps {
            user_repository,
            product_repository,
            hash,
            jwt_config,
            email,
            upload_dir,
            registry,
        } = deps;

        let auth_service = Arc::new(
            AuthService::new(
                user_repository.query.clone(),
                user_repository.command.clone(),
                hash.clone(),
                jwt_config,
                registry.clone(),
            )
            .await,
        ) as DynAuthService;

        let user_query = Arc::new(
            UserQueryService::new(user_repository.query.clone(), registry.clone()).await,
        ) as DynUserQueryService;

        let user_command = Arc::new(
            UserCommandService::new(
                user_repository.query.clone(),
                user_repository.command.clone(),
                hash,
                registry.clone(),
            )
            .await,
        ) as DynUserCommandService;

        let product_query = Arc::new(
            ProductQueryService::new(
                product_repository.query.clone(),
                user_repository.query.clone(),
                registry.clone(),
            )
            .await,
        ) as DynProductQueryService;

        let product_command = Arc::new(
            ProductCommandService::new(
                product_repository.query.clone(),
                product_repository.command.clone(),
                user_repository.query.clone(),
                registry.clone(),
            )
            .await,
        ) as DynProductCommandService;

        let upload_service =
            Arc::new(UploadService::new(upload_dir, registry.clone()).await) as DynUploadService;

        let mailer_service =
            Arc::new(MailerService::new(email, registry.clone()).await) as DynMailerService;

        Self {
            auth_service,
            user_query,
            user_command,
            product_query,
            product_command,
            upload_service,
            mailer_service,
        }
    }
}
