use crate::{
    abstract_trait::{DynEmailService, DynHashing, DynJwtService},
    config::{Config, ConnectionPool, Hashing, JwtConfig, SmtpMailer},
    di::{DependenciesInject, DependenciesInjectDeps},
    repository::{ProductRepository, UserRepository},
    utils::{SystemMetrics, run_metrics_collector},
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use std::{fmt, path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub jwt_config: DynJwtService,
    pub registry: Arc<Mutex<Registry>>,
    pub upload_dir: PathBuf,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("jwt_config", &self.jwt_config)
            .field("upload_dir", &self.upload_dir)
            .finish()
    }
}

impl AppState {
    pub async fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let jwt_config = Arc::new(JwtConfig::new(
            &config.jwt_secret,
            config.jwt_expires_in_minutes,
        )) as DynJwtService;
        let hashing = Arc::new(Hashing::new(config.bcrypt_cost)) as DynHashing;
        let email = Arc::new(
            SmtpMailer::new(&config.email_config).context("Failed to configure SMTP mailer")?,
        ) as DynEmailService;

        let registry = Arc::new(Mutex::new(Registry::default()));
        let system_metrics = Arc::new(SystemMetrics::new());
        system_metrics.register(&mut *registry.lock().await);

        let deps = DependenciesInjectDeps {
            user_repository: UserRepository::new(pool.clone()),
            product_repository: ProductRepository::new(pool.clone()),
            hash: hashing,
            jwt_config: jwt_config.clone(),
            email,
            upload_dir: PathBuf::from(&config.upload_dir),
            registry: registry.clone(),
        };

        let di_container = DependenciesInject::new(deps).await;

        tokio::spawn(run_metrics_collector(system_metrics));

        Ok(Self {
            di_container,
            jwt_config,
            registry,
            upload_dir: PathBuf::from(&config.upload_dir),
        })
    }

    /// State wired to in-memory repositories and a recording mailer.
    #[cfg(any(test, feature = "test-util"))]
    pub async fn in_memory(
        db: &crate::repository::memory::MemoryDb,
        mailer: crate::repository::memory::RecordingMailer,
        upload_dir: PathBuf,
    ) -> Self {
        let jwt_config = Arc::new(JwtConfig::new("test-secret", 60)) as DynJwtService;
        let registry = Arc::new(Mutex::new(Registry::default()));

        let deps = DependenciesInjectDeps {
            user_repository: db.user_repository(),
            product_repository: db.product_repository(),
            hash: Arc::new(Hashing::new(4)) as DynHashing,
            jwt_config: jwt_config.clone(),
            email: Arc::new(mailer) as DynEmailService,
            upload_dir: upload_dir.clone(),
            registry: registry.clone(),
        };

        Self {
            di_container: DependenciesInject::new(deps).await,
            jwt_config,
            registry,
            upload_dir,
        }
    }
}
