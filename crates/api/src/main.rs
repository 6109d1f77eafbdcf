use anyhow::{Context, Result};
use api::handler::AppRouter;
use dotenv::dotenv;
use shared::{
    config::{Config, ConnectionManager},
    state::AppState,
    utils::init_logger,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    let _log_guard = init_logger("api", is_dev);

    let config = Config::init().context("Failed to load configuration")?;

    let pool = ConnectionManager::new_pool(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to connect to database")?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;
        info!("✅ Database migrations applied");
    }

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to create upload directory {}", config.upload_dir))?;

    let state = AppState::new(pool, &config)
        .await
        .context("Failed to create AppState")?;

    if let Some(seed) = &config.admin_seed {
        match state.di_container.auth_service.bootstrap_admin(seed).await {
            Ok(true) => info!("👑 Bootstrap admin '{}' created", seed.username),
            Ok(false) => info!("👑 Bootstrap admin '{}' already present", seed.username),
            Err(err) => warn!("⚠️ Failed to create bootstrap admin: {err}"),
        }
    }

    AppRouter::serve(config.port, state, &config.cors_origin)
        .await
        .context("Failed to start server")?;

    info!("👋 Server shut down");

    Ok(())
}
