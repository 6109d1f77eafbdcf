mod admin;
mod auth;
mod mailer;
mod product;
mod seller;
mod upload;
mod user;

use anyhow::Result;
use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, header::CONTENT_TYPE},
    response::IntoResponse,
    routing::get,
};
use prometheus_client::encoding::text::encode;
use shared::{errors::HttpError, model::Role, state::AppState, utils::shutdown_signal};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::{Modify, OpenApi, openapi::security::SecurityScheme};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::admin::admin_routes;
pub use self::auth::auth_routes;
pub use self::mailer::mailer_routes;
pub use self::product::product_routes;
pub use self::seller::seller_routes;
pub use self::upload::upload_routes;
pub use self::user::user_routes;

pub(crate) const ADMIN_ONLY: &[Role] = &[Role::Admin];
pub(crate) const ADMIN_OR_SELLER: &[Role] = &[Role::Admin, Role::Seller];

/// Largest accepted request body; the upload service applies the per-kind limits.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::health_checker_handler,
        auth::register_user_handler,
        auth::login_user_handler,
        auth::get_me_handler,

        user::get_users,
        user::get_active_users,
        user::get_users_by_role,
        user::get_user_by_username,
        user::get_user,
        user::create_user,
        user::update_user,
        user::patch_user,
        user::toggle_user_status,
        user::delete_user,

        seller::get_sellers,
        seller::search_sellers,
        seller::get_seller_product_counts,
        seller::get_seller_by_username,
        seller::get_seller_by_code,
        seller::get_seller,
        seller::get_seller_with_products,
        seller::get_seller_active_products,
        seller::create_seller,
        seller::update_seller,
        seller::patch_seller,
        seller::delete_seller,

        admin::get_admins,
        admin::get_admin,
        admin::get_admin_by_username,
        admin::create_admin,
        admin::update_admin,
        admin::patch_admin,
        admin::toggle_admin_status,
        admin::delete_admin,

        product::get_products,
        product::get_products_grouped_by_owner,
        product::get_product_image,
        product::search_products,
        product::get_active_products,
        product::get_my_products,
        product::get_products_by_owner,
        product::get_products_by_owner_username,
        product::get_product,
        product::create_product,
        product::update_product,
        product::patch_product,
        product::delete_product,

        upload::upload_image,
        upload::upload_document,

        mailer::send_mail,
        mailer::send_test_mail,
        mailer::send_welcome_mail,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication endpoints"),
        (name = "User", description = "Account endpoints"),
        (name = "Seller", description = "Seller endpoints"),
        (name = "Admin", description = "Admin endpoints"),
        (name = "Product", description = "Product endpoints"),
        (name = "Upload", description = "File upload endpoints"),
        (name = "Mailer", description = "Email endpoints"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub async fn metrics_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    encode(&mut buffer, &registry)
        .map_err(|e| HttpError::Internal(format!("Failed to encode metrics: {e}")))?;

    Ok((
        [(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )],
        buffer,
    ))
}

fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origin == "*" {
        return cors.allow_origin(Any);
    }

    match HeaderValue::from_str(origin) {
        Ok(value) => cors.allow_origin(value),
        Err(_) => {
            warn!("⚠️ Invalid CORS_ORIGIN '{origin}', allowing any origin");
            cors.allow_origin(Any)
        }
    }
}

pub struct AppRouter;

impl AppRouter {
    /// Assembles every route, the OpenAPI document and the static upload directory.
    pub fn build(app_state: AppState, cors_origin: &str) -> Router {
        let upload_dir = app_state.upload_dir.clone();
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone())
            .merge(auth_routes(shared_state.clone()))
            .merge(user_routes(shared_state.clone()))
            .merge(seller_routes(shared_state.clone()))
            .merge(admin_routes(shared_state.clone()))
            .merge(product_routes(shared_state.clone()))
            .merge(upload_routes(shared_state.clone()))
            .merge(mailer_routes(shared_state));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES));

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
            .nest_service("/uploads", ServeDir::new(upload_dir))
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(cors_origin))
    }

    pub async fn serve(port: u16, app_state: AppState, cors_origin: &str) -> Result<()> {
        let app = Self::build(app_state, cors_origin);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        info!("🚀 Server running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
