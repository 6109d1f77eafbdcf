use crate::{
    handler::{ADMIN_ONLY, ADMIN_OR_SELLER},
    middleware::{
        auth_middleware, ensure_role,
        validate::{SimpleValidatedJson, SimpleValidatedQuery},
    },
};
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
};
use shared::{
    abstract_trait::{DynProductQueryService, DynUserCommandService, DynUserQueryService},
    domain::{
        Actor,
        requests::{CreateUserRequest, PatchUserRequest, SearchQuery, UpdateUserRequest},
        responses::{
            ApiResponse, OwnerProductCountResponse, ProductResponse, SellerWithProductsResponse,
            UserResponse,
        },
    },
    errors::HttpError,
    model::Role,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

const SCOPE: Option<Role> = Some(Role::Seller);

#[utoipa::path(
    get,
    path = "/api/sellers",
    tag = "Seller",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All sellers", body = ApiResponse<Vec<UserResponse>>),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn get_sellers(
    Extension(service): Extension<DynUserQueryService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.find_all(SCOPE).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/sellers/search",
    tag = "Seller",
    security(("bearer_auth" = [])),
    params(SearchQuery),
    responses(
        (status = 200, description = "Sellers whose username or full name matches", body = ApiResponse<Vec<UserResponse>>),
        (status = 400, description = "Missing search term"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn search_sellers(
    Extension(service): Extension<DynUserQueryService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedQuery(query): SimpleValidatedQuery<SearchQuery>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.search(SCOPE, &query.q).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/sellers/stats/product-counts",
    tag = "Seller",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product count per seller", body = ApiResponse<Vec<OwnerProductCountResponse>>),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn get_seller_product_counts(
    Extension(service): Extension<DynProductQueryService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_OR_SELLER)?;

    let response = service.seller_product_counts().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/sellers/username/{username}",
    tag = "Seller",
    security(("bearer_auth" = [])),
    params(("username" = String, Path, description = "Seller username")),
    responses(
        (status = 200, description = "Seller", body = ApiResponse<UserResponse>),
        (status = 404, description = "Seller not found")
    )
)]
pub async fn get_seller_by_username(
    Extension(service): Extension<DynUserQueryService>,
    Extension(actor): Extension<Actor>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.find_by_username(SCOPE, &username).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/sellers/code/{code}",
    tag = "Seller",
    security(("bearer_auth" = [])),
    params(("code" = String, Path, description = "Seller code")),
    responses(
        (status = 200, description = "Seller", body = ApiResponse<UserResponse>),
        (status = 404, description = "Seller not found")
    )
)]
pub async fn get_seller_by_code(
    Extension(service): Extension<DynUserQueryService>,
    Extension(actor): Extension<Actor>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.find_by_seller_code(&code).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/sellers/{id}",
    tag = "Seller",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Seller ID")),
    responses(
        (status = 200, description = "Seller", body = ApiResponse<UserResponse>),
        (status = 403, description = "Not your account"),
        (status = 404, description = "Seller not found")
    )
)]
pub async fn get_seller(
    Extension(service): Extension<DynUserQueryService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(&actor, SCOPE, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/sellers/{id}/products",
    tag = "Seller",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Seller ID")),
    responses(
        (status = 200, description = "Seller with all of their products", body = ApiResponse<SellerWithProductsResponse>),
        (status = 404, description = "Seller not found")
    )
)]
pub async fn get_seller_with_products(
    Extension(service): Extension<DynProductQueryService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_OR_SELLER)?;

    let response = service.seller_with_products(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/sellers/{id}/products/active",
    tag = "Seller",
    params(("id" = i32, Path, description = "Seller ID")),
    responses(
        (status = 200, description = "Active products of the seller", body = ApiResponse<Vec<ProductResponse>>),
        (status = 404, description = "Seller not found")
    )
)]
pub async fn get_seller_active_products(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.seller_active_products(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/sellers",
    tag = "Seller",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Seller created", body = ApiResponse<UserResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already exists")
    )
)]
pub async fn create_seller(
    Extension(service): Extension<DynUserCommandService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateUserRequest>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.create(SCOPE, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/sellers/{id}",
    tag = "Seller",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Seller ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Seller updated", body = ApiResponse<UserResponse>),
        (status = 403, description = "Not your account"),
        (status = 404, description = "Seller not found")
    )
)]
pub async fn update_seller(
    Extension(service): Extension<DynUserCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service
        .update(&actor, SCOPE, id, &PatchUserRequest::from(body))
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/sellers/{id}",
    tag = "Seller",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Seller ID")),
    request_body = PatchUserRequest,
    responses(
        (status = 200, description = "Seller updated", body = ApiResponse<UserResponse>),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Seller not found")
    )
)]
pub async fn patch_seller(
    Extension(service): Extension<DynUserCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<PatchUserRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update(&actor, SCOPE, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/sellers/{id}",
    tag = "Seller",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Seller ID")),
    responses(
        (status = 200, description = "Seller and their products deleted", body = ApiResponse<UserResponse>),
        (status = 403, description = "Not your account"),
        (status = 404, description = "Seller not found")
    )
)]
pub async fn delete_seller(
    Extension(service): Extension<DynUserCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete(&actor, SCOPE, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn seller_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public_routes = OpenApiRouter::new()
        .route(
            "/api/sellers/{id}/products/active",
            get(get_seller_active_products),
        )
        .layer(Extension(app_state.di_container.product_query.clone()));

    let private_routes = OpenApiRouter::new()
        .route("/api/sellers", get(get_sellers))
        .route("/api/sellers", post(create_seller))
        .route("/api/sellers/search", get(search_sellers))
        .route(
            "/api/sellers/stats/product-counts",
            get(get_seller_product_counts),
        )
        .route(
            "/api/sellers/username/{username}",
            get(get_seller_by_username),
        )
        .route("/api/sellers/code/{code}", get(get_seller_by_code))
        .route("/api/sellers/{id}", get(get_seller))
        .route("/api/sellers/{id}", put(update_seller))
        .route("/api/sellers/{id}", patch(patch_seller))
        .route("/api/sellers/{id}", delete(delete_seller))
        .route("/api/sellers/{id}/products", get(get_seller_with_products))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.user_query.clone()))
        .layer(Extension(app_state.di_container.user_command.clone()))
        .layer(Extension(app_state.di_container.product_query.clone()))
        .layer(Extension(app_state.jwt_config.clone()));

    public_routes.merge(private_routes)
}
