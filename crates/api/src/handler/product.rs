use crate::{
    handler::ADMIN_OR_SELLER,
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
    abstract_trait::{DynProductCommandService, DynProductQueryService},
    domain::{
        Actor,
        requests::{
            CreateProductRequest, PatchProductRequest, ProductChanges, ProductNameQuery,
            UpdateProductRequest,
        },
        responses::{ApiResponse, ImageUrlResponse, OwnerProductCountResponse, ProductResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Product",
    params(ProductNameQuery),
    responses(
        (status = 200, description = "Products with their owners", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_products(
    Extension(service): Extension<DynProductQueryService>,
    SimpleValidatedQuery(query): SimpleValidatedQuery<ProductNameQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_all(query.name.as_deref()).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/stats/grouped-by-owner",
    tag = "Product",
    responses(
        (status = 200, description = "Product count per owner", body = ApiResponse<Vec<OwnerProductCountResponse>>)
    )
)]
pub async fn get_products_grouped_by_owner(
    Extension(service): Extension<DynProductQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.grouped_by_owner().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}/image",
    tag = "Product",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Image URL of the product", body = ApiResponse<ImageUrlResponse>),
        (status = 404, description = "Product or image not found")
    )
)]
pub async fn get_product_image(
    Extension(service): Extension<DynProductQueryService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_image(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/search",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(ProductNameQuery),
    responses(
        (status = 200, description = "Products whose name matches", body = ApiResponse<Vec<ProductResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn search_products(
    Extension(service): Extension<DynProductQueryService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedQuery(query): SimpleValidatedQuery<ProductNameQuery>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_OR_SELLER)?;

    let response = service.find_all(query.name.as_deref()).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/active",
    tag = "Product",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active products", body = ApiResponse<Vec<ProductResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn get_active_products(
    Extension(service): Extension<DynProductQueryService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_OR_SELLER)?;

    let response = service.find_active().await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/mine",
    tag = "Product",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Products owned by the caller", body = ApiResponse<Vec<ProductResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn get_my_products(
    Extension(service): Extension<DynProductQueryService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_OR_SELLER)?;

    let response = service.find_by_owner(actor.id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/owner/{owner_id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("owner_id" = i32, Path, description = "Owner account ID")),
    responses(
        (status = 200, description = "Products of the owner", body = ApiResponse<Vec<ProductResponse>>),
        (status = 404, description = "Owner not found")
    )
)]
pub async fn get_products_by_owner(
    Extension(service): Extension<DynProductQueryService>,
    Extension(actor): Extension<Actor>,
    Path(owner_id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_OR_SELLER)?;

    let response = service.find_by_owner(owner_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/owner/username/{username}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("username" = String, Path, description = "Owner username")),
    responses(
        (status = 200, description = "Products of the owner", body = ApiResponse<Vec<ProductResponse>>),
        (status = 404, description = "Owner not found")
    )
)]
pub async fn get_products_by_owner_username(
    Extension(service): Extension<DynProductQueryService>,
    Extension(actor): Extension<Actor>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_OR_SELLER)?;

    let response = service.find_by_owner_username(&username).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product with its owner", body = ApiResponse<ProductResponse>),
        (status = 404, description = "Product not found"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_product(
    Extension(service): Extension<DynProductQueryService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_OR_SELLER)?;

    let response = service.find_by_id(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Product",
    security(("bearer_auth" = [])),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<ProductResponse>),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Owner not found"),
        (status = 409, description = "Owner is inactive or cannot own products")
    )
)]
pub async fn create_product(
    Extension(service): Extension<DynProductCommandService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_OR_SELLER)?;

    let response = service.create(&actor, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn update_product(
    Extension(service): Extension<DynProductCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service
        .update(&actor, id, ProductChanges::from(body))
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    request_body = PatchProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ApiResponse<ProductResponse>),
        (status = 400, description = "No fields to update"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn patch_product(
    Extension(service): Extension<DynProductCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<PatchProductRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service
        .update(&actor, id, ProductChanges::from(body))
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Product",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<ProductResponse>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn delete_product(
    Extension(service): Extension<DynProductCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete(&actor, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn product_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let public_routes = OpenApiRouter::new()
        .route("/api/products", get(get_products))
        .route(
            "/api/products/stats/grouped-by-owner",
            get(get_products_grouped_by_owner),
        )
        .route("/api/products/{id}/image", get(get_product_image))
        .layer(Extension(app_state.di_container.product_query.clone()));

    let private_routes = OpenApiRouter::new()
        .route("/api/products", post(create_product))
        .route("/api/products/search", get(search_products))
        .route("/api/products/active", get(get_active_products))
        .route("/api/products/mine", get(get_my_products))
        .route("/api/products/owner/{owner_id}", get(get_products_by_owner))
        .route(
            "/api/products/owner/username/{username}",
            get(get_products_by_owner_username),
        )
        .route("/api/products/{id}", get(get_product))
        .route("/api/products/{id}", put(update_product))
        .route("/api/products/{id}", patch(patch_product))
        .route("/api/products/{id}", delete(delete_product))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.product_query.clone()))
        .layer(Extension(app_state.di_container.product_command.clone()))
        .layer(Extension(app_state.jwt_config.clone()));

    public_routes.merge(private_routes)
}
