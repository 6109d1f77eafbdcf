use crate::{
    handler::ADMIN_ONLY,
    middleware::{auth_middleware, ensure_role, validate::SimpleValidatedJson},
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
    abstract_trait::{DynUserCommandService, DynUserQueryService},
    domain::{
        Actor,
        requests::{CreateUserRequest, PatchUserRequest, UpdateUserRequest},
        responses::{ApiResponse, UserResponse},
    },
    errors::HttpError,
    model::Role,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

const SCOPE: Option<Role> = Some(Role::Admin);

#[utoipa::path(
    get,
    path = "/api/admins",
    tag = "Admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All admins", body = ApiResponse<Vec<UserResponse>>),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn get_admins(
    Extension(service): Extension<DynUserQueryService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.find_all(SCOPE).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admins/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Admin", body = ApiResponse<UserResponse>),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn get_admin(
    Extension(service): Extension<DynUserQueryService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.find_by_id(&actor, SCOPE, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/admins/username/{username}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("username" = String, Path, description = "Admin username")),
    responses(
        (status = 200, description = "Admin", body = ApiResponse<UserResponse>),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn get_admin_by_username(
    Extension(service): Extension<DynUserQueryService>,
    Extension(actor): Extension<Actor>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.find_by_username(SCOPE, &username).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/admins",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Admin created", body = ApiResponse<UserResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already exists")
    )
)]
pub async fn create_admin(
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
    path = "/api/admins/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Admin ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Admin updated", body = ApiResponse<UserResponse>),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn update_admin(
    Extension(service): Extension<DynUserCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service
        .update(&actor, SCOPE, id, &PatchUserRequest::from(body))
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/admins/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Admin ID")),
    request_body = PatchUserRequest,
    responses(
        (status = 200, description = "Admin updated", body = ApiResponse<UserResponse>),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn patch_admin(
    Extension(service): Extension<DynUserCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<PatchUserRequest>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.update(&actor, SCOPE, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/admins/{id}/toggle-status",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Status flipped", body = ApiResponse<UserResponse>),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn toggle_admin_status(
    Extension(service): Extension<DynUserCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.toggle_status(SCOPE, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/admins/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Admin deleted", body = ApiResponse<UserResponse>),
        (status = 404, description = "Admin not found")
    )
)]
pub async fn delete_admin(
    Extension(service): Extension<DynUserCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.delete(&actor, SCOPE, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn admin_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/admins", get(get_admins))
        .route("/api/admins", post(create_admin))
        .route("/api/admins/username/{username}", get(get_admin_by_username))
        .route("/api/admins/{id}", get(get_admin))
        .route("/api/admins/{id}", put(update_admin))
        .route("/api/admins/{id}", patch(patch_admin))
        .route("/api/admins/{id}", delete(delete_admin))
        .route("/api/admins/{id}/toggle-status", patch(toggle_admin_status))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.user_query.clone()))
        .layer(Extension(app_state.di_container.user_command.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
