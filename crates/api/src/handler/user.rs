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

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "User",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All accounts", body = ApiResponse<Vec<UserResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn get_users(
    Extension(service): Extension<DynUserQueryService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.find_all(None).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/users/active",
    tag = "User",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Active accounts", body = ApiResponse<Vec<UserResponse>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn get_active_users(
    Extension(service): Extension<DynUserQueryService>,
    Extension(actor): Extension<Actor>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.find_active(None).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/users/role/{role}",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("role" = String, Path, description = "user, seller or admin")),
    responses(
        (status = 200, description = "Accounts with the role", body = ApiResponse<Vec<UserResponse>>),
        (status = 400, description = "Unknown role"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn get_users_by_role(
    Extension(service): Extension<DynUserQueryService>,
    Extension(actor): Extension<Actor>,
    Path(role): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let role = role
        .parse::<Role>()
        .map_err(|err| HttpError::BadRequest(err.to_string()))?;

    let response = service.find_all(Some(role)).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/users/username/{username}",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "Account", body = ApiResponse<UserResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user_by_username(
    Extension(service): Extension<DynUserQueryService>,
    Extension(actor): Extension<Actor>,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.find_by_username(None, &username).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account", body = ApiResponse<UserResponse>),
        (status = 403, description = "Not your account"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    Extension(service): Extension<DynUserQueryService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_id(&actor, None, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "User",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<UserResponse>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already exists")
    )
)]
pub async fn create_user(
    Extension(service): Extension<DynUserCommandService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateUserRequest>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.create(None, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Account ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Account updated", body = ApiResponse<UserResponse>),
        (status = 403, description = "Not your account"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_user(
    Extension(service): Extension<DynUserCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<UpdateUserRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service
        .update(&actor, None, id, &PatchUserRequest::from(body))
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Account ID")),
    request_body = PatchUserRequest,
    responses(
        (status = 200, description = "Account updated", body = ApiResponse<UserResponse>),
        (status = 400, description = "No fields to update"),
        (status = 403, description = "Not your account"),
        (status = 404, description = "Not found")
    )
)]
pub async fn patch_user(
    Extension(service): Extension<DynUserCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<PatchUserRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.update(&actor, None, id, &body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    patch,
    path = "/api/users/{id}/toggle-status",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Status flipped", body = ApiResponse<UserResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn toggle_user_status(
    Extension(service): Extension<DynUserCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.toggle_status(None, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "User",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Account deleted", body = ApiResponse<UserResponse>),
        (status = 403, description = "Not your account"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    Extension(service): Extension<DynUserCommandService>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete(&actor, None, id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn user_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/users", get(get_users))
        .route("/api/users", post(create_user))
        .route("/api/users/active", get(get_active_users))
        .route("/api/users/role/{role}", get(get_users_by_role))
        .route("/api/users/username/{username}", get(get_user_by_username))
        .route("/api/users/{id}", get(get_user))
        .route("/api/users/{id}", put(update_user))
        .route("/api/users/{id}", patch(patch_user))
        .route("/api/users/{id}", delete(delete_user))
        .route("/api/users/{id}/toggle-status", patch(toggle_user_status))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.user_query.clone()))
        .layer(Extension(app_state.di_container.user_command.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
