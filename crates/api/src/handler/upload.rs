use crate::{
    handler::ADMIN_OR_SELLER,
    middleware::{auth_middleware, ensure_role},
};
use axum::{
    Extension, Json,
    extract::Multipart,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::post,
};
use shared::{
    abstract_trait::{DynUploadService, UploadKind},
    domain::{
        Actor,
        responses::{ApiResponse, UploadResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use tracing::warn;
use utoipa_axum::router::OpenApiRouter;

const FILE_FIELD: &str = "file";

struct IncomingFile {
    original_name: String,
    mimetype: String,
    bytes: Vec<u8>,
}

/// Pulls the `file` part out of a multipart body, skipping any other fields.
async fn read_file_field(multipart: &mut Multipart) -> Result<IncomingFile, HttpError> {
    while let Some(field) = multipart.next_field().await.map_err(|err| {
        warn!("⚠️ Malformed multipart body: {err}");
        HttpError::BadRequest(format!("Malformed multipart body: {}", err.body_text()))
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let mimetype = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field.bytes().await.map_err(|err| {
            HttpError::BadRequest(format!("Failed to read uploaded file: {}", err.body_text()))
        })?;

        return Ok(IncomingFile {
            original_name,
            mimetype,
            bytes: bytes.to_vec(),
        });
    }

    Err(HttpError::BadRequest("No file uploaded".to_string()))
}

async fn store(
    service: DynUploadService,
    kind: UploadKind,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let file = read_file_field(&mut multipart).await?;

    let stored = service
        .store(kind, &file.original_name, &file.mimetype, &file.bytes)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("File uploaded successfully", stored)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/uploads/image",
    tag = "Upload",
    security(("bearer_auth" = [])),
    request_body(content_type = "multipart/form-data", description = "Image in the `file` field (jpeg, png, gif, webp; at most 3 MiB)"),
    responses(
        (status = 200, description = "Image stored", body = ApiResponse<UploadResponse>),
        (status = 400, description = "Missing file, unsupported type or too large"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn upload_image(
    Extension(service): Extension<DynUploadService>,
    Extension(actor): Extension<Actor>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_OR_SELLER)?;

    store(service, UploadKind::Image, multipart).await
}

#[utoipa::path(
    post,
    path = "/api/uploads/document",
    tag = "Upload",
    security(("bearer_auth" = [])),
    request_body(content_type = "multipart/form-data", description = "PDF in the `file` field (at most 5 MiB)"),
    responses(
        (status = 200, description = "Document stored", body = ApiResponse<UploadResponse>),
        (status = 400, description = "Missing file, unsupported type or too large"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn upload_document(
    Extension(service): Extension<DynUploadService>,
    Extension(actor): Extension<Actor>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_OR_SELLER)?;

    store(service, UploadKind::Document, multipart).await
}

pub fn upload_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/uploads/image", post(upload_image))
        .route("/api/uploads/document", post(upload_document))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.upload_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
