use crate::{
    handler::ADMIN_ONLY,
    middleware::{auth_middleware, ensure_role, validate::SimpleValidatedJson},
};
use axum::{
    Extension, Json, http::StatusCode, middleware, response::IntoResponse, routing::post,
};
use shared::{
    abstract_trait::DynMailerService,
    domain::{
        Actor,
        requests::{SendMailRequest, TestMailRequest, WelcomeMailRequest},
        responses::{ApiResponse, MailSentResponse},
    },
    errors::HttpError,
    state::AppState,
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/mailer/send",
    tag = "Mailer",
    security(("bearer_auth" = [])),
    request_body = SendMailRequest,
    responses(
        (status = 200, description = "Email sent", body = ApiResponse<MailSentResponse>),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Failed to send email")
    )
)]
pub async fn send_mail(
    Extension(service): Extension<DynMailerService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<SendMailRequest>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.send(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/mailer/test",
    tag = "Mailer",
    security(("bearer_auth" = [])),
    request_body = TestMailRequest,
    responses(
        (status = 200, description = "Test email sent", body = ApiResponse<MailSentResponse>),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Failed to send email")
    )
)]
pub async fn send_test_mail(
    Extension(service): Extension<DynMailerService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<TestMailRequest>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.send_test(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/mailer/welcome",
    tag = "Mailer",
    security(("bearer_auth" = [])),
    request_body = WelcomeMailRequest,
    responses(
        (status = 200, description = "Welcome email sent", body = ApiResponse<MailSentResponse>),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Failed to send email")
    )
)]
pub async fn send_welcome_mail(
    Extension(service): Extension<DynMailerService>,
    Extension(actor): Extension<Actor>,
    SimpleValidatedJson(body): SimpleValidatedJson<WelcomeMailRequest>,
) -> Result<impl IntoResponse, HttpError> {
    ensure_role(&actor, ADMIN_ONLY)?;

    let response = service.send_welcome(&body).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn mailer_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/mailer/send", post(send_mail))
        .route("/api/mailer/test", post(send_test_mail))
        .route("/api/mailer/welcome", post(send_welcome_mail))
        .route_layer(middleware::from_fn(auth_middleware))
        .layer(Extension(app_state.di_container.mailer_service.clone()))
        .layer(Extension(app_state.jwt_config.clone()))
}
