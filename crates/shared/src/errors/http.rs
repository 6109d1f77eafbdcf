use crate::errors::{error::ErrorResponse, repository::RepositoryError, service::ServiceError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidCredentials => {
                HttpError::Unauthorized("Invalid credentials".to_string())
            }

            ServiceError::NotFound(msg) => HttpError::NotFound(msg),
            ServiceError::Conflict(msg) => HttpError::Conflict(msg),
            ServiceError::BadRequest(msg) => HttpError::BadRequest(msg),
            ServiceError::Forbidden(msg) => HttpError::Forbidden(msg),

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                RepositoryError::AlreadyExists(_) => {
                    HttpError::Conflict("Username or email already exists".into())
                }
                RepositoryError::ForeignKey(msg) => {
                    HttpError::BadRequest(format!("Foreign key violation: {msg}"))
                }
                RepositoryError::InvalidValue(msg) => {
                    HttpError::BadRequest(format!("Invalid value: {msg}"))
                }
                other => {
                    error!("❌ Repository failure: {other}");
                    HttpError::Internal("Repository error".into())
                }
            },

            ServiceError::Jwt(_) => HttpError::Unauthorized("Invalid token".into()),

            ServiceError::TokenExpired => HttpError::Unauthorized("Token expired".into()),

            ServiceError::Bcrypt(_) => {
                HttpError::Internal("Internal authentication error".into())
            }

            ServiceError::Mail(msg) => {
                error!("❌ Mail failure: {msg}");
                HttpError::Internal("Failed to send email".into())
            }

            ServiceError::Io(err) => {
                error!("❌ I/O failure: {err}");
                HttpError::Internal("Failed to store file".into())
            }

            ServiceError::Internal(msg) => HttpError::Internal(msg),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            HttpError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            HttpError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse {
            status: "error".into(),
            message: msg,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_key_becomes_conflict() {
        let err = HttpError::from(ServiceError::Repo(RepositoryError::AlreadyExists(
            "users_username_key".into(),
        )));
        assert!(matches!(err, HttpError::Conflict(_)));
    }

    #[test]
    fn rejected_column_value_is_bad_request() {
        let err = HttpError::from(ServiceError::Repo(RepositoryError::InvalidValue(
            "value too long for type character varying(255)".into(),
        )));
        assert!(matches!(err, HttpError::BadRequest(msg) if msg.starts_with("Invalid value")));
    }

    #[test]
    fn invalid_credentials_is_unauthorized_with_constant_message() {
        match HttpError::from(ServiceError::InvalidCredentials) {
            HttpError::Unauthorized(msg) => assert_eq!(msg, "Invalid credentials"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn status_codes() {
        let cases = [
            (HttpError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (HttpError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (HttpError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (HttpError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (HttpError::Conflict("x".into()), StatusCode::CONFLICT),
            (HttpError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
