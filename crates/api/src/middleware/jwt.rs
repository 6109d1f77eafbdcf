use axum::{
    Extension,
    body::Body,
    http::{Request, header},
    middleware::Next,
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;
use shared::{
    abstract_trait::DynJwtService,
    domain::Actor,
    errors::{HttpError, ServiceError},
    model::Role,
};
use tracing::warn;

/// Verifies the bearer token (cookie `token` or `Authorization` header) and
/// stores the caller's [`Actor`] and claims in the request extensions.
pub async fn auth_middleware(
    cookie_jar: CookieJar,
    Extension(jwt): Extension<DynJwtService>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let token = cookie_jar
        .get("token")
        .map(|cookie| cookie.value().to_string())
        .or_else(|| {
            req.headers()
                .get(header::AUTHORIZATION)
                .and_then(|auth_header| auth_header.to_str().ok())
                .and_then(|auth_value| auth_value.strip_prefix("Bearer ").map(str::to_owned))
        })
        .ok_or_else(|| {
            HttpError::Unauthorized("You are not logged in, please provide token".to_string())
        })?;

    let claims = jwt.verify_token(&token).map_err(|err| {
        warn!("🔒 Rejected token: {err}");
        match err {
            ServiceError::TokenExpired => HttpError::Unauthorized("Token expired".to_string()),
            _ => HttpError::Unauthorized("Invalid token".to_string()),
        }
    })?;

    if !claims.is_active {
        return Err(HttpError::Unauthorized("Account is inactive".to_string()));
    }

    req.extensions_mut().insert(Actor::from(&claims));
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

pub fn ensure_role(actor: &Actor, allowed: &[Role]) -> Result<(), HttpError> {
    if allowed.contains(&actor.role) {
        return Ok(());
    }

    let required = allowed
        .iter()
        .map(|r| r.as_str().to_uppercase())
        .collect::<Vec<_>>()
        .join(" or ");

    Err(HttpError::Forbidden(format!(
        "Access denied. Required role: {required}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_role_names_the_allowed_roles() {
        let seller = Actor::new(3, Role::Seller);

        assert!(ensure_role(&seller, &[Role::Admin, Role::Seller]).is_ok());

        match ensure_role(&seller, &[Role::Admin]) {
            Err(HttpError::Forbidden(msg)) => {
                assert_eq!(msg, "Access denied. Required role: ADMIN")
            }
            other => panic!("expected forbidden, got {other:?}"),
        }
    }
}
