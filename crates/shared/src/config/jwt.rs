use crate::{abstract_trait::JwtServiceTrait, errors::ServiceError, model::Role};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Clone)]
pub struct JwtConfig {
    jwt_secret: String,
    expires_in_minutes: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("expires_in_minutes", &self.expires_in_minutes)
            .finish_non_exhaustive()
    }
}

impl JwtConfig {
    pub fn new(jwt_secret: &str, expires_in_minutes: i64) -> Self {
        JwtConfig {
            jwt_secret: jwt_secret.to_string(),
            expires_in_minutes,
        }
    }
}

impl JwtServiceTrait for JwtConfig {
    fn generate_token(&self, claims: &Claims) -> Result<String, ServiceError> {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .map_err(ServiceError::Jwt)
    }

    fn issue(
        &self,
        id: i32,
        username: &str,
        email: &str,
        role: Role,
        is_active: bool,
    ) -> Result<String, ServiceError> {
        let now = Utc::now();
        let expires_at = TimeDelta::try_minutes(self.expires_in_minutes)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .filter(|expires_at| *expires_at > now)
            .ok_or_else(|| {
                ServiceError::Internal(format!(
                    "Invalid token lifetime: {} minutes",
                    self.expires_in_minutes
                ))
            })?;

        let claims = Claims {
            sub: id,
            username: username.to_string(),
            email: email.to_string(),
            role,
            is_active,
            iat: now.timestamp() as usize,
            exp: expires_at.timestamp() as usize,
        };

        self.generate_token(&claims)
    }

    fn verify_token(&self, token: &str) -> Result<Claims, ServiceError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_ref());
        let token_data =
            decode::<Claims>(token, &decoding_key, &Validation::default()).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => ServiceError::TokenExpired,
                    _ => ServiceError::Jwt(e),
                }
            })?;

        Ok(token_data.claims)
    }

    fn expires_in_seconds(&self) -> i64 {
        self.expires_in_minutes.saturating_mul(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_carries_identity() {
        let jwt = JwtConfig::new("secret", 60);
        let token = jwt
            .issue(7, "alice123", "a@b.com", Role::Seller, true)
            .unwrap();

        let claims = jwt.verify_token(&token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "alice123");
        assert_eq!(claims.role, Role::Seller);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = JwtConfig::new("secret", 60);
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: 1,
            username: "bob".into(),
            email: "bob@example.com".into(),
            role: Role::User,
            is_active: true,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = jwt.generate_token(&claims).unwrap();

        assert!(matches!(
            jwt.verify_token(&token),
            Err(ServiceError::TokenExpired)
        ));
    }

    #[test]
    fn unusable_lifetime_fails_instead_of_minting() {
        for minutes in [0, -5, i64::MAX / 1000] {
            let result = JwtConfig::new("secret", minutes).issue(
                1,
                "bob",
                "bob@example.com",
                Role::User,
                true,
            );

            assert!(
                matches!(result, Err(ServiceError::Internal(_))),
                "lifetime {minutes} should be refused"
            );
        }
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = JwtConfig::new("one", 60)
            .issue(1, "bob", "bob@example.com", Role::User, true)
            .unwrap();

        assert!(matches!(
            JwtConfig::new("two", 60).verify_token(&token),
            Err(ServiceError::Jwt(_))
        ));
    }
}
