use crate::{
    domain::requests::{FULL_NAME_RE, LOWERCASE_RE, PHONE_RE, USERNAME_RE},
    model::Role,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(
        length(min = 3, max = 100, message = "Username must be 3 to 100 characters"),
        regex(path = *USERNAME_RE, message = "Username may only contain letters, numbers and underscores")
    )]
    #[schema(example = "seller_one")]
    pub username: String,

    #[validate(
        length(min = 10, message = "Password must be at least 10 characters"),
        regex(path = *LOWERCASE_RE, message = "Password must contain at least one lowercase letter")
    )]
    pub password: String,

    #[validate(
        length(max = 15, message = "Phone must be at most 15 characters"),
        regex(path = *PHONE_RE, message = "Phone must start with 01 followed by digits")
    )]
    #[schema(example = "01712345678")]
    pub phone: String,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,

    #[validate(
        length(min = 2, max = 150, message = "Full name must be 2 to 150 characters"),
        regex(path = *FULL_NAME_RE, message = "Full name may only contain letters and spaces")
    )]
    pub full_name: Option<String>,

    pub role: Option<Role>,

    pub is_active: Option<bool>,
}

/// Full replacement of the editable account fields. Password, role and
/// active flag stay untouched when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(
        length(min = 3, max = 100, message = "Username must be 3 to 100 characters"),
        regex(path = *USERNAME_RE, message = "Username may only contain letters, numbers and underscores")
    )]
    pub username: String,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,

    #[validate(
        length(max = 15, message = "Phone must be at most 15 characters"),
        regex(path = *PHONE_RE, message = "Phone must start with 01 followed by digits")
    )]
    pub phone: String,

    #[validate(
        length(min = 2, max = 150, message = "Full name must be 2 to 150 characters"),
        regex(path = *FULL_NAME_RE, message = "Full name may only contain letters and spaces")
    )]
    pub full_name: Option<String>,

    #[validate(
        length(min = 10, message = "Password must be at least 10 characters"),
        regex(path = *LOWERCASE_RE, message = "Password must contain at least one lowercase letter")
    )]
    pub password: Option<String>,

    pub role: Option<Role>,

    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct PatchUserRequest {
    #[validate(
        length(min = 3, max = 100, message = "Username must be 3 to 100 characters"),
        regex(path = *USERNAME_RE, message = "Username may only contain letters, numbers and underscores")
    )]
    pub username: Option<String>,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: Option<String>,

    #[validate(
        length(max = 15, message = "Phone must be at most 15 characters"),
        regex(path = *PHONE_RE, message = "Phone must start with 01 followed by digits")
    )]
    pub phone: Option<String>,

    #[validate(
        length(min = 2, max = 150, message = "Full name must be 2 to 150 characters"),
        regex(path = *FULL_NAME_RE, message = "Full name may only contain letters and spaces")
    )]
    pub full_name: Option<String>,

    #[validate(
        length(min = 10, message = "Password must be at least 10 characters"),
        regex(path = *LOWERCASE_RE, message = "Password must contain at least one lowercase letter")
    )]
    pub password: Option<String>,

    pub role: Option<Role>,

    pub is_active: Option<bool>,
}

impl PatchUserRequest {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.full_name.is_none()
            && self.password.is_none()
            && self.role.is_none()
            && self.is_active.is_none()
    }
}

impl From<UpdateUserRequest> for PatchUserRequest {
    fn from(req: UpdateUserRequest) -> Self {
        PatchUserRequest {
            username: Some(req.username),
            email: Some(req.email),
            phone: Some(req.phone),
            full_name: req.full_name,
            password: req.password,
            role: req.role,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, IntoParams, Validate)]
pub struct SearchQuery {
    #[validate(length(min = 1, max = 100, message = "Search term must be 1 to 100 characters"))]
    pub q: String,
}

/// Row to insert into `users`; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub seller_code: Option<String>,
}

/// Column changes for `users`; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub phone: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    pub seller_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_detected() {
        assert!(PatchUserRequest::default().is_empty());
        assert!(
            !PatchUserRequest {
                phone: Some("0171".into()),
                ..Default::default()
            }
            .is_empty()
        );
    }

    #[test]
    fn patch_validates_only_present_fields() {
        let ok = PatchUserRequest {
            full_name: Some("Jane Roe".into()),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let bad = PatchUserRequest {
            password: Some("short".into()),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }
}
