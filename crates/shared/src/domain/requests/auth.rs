use crate::{
    domain::requests::{FULL_NAME_RE, LOWERCASE_RE, PHONE_RE, USERNAME_RE},
    model::Role,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "alice123")]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "longenoughpw")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(min = 3, max = 100, message = "Username must be 3 to 100 characters"),
        regex(path = *USERNAME_RE, message = "Username may only contain letters, numbers and underscores")
    )]
    #[schema(example = "alice123")]
    pub username: String,

    #[validate(
        length(min = 10, message = "Password must be at least 10 characters"),
        regex(path = *LOWERCASE_RE, message = "Password must contain at least one lowercase letter")
    )]
    #[schema(example = "longenoughpw")]
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
    #[schema(example = "alice@example.com")]
    pub email: String,

    #[validate(
        length(min = 2, max = 150, message = "Full name must be 2 to 150 characters"),
        regex(path = *FULL_NAME_RE, message = "Full name may only contain letters and spaces")
    )]
    #[schema(example = "Alice Doe")]
    pub full_name: Option<String>,

    pub role: Option<Role>,
}
