use crate::model::{Role, User};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub seller_code: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        UserResponse {
            id: value.id,
            username: value.username,
            email: value.email,
            phone: value.phone,
            full_name: value.full_name,
            role: value.role,
            is_active: value.is_active,
            seller_code: value.seller_code,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_never_reaches_json() {
        let user = User {
            id: 1,
            username: "alice123".into(),
            email: "a@b.com".into(),
            password: "$2b$10$hashhashhash".into(),
            phone: "0171".into(),
            full_name: None,
            role: Role::User,
            is_active: true,
            seller_code: None,
            created_at: None,
            updated_at: None,
        };

        let json = serde_json::to_string(&UserResponse::from(user.clone())).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("hashhash"));

        let raw = serde_json::to_string(&user).unwrap();
        assert!(!raw.contains("hashhash"));
    }
}
