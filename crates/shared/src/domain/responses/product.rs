use crate::{
    domain::responses::UserResponse,
    model::{OwnerProductCount, Product, Role, User},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Password-free view of a product owner.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OwnerSummary {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub seller_code: Option<String>,
}

impl From<&User> for OwnerSummary {
    fn from(value: &User) -> Self {
        OwnerSummary {
            id: value.id,
            username: value.username.clone(),
            email: value.email.clone(),
            full_name: value.full_name.clone(),
            role: value.role,
            is_active: value.is_active,
            seller_code: value.seller_code.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub is_active: bool,
    pub image_url: Option<String>,
    pub owner_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerSummary>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        ProductResponse {
            id: value.id,
            name: value.name,
            description: value.description,
            price: value.price,
            is_active: value.is_active,
            image_url: value.image_url,
            owner_id: value.owner_id,
            owner: None,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}

impl ProductResponse {
    pub fn with_owner(mut self, owner: Option<&User>) -> Self {
        self.owner = owner.map(OwnerSummary::from);
        self
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OwnerProductCountResponse {
    pub owner_id: i32,
    pub username: String,
    pub product_count: i64,
}

impl From<OwnerProductCount> for OwnerProductCountResponse {
    fn from(value: OwnerProductCount) -> Self {
        OwnerProductCountResponse {
            owner_id: value.owner_id,
            username: value.username,
            product_count: value.product_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SellerWithProductsResponse {
    pub seller: UserResponse,
    pub products: Vec<ProductResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ImageUrlResponse {
    pub image_url: String,
}
