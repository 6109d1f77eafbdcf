use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

const MAX_PRICE: f64 = 99_999_999.99;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 80, message = "Name must be 1 to 80 characters"))]
    #[schema(example = "Mechanical keyboard")]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 1200,
        message = "Description must be 1 to 1200 characters"
    ))]
    #[schema(example = "Tenkeyless, brown switches")]
    pub description: String,

    #[validate(range(
        min = 0.01,
        max = MAX_PRICE,
        message = "Price must be between 0.01 and 99999999.99"
    ))]
    #[schema(example = 49.99)]
    pub price: f64,

    pub is_active: Option<bool>,

    #[validate(length(max = 500, message = "Image URL must be at most 500 characters"))]
    pub image_url: Option<String>,

    /// Only admins may create products on behalf of another account.
    pub owner_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 80, message = "Name must be 1 to 80 characters"))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 1200,
        message = "Description must be 1 to 1200 characters"
    ))]
    pub description: String,

    #[validate(range(
        min = 0.01,
        max = MAX_PRICE,
        message = "Price must be between 0.01 and 99999999.99"
    ))]
    pub price: f64,

    pub is_active: bool,

    #[validate(length(max = 500, message = "Image URL must be at most 500 characters"))]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct PatchProductRequest {
    #[validate(length(min = 1, max = 80, message = "Name must be 1 to 80 characters"))]
    pub name: Option<String>,

    #[validate(length(
        min = 1,
        max = 1200,
        message = "Description must be 1 to 1200 characters"
    ))]
    pub description: Option<String>,

    #[validate(range(
        min = 0.01,
        max = MAX_PRICE,
        message = "Price must be between 0.01 and 99999999.99"
    ))]
    pub price: Option<f64>,

    pub is_active: Option<bool>,

    #[validate(length(max = 500, message = "Image URL must be at most 500 characters"))]
    pub image_url: Option<String>,
}

impl PatchProductRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.is_active.is_none()
            && self.image_url.is_none()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, Validate)]
pub struct ProductNameQuery {
    #[validate(length(max = 80, message = "Name filter must be at most 80 characters"))]
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub is_active: bool,
    pub image_url: Option<String>,
    pub owner_id: i32,
}

/// Column changes for `products`; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub is_active: Option<bool>,
    pub image_url: Option<String>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.is_active.is_none()
            && self.image_url.is_none()
    }
}

impl From<UpdateProductRequest> for ProductChanges {
    fn from(req: UpdateProductRequest) -> Self {
        ProductChanges {
            name: Some(req.name),
            description: Some(req.description),
            price: Some(req.price),
            is_active: Some(req.is_active),
            image_url: req.image_url,
        }
    }
}

impl From<PatchProductRequest> for ProductChanges {
    fn from(req: PatchProductRequest) -> Self {
        ProductChanges {
            name: req.name,
            description: req.description,
            price: req.price,
            is_active: req.is_active,
            image_url: req.image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateProductRequest {
        CreateProductRequest {
            name: "Lamp".into(),
            description: "Desk lamp".into(),
            price: 19.5,
            is_active: None,
            image_url: None,
            owner_id: None,
        }
    }

    fn with_price(price: f64) -> CreateProductRequest {
        CreateProductRequest { price, ..valid() }
    }

    #[test]
    fn price_must_fit_two_decimal_places() {
        assert!(valid().validate().is_ok());
        assert!(with_price(0.01).validate().is_ok());
        assert!(with_price(0.0).validate().is_err());
        assert!(with_price(0.001).validate().is_err());
        assert!(with_price(-3.0).validate().is_err());
        assert!(with_price(100_000_000.0).validate().is_err());
    }

    #[test]
    fn name_length_is_bounded() {
        let empty = CreateProductRequest {
            name: String::new(),
            ..valid()
        };
        let long = CreateProductRequest {
            name: "x".repeat(81),
            ..valid()
        };

        assert!(empty.validate().is_err());
        assert!(long.validate().is_err());
    }

    #[test]
    fn empty_patch() {
        assert!(PatchProductRequest::default().is_empty());
        assert!(
            !PatchProductRequest {
                price: Some(2.0),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
