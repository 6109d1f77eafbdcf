mod api;
mod product;
mod token;
mod upload;
mod user;

pub use self::api::ApiResponse;
pub use self::product::{
    ImageUrlResponse, OwnerProductCountResponse, OwnerSummary, ProductResponse,
    SellerWithProductsResponse,
};
pub use self::token::TokenResponse;
pub use self::upload::{MailSentResponse, UploadResponse};
pub use self::user::UserResponse;
