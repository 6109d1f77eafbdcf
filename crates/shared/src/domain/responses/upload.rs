use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct UploadResponse {
    #[schema(example = "1718000000000-photo.png")]
    pub filename: String,
    pub original_name: String,
    pub mimetype: String,
    pub size: u64,
    #[schema(example = "/uploads/1718000000000-photo.png")]
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct MailSentResponse {
    pub success: bool,
    pub recipient: String,
}
