use crate::{domain::responses::UploadResponse, errors::ServiceError};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynUploadService = Arc<dyn UploadServiceTrait + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Image,
    Document,
}

impl UploadKind {
    pub fn allowed_mimetypes(&self) -> &'static [&'static str] {
        match self {
            UploadKind::Image => &["image/jpeg", "image/png", "image/gif", "image/webp"],
            UploadKind::Document => &["application/pdf"],
        }
    }

    pub fn max_size(&self) -> usize {
        match self {
            UploadKind::Image => 3 * 1024 * 1024,
            UploadKind::Document => 5 * 1024 * 1024,
        }
    }
}

#[async_trait]
pub trait UploadServiceTrait {
    async fn store(
        &self,
        kind: UploadKind,
        original_name: &str,
        mimetype: &str,
        bytes: &[u8],
    ) -> Result<UploadResponse, ServiceError>;
}
