use crate::{
    abstract_trait::{UploadKind, UploadServiceTrait},
    domain::responses::UploadResponse,
    errors::ServiceError,
    utils::{Method, Metrics},
};
use async_trait::async_trait;
use chrono::Utc;
use prometheus_client::registry::Registry;
use std::{io::ErrorKind, path::PathBuf, sync::Arc};
use tokio::{fs, io::AsyncWriteExt, sync::Mutex};
use tracing::{info, warn};
use uuid::Uuid;

const MAX_NAME_LEN: usize = 100;

pub struct UploadService {
    upload_dir: PathBuf,
    metrics: Metrics,
}

impl UploadService {
    pub async fn new(upload_dir: impl Into<PathBuf>, registry: Arc<Mutex<Registry>>) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "upload_service", "UploadService");

        Self {
            upload_dir: upload_dir.into(),
            metrics,
        }
    }

    async fn write_new(&self, filename: &str, bytes: &[u8]) -> std::io::Result<bool> {
        let path = self.upload_dir.join(filename);
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(e),
        };

        file.write_all(bytes).await?;
        file.flush().await?;
        Ok(true)
    }
}

/// Keeps ASCII letters, digits, `.`, `-` and `_`; everything else becomes `_`.
pub(crate) fn sanitize_filename(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_start_matches('.');
    let start = trimmed.len().saturating_sub(MAX_NAME_LEN);
    let name = &trimmed[start..];

    if name.is_empty() {
        "file".to_string()
    } else {
        name.to_string()
    }
}

#[async_trait]
impl UploadServiceTrait for UploadService {
    async fn store(
        &self,
        kind: UploadKind,
        original_name: &str,
        mimetype: &str,
        bytes: &[u8],
    ) -> Result<UploadResponse, ServiceError> {
        self.metrics
            .observe(Method::Post, async {
                if bytes.is_empty() {
                    return Err(ServiceError::BadRequest("Uploaded file is empty".to_string()));
                }

                let allowed = kind.allowed_mimetypes();
                if !allowed.contains(&mimetype) {
                    warn!("⚠️ Rejected upload '{original_name}' with type {mimetype}");
                    return Err(ServiceError::BadRequest(format!(
                        "Unsupported file type '{mimetype}', allowed: {}",
                        allowed.join(", ")
                    )));
                }

                if bytes.len() > kind.max_size() {
                    return Err(ServiceError::BadRequest(format!(
                        "File too large, maximum size is {} MB",
                        kind.max_size() / (1024 * 1024)
                    )));
                }

                fs::create_dir_all(&self.upload_dir).await?;

                let sanitized = sanitize_filename(original_name);
                let millis = Utc::now().timestamp_millis();

                let mut filename = format!("{millis}-{sanitized}");
                if !self.write_new(&filename, bytes).await? {
                    let suffix = Uuid::new_v4().simple().to_string();
                    filename = format!("{millis}-{}-{sanitized}", &suffix[..8]);
                    if !self.write_new(&filename, bytes).await? {
                        return Err(ServiceError::Internal(
                            "Could not allocate a unique filename".to_string(),
                        ));
                    }
                }

                info!("📁 Stored {} bytes as {filename}", bytes.len());

                Ok(UploadResponse {
                    url: format!("/uploads/{filename}"),
                    filename,
                    original_name: original_name.to_string(),
                    mimetype: mimetype.to_string(),
                    size: bytes.len() as u64,
                })
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("uploads-test-{}", Uuid::new_v4()))
    }

    async fn service(dir: &PathBuf) -> UploadService {
        UploadService::new(dir.clone(), Arc::new(Mutex::new(Registry::default()))).await
    }

    #[test]
    fn sanitizes_names() {
        assert_eq!(sanitize_filename("photo.png"), "photo.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("my photo (1).jpg"), "my_photo__1_.jpg");
        assert_eq!(sanitize_filename("..."), "file");
        assert_eq!(sanitize_filename("C:\\Users\\a\\cat.gif"), "cat.gif");
    }

    #[tokio::test]
    async fn stores_image_under_upload_dir() {
        let dir = temp_dir();
        let svc = service(&dir).await;

        let stored = svc
            .store(UploadKind::Image, "cat.png", "image/png", b"\x89PNG data")
            .await
            .unwrap();

        assert!(stored.filename.ends_with("-cat.png"));
        assert_eq!(stored.url, format!("/uploads/{}", stored.filename));
        assert_eq!(stored.size, 9);
        assert!(dir.join(&stored.filename).exists());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn rejects_wrong_type_and_oversized_files() {
        let dir = temp_dir();
        let svc = service(&dir).await;

        let text = svc
            .store(UploadKind::Image, "notes.txt", "text/plain", b"hello")
            .await;
        assert!(matches!(text, Err(ServiceError::BadRequest(_))));

        let big = vec![0u8; UploadKind::Image.max_size() + 1];
        let too_big = svc
            .store(UploadKind::Image, "big.jpg", "image/jpeg", &big)
            .await;
        assert!(matches!(too_big, Err(ServiceError::BadRequest(_))));

        let pdf_as_image = svc
            .store(UploadKind::Image, "doc.pdf", "application/pdf", b"%PDF")
            .await;
        assert!(matches!(pdf_as_image, Err(ServiceError::BadRequest(_))));

        let pdf = svc
            .store(UploadKind::Document, "doc.pdf", "application/pdf", b"%PDF-1.7")
            .await;
        assert!(pdf.is_ok());

        let _ = std::fs::remove_dir_all(dir);
    }
}
