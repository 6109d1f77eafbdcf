#![allow(dead_code)]

use api::handler::AppRouter;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use shared::{
    config::AdminSeedConfig,
    repository::memory::{MemoryDb, RecordingMailer},
    state::AppState,
};
use std::path::PathBuf;
use tower::ServiceExt;

pub const PASSWORD: &str = "correcthorse";

pub struct TestApp {
    pub router: Router,
    pub db: MemoryDb,
    pub mailer: RecordingMailer,
    pub upload_dir: PathBuf,
    state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_mailer(RecordingMailer::new()).await
    }

    pub async fn with_mailer(mailer: RecordingMailer) -> Self {
        let db = MemoryDb::new();
        let upload_dir =
            std::env::temp_dir().join(format!("api-test-uploads-{}", uuid::Uuid::new_v4()));

        let state = AppState::in_memory(&db, mailer.clone(), upload_dir.clone()).await;
        let router = AppRouter::build(state.clone(), "*");

        Self {
            router,
            db,
            mailer,
            upload_dir,
            state,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body is readable");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, body)
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request");

        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn register(&self, username: &str, role: &str) -> Value {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({
                    "username": username,
                    "password": PASSWORD,
                    "phone": "01234567890",
                    "email": format!("{username}@example.com"),
                    "role": role,
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["data"].clone()
    }

    pub async fn login(&self, username: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "username": username, "password": PASSWORD })),
            )
            .await;

        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["data"]["access_token"]
            .as_str()
            .expect("token in response")
            .to_string()
    }

    /// Registers an account with the given role and returns its id and token.
    pub async fn account(&self, username: &str, role: &str) -> (i64, String) {
        let data = self.register(username, role).await;
        let id = data["id"].as_i64().expect("id in response");
        (id, self.login(username).await)
    }

    pub async fn admin(&self) -> (i64, String) {
        let seed = AdminSeedConfig {
            username: "root_admin".to_string(),
            email: "root@example.com".to_string(),
            password: PASSWORD.to_string(),
            phone: "01000000000".to_string(),
        };

        self.state
            .di_container
            .auth_service
            .bootstrap_admin(&seed)
            .await
            .expect("bootstrap admin");

        let id = self
            .db
            .users()
            .iter()
            .find(|u| u.username == seed.username)
            .map(|u| i64::from(u.id))
            .expect("admin stored");

        (id, self.login(&seed.username).await)
    }

    pub async fn create_product(&self, token: &str, name: &str) -> Value {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/products",
                Some(token),
                Some(json!({
                    "name": name,
                    "description": "A fine product",
                    "price": 19.99,
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "create product failed: {body}");
        body["data"].clone()
    }
}

pub fn multipart_request(
    uri: &str,
    token: &str,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
) -> Request<Body> {
    multipart_field_request(uri, token, "file", filename, content_type, bytes)
}

pub fn multipart_field_request(
    uri: &str,
    token: &str,
    field: &str,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
) -> Request<Body> {
    const BOUNDARY: &str = "XTESTBOUNDARYX";

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("valid multipart request")
}
