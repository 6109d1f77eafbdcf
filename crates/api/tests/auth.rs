mod common;

use axum::http::{Method, StatusCode};
use common::{PASSWORD, TestApp};
use serde_json::json;

#[tokio::test]
async fn healthchecker_is_public() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/healthchecker", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn register_returns_account_without_password() {
    let app = TestApp::new().await;

    let data = app.register("alice", "user").await;

    assert_eq!(data["username"], "alice");
    assert_eq!(data["role"], "user");
    assert!(data.get("password").is_none());
}

#[tokio::test]
async fn register_rejects_duplicate_username_then_email() {
    let app = TestApp::new().await;
    app.register("alice", "user").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "username": "alice",
                "password": PASSWORD,
                "phone": "01234567890",
                "email": "other@example.com",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Username already exists");

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "username": "alice2",
                "password": PASSWORD,
                "phone": "01234567890",
                "email": "alice@example.com",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already exists");
}

#[tokio::test]
async fn register_validates_payload() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "username": "a!",
                "password": "short",
                "phone": "99",
                "email": "not-an-email",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert!(body["details"]["email"].is_array());
    assert!(body["details"]["password"].is_array());
}

#[tokio::test]
async fn register_rejects_overlong_email() {
    let app = TestApp::new().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "username": "longmail",
                "password": PASSWORD,
                "phone": "01234567890",
                "email": format!("{}@example.com", "a".repeat(276)),
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["email"].is_array());
}

#[tokio::test]
async fn public_registration_cannot_create_admins() {
    let app = TestApp::new().await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "username": "sneaky",
                "password": PASSWORD,
                "phone": "01234567890",
                "email": "sneaky@example.com",
                "role": "admin",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(app.db.users().is_empty());
}

#[tokio::test]
async fn sellers_receive_a_seller_code() {
    let app = TestApp::new().await;

    let data = app.register("shopkeeper", "seller").await;

    let code = data["seller_code"].as_str().expect("seller code");
    assert!(code.starts_with("SELLER_"));
}

#[tokio::test]
async fn login_returns_bearer_token() {
    let app = TestApp::new().await;
    app.register("alice", "user").await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "alice", "password": PASSWORD })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["expires_in"], 3600);
    assert!(body["data"]["access_token"].as_str().is_some());
}

#[tokio::test]
async fn login_failures_share_one_message() {
    let app = TestApp::new().await;
    app.register("alice", "user").await;

    let (status, wrong_password) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "alice", "password": "wrongpassword" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, unknown_user) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "nobody", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(wrong_password["message"], "Invalid credentials");
    assert_eq!(unknown_user["message"], wrong_password["message"]);
}

#[tokio::test]
async fn inactive_accounts_cannot_log_in() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin().await;
    let (id, _) = app.account("alice", "user").await;

    let (status, body) = app
        .request(
            Method::PATCH,
            &format!("/api/users/{id}/toggle-status"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_active"], false);

    let (status, body) = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "username": "alice", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn me_requires_a_valid_token() {
    let app = TestApp::new().await;
    let (id, token) = app.account("alice", "user").await;

    let (status, body) = app.get("/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "error");

    let (status, _) = app.get("/api/auth/me", Some("garbage.token.value")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);
}

#[tokio::test]
async fn me_is_not_found_after_self_delete() {
    let app = TestApp::new().await;
    let (id, token) = app.account("alice", "user").await;

    let (status, _) = app
        .request(Method::DELETE, &format!("/api/users/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_and_openapi_are_exposed() {
    let app = TestApp::new().await;
    app.register("alice", "user").await;

    let (status, _) = app.get("/metrics", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, doc) = app.get("/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/auth/login"].is_object());
    assert!(doc["paths"]["/api/products/{id}"].is_object());
}
