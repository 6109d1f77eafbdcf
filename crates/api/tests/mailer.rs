mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;
use serde_json::json;
use shared::repository::memory::RecordingMailer;

#[tokio::test]
async fn admin_sends_custom_mail() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/mailer/send",
            Some(&admin),
            Some(json!({
                "email": "customer@example.com",
                "subject": "Your order",
                "message": "It shipped.",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Email sent successfully");
    assert_eq!(body["data"]["recipient"], "customer@example.com");
    assert_eq!(
        app.mailer.sent(),
        vec![("customer@example.com".to_string(), "Your order".to_string())]
    );
}

#[tokio::test]
async fn test_and_welcome_mails_use_fixed_subjects() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin().await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/mailer/test",
            Some(&admin),
            Some(json!({ "email": "ops@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            Method::POST,
            "/api/mailer/welcome",
            Some(&admin),
            Some(json!({ "email": "new@example.com", "username": "newbie" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let subjects: Vec<String> = app.mailer.sent().into_iter().map(|(_, s)| s).collect();
    assert_eq!(subjects, vec!["Test Email", "Welcome to Our Platform!"]);
}

#[tokio::test]
async fn mailer_is_admin_only() {
    let app = TestApp::new().await;
    let (_, seller) = app.account("shop", "seller").await;

    let (status, _) = app
        .request(
            Method::POST,
            "/api/mailer/test",
            Some(&seller),
            Some(json!({ "email": "ops@example.com" })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn smtp_failure_is_a_generic_500() {
    let app = TestApp::with_mailer(RecordingMailer::failing()).await;
    let (_, admin) = app.admin().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/mailer/test",
            Some(&admin),
            Some(json!({ "email": "ops@example.com" })),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to send email");
}

#[tokio::test]
async fn invalid_recipient_fails_validation() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/mailer/test",
            Some(&admin),
            Some(json!({ "email": "not-an-address" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
}
