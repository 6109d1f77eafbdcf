mod common;

use axum::http::{Method, StatusCode};
use common::{PASSWORD, TestApp};
use serde_json::json;

#[tokio::test]
async fn only_admins_list_accounts() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin().await;
    let (_, user) = app.account("alice", "user").await;

    let (status, body) = app.get("/api/users", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));

    let (status, body) = app.get("/api/users", Some(&user)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"], "error");

    let (status, _) = app.get("/api/users", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn role_filter_rejects_unknown_roles() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin().await;
    app.register("shop", "seller").await;

    let (status, body) = app.get("/api/users/role/seller", Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["username"], "shop");

    let (status, _) = app.get("/api/users/role/wizard", Some(&admin)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn accounts_are_visible_to_self_and_admin_only() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin().await;
    let (alice_id, alice) = app.account("alice", "user").await;
    let (_, bob) = app.account("bob", "user").await;

    let uri = format!("/api/users/{alice_id}");

    let (status, _) = app.get(&uri, Some(&alice)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&uri, Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get(&uri, Some(&bob)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request(Method::DELETE, &uri, Some(&bob), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn self_updates_cannot_change_role() {
    let app = TestApp::new().await;
    let (id, token) = app.account("alice", "user").await;
    let uri = format!("/api/users/{id}");

    let (status, body) = app
        .request(
            Method::PATCH,
            &uri,
            Some(&token),
            Some(json!({ "full_name": "Alice Liddell" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["full_name"], "Alice Liddell");

    let (status, _) = app
        .request(Method::PATCH, &uri, Some(&token), Some(json!({ "role": "admin" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .request(Method::PATCH, &uri, Some(&token), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No fields to update");
}

#[tokio::test]
async fn full_update_replaces_contact_fields() {
    let app = TestApp::new().await;
    let (id, token) = app.account("alice", "user").await;

    let (status, body) = app
        .request(
            Method::PUT,
            &format!("/api/users/{id}"),
            Some(&token),
            Some(json!({
                "username": "alice_new",
                "email": "alice.new@example.com",
                "phone": "01999999999",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "alice_new");
    assert_eq!(body["data"]["email"], "alice.new@example.com");
}

#[tokio::test]
async fn admin_creates_accounts_of_any_role() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/users",
            Some(&admin),
            Some(json!({
                "username": "deputy",
                "password": PASSWORD,
                "phone": "01234567890",
                "email": "deputy@example.com",
                "role": "admin",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "admin");
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn seller_scope_hides_other_roles() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin().await;
    let (user_id, _) = app.account("alice", "user").await;
    let (seller_id, _) = app.account("shop", "seller").await;

    let (status, _) = app
        .get(&format!("/api/sellers/{user_id}"), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .get(&format!("/api/sellers/{seller_id}"), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);

    let code = body["data"]["seller_code"].as_str().expect("seller code");
    let (status, body) = app
        .get(&format!("/api/sellers/code/{code}"), Some(&admin))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], seller_id);
}

#[tokio::test]
async fn admin_creates_sellers_with_codes() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin().await;

    let (status, body) = app
        .request(
            Method::POST,
            "/api/sellers",
            Some(&admin),
            Some(json!({
                "username": "market",
                "password": PASSWORD,
                "phone": "01234567890",
                "email": "market@example.com",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "seller");
    assert!(body["data"]["seller_code"].is_string());
}

#[tokio::test]
async fn seller_search_matches_username_case_insensitively() {
    let app = TestApp::new().await;
    let (_, admin) = app.admin().await;
    app.register("BigShop", "seller").await;
    app.register("tinyshop", "seller").await;
    app.register("bigbuyer", "user").await;

    let (status, body) = app.get("/api/sellers/search?q=big", Some(&admin)).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["data"]
        .as_array()
        .expect("array")
        .iter()
        .map(|u| u["username"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["BigShop".to_string()]);
}

#[tokio::test]
async fn deleting_a_seller_removes_their_products() {
    let app = TestApp::new().await;
    let (seller_id, seller) = app.account("shop", "seller").await;
    app.create_product(&seller, "Lamp").await;
    app.create_product(&seller, "Desk").await;

    let (status, body) = app
        .get(&format!("/api/sellers/{seller_id}/products/active"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));

    let (status, body) = app
        .request(
            Method::DELETE,
            &format!("/api/sellers/{seller_id}"),
            Some(&seller),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Seller 'shop' has been successfully deleted");
    assert!(app.db.products().is_empty());
}

#[tokio::test]
async fn admin_routes_are_admin_only() {
    let app = TestApp::new().await;
    let (admin_id, admin) = app.admin().await;
    let (_, seller) = app.account("shop", "seller").await;

    let (status, _) = app.get("/api/admins", Some(&seller)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.get(&format!("/api/admins/{admin_id}"), Some(&admin)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "admin");
}
