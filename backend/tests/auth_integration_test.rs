//! Integration tests for registration, login and the session gate

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_success() {
    let app = common::TestApp::new().await;

    let email = format!("register_test_{}@example.com", uuid::Uuid::new_v4());
    let body = json!({
        "username": "newcomer",
        "email": email,
        "password": "SecurePassword123!"
    });

    let (status, response) = app.post("/register", None, body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!response["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_duplicate_email_keeps_first_user() {
    let app = common::TestApp::new().await;

    let email = format!("duplicate_{}@example.com", uuid::Uuid::new_v4());
    let first = json!({
        "username": "first",
        "email": email,
        "password": "FirstPassword123!"
    });
    let (status, _) = app.post("/register", None, first).await;
    assert_eq!(status, StatusCode::OK);

    let second = json!({
        "username": "second",
        "email": email,
        "password": "SecondPassword123!"
    });
    let (status, response) = app.post("/register", None, second).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"]["code"], "BAD_REQUEST");

    // The original account is untouched
    let (status, _) = app
        .post(
            "/login",
            None,
            json!({"email": email, "password": "SecondPassword123!"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, response) = app
        .post(
            "/login",
            None,
            json!({"email": email, "password": "FirstPassword123!"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = response["token"].as_str().unwrap().to_string();

    let (_, profile) = app.request("GET", "/profile", Some(&token), None).await;
    assert_eq!(profile["user"]["username"], "first");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_invalid_email() {
    let app = common::TestApp::new().await;

    let body = json!({
        "username": "someone",
        "email": "not-an-email",
        "password": "SecurePassword123!"
    });

    let (status, response) = app.post("/register", None, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_weak_password() {
    let app = common::TestApp::new().await;

    let body = json!({
        "username": "someone",
        "email": format!("weak_{}@example.com", uuid::Uuid::new_v4()),
        "password": "123"
    });

    let (status, _) = app.post("/register", None, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_password_is_stored_as_bcrypt_digest() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let digest: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
        .bind(user.id)
        .fetch_one(&app.pool)
        .await
        .unwrap();

    assert_ne!(digest, user.password);
    assert!(digest.starts_with("$2b$10$"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_success() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, response) = app
        .post(
            "/login",
            None,
            json!({"email": user.email, "password": user.password}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!response["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_wrong_password() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, _) = app
        .post(
            "/login",
            None,
            json!({"email": user.email, "password": "WrongPassword123!"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_nonexistent_user() {
    let app = common::TestApp::new().await;

    let body = json!({
        "email": format!("nobody_{}@example.com", uuid::Uuid::new_v4()),
        "password": "SomePassword123!"
    });

    let (status, _) = app.post("/login", None, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_protected_endpoint_with_forged_token() {
    let app = common::TestApp::new().await;

    let fake_token =
        "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiIxIiwiZXhwIjoxfQ.invalid";

    let (status, response) = app.request("GET", "/profile", Some(fake_token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["error"]["code"], "INVALID_TOKEN");
}
