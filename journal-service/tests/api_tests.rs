mod common;

use std::time::Duration;
use std::time::Instant;

use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;

async fn register(
    app: &TestApp,
    username: &str,
    email: &str,
    password: &str,
) -> reqwest::Response {
    app.post("/register")
        .json(&json!({
            "username": username,
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to execute request")
}

async fn login(app: &TestApp, email: &str, password: &str) -> reqwest::Response {
    app.post("/login")
        .json(&json!({
            "email": email,
            "password": password
        }))
        .send()
        .await
        .expect("Failed to execute request")
}

async fn refresh(app: &TestApp, refresh_token: &str) -> reqwest::Response {
    app.post("/refresh")
        .json(&json!({ "refresh_token": refresh_token }))
        .send()
        .await
        .expect("Failed to execute request")
}

/// Register and log in, returning the token response body
async fn tokens_for(app: &TestApp, username: &str, email: &str) -> Value {
    register(app, username, email, "pw123").await;
    login(app, email, "pw123")
        .await
        .json()
        .await
        .expect("Failed to parse response")
}

#[tokio::test]
async fn test_register_login_and_access_protected_resource() {
    let app = TestApp::spawn().await;

    let response = register(&app, "alice", "alice@x.com", "pw123").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["id"], 1);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@x.com");
    assert!(body["created_at"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    let response = register(&app, "alice", "alice@x.com", "pw123").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "User already exists" }));

    let response = login(&app, "alice@x.com", "pw123").await;
    assert_eq!(response.status(), StatusCode::OK);
    let tokens: Value = response.json().await.expect("Failed to parse response");
    let access_token = tokens["access_token"].as_str().unwrap();
    assert!(!access_token.is_empty());
    assert!(!tokens["refresh_token"].as_str().unwrap().is_empty());

    let response = app
        .get_authenticated("/protected", access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Welcome, user #1");
    assert_eq!(body["user_id"], 1);

    let response = app
        .get("/protected")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Authorization header missing" }));
}

#[tokio::test]
async fn test_register_duplicate_email_does_not_grow_store() {
    let app = TestApp::spawn().await;

    register(&app, "alice", "alice@x.com", "pw123").await;
    assert_eq!(app.user_count().await, 1);

    let response = register(&app, "alice2", "alice@x.com", "other").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.user_count().await, 1);

    // The first registration still logs in
    let response = login(&app, "alice@x.com", "pw123").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_invalid_payload() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/register")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Invalid request payload" }));

    let response = app
        .post("/register")
        .json(&json!({ "username": "alice" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Invalid request payload" }));

    assert_eq!(app.user_count().await, 0);
}

#[tokio::test]
async fn test_register_invalid_username_and_email() {
    let app = TestApp::spawn().await;

    let response = register(&app, "a", "alice@x.com", "pw123").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("minimum 3 characters"));

    let response = register(&app, "alice", "not-an-email", "pw123").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .to_lowercase()
        .contains("email"));

    assert_eq!(app.user_count().await, 0);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;

    register(&app, "alice", "alice@x.com", "pw123").await;

    let wrong_password = login(&app, "alice@x.com", "wrong").await;
    let unknown_email = login(&app, "bob@x.com", "pw123").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password = wrong_password.bytes().await.unwrap();
    let unknown_email = unknown_email.bytes().await.unwrap();
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(
        serde_json::from_slice::<Value>(&wrong_password).unwrap(),
        json!({ "error": "Invalid email or password" })
    );
}

/// Mean duration of `attempts` failing logins
async fn mean_login_time(app: &TestApp, email: &str, attempts: u32) -> Duration {
    let started = Instant::now();
    for _ in 0..attempts {
        let response = login(app, email, "wrong-password").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
    started.elapsed() / attempts
}

#[tokio::test]
async fn test_login_failures_take_comparable_time() {
    let app = TestApp::spawn().await;

    register(&app, "alice", "alice@x.com", "pw123").await;

    let wrong_password = mean_login_time(&app, "alice@x.com", 3).await;
    let unknown_email = mean_login_time(&app, "bob@x.com", 3).await;

    // Both paths run one Argon2 verification; without it the unknown-email
    // path is orders of magnitude faster.
    assert!(
        unknown_email * 4 >= wrong_password && wrong_password * 4 >= unknown_email,
        "wrong password {:?}, unknown email {:?}",
        wrong_password,
        unknown_email
    );
}

#[tokio::test]
async fn test_login_invalid_payload() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/login")
        .json(&json!({ "email": "alice@x.com" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "Invalid request payload" }));
}

#[tokio::test]
async fn test_refresh_issues_new_pair() {
    let app = TestApp::spawn().await;

    let tokens = tokens_for(&app, "alice", "alice@x.com").await;
    let refresh_token = tokens["refresh_token"].as_str().unwrap();

    let response = refresh(&app, refresh_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let rotated: Value = response.json().await.expect("Failed to parse response");
    let access_token = rotated["access_token"].as_str().unwrap();
    assert!(!rotated["refresh_token"].as_str().unwrap().is_empty());

    let response = app
        .get_authenticated("/protected", access_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    // No revocation: the presented refresh token is still accepted
    let response = refresh(&app, refresh_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_rejects_invalid_tokens() {
    let app = TestApp::spawn().await;

    let tokens = tokens_for(&app, "alice", "alice@x.com").await;
    let access_token = tokens["access_token"].as_str().unwrap().to_string();
    let expired = app.expired_refresh_token(1);

    for token in [expired.as_str(), "invalid.token.string", access_token.as_str()] {
        let response = refresh(&app, token).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body, json!({ "error": "Invalid refresh token" }));
    }
}

#[tokio::test]
async fn test_refresh_invalid_payload() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/refresh")
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_rejects_malformed_header() {
    let app = TestApp::spawn().await;

    for header in ["Bearer", "Basic abc", "Bearer a b", "Token abc"] {
        let response = app
            .get("/protected")
            .header("authorization", header)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(
            body,
            json!({ "error": "Invalid Authorization header format" })
        );
    }
}

#[tokio::test]
async fn test_protected_rejects_invalid_tokens() {
    let app = TestApp::spawn().await;

    let tokens = tokens_for(&app, "alice", "alice@x.com").await;
    let refresh_token = tokens["refresh_token"].as_str().unwrap().to_string();
    let expired = app.expired_access_token(1);

    for token in [
        "invalid.token.string",
        expired.as_str(),
        refresh_token.as_str(),
    ] {
        let response = app
            .get_authenticated("/protected", token)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body, json!({ "error": "Invalid token" }));
    }
}

#[tokio::test]
async fn test_protected_trailing_slash() {
    let app = TestApp::spawn().await;

    let tokens = tokens_for(&app, "alice", "alice@x.com").await;

    let response = app
        .get_authenticated("/protected/", tokens["access_token"].as_str().unwrap())
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "status": "ok" }));
}
