//! Integration tests for the authentication endpoints
//!
//! Validation and session checks run without a database. Tests that need
//! persisted users return early unless `DATABASE_URL` is set.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::common::*;
use crate::assert_contains;

const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

#[tokio::test]
async fn test_signup_reports_missing_fields_in_order() {
    let app = TestApp::without_database();

    let response = app
        .post_json("/api/auth/signup", json!({ "fullName": "Ada", "password": "" }), None)
        .await;

    assert_error_message(
        &response,
        StatusCode::BAD_REQUEST,
        "VALIDATION_ERROR",
        "All fields are required",
    );
    assert_eq!(
        response.body["error"]["details"]["missingFields"],
        json!(["email", "password"])
    );
}

#[tokio::test]
async fn test_signup_checks_password_before_email() {
    let app = TestApp::without_database();

    let response = app
        .post_json(
            "/api/auth/signup",
            json!({ "email": "not-an-email", "fullName": "Ada Lovelace", "password": "short" }),
            None,
        )
        .await;

    assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(response.body["error"]["details"]["field"], "password");
}

#[tokio::test]
async fn test_signup_rejects_invalid_email() {
    let app = TestApp::without_database();

    let response = app
        .post_json(
            "/api/auth/signup",
            json!({ "email": "ada@nowhere", "fullName": "Ada Lovelace", "password": TEST_PASSWORD }),
            None,
        )
        .await;

    assert_error_message(
        &response,
        StatusCode::BAD_REQUEST,
        "VALIDATION_ERROR",
        "Please provide a valid email address",
    );
    assert_eq!(response.body["error"]["details"]["field"], "email");
}

#[tokio::test]
async fn test_signup_rejects_padded_email() {
    let app = TestApp::without_database();

    let response = app
        .post_json(
            "/api/auth/signup",
            json!({ "email": " ada@example.com ", "fullName": "Ada Lovelace", "password": TEST_PASSWORD }),
            None,
        )
        .await;

    assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(response.body["error"]["details"]["field"], "email");
}

#[tokio::test]
async fn test_signup_rejects_short_full_name() {
    let app = TestApp::without_database();

    let response = app
        .post_json(
            "/api/auth/signup",
            json!({ "email": "ada@example.com", "fullName": "  Al  ", "password": TEST_PASSWORD }),
            None,
        )
        .await;

    assert_error(&response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(response.body["error"]["details"]["field"], "fullName");
}

#[tokio::test]
async fn test_signup_rejects_malformed_json() {
    let app = TestApp::without_database();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/auth/signup")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{ not json"))
        .unwrap();
    let response = app.send(request).await;

    assert_error_message(
        &response,
        StatusCode::BAD_REQUEST,
        "VALIDATION_ERROR",
        "Invalid request body",
    );
}

#[tokio::test]
async fn test_oversized_body_is_payload_too_large() {
    let app = TestApp::build(None, |builder| builder.max_body_bytes(256));

    let response = app
        .post_json(
            "/api/auth/signup",
            json!({
                "email": "ada@example.com",
                "fullName": "Ada Lovelace",
                "password": TEST_PASSWORD,
                "profilePic": "x".repeat(1024),
            }),
            None,
        )
        .await;

    assert_error_message(
        &response,
        StatusCode::PAYLOAD_TOO_LARGE,
        "PAYLOAD_TOO_LARGE",
        "Payload too large. Please use a smaller image.",
    );
}

#[tokio::test]
async fn test_valid_signup_without_database_is_unavailable() {
    let app = TestApp::without_database();

    let response = app
        .post_json(
            "/api/auth/signup",
            json!({ "email": "ada@example.com", "fullName": "Ada Lovelace", "password": TEST_PASSWORD }),
            None,
        )
        .await;

    assert_error(&response, StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE");
    assert!(response.set_cookie().is_none());
}

#[tokio::test]
async fn test_login_requires_email_and_password() {
    let app = TestApp::without_database();

    let response = app
        .post_json("/api/auth/login", json!({ "email": "ada@example.com" }), None)
        .await;

    assert_error_message(
        &response,
        StatusCode::BAD_REQUEST,
        "VALIDATION_ERROR",
        "Email and password are required",
    );
}

#[tokio::test]
async fn test_logout_clears_cookie_without_session() {
    let app = TestApp::without_database();

    let response = app.post_json("/api/auth/logout", json!({}), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["message"], "Logout successful");
    let cookie = response.set_cookie().expect("logout sets a cookie");
    assert_contains!(cookie, "token=;");
    assert_contains!(cookie, "Max-Age=0");
}

#[tokio::test]
async fn test_check_without_cookie_is_unauthorized() {
    let app = TestApp::without_database();

    let response = app.get("/api/auth/check", None).await;

    assert_error_message(
        &response,
        StatusCode::UNAUTHORIZED,
        "UNAUTHORIZED",
        "Authentication token is missing.",
    );
}

#[tokio::test]
async fn test_check_with_forged_token_is_unauthorized() {
    let app = TestApp::without_database();
    let other = TestApp::build(None, |builder| builder.jwt_secret("some-other-secret"));
    let forged = session_cookie(&other, Uuid::new_v4());

    let response = app.get("/api/auth/check", Some(&forged)).await;

    assert_error_message(
        &response,
        StatusCode::UNAUTHORIZED,
        "UNAUTHORIZED",
        "Invalid or expired authentication token.",
    );
}

#[tokio::test]
async fn test_check_with_valid_token_needs_database() {
    let app = TestApp::without_database();
    let cookie = session_cookie(&app, Uuid::new_v4());

    let response = app.get("/api/auth/check", Some(&cookie)).await;

    assert_error(&response, StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn test_signup_login_check_flow() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let app = TestApp::with_database(pool);

    let user = signup_user(&app, "Ada Lovelace").await;

    let check = app.get("/api/auth/check", Some(&user.cookie)).await;
    assert_eq!(check.status, StatusCode::OK);
    assert_eq!(check.body["message"], "User is authenticated");
    assert_eq!(user_id(&check.body["user"]), user.id);
    assert_eq!(check.body["user"]["fullName"], "Ada Lovelace");
    assert!(check.body["user"].get("passwordHash").is_none());

    let login = app
        .post_json(
            "/api/auth/login",
            json!({ "email": user.email.to_uppercase(), "password": TEST_PASSWORD }),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["message"], "Login successful");
    let cookie = login.set_cookie().expect("login sets a cookie");
    assert_contains!(cookie, "HttpOnly");
    assert_contains!(cookie, "SameSite=Strict");
}

#[tokio::test]
async fn test_signup_duplicate_email_is_rejected() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let app = TestApp::with_database(pool);
    let user = signup_user(&app, "Ada Lovelace").await;

    let response = app
        .post_json(
            "/api/auth/signup",
            json!({ "email": user.email.to_uppercase(), "fullName": "Someone Else", "password": TEST_PASSWORD }),
            None,
        )
        .await;

    assert_error_message(
        &response,
        StatusCode::BAD_REQUEST,
        "USER_EXISTS",
        "User with this email already exists",
    );
    assert_eq!(response.body["error"]["details"]["email"], user.email);
}

#[tokio::test]
async fn test_login_failures() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let app = TestApp::with_database(pool);
    let user = signup_user(&app, "Ada Lovelace").await;

    let unknown = app
        .post_json(
            "/api/auth/login",
            json!({ "email": unique_email("nobody"), "password": TEST_PASSWORD }),
            None,
        )
        .await;
    assert_error(&unknown, StatusCode::NOT_FOUND, "USER_NOT_FOUND");

    let wrong = app
        .post_json(
            "/api/auth/login",
            json!({ "email": user.email, "password": "not the password" }),
            None,
        )
        .await;
    assert_error(&wrong, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_update_profile_stores_avatar() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let app = TestApp::with_database(pool);
    let user = signup_user(&app, "Ada Lovelace").await;

    let empty = app
        .put_json("/api/auth/update-profile", json!({ "profilePic": "" }), Some(&user.cookie))
        .await;
    assert_error(&empty, StatusCode::BAD_REQUEST, "VALIDATION_ERROR");
    assert_eq!(empty.body["error"]["details"]["field"], "profilePic");

    let bad = app
        .put_json(
            "/api/auth/update-profile",
            json!({ "profilePic": "ftp://example.com/a.png" }),
            Some(&user.cookie),
        )
        .await;
    assert_error(&bad, StatusCode::BAD_REQUEST, "UPLOAD_FAILED");

    let response = app
        .put_json(
            "/api/auth/update-profile",
            json!({ "profilePic": PNG_DATA_URI }),
            Some(&user.cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "body: {}", response.body);
    assert_eq!(response.body["message"], "Profile updated successfully");

    let url = response.body["user"]["profilePic"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/avatars/"), "unexpected url {}", url);
    assert!(url.ends_with(".png"));

    let file_name = url.rsplit('/').next().unwrap();
    assert!(app.uploads.path().join("avatars").join(file_name).exists());

    let served = app.get(&url, None).await;
    assert_eq!(served.status, StatusCode::OK);
}

#[tokio::test]
async fn test_signup_profile_pic_rules() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let app = TestApp::with_database(pool);

    let signup = |profile_pic: Option<&str>| {
        let mut body = json!({
            "email": unique_email("avatar"),
            "fullName": "Ada Lovelace",
            "password": TEST_PASSWORD,
        });
        if let Some(pic) = profile_pic {
            body["profilePic"] = json!(pic);
        }
        body
    };

    let uploaded = app
        .post_json("/api/auth/signup", signup(Some(PNG_DATA_URI)), None)
        .await;
    assert_eq!(uploaded.status, StatusCode::CREATED, "body: {}", uploaded.body);
    let url = uploaded.body["user"]["profilePic"].as_str().unwrap();
    assert!(url.starts_with("/uploads/avatars/"), "unexpected url {}", url);
    let file_name = url.rsplit('/').next().unwrap();
    assert!(app.uploads.path().join("avatars").join(file_name).exists());

    let hosted = app
        .post_json(
            "/api/auth/signup",
            signup(Some("https://cdn.example.com/ada.png")),
            None,
        )
        .await;
    assert_eq!(hosted.status, StatusCode::CREATED);
    assert_eq!(hosted.body["user"]["profilePic"], "https://cdn.example.com/ada.png");

    let absent = app.post_json("/api/auth/signup", signup(None), None).await;
    assert_eq!(absent.status, StatusCode::CREATED);
    assert_eq!(absent.body["user"]["profilePic"], "");
}

#[tokio::test]
async fn test_session_for_deleted_user_is_not_found() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let app = TestApp::with_database(pool.clone());
    let user = signup_user(&app, "Ada Lovelace").await;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let response = app.get("/api/auth/check", Some(&user.cookie)).await;
    assert_error_message(
        &response,
        StatusCode::NOT_FOUND,
        "USER_NOT_FOUND",
        "User not found",
    );

    let never_existed = session_cookie(&app, Uuid::new_v4());
    let response = app.get("/api/messages/users", Some(&never_existed)).await;
    assert_error(&response, StatusCode::NOT_FOUND, "USER_NOT_FOUND");
}

#[tokio::test]
async fn test_update_profile_removes_replaced_avatar() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let app = TestApp::with_database(pool);
    let user = signup_user(&app, "Ada Lovelace").await;
    let avatars = app.uploads.path().join("avatars");

    let first = app
        .put_json(
            "/api/auth/update-profile",
            json!({ "profilePic": PNG_DATA_URI }),
            Some(&user.cookie),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    let first_url = first.body["user"]["profilePic"].as_str().unwrap().to_string();
    let first_file = avatars.join(first_url.rsplit('/').next().unwrap());
    assert!(first_file.exists());

    let second = app
        .put_json(
            "/api/auth/update-profile",
            json!({ "profilePic": PNG_DATA_URI }),
            Some(&user.cookie),
        )
        .await;
    assert_eq!(second.status, StatusCode::OK);
    let second_url = second.body["user"]["profilePic"].as_str().unwrap().to_string();

    assert_ne!(first_url, second_url);
    assert!(!first_file.exists());
    assert!(avatars.join(second_url.rsplit('/').next().unwrap()).exists());
}
