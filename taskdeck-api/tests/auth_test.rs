/// Integration tests for registration, login, and user access rules
///
/// Verifies end-to-end through the router:
/// - Registration hashes the password and never echoes it
/// - Duplicate emails are a 409
/// - Login failures are indistinguishable for unknown email vs wrong password
/// - Bearer tokens resolve to a live user; deleted accounts are rejected
/// - User listing is admin-only; per-user access is self-or-admin
///
/// Requires `TEST_DATABASE_URL`; skips otherwise.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use taskdeck_shared::models::user::UserRole;
use tower::Service as _;

#[tokio::test]
async fn test_register_login_roundtrip() {
    let mut ctx = require_test_db!();

    let email = format!("carol-{}@example.com", common::unique_suffix());

    // Register
    let (status, user) = ctx
        .request(
            "POST",
            "/users",
            None,
            Some(json!({"email": email, "password": "carols-password-1", "name": "Carol"})),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["email"], email.as_str());
    assert_eq!(user["role"], "USER");
    // The hash never appears in a response
    assert!(user.get("password_hash").is_none());
    let user_id = user["id"].as_i64().unwrap();

    // The stored hash is Argon2id, not the plaintext
    let (stored_hash,): (String,) =
        sqlx::query_as("SELECT password_hash FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(&ctx.db)
            .await
            .unwrap();
    assert!(stored_hash.starts_with("$argon2id$"));
    assert!(!stored_hash.contains("carols-password-1"));

    // Login with the right password
    let (status, body) = ctx
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({"email": email, "password": "carols-password-1"})),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().unwrap().to_string();

    // The token works against a protected route
    let (status, boards) = ctx
        .request("GET", "/boards/mine", Some(&token), None)
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(boards.as_array().unwrap().is_empty());

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&ctx.db)
        .await
        .unwrap();
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let mut ctx = require_test_db!();

    let email = format!("dup-{}@example.com", common::unique_suffix());
    let payload = json!({"email": email, "password": "password-number-1", "name": "Dup"});

    let (status, first) = ctx
        .request("POST", "/users", None, Some(payload.clone()))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = ctx
        .request("POST", "/users", None, Some(payload))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(first["id"].as_i64().unwrap())
        .execute(&ctx.db)
        .await
        .unwrap();
    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let mut ctx = require_test_db!();

    let eve = ctx.create_user("eve", UserRole::User).await.unwrap();

    // Wrong password for a real account
    let (wrong_pw_status, wrong_pw_body) = ctx
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({"email": eve.email, "password": "not-the-password"})),
        )
        .await
        .unwrap();

    // Unknown email entirely
    let (unknown_status, unknown_body) = ctx
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({"email": "nobody@example.com", "password": "whatever-pass"})),
        )
        .await
        .unwrap();

    // Same status, same body; the endpoint leaks nothing about which
    // addresses have accounts
    assert_eq!(wrong_pw_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw_body, unknown_body);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_missing_and_invalid_tokens_rejected() {
    let mut ctx = require_test_db!();

    // No token at all
    let (status, _) = ctx.request("GET", "/boards/mine", None, None).await.unwrap();
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Garbage token
    let (status, _) = ctx
        .request("GET", "/boards/mine", Some("not-a-jwt"), None)
        .await
        .unwrap();
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A credential under a non-Bearer scheme is an invalid credential,
    // not a malformed request
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/boards/mine")
        .header("authorization", "Basic YW5uOnNlY3JldA==")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = ctx.app.call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_token_for_deleted_user_rejected() {
    let mut ctx = require_test_db!();

    let ghost = ctx.create_user("ghost", UserRole::User).await.unwrap();
    let token = ctx.token_for(&ghost).unwrap();

    // Works while the account exists
    let (status, _) = ctx
        .request("GET", "/boards/mine", Some(&token), None)
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(ghost.id)
        .execute(&ctx.db)
        .await
        .unwrap();

    // The still-valid token is rejected once the subject is gone
    let (status, _) = ctx
        .request("GET", "/boards/mine", Some(&token), None)
        .await
        .unwrap();
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_user_listing_is_admin_only() {
    let mut ctx = require_test_db!();

    let admin = ctx.create_user("root", UserRole::Admin).await.unwrap();
    let plain = ctx.create_user("plain", UserRole::User).await.unwrap();
    let admin_token = ctx.token_for(&admin).unwrap();
    let plain_token = ctx.token_for(&plain).unwrap();

    let (status, _) = ctx
        .request("GET", "/users", Some(&plain_token), None)
        .await
        .unwrap();
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, users) = ctx
        .request("GET", "/users", Some(&admin_token), None)
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);
    assert!(users.as_array().unwrap().len() >= 2);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_user_access_is_self_or_admin() {
    let mut ctx = require_test_db!();

    let admin = ctx.create_user("root", UserRole::Admin).await.unwrap();
    let ann = ctx.create_user("ann", UserRole::User).await.unwrap();
    let bob = ctx.create_user("bob", UserRole::User).await.unwrap();
    let admin_token = ctx.token_for(&admin).unwrap();
    let ann_token = ctx.token_for(&ann).unwrap();
    let bob_token = ctx.token_for(&bob).unwrap();

    // Ann can read herself
    let (status, _) = ctx
        .request("GET", &format!("/users/{}", ann.id), Some(&ann_token), None)
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);

    // Bob cannot read Ann
    let (status, _) = ctx
        .request("GET", &format!("/users/{}", ann.id), Some(&bob_token), None)
        .await
        .unwrap();
    assert_eq!(status, StatusCode::FORBIDDEN);

    // An admin can
    let (status, _) = ctx
        .request("GET", &format!("/users/{}", ann.id), Some(&admin_token), None)
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);

    // Ann can rename herself
    let (status, updated) = ctx
        .request(
            "PATCH",
            &format!("/users/{}", ann.id),
            Some(&ann_token),
            Some(json!({"name": "Ann Renamed"})),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Ann Renamed");

    // Keeping her own email is not a conflict
    let (status, _) = ctx
        .request(
            "PATCH",
            &format!("/users/{}", ann.id),
            Some(&ann_token),
            Some(json!({"email": ann.email})),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::OK);

    // Taking Bob's email is
    let (status, _) = ctx
        .request(
            "PATCH",
            &format!("/users/{}", ann.id),
            Some(&ann_token),
            Some(json!({"email": bob.email})),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CONFLICT);

    // Bob cannot delete Ann
    let (status, _) = ctx
        .request("DELETE", &format!("/users/{}", ann.id), Some(&bob_token), None)
        .await
        .unwrap();
    assert_eq!(status, StatusCode::FORBIDDEN);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_validation_errors_are_422_with_details() {
    let mut ctx = require_test_db!();

    let (status, body) = ctx
        .request(
            "POST",
            "/users",
            None,
            Some(json!({"email": "not-an-email", "password": "short", "name": "X"})),
        )
        .await
        .unwrap();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"].as_array().unwrap().len() >= 2);

    ctx.cleanup().await.unwrap();
}
