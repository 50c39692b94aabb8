mod common;

use axum::http::{Method, StatusCode};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use jobtrack_api::auth::TokenCodec;
use jobtrack_api::store::User;

fn phantom_user() -> User {
    // A user the store has never heard of; only the token says they exist.
    User {
        id: Uuid::new_v4(),
        full_name: "Ghost".to_string(),
        email: "ghost@example.com".to_string(),
        password_hash: String::new(),
        created_on: Utc::now(),
    }
}

#[tokio::test]
async fn missing_token_is_unauthenticated() {
    let app = common::test_app();

    for (method, path) in [
        (Method::GET, "/get-user"),
        (Method::GET, "/get-all-jobs"),
        (Method::POST, "/add-job"),
    ] {
        let (status, body) = common::send(&app, method, path, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], json!(true));
        assert_eq!(body["message"], json!("No token provided"));
    }
}

#[tokio::test]
async fn garbage_token_is_forbidden() {
    let app = common::test_app();

    let (status, body) = common::send(
        &app,
        Method::GET,
        "/get-all-jobs",
        Some("definitely.not.a-jwt"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], json!("Invalid or expired token"));
}

#[tokio::test]
async fn expired_token_is_forbidden_despite_valid_signature() {
    let app = common::test_app();

    // Correct secret, but the expiry is already behind us.
    let expired = TokenCodec::new(common::TEST_SECRET, -1)
        .issue(&phantom_user())
        .expect("issue");

    let (status, body) =
        common::send(&app, Method::GET, "/get-all-jobs", Some(&expired), None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], json!("Invalid or expired token"));
}

#[tokio::test]
async fn token_from_another_secret_is_forbidden() {
    let app = common::test_app();

    let forged = TokenCodec::new("some-other-secret", common::TEST_TTL_DAYS)
        .issue(&phantom_user())
        .expect("issue");

    let (status, body) =
        common::send(&app, Method::GET, "/get-all-jobs", Some(&forged), None).await;

    // Same rejection as an expired token; the gate never says which.
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], json!("Invalid or expired token"));
}

#[tokio::test]
async fn gate_trusts_the_snapshot_but_profile_reverifies() {
    let app = common::test_app();

    // Validly signed token whose account does not exist in the store. The
    // gate binds the snapshot without a lookup, so job routes work...
    let stale = TokenCodec::new(common::TEST_SECRET, common::TEST_TTL_DAYS)
        .issue(&phantom_user())
        .expect("issue");

    let (status, body) =
        common::send(&app, Method::GET, "/get-all-jobs", Some(&stale), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jobs"], json!([]));

    // ...while the profile route checks the live record and turns it away.
    let (status, body) = common::send(&app, Method::GET, "/get-user", Some(&stale), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], json!("User not found"));
}
