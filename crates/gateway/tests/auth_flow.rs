//! Integration tests for the auth operations, run against the in-process
//! stub backend.

mod common;

use assert_matches::assert_matches;
use studycircle_core::{Credentials, Profile};
use studycircle_gateway::GatewayError;

/// Register followed by login yields a non-empty bearer token.
#[tokio::test]
async fn test_register_then_login_yields_token() {
    let (_backend, gateway) = common::gateway().await;
    let credentials = Credentials::new("ada@example.com", "hunter2-plus");

    gateway.register(&credentials).await.unwrap();
    let token = gateway.login(&credentials).await.unwrap();

    assert!(!token.is_empty());
}

/// Login with the wrong password fails with an auth error.
#[tokio::test]
async fn test_login_wrong_password_is_auth_error() {
    let (_backend, gateway) = common::gateway().await;
    let credentials = Credentials::new("ada@example.com", "hunter2-plus");
    gateway.register(&credentials).await.unwrap();

    let wrong = Credentials::new("ada@example.com", "not-the-password");
    let err = gateway.login(&wrong).await.unwrap_err();

    assert_matches!(err, GatewayError::Auth { status: 401 });
}

/// A weak password is rejected by the backend with a validation error
/// carrying the backend's message.
#[tokio::test]
async fn test_register_weak_password_is_validation_error() {
    let (_backend, gateway) = common::gateway().await;
    let credentials = Credentials::new("ada@example.com", "short");

    let err = gateway.register(&credentials).await.unwrap_err();

    assert_matches!(err, GatewayError::Validation { message, .. } => {
        assert!(message.contains("Password"), "got message: {message}");
    });
}

/// Registering the same email twice is rejected.
#[tokio::test]
async fn test_register_duplicate_email_is_validation_error() {
    let (_backend, gateway) = common::gateway().await;
    let credentials = Credentials::new("ada@example.com", "hunter2-plus");
    gateway.register(&credentials).await.unwrap();

    let err = gateway.register(&credentials).await.unwrap_err();

    assert_matches!(err, GatewayError::Validation { message, .. } => {
        assert!(message.contains("registered"), "got message: {message}");
    });
}

/// The token resolves to a stable user identity.
#[tokio::test]
async fn test_fetch_current_user_resolves_id() {
    let (_backend, gateway, token, user_id) = common::signed_in().await;

    let identity = gateway.fetch_current_user(&token).await.unwrap();

    assert_eq!(identity.id, user_id);
    assert_eq!(identity.email.as_deref(), Some("student@example.com"));
}

/// A bogus token is an auth error, not a decode error.
#[tokio::test]
async fn test_fetch_current_user_bad_token() {
    let (_backend, gateway) = common::gateway().await;

    let err = gateway.fetch_current_user("no-such-token").await.unwrap_err();

    assert_matches!(err, GatewayError::Auth { .. });
}

/// Profile creation echoes the persisted row.
#[tokio::test]
async fn test_create_profile_returns_row() {
    let (backend, gateway, token, user_id) = common::signed_in().await;

    let profile = gateway
        .create_profile(&token, &Profile::new(user_id.clone(), "Ada"))
        .await
        .unwrap();

    assert_eq!(profile.id, user_id);
    assert_eq!(profile.name, "Ada");
    assert_eq!(backend.profile_count(), 1);
}
