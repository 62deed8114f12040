//! Sign-in lifecycle against the in-process backend.

mod common;

use common::{session, setup, Mock, RefreshMode};
use student_service_core::auth::{AuthError, AuthService, SessionStore};
use student_service_core::models::Role;

#[tokio::test]
async fn test_sign_in_persists_session() {
    let (client, store) = setup(Mock::new("access-1", RefreshMode::NoToken), None).await;
    let auth = AuthService::new(client);

    let session = auth.sign_in("ava@example.com", "Passw0rd!1").await.unwrap();
    assert_eq!(session.token, "access-1");
    assert_eq!(session.refresh_token.as_deref(), Some("refresh-1"));
    assert!(auth.is_authenticated());
    assert_eq!(store.load().unwrap().token, "access-1");
}

#[tokio::test]
async fn test_sign_in_rejected_surfaces_backend_message() {
    let (client, store) = setup(Mock::new("access-1", RefreshMode::NoToken), None).await;
    let auth = AuthService::new(client);

    let err = auth.sign_in("ava@example.com", "nope").await.unwrap_err();
    match err {
        AuthError::Api(ref api) => assert_eq!(api.status(), Some(401)),
        ref other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.to_string(), "Invalid email or password");
    assert!(store.load().is_none());
}

#[tokio::test]
async fn test_bootstrap_hydrates_profile() {
    let (client, store) = setup(Mock::new("access-1", RefreshMode::NoToken), None).await;
    let auth = AuthService::new(client);

    // Login only returns tokens, so the profile is fetched separately
    let session = auth.sign_in("ava@example.com", "Passw0rd!1").await.unwrap();
    assert!(!session.is_complete());

    let hydrated = auth.bootstrap().await.unwrap();
    let user = hydrated.user.unwrap();
    assert_eq!(user.email.as_deref(), Some("ava@example.com"));
    assert_eq!(user.role, Some(Role::Admin));
    assert!(store.load().unwrap().is_complete());
    assert!(auth.require_admin().is_ok());
}

#[tokio::test]
async fn test_bootstrap_failure_keeps_existing_session() {
    let mock = Mock::forbidding("access-1", RefreshMode::NoToken);
    let (client, store) = setup(mock, Some(session("access-1", None))).await;
    let auth = AuthService::new(client);

    let result = auth.bootstrap().await.unwrap();
    assert!(!result.is_complete());
    assert_eq!(store.load().unwrap().token, "access-1");
}

#[tokio::test]
async fn test_bootstrap_without_session() {
    let (client, _) = setup(Mock::new("access-1", RefreshMode::NoToken), None).await;
    assert!(AuthService::new(client).bootstrap().await.is_none());
}

#[tokio::test]
async fn test_sign_out_clears_even_when_logout_fails() {
    let (client, store) = setup(
        Mock::new("access-1", RefreshMode::NoToken),
        Some(session("access-1", Some("refresh-1"))),
    )
    .await;
    let auth = AuthService::new(client);

    // The mock has no logout route
    auth.sign_out().await.unwrap();
    assert!(store.load().is_none());
    assert!(!auth.is_authenticated());
}
