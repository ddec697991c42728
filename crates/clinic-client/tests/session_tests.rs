//! # Integration Tests for the Session Lifecycle
//!
//! Login, startup token resolution, and logout against a wiremock API.

use std::sync::Arc;

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use clinic_client::{
    ApiClient, ApiConfig, CredentialStore, MemoryCredentialStore, SessionStatus, SessionStore,
    TokenPair,
};
use clinic_core::Role;

fn store_with(access: &str, refresh: &str) -> Arc<MemoryCredentialStore> {
    Arc::new(MemoryCredentialStore::with_tokens(TokenPair {
        access: access.to_string(),
        refresh: refresh.to_string(),
    }))
}

fn session_store(server: &MockServer, store: Arc<MemoryCredentialStore>) -> SessionStore {
    let config = ApiConfig::new(server.uri()).expect("config");
    let client = Arc::new(ApiClient::new(&config, store).expect("client build"));
    SessionStore::new(client)
}

fn me_body(roles: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "username": "astou",
        "email": "astou@clinic.example",
        "roles": roles
    })
}

#[tokio::test]
async fn login_with_valid_credentials_authenticates_and_populates_roles() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login/"))
        .and(body_json(serde_json::json!({
            "username": "astou",
            "password": "s3cret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access": "acc-1",
            "refresh": "ref-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/me/"))
        .and(header("Authorization", "Bearer acc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(me_body(&["Administrateur"])))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let session = session_store(&server, store.clone());

    session.login("astou", "s3cret").await.expect("login");

    assert_eq!(session.status(), SessionStatus::Authenticated);
    assert!(session.has_role(Role::Administrator));
    assert!(!session.has_role(Role::Physician));
    assert!(session.can_manage_records());
    assert_eq!(store.access().as_deref(), Some("acc-1"));
    assert_eq!(store.refresh().as_deref(), Some("ref-1"));
}

#[tokio::test]
async fn login_with_bad_credentials_surfaces_the_server_detail() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "detail": "No active account found with the given credentials"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Bad credentials must not reach the refresh or identity endpoints.
    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/me/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCredentialStore::new());
    let session = session_store(&server, store.clone());

    let error = session
        .login("astou", "wrong")
        .await
        .expect_err("must fail");
    assert_eq!(error, "No active account found with the given credentials");
    assert_eq!(session.status(), SessionStatus::Unauthenticated);
    assert_eq!(store.access(), None);
}

#[tokio::test]
async fn initialize_resolves_a_persisted_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/"))
        .and(header("Authorization", "Bearer persisted"))
        .respond_with(ResponseTemplate::new(200).set_body_json(me_body(&["Secretaire"])))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_store(&server, store_with("persisted", "ref-1"));
    assert_eq!(session.status(), SessionStatus::Loading);

    session.initialize().await;

    assert_eq!(session.status(), SessionStatus::Authenticated);
    assert!(session.has_role(Role::Secretary));
    assert_eq!(session.identity().expect("identity").username, "astou");
}

#[tokio::test]
async fn initialize_with_rejected_token_clears_and_settles_unauthenticated() {
    let server = MockServer::start().await;

    // The adapter gets one refresh attempt; both it and the original
    // call are rejected, so initialize falls back to unauthenticated.
    Mock::given(method("GET"))
        .and(path("/me/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/token/refresh/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_with("expired", "expired-too");
    let session = session_store(&server, store.clone());
    session.initialize().await;

    assert_eq!(session.status(), SessionStatus::Unauthenticated);
    assert_eq!(session.identity(), None);
    assert_eq!(store.access(), None);
    assert_eq!(store.refresh(), None);
}

#[tokio::test]
async fn initialize_without_a_token_makes_no_network_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = session_store(&server, Arc::new(MemoryCredentialStore::new()));
    session.initialize().await;

    assert_eq!(session.status(), SessionStatus::Unauthenticated);
    assert!(!session.can_manage_records());
}

#[tokio::test]
async fn logout_clears_everything_and_is_idempotent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(me_body(&["Utilisateur"])))
        .mount(&server)
        .await;

    let store = store_with("acc-1", "ref-1");
    let session = session_store(&server, store.clone());
    session.initialize().await;
    assert_eq!(session.status(), SessionStatus::Authenticated);

    session.logout();
    assert_eq!(session.status(), SessionStatus::Unauthenticated);
    assert_eq!(store.access(), None);
    assert_eq!(store.refresh(), None);

    // A second logout is a no-op, not an error.
    session.logout();
    assert_eq!(session.status(), SessionStatus::Unauthenticated);
}
