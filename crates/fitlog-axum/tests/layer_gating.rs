//! Route gating through AuthLayer with an in-memory credential store

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::routing::get;
use axum::Router;
use fitlog_auth_core::{AccountService, AuthConfig, PasswordHasher, TokenClaims, TokenService};
use fitlog_axum::{AuthLayer, RequireAuth};
use fitlog_db::memory::MemoryUserRepository;
use fitlog_db::{CreateUser, DbResult, UserRepository, UserRow};
use fitlog_types::Credentials;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "layer-test-secret-0123456789abcdefgh";

async fn whoami(auth: RequireAuth) -> String {
    format!("{}:{}", auth.email, auth.user_id())
}

async fn open() -> &'static str {
    "open"
}

/// Per-method call counts on the credential store
#[derive(Default)]
struct StoreCalls {
    find_by_id: AtomicUsize,
    find_by_email: AtomicUsize,
    create: AtomicUsize,
    delete: AtomicUsize,
}

impl StoreCalls {
    fn reset(&self) {
        self.find_by_id.store(0, Ordering::SeqCst);
        self.find_by_email.store(0, Ordering::SeqCst);
        self.create.store(0, Ordering::SeqCst);
        self.delete.store(0, Ordering::SeqCst);
    }

    fn total(&self) -> usize {
        self.find_by_id.load(Ordering::SeqCst)
            + self.find_by_email.load(Ordering::SeqCst)
            + self.create.load(Ordering::SeqCst)
            + self.delete.load(Ordering::SeqCst)
    }
}

struct CountingUsers {
    inner: MemoryUserRepository,
    calls: Arc<StoreCalls>,
}

#[async_trait]
impl UserRepository for CountingUsers {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        self.calls.find_by_id.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>> {
        self.calls.find_by_email.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_email(email).await
    }

    async fn create(&self, user: CreateUser) -> DbResult<UserRow> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        self.inner.create(user).await
    }

    async fn delete(&self, id: Uuid) -> DbResult<u64> {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(id).await
    }
}

struct Harness {
    app: Router,
    accounts: Arc<AccountService>,
    users: MemoryUserRepository,
    calls: Arc<StoreCalls>,
}

fn harness() -> Harness {
    let users = MemoryUserRepository::new();
    let calls = Arc::new(StoreCalls::default());
    let store = CountingUsers {
        inner: users.clone(),
        calls: Arc::clone(&calls),
    };
    let accounts = Arc::new(AccountService::from_parts(
        Arc::new(store),
        PasswordHasher::with_params(1024, 1, 1).unwrap(),
        TokenService::new(&AuthConfig::new(SECRET)).unwrap(),
    ));
    let app = Router::new()
        .route("/me", get(whoami))
        .route_layer(AuthLayer::new(Arc::clone(&accounts)))
        .route("/open", get(open))
        .route("/unguarded", get(whoami));
    Harness {
        app,
        accounts,
        users,
        calls,
    }
}

async fn token_for(accounts: &AccountService, email: &str) -> String {
    accounts
        .signup(Credentials::new(email, "secret1"))
        .await
        .unwrap();
    accounts
        .login(Credentials::new(email, "secret1"))
        .await
        .unwrap()
        .token
}

fn get_with(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn error_code(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    json["error"]["code"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_valid_token_reaches_handler_with_identity() {
    let h = harness();
    let token = token_for(&h.accounts, "a@x.com").await;

    let response = h
        .app
        .oneshot(get_with("/me", Some(&format!("Bearer {token}"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.starts_with("a@x.com:"));
}

#[tokio::test]
async fn test_missing_header_rejected() {
    let h = harness();
    let response = h.app.oneshot(get_with("/me", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "MISSING_TOKEN");
}

#[tokio::test]
async fn test_wrong_scheme_rejected() {
    let h = harness();
    let response = h
        .app
        .oneshot(get_with("/me", Some("Basic dXNlcjpwYXNz")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "MISSING_TOKEN");
}

#[tokio::test]
async fn test_tampered_token_rejected() {
    let h = harness();
    let mut token = token_for(&h.accounts, "a@x.com").await;
    let last = token.pop().unwrap();
    token.push(if last == 'A' { 'B' } else { 'A' });

    let response = h
        .app
        .oneshot(get_with("/me", Some(&format!("Bearer {token}"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_expired_token_looks_like_invalid() {
    let h = harness();
    token_for(&h.accounts, "a@x.com").await;
    let now = chrono::Utc::now().timestamp_millis();
    let expired = h
        .accounts
        .tokens()
        .sign(&TokenClaims {
            sub: "a@x.com".to_string(),
            issued: now - 60_000,
            expires: now - 1,
        })
        .unwrap();

    let response = h
        .app
        .oneshot(get_with("/me", Some(&format!("Bearer {expired}"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_deleted_subject_rejected() {
    let h = harness();
    let token = token_for(&h.accounts, "a@x.com").await;
    let user = h.accounts.authenticate(&token).await.unwrap();
    h.accounts.delete_account(user.id).await.unwrap();

    let response = h
        .app
        .oneshot(get_with("/me", Some(&format!("Bearer {token}"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_store_outage_is_internal_error() {
    let h = harness();
    let token = token_for(&h.accounts, "a@x.com").await;
    h.users.set_offline(true);

    let response = h
        .app
        .oneshot(get_with("/me", Some(&format!("Bearer {token}"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_code(response).await, "INTERNAL_ERROR");
}

#[tokio::test]
async fn test_routes_outside_layer_are_open() {
    let h = harness();
    let response = h.app.oneshot(get_with("/open", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_require_auth_without_layer_is_401() {
    let h = harness();
    let token = token_for(&h.accounts, "a@x.com").await;

    // The header alone does nothing without the layer
    let response = h
        .app
        .oneshot(get_with("/unguarded", Some(&format!("Bearer {token}"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_authenticated_request_reads_store_once() {
    let h = harness();
    let token = token_for(&h.accounts, "a@x.com").await;
    h.calls.reset();

    let response = h
        .app
        .oneshot(get_with("/me", Some(&format!("Bearer {token}"))))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(h.calls.find_by_email.load(Ordering::SeqCst), 1);
    assert_eq!(h.calls.find_by_id.load(Ordering::SeqCst), 0);
    assert_eq!(h.calls.create.load(Ordering::SeqCst), 0);
    assert_eq!(h.calls.delete.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_rejected_token_never_reaches_store() {
    let h = harness();
    let mut token = token_for(&h.accounts, "a@x.com").await;
    let last = token.pop().unwrap();
    token.push(if last == 'A' { 'B' } else { 'A' });
    h.calls.reset();

    let response = h
        .app
        .clone()
        .oneshot(get_with("/me", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = h
        .app
        .oneshot(get_with("/me", Some(&format!("Bearer {token}"))))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(h.calls.total(), 0);
}
