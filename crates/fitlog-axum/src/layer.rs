//! Tower middleware layer that gates routes on a bearer token.
//!
//! Per request: read `Authorization: Bearer <token>`, resolve it through
//! [`AccountService::authenticate`], attach an [`AuthContext`] and call the
//! inner service. Any failure short-circuits with a JSON rejection; the
//! inner service is never reached.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{header, HeaderMap, Request};
use axum::response::{IntoResponse, Response};
use fitlog_auth_core::AccountService;
use tower::{Layer, Service};

use crate::context::AuthContext;
use crate::error::AuthRejection;

/// Tower layer that authenticates requests before they reach a route.
#[derive(Clone)]
pub struct AuthLayer {
    accounts: Arc<AccountService>,
}

impl AuthLayer {
    /// Create a new auth layer backed by the given account service.
    #[must_use]
    pub fn new(accounts: Arc<AccountService>) -> Self {
        Self { accounts }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            accounts: Arc::clone(&self.accounts),
        }
    }
}

/// The authentication service produced by [`AuthLayer`].
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    accounts: Arc<AccountService>,
}

impl<S> Service<Request<Body>> for AuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        // The clone may not be ready; keep the instance poll_ready was called on.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let accounts = Arc::clone(&self.accounts);

        Box::pin(async move {
            let context = match authenticate(&accounts, req.headers()).await {
                Ok(context) => context,
                Err(rejection) => {
                    metrics::counter!("fitlog_auth_rejections_total", "reason" => rejection.reason())
                        .increment(1);
                    tracing::debug!(reason = rejection.reason(), "Request rejected");
                    return Ok(rejection.into_response());
                }
            };

            tracing::debug!(user_id = %context.user_id(), "Request authenticated");
            req.extensions_mut().insert(context);
            inner.call(req).await
        })
    }
}

async fn authenticate(
    accounts: &AccountService,
    headers: &HeaderMap,
) -> Result<AuthContext, AuthRejection> {
    let token = bearer_token(headers).ok_or(AuthRejection::MissingToken)?;
    let user = accounts.authenticate(token).await?;
    Ok(AuthContext::new(user))
}

/// Extract the token from an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively; an empty token counts as absent.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
