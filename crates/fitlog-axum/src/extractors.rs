//! Axum extractors for authentication.
//!
//! These extractors read the [`AuthContext`] that [`AuthLayer`](crate::AuthLayer)
//! stores in request extensions.
//!
//! # Usage
//!
//! ```ignore
//! use fitlog_axum::RequireAuth;
//!
//! // Requires authentication (401 if not authenticated)
//! async fn protected(auth: RequireAuth) -> String {
//!     format!("Hello, {}!", auth.email)
//! }
//! ```

use std::ops::Deref;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::context::AuthContext;
use crate::error::AuthRejection;

/// Extractor that requires authentication.
///
/// Returns 401 Unauthorized if the route is not behind the auth layer or
/// the layer attached no identity.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthContext);

impl Deref for RequireAuth {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(Self)
            .ok_or(AuthRejection::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use fitlog_types::{User, UserId};

    fn parts_with(ctx: Option<AuthContext>) -> Parts {
        let mut req = Request::builder().uri("/").body(()).unwrap();
        if let Some(ctx) = ctx {
            req.extensions_mut().insert(ctx);
        }
        req.into_parts().0
    }

    fn ctx() -> AuthContext {
        AuthContext::new(User {
            id: UserId::new(),
            email: "a@x.com".to_string(),
        })
    }

    #[tokio::test]
    async fn test_require_auth_present() {
        let expected = ctx();
        let mut parts = parts_with(Some(expected.clone()));
        let auth = RequireAuth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(auth.0, expected);
    }

    #[tokio::test]
    async fn test_require_auth_missing() {
        let mut parts = parts_with(None);
        let result = RequireAuth::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AuthRejection::MissingToken)));
    }
}
