//! Fitlog Axum Integration
//!
//! Axum middleware and extractors that put fitlog bearer-token
//! authentication in front of routes.
//!
//! # Quick Start
//!
//! ```ignore
//! use fitlog_axum::{AuthLayer, RequireAuth};
//! use axum::{Router, routing::get};
//!
//! async fn protected_handler(auth: RequireAuth) -> String {
//!     format!("Hello, {}!", auth.email)
//! }
//!
//! let app = Router::new()
//!     .route("/user/me", get(protected_handler))
//!     .route_layer(AuthLayer::new(accounts));
//! ```
//!
//! # Extractors
//!
//! - [`RequireAuth`] - Requires valid authentication (401 if missing)

pub mod context;
pub mod error;
pub mod extractors;
pub mod layer;

pub use context::AuthContext;
pub use error::{error_response, AuthRejection, ErrorDetail, ErrorEnvelope};
pub use extractors::RequireAuth;
pub use layer::{bearer_token, AuthLayer, AuthMiddleware};
