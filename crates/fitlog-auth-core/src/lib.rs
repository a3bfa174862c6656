//! Fitlog Auth Core - Authentication business logic
//!
//! Password hashing, stateless bearer tokens and the account flows
//! (signup, login, identity resolution, deletion) built on top of them.

pub mod config;
pub mod crypto;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use crypto::{constant_time_eq, HmacKey, HmacKeyError};
pub use error::AuthError;
pub use password::PasswordHasher;
pub use service::AccountService;
pub use token::{IssuedToken, TokenClaims, TokenService};
