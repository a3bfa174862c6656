//! Common test utilities for fitlog-auth-core integration tests

use std::sync::Arc;

use fitlog_auth_core::{AccountService, AuthConfig, PasswordHasher, TokenService};
use fitlog_db::memory::MemoryUserRepository;

pub const SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Account service over an in-memory store with a cheap hasher
pub fn account_service() -> (AccountService, MemoryUserRepository) {
    let users = MemoryUserRepository::new();
    let hasher = PasswordHasher::with_params(1024, 1, 1).unwrap();
    let tokens = TokenService::new(&AuthConfig::new(SECRET)).unwrap();
    let service = AccountService::from_parts(Arc::new(users.clone()), hasher, tokens);
    (service, users)
}
