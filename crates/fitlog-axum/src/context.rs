//! Authentication context types.
//!
//! The [`AuthContext`] struct carries the resolved identity from the
//! middleware to request handlers.

use fitlog_types::{User, UserId};

/// Identity attached to a request by [`AuthLayer`](crate::AuthLayer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Email the presented token was issued for.
    pub email: String,
    /// Stored user the token resolved to.
    pub user: User,
}

impl AuthContext {
    /// Build a context for a resolved user.
    #[must_use]
    pub fn new(user: User) -> Self {
        Self {
            email: user.email.clone(),
            user,
        }
    }

    /// ID of the authenticated user.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user.id
    }
}
