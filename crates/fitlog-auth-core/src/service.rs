//! Account service - ties together the credential store, password hashing
//! and token issuance

use std::sync::Arc;

use fitlog_db::{CreateUser, UserRepository};
use fitlog_types::{Credentials, User, UserId};
use validator::Validate;

use crate::{
    config::AuthConfig,
    password::PasswordHasher,
    token::{IssuedToken, TokenService},
    AuthError,
};

/// Account flows
///
/// Provides a single interface for:
/// - Signup (create an account with a hashed password)
/// - Login (exchange credentials for a bearer token)
/// - Authentication (resolve a bearer token to a stored user)
/// - Account deletion
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl AccountService {
    /// Create an account service with the production password hasher
    pub fn new(config: &AuthConfig, users: Arc<dyn UserRepository>) -> Result<Self, AuthError> {
        Ok(Self::from_parts(
            users,
            PasswordHasher::new(),
            TokenService::new(config)?,
        ))
    }

    /// Assemble from already-built components
    pub fn from_parts(
        users: Arc<dyn UserRepository>,
        hasher: PasswordHasher,
        tokens: TokenService,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Get the token service
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Register a new account.
    ///
    /// The existence check runs before validation; the store's unique index
    /// still rejects a concurrent duplicate at insert time.
    pub async fn signup(&self, credentials: Credentials) -> Result<User, AuthError> {
        if self.users.find_by_email(&credentials.email).await?.is_some() {
            tracing::debug!("Signup rejected: email already registered");
            return Err(AuthError::EmailTaken);
        }

        credentials.validate()?;

        let password_hash = self.hasher.hash(&credentials.password).await?;
        let user_id = UserId::new();

        let row = self
            .users
            .create(CreateUser {
                id: user_id.0,
                email: credentials.email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %row.id, "Account created");
        Ok(row.to_user())
    }

    /// Exchange credentials for a bearer token.
    ///
    /// Unknown email and wrong password fail identically, including the
    /// password hashing work done before failing.
    pub async fn login(&self, credentials: Credentials) -> Result<IssuedToken, AuthError> {
        let Some(row) = self.users.find_by_email(&credentials.email).await? else {
            self.hasher.verify_placeholder(&credentials.password).await;
            tracing::debug!("Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .hasher
            .verify(&credentials.password, &row.password_hash)
            .await
        {
            tracing::debug!(user_id = %row.id, "Login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.tokens.issue(&row.email)?;
        tracing::info!(user_id = %row.id, "Login succeeded");
        Ok(issued)
    }

    /// Resolve a bearer token to the stored user it names.
    ///
    /// A valid token whose subject no longer exists is an `InvalidToken`.
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let email = self.tokens.verify(token)?;

        match self.users.find_by_email(&email).await? {
            Some(row) => Ok(row.to_user()),
            None => {
                tracing::debug!("Token subject has no account");
                Err(AuthError::InvalidToken)
            }
        }
    }

    /// Look up a user by ID
    pub async fn find_user(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users
            .find_by_id(user_id.0)
            .await?
            .map(|row| row.to_user())
            .ok_or(AuthError::UserNotFound)
    }

    /// Permanently delete an account
    pub async fn delete_account(&self, user_id: UserId) -> Result<(), AuthError> {
        let removed = self.users.delete(user_id.0).await?;
        if removed == 0 {
            return Err(AuthError::UserNotFound);
        }

        tracing::info!(user_id = %user_id, "Account deleted");
        Ok(())
    }
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
