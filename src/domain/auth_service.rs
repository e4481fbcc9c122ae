//! Authentication service: credential checks and token lifecycle.
//!
//! Implements the [`Authenticator`] driving port over the user and token
//! repositories. Login failures are deliberately indistinguishable so the
//! response cannot be used as an account oracle.

use std::sync::Arc;

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use async_trait::async_trait;

use super::auth::{LoginCredentials, LoginGrant, TokenKey};
use super::error::Error;
use super::ports::{Authenticator, TokenRepository, UserRepository, map_store_error};
use super::user::{User, UserId};

/// Generic message returned for every credential failure.
pub const WRONG_CREDENTIALS: &str = "Wrong username or password";

/// Hash a password for storage, in PHC string format.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| Error::internal(format!("password hashing failed: {err}")))
}

/// Authentication service over user and token repositories.
#[derive(Clone)]
pub struct AuthService<U, T> {
    users: Arc<U>,
    tokens: Arc<T>,
}

impl<U, T> AuthService<U, T> {
    /// Create a new service with the given repositories.
    pub fn new(users: Arc<U>, tokens: Arc<T>) -> Self {
        Self { users, tokens }
    }
}

impl<U, T> AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    fn verify_password(stored_hash: &str, presented: &str) -> Result<bool, Error> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|err| Error::internal(format!("stored password hash is invalid: {err}")))?;
        Ok(Argon2::default()
            .verify_password(presented.as_bytes(), &parsed)
            .is_ok())
    }

    /// Return the user's existing token or issue and persist a fresh one.
    async fn issue_or_reuse_token(&self, user: UserId) -> Result<TokenKey, Error> {
        if let Some(existing) = self
            .tokens
            .token_for_user(user)
            .await
            .map_err(map_store_error)?
        {
            return Ok(existing);
        }

        let token = TokenKey::generate();
        self.tokens
            .store(user, token.clone())
            .await
            .map_err(map_store_error)?;
        Ok(token)
    }
}

#[async_trait]
impl<U, T> Authenticator for AuthService<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginGrant, Error> {
        let Some(account) = self
            .users
            .find_account_by_email(credentials.email())
            .await
            .map_err(map_store_error)?
        else {
            return Err(Error::unauthorized(WRONG_CREDENTIALS));
        };

        if !Self::verify_password(&account.password_hash, credentials.password())? {
            return Err(Error::unauthorized(WRONG_CREDENTIALS));
        }

        let user_id = account.profile.id;
        let token = self.issue_or_reuse_token(user_id).await?;
        Ok(LoginGrant { token, user_id })
    }

    async fn logout(&self, user: UserId) -> Result<(), Error> {
        let removed = self
            .tokens
            .remove_for_user(user)
            .await
            .map_err(map_store_error)?;
        if !removed {
            // Resolution already proved the token; a concurrent logout is
            // the only way to land here.
            tracing::debug!(user = %user, "logout found no live token");
        }
        Ok(())
    }

    async fn resolve(&self, token: &TokenKey) -> Result<User, Error> {
        let Some(user_id) = self
            .tokens
            .user_for_token(token)
            .await
            .map_err(map_store_error)?
        else {
            return Err(Error::unauthorized("invalid token"));
        };

        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::unauthorized("invalid token"))
    }
}
