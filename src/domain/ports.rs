//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain expects to reach the store; driving
//! ports are the use-cases HTTP handlers call. Each trait exposes strongly
//! typed errors so adapters map their failures into predictable variants.

use async_trait::async_trait;
use thiserror::Error;

use super::auth::{LoginCredentials, LoginGrant, TokenKey};
use super::error::Error as DomainError;
use super::location::Country;
use super::sale::{Sale, SaleDraft, SaleId, SalePatch};
use super::statistics::SaleStatistics;
use super::user::{ProfileUpdate, User, UserAccount, UserId};

/// Failures surfaced by store adapters.
///
/// Every driven port shares the same two failure categories, so a single
/// enum serves them all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Store connectivity failure.
    #[error("store connection failed: {message}")]
    Connection {
        /// Adapter-supplied description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("store query failed: {message}")]
    Query {
        /// Adapter-supplied description.
        message: String,
    },
}

impl StoreError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for user accounts and profiles.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the stored account (profile + password hash) for a login email.
    async fn find_account_by_email(&self, email: &str)
    -> Result<Option<UserAccount>, StoreError>;

    /// Fetch a profile by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Overwrite a stored profile. Returns `false` when no such user exists.
    async fn update_profile(&self, profile: &User) -> Result<bool, StoreError>;
}

/// Persistence port for the token table.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Fetch the live token for a user, if one exists.
    async fn token_for_user(&self, user: UserId) -> Result<Option<TokenKey>, StoreError>;

    /// Resolve a presented token to its owning user.
    async fn user_for_token(&self, token: &TokenKey) -> Result<Option<UserId>, StoreError>;

    /// Persist a freshly issued token for a user.
    async fn store(&self, user: UserId, token: TokenKey) -> Result<(), StoreError>;

    /// Delete the user's token. Returns `false` when none existed.
    async fn remove_for_user(&self, user: UserId) -> Result<bool, StoreError>;
}

/// Persistence port for sale records.
#[async_trait]
pub trait SaleRepository: Send + Sync {
    /// Insert a new sale owned by `owner`; the store assigns the id.
    async fn insert(&self, owner: UserId, draft: SaleDraft) -> Result<Sale, StoreError>;

    /// Fetch a sale by identifier.
    async fn find_by_id(&self, id: SaleId) -> Result<Option<Sale>, StoreError>;

    /// Full-table scan in insertion order.
    async fn list_all(&self) -> Result<Vec<Sale>, StoreError>;

    /// Overwrite a stored sale. Returns `false` when no such sale exists.
    async fn update(&self, sale: &Sale) -> Result<bool, StoreError>;

    /// Hard-delete a sale. Returns `false` when no such sale exists.
    async fn delete(&self, id: SaleId) -> Result<bool, StoreError>;
}

/// Persistence port for country/city reference data.
#[async_trait]
pub trait CountryRepository: Send + Sync {
    /// All countries with their nested cities.
    async fn list_all(&self) -> Result<Vec<Country>, StoreError>;
}

/// Driving port: authentication and token lifecycle.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Validate credentials and return the user's token, issuing one on
    /// first login. Failures are deliberately indistinguishable.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginGrant, DomainError>;

    /// Revoke the user's current token.
    async fn logout(&self, user: UserId) -> Result<(), DomainError>;

    /// Resolve a presented token to the authenticated user's profile.
    async fn resolve(&self, token: &TokenKey) -> Result<User, DomainError>;
}

/// Driving port: self-scoped profile access.
#[async_trait]
pub trait ProfileAccess: Send + Sync {
    /// Fetch a profile; only the owner may view it.
    async fn profile(&self, caller: UserId, target: UserId) -> Result<User, DomainError>;

    /// Patch a profile; only the owner may change it.
    async fn update_profile(
        &self,
        caller: UserId,
        target: UserId,
        update: ProfileUpdate,
    ) -> Result<User, DomainError>;
}

/// Driving port: sale CRUD with owner-scoped mutation.
#[async_trait]
pub trait SaleAccess: Send + Sync {
    /// Every sale in the table, regardless of owner.
    async fn list(&self) -> Result<Vec<Sale>, DomainError>;

    /// Create a sale owned by the caller.
    async fn create(&self, caller: UserId, draft: SaleDraft) -> Result<Sale, DomainError>;

    /// Fetch a sale by id; readable by any authenticated user.
    async fn fetch(&self, id: SaleId) -> Result<Sale, DomainError>;

    /// Fully replace a sale; only the owner may do so.
    async fn replace(
        &self,
        caller: UserId,
        id: SaleId,
        draft: SaleDraft,
    ) -> Result<Sale, DomainError>;

    /// Partially update a sale; only the owner may do so.
    async fn amend(&self, caller: UserId, id: SaleId, patch: SalePatch)
    -> Result<Sale, DomainError>;

    /// Hard-delete a sale; only the owner may do so.
    async fn remove(&self, caller: UserId, id: SaleId) -> Result<(), DomainError>;
}

/// Driving port: the comparative statistics report.
#[async_trait]
pub trait StatisticsQuery: Send + Sync {
    /// Compile the report for the authenticated caller.
    async fn report_for(&self, caller: UserId) -> Result<SaleStatistics, DomainError>;
}

/// Driving port: reference-data listing.
#[async_trait]
pub trait CountryDirectory: Send + Sync {
    /// All countries with nested cities.
    async fn countries(&self) -> Result<Vec<Country>, DomainError>;
}

/// Map a driven-port failure into the domain error surfaced to callers.
///
/// Adapter detail is logged, not exposed; the HTTP boundary additionally
/// redacts internal messages.
pub fn map_store_error(error: StoreError) -> DomainError {
    match error {
        StoreError::Connection { message } => {
            DomainError::internal(format!("store unavailable: {message}"))
        }
        StoreError::Query { message } => DomainError::internal(format!("store error: {message}")),
    }
}
