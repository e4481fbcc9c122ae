//! In-memory store implementing every driven port.
//!
//! One mutex guards all tables; operations are short and the expected data
//! volume is single-tenant demo scale, so contention is not a concern.
//! Records keep insertion order, which the statistics scan relies on for its
//! first-seen tie-breaking.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::auth::TokenKey;
use crate::domain::location::{City, CityId, Country, CountryId};
use crate::domain::ports::{
    CountryRepository, SaleRepository, StoreError, TokenRepository, UserRepository,
};
use crate::domain::sale::{Sale, SaleDraft, SaleId};
use crate::domain::user::{User, UserAccount, UserId};

#[derive(Debug, Default)]
struct StoreInner {
    accounts: Vec<UserAccount>,
    sales: Vec<Sale>,
    tokens: HashMap<UserId, TokenKey>,
    countries: Vec<Country>,
    next_user_id: i64,
    next_sale_id: i64,
    next_country_id: i64,
    next_city_id: i64,
}

/// Shared in-memory store backing all repositories.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::connection("store mutex poisoned"))
    }

    /// Insert a user account, assigning the next sequential id.
    ///
    /// Seeding-only surface; the API has no registration endpoint.
    pub fn add_account(
        &self,
        username: &str,
        email: &str,
        password_hash: String,
    ) -> Result<User, StoreError> {
        let mut inner = self.lock()?;
        inner.next_user_id += 1;
        let profile = User::with_identity(UserId::new(inner.next_user_id), username, email);
        inner.accounts.push(UserAccount {
            profile: profile.clone(),
            password_hash,
        });
        Ok(profile)
    }

    /// Fetch an existing country by name or create it.
    pub fn ensure_country(&self, name: &str) -> Result<CountryId, StoreError> {
        let mut inner = self.lock()?;
        if let Some(existing) = inner.countries.iter().find(|country| country.name == name) {
            return Ok(existing.id);
        }
        inner.next_country_id += 1;
        let id = CountryId::new(inner.next_country_id);
        inner.countries.push(Country {
            id,
            name: name.to_owned(),
            cities: Vec::new(),
        });
        Ok(id)
    }

    /// Append a city to an existing country.
    pub fn add_city(&self, country: CountryId, name: &str) -> Result<CityId, StoreError> {
        let mut inner = self.lock()?;
        inner.next_city_id += 1;
        let id = CityId::new(inner.next_city_id);
        let Some(target) = inner
            .countries
            .iter_mut()
            .find(|candidate| candidate.id == country)
        else {
            return Err(StoreError::query(format!(
                "no country with id {}",
                country.as_i64()
            )));
        };
        target.cities.push(City {
            id,
            name: name.to_owned(),
        });
        Ok(id)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_account_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserAccount>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .accounts
            .iter()
            .find(|account| account.profile.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .accounts
            .iter()
            .map(|account| &account.profile)
            .find(|profile| profile.id == id)
            .cloned())
    }

    async fn update_profile(&self, profile: &User) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;
        match inner
            .accounts
            .iter_mut()
            .find(|account| account.profile.id == profile.id)
        {
            Some(account) => {
                account.profile = profile.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl TokenRepository for InMemoryStore {
    async fn token_for_user(&self, user: UserId) -> Result<Option<TokenKey>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.tokens.get(&user).cloned())
    }

    async fn user_for_token(&self, token: &TokenKey) -> Result<Option<UserId>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .tokens
            .iter()
            .find(|(_, stored)| *stored == token)
            .map(|(user, _)| *user))
    }

    async fn store(&self, user: UserId, token: TokenKey) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.tokens.insert(user, token);
        Ok(())
    }

    async fn remove_for_user(&self, user: UserId) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;
        Ok(inner.tokens.remove(&user).is_some())
    }
}

#[async_trait]
impl SaleRepository for InMemoryStore {
    async fn insert(&self, owner: UserId, draft: SaleDraft) -> Result<Sale, StoreError> {
        let mut inner = self.lock()?;
        inner.next_sale_id += 1;
        let sale = draft.into_sale(SaleId::new(inner.next_sale_id), owner);
        inner.sales.push(sale.clone());
        Ok(sale)
    }

    async fn find_by_id(&self, id: SaleId) -> Result<Option<Sale>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.sales.iter().find(|sale| sale.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Sale>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.sales.clone())
    }

    async fn update(&self, sale: &Sale) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;
        match inner.sales.iter_mut().find(|row| row.id == sale.id) {
            Some(row) => {
                *row = sale.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: SaleId) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;
        let before = inner.sales.len();
        inner.sales.retain(|sale| sale.id != id);
        Ok(inner.sales.len() < before)
    }
}

#[async_trait]
impl CountryRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Country>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.countries.clone())
    }
}
