//! Reference-data listing service.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::Error;
use super::location::Country;
use super::ports::{CountryDirectory, CountryRepository, map_store_error};

/// Country listing over the reference-data repository.
#[derive(Clone)]
pub struct CountryService<C> {
    countries: Arc<C>,
}

impl<C> CountryService<C> {
    /// Create a new service with the given repository.
    pub fn new(countries: Arc<C>) -> Self {
        Self { countries }
    }
}

#[async_trait]
impl<C> CountryDirectory for CountryService<C>
where
    C: CountryRepository,
{
    async fn countries(&self) -> Result<Vec<Country>, Error> {
        self.countries.list_all().await.map_err(map_store_error)
    }
}
