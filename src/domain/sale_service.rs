//! Sale CRUD with owner-scoped mutation.
//!
//! Listing and single-record reads are deliberately unfiltered: any
//! authenticated user sees every sale, which the statistics report relies
//! on. Mutation is owner-only; the record is fetched first so a missing id
//! is `NotFound` and a wrong owner is `Forbidden`, never conflated.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::Error;
use super::ports::{SaleAccess, SaleRepository, map_store_error};
use super::sale::{Sale, SaleDraft, SaleId, SalePatch};
use super::user::UserId;

/// Sale service over the sale repository.
#[derive(Clone)]
pub struct SaleService<S> {
    sales: Arc<S>,
}

impl<S> SaleService<S> {
    /// Create a new service with the given repository.
    pub fn new(sales: Arc<S>) -> Self {
        Self { sales }
    }
}

impl<S> SaleService<S>
where
    S: SaleRepository,
{
    async fn load(&self, id: SaleId) -> Result<Sale, Error> {
        self.sales
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("no sale with id {id}")))
    }

    /// Fetch the sale and prove the caller owns it.
    async fn load_owned(&self, caller: UserId, id: SaleId) -> Result<Sale, Error> {
        let sale = self.load(id).await?;
        if sale.owner != caller {
            return Err(Error::forbidden("sale belongs to another user"));
        }
        Ok(sale)
    }

    async fn store(&self, sale: &Sale) -> Result<(), Error> {
        let stored = self.sales.update(sale).await.map_err(map_store_error)?;
        if !stored {
            return Err(Error::not_found(format!("no sale with id {}", sale.id)));
        }
        Ok(())
    }
}

#[async_trait]
impl<S> SaleAccess for SaleService<S>
where
    S: SaleRepository,
{
    async fn list(&self) -> Result<Vec<Sale>, Error> {
        self.sales.list_all().await.map_err(map_store_error)
    }

    async fn create(&self, caller: UserId, draft: SaleDraft) -> Result<Sale, Error> {
        // The owner always comes from the authenticated caller, never from
        // the payload.
        self.sales
            .insert(caller, draft)
            .await
            .map_err(map_store_error)
    }

    async fn fetch(&self, id: SaleId) -> Result<Sale, Error> {
        self.load(id).await
    }

    async fn replace(&self, caller: UserId, id: SaleId, draft: SaleDraft) -> Result<Sale, Error> {
        let existing = self.load_owned(caller, id).await?;
        let replacement = draft.into_sale(existing.id, existing.owner);
        self.store(&replacement).await?;
        Ok(replacement)
    }

    async fn amend(&self, caller: UserId, id: SaleId, patch: SalePatch) -> Result<Sale, Error> {
        let mut sale = self.load_owned(caller, id).await?;
        patch.apply_to(&mut sale);
        self.store(&sale).await?;
        Ok(sale)
    }

    async fn remove(&self, caller: UserId, id: SaleId) -> Result<(), Error> {
        self.load_owned(caller, id).await?;
        let deleted = self.sales.delete(id).await.map_err(map_store_error)?;
        if !deleted {
            return Err(Error::not_found(format!("no sale with id {id}")));
        }
        Ok(())
    }
}
