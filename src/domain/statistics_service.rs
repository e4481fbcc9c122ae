//! Driving-port wrapper around the pure statistics aggregator.
//!
//! Snapshots the sale table through the repository port and folds it with
//! [`compile_statistics`]. Read-committed semantics are sufficient: writes
//! racing the scan may be partially reflected.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::Error;
use super::ports::{SaleRepository, StatisticsQuery, map_store_error};
use super::statistics::{SaleStatistics, compile_statistics};
use super::user::UserId;

/// Statistics service over the sale repository.
#[derive(Clone)]
pub struct StatisticsService<S> {
    sales: Arc<S>,
}

impl<S> StatisticsService<S> {
    /// Create a new service with the given repository.
    pub fn new(sales: Arc<S>) -> Self {
        Self { sales }
    }
}

#[async_trait]
impl<S> StatisticsQuery for StatisticsService<S>
where
    S: SaleRepository,
{
    async fn report_for(&self, caller: UserId) -> Result<SaleStatistics, Error> {
        let table = self.sales.list_all().await.map_err(map_store_error)?;
        Ok(compile_statistics(caller, &table))
    }
}
