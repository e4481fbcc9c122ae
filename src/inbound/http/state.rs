//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    Authenticator, CountryDirectory, ProfileAccess, SaleAccess, StatisticsQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn Authenticator>,
    pub profiles: Arc<dyn ProfileAccess>,
    pub sales: Arc<dyn SaleAccess>,
    pub statistics: Arc<dyn StatisticsQuery>,
    pub countries: Arc<dyn CountryDirectory>,
}
