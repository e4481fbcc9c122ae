//! Application wiring: services over the store, and route registration.
//!
//! `main` and the handler tests share this module so the app under test is
//! the app that ships.

use std::sync::Arc;

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};

use crate::domain::{
    AuthService, CountryService, Error, ProfileService, SaleService, StatisticsService,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{countries, sales, statistics, users};
use crate::outbound::persistence::InMemoryStore;

/// Wire every driving port to services backed by one shared store.
pub fn build_state(store: Arc<InMemoryStore>) -> HttpState {
    HttpState {
        auth: Arc::new(AuthService::new(Arc::clone(&store), Arc::clone(&store))),
        profiles: Arc::new(ProfileService::new(Arc::clone(&store))),
        sales: Arc::new(SaleService::new(Arc::clone(&store))),
        statistics: Arc::new(StatisticsService::new(Arc::clone(&store))),
        countries: Arc::new(CountryService::new(store)),
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid JSON body: {err}")).into()
}

/// Register every endpoint on an Actix service config.
///
/// JSON extraction failures are mapped onto the shared error envelope here
/// so every endpoint answers malformed bodies the same way.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(users::login)
        .service(users::logout)
        .service(users::get_user)
        .service(users::patch_user)
        .service(sales::list_sales)
        .service(sales::create_sale)
        .service(sales::get_sale)
        .service(sales::replace_sale)
        .service(sales::patch_sale)
        .service(sales::delete_sale)
        .service(countries::list_countries)
        .service(statistics::sale_statistics);
}
