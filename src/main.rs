//! Entry-point: wires the store, services, demo seeding, and the HTTP server.

use std::env;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use salestrack::example_data::{import_city_list, import_sales_csv, seed_demo_accounts};
use salestrack::outbound::persistence::InMemoryStore;
use salestrack::server;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let store = Arc::new(InMemoryStore::new());
    let users = seed_demo_accounts(&store).map_err(std::io::Error::other)?;
    let owners: Vec<_> = users.iter().map(|user| user.id).collect();

    if let Ok(path) = env::var("SALES_CSV") {
        let content = std::fs::read_to_string(&path)?;
        let count = import_sales_csv(&store, &content, &owners)
            .await
            .map_err(std::io::Error::other)?;
        info!(path = %path, count, "sales import complete");
    }

    if let Ok(path) = env::var("CITIES_CSV") {
        let content = std::fs::read_to_string(&path)?;
        let count = import_city_list(&store, &content)
            .await
            .map_err(std::io::Error::other)?;
        info!(path = %path, count, "city import complete");
    }

    let state = server::build_state(store);
    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());
    info!(addr = %bind_addr, "starting server");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(server::routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}
