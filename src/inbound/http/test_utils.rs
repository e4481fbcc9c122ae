//! Shared helpers for handler tests.

use std::sync::Arc;

use actix_web::http::header;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use crate::domain::hash_password;
use crate::domain::user::User;
use crate::outbound::persistence::InMemoryStore;
use crate::server;

/// Fixture credentials mirrored by [`seeded_store`].
pub const USER1: (&str, &str) = ("user1@gmail.com", "user1_pass");
/// Second fixture account.
pub const USER2: (&str, &str) = ("user2@gmail.com", "user2_pass");

/// Store preloaded with the two fixture accounts.
pub fn seeded_store() -> (Arc<InMemoryStore>, User, User) {
    let store = Arc::new(InMemoryStore::new());
    let first = store
        .add_account(
            USER1.0,
            USER1.0,
            hash_password(USER1.1).expect("hashing succeeds"),
        )
        .expect("seed user");
    let second = store
        .add_account(
            USER2.0,
            USER2.0,
            hash_password(USER2.1).expect("hashing succeeds"),
        )
        .expect("seed user");
    (store, first, second)
}

/// The full application wired over the given store.
pub fn test_app(
    store: Arc<InMemoryStore>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(server::build_state(store)))
        .configure(server::routes)
}

/// Log in through the HTTP surface and return the issued token key.
pub async fn login_token(
    app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    email: &str,
    password: &str,
) -> String {
    let request = actix_test::TestRequest::post()
        .uri("/login/")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "fixture login succeeds");
    let body: Value = actix_test::read_body_json(response).await;
    body.get("token")
        .and_then(Value::as_str)
        .expect("token present")
        .to_owned()
}

/// Authorization header pair for a token key.
pub fn auth_header(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Token {token}"))
}
