//! Reference-data handlers.
//!
//! ```text
//! GET /countries/
//! ```

use actix_web::{get, web};

use crate::domain::{Country, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::token::TokenCredential;

/// All countries with their nested cities.
#[utoipa::path(
    get,
    path = "/countries/",
    responses(
        (status = 200, description = "Countries", body = [Country]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["countries"],
    operation_id = "listCountries"
)]
#[get("/countries/")]
pub async fn list_countries(
    state: web::Data<HttpState>,
    credential: TokenCredential,
) -> ApiResult<web::Json<Vec<Country>>> {
    state.auth.resolve(credential.require()?).await?;
    let countries = state.countries.countries().await?;
    Ok(web::Json(countries))
}

#[cfg(test)]
mod tests {
    use crate::inbound::http::test_utils::{USER1, auth_header, login_token, seeded_store, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn countries_require_credentials() {
        let (store, _, _) = seeded_store();
        let app = actix_test::init_service(test_app(store)).await;

        let request = actix_test::TestRequest::get().uri("/countries/").to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn countries_nest_their_cities() {
        let (store, _, _) = seeded_store();
        let austria = store.ensure_country("Austria").expect("seed country");
        store.add_city(austria, "Vienna").expect("seed city");
        store.add_city(austria, "Salzburg").expect("seed city");

        let app = actix_test::init_service(test_app(store)).await;
        let token = login_token(&app, USER1.0, USER1.1).await;

        let request = actix_test::TestRequest::get()
            .uri("/countries/")
            .insert_header(auth_header(&token))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body,
            json!([{
                "id": 1,
                "name": "Austria",
                "cities": [
                    { "id": 1, "name": "Vienna" },
                    { "id": 2, "name": "Salzburg" },
                ],
            }])
        );
    }
}
