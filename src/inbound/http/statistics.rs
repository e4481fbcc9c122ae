//! Comparative statistics handler.
//!
//! ```text
//! GET /sale_statistics/
//! ```

use actix_web::{get, web};

use crate::domain::{Error, SaleStatistics};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::token::TokenCredential;

/// The caller's comparative report over the whole sale table.
///
/// Always 200 for an authenticated caller; metrics that are undefined for
/// the caller's data come back as `null`.
#[utoipa::path(
    get,
    path = "/sale_statistics/",
    responses(
        (status = 200, description = "Comparative report", body = SaleStatistics),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["statistics"],
    operation_id = "saleStatistics"
)]
#[get("/sale_statistics/")]
pub async fn sale_statistics(
    state: web::Data<HttpState>,
    credential: TokenCredential,
) -> ApiResult<web::Json<SaleStatistics>> {
    let caller = state.auth.resolve(credential.require()?).await?;
    let report = state.statistics.report_for(caller.id).await?;
    Ok(web::Json(report))
}

#[cfg(test)]
mod tests {
    use crate::inbound::http::test_utils::{
        USER1, USER2, auth_header, login_token, seeded_store, test_app,
    };
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    async fn create_sale(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        token: &str,
        product: &str,
        sales_number: i64,
        revenue: f64,
    ) {
        let request = actix_test::TestRequest::post()
            .uri("/sales/")
            .insert_header(auth_header(token))
            .set_json(json!({
                "date": "2020-01-01",
                "product": product,
                "sales_number": sales_number,
                "revenue": revenue,
            }))
            .to_request();
        let response = actix_test::call_service(app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    async fn fetch_report(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        token: &str,
    ) -> Value {
        let request = actix_test::TestRequest::get()
            .uri("/sale_statistics/")
            .insert_header(auth_header(token))
            .to_request();
        let response = actix_test::call_service(app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        actix_test::read_body_json(response).await
    }

    #[actix_web::test]
    async fn statistics_require_credentials() {
        let (store, _, _) = seeded_store();
        let app = actix_test::init_service(test_app(store)).await;

        let request = actix_test::TestRequest::get()
            .uri("/sale_statistics/")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn report_compares_the_caller_with_the_whole_table() {
        let (store, _, _) = seeded_store();
        let app = actix_test::init_service(test_app(store)).await;
        let token1 = login_token(&app, USER1.0, USER1.1).await;
        let token2 = login_token(&app, USER2.0, USER2.1).await;

        // Caller: 2.0 revenue over 10 units. Other user: 6.0 over 30.
        create_sale(&app, &token1, "Product1", 10, 2.0).await;
        create_sale(&app, &token2, "Product2", 30, 6.0).await;

        let body = fetch_report(&app, &token1).await;
        assert_eq!(body.get("average_sales_for_current_user"), Some(&json!(0.2)));
        // Table-wide: 8.0 over 40 units, the caller's sales included.
        assert_eq!(body.get("average_sale_all_user"), Some(&json!(0.2)));
        assert_eq!(
            body.get("highest_revenue_sale_for_current_user"),
            Some(&json!({ "sale_id": 1, "revenue": 2.0 }))
        );
        assert_eq!(
            body.get("product_highest_revenue_for_current_user"),
            Some(&json!({ "product_name": "Product1" }))
        );
    }

    #[actix_web::test]
    async fn caller_without_sales_still_gets_a_report() {
        let (store, _, _) = seeded_store();
        let app = actix_test::init_service(test_app(store)).await;
        let token1 = login_token(&app, USER1.0, USER1.1).await;
        let token2 = login_token(&app, USER2.0, USER2.1).await;

        create_sale(&app, &token2, "Product2", 10, 5.0).await;

        let body = fetch_report(&app, &token1).await;
        assert_eq!(body.get("average_sales_for_current_user"), Some(&json!(null)));
        assert_eq!(body.get("average_sale_all_user"), Some(&json!(0.5)));
        assert_eq!(
            body.get("highest_revenue_sale_for_current_user"),
            Some(&json!(null))
        );
        assert_eq!(
            body.get("product_highest_sales_number_for_current_user"),
            Some(&json!(null))
        );
    }
}
