//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] aggregate that generates the OpenAPI specification
//! for the REST API: every endpoint path, the shared schemas, and the
//! token security scheme.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    City, Country, Error, ErrorCode, ProductWinner, ProfileUpdate, Sale, SaleStatistics,
    TopRevenueSale, User,
};
use crate::inbound::http::sales::SaleWriteRequest;
use crate::inbound::http::users::{LoginRequest, LoginResponse, LogoutResponse};

/// Enrich the generated document with the token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "TokenAuth",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "Authorization",
                "`Token <key>` issued by POST /login/; `Bearer <key>` also accepted.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Salestrack API",
        description = "HTTP interface for token-authenticated sale tracking and statistics."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("TokenAuth" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::patch_user,
        crate::inbound::http::sales::list_sales,
        crate::inbound::http::sales::create_sale,
        crate::inbound::http::sales::get_sale,
        crate::inbound::http::sales::replace_sale,
        crate::inbound::http::sales::patch_sale,
        crate::inbound::http::sales::delete_sale,
        crate::inbound::http::countries::list_countries,
        crate::inbound::http::statistics::sale_statistics,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        ProfileUpdate,
        Sale,
        SaleWriteRequest,
        Country,
        City,
        SaleStatistics,
        TopRevenueSale,
        ProductWinner,
        LoginRequest,
        LoginResponse,
        LogoutResponse,
    )),
    tags(
        (name = "users", description = "Authentication and profiles"),
        (name = "sales", description = "Sale records"),
        (name = "countries", description = "Reference data"),
        (name = "statistics", description = "Comparative reports")
    )
)]
pub struct ApiDoc;
