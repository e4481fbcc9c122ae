//! Sale CRUD handlers.
//!
//! ```text
//! GET /sales/            every sale, regardless of owner
//! POST /sales/           create, owner forced to the caller
//! GET /sales/{id}/       readable by any authenticated user
//! PUT /sales/{id}/       full replace, owner only
//! PATCH /sales/{id}/     partial update, owner only
//! DELETE /sales/{id}/    hard delete, owner only
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{Error, Sale, SaleDate, SaleDraft, SaleId, SalePatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::token::TokenCredential;

/// Write payload shared by create, replace, and patch.
///
/// Only the date is required, and only for create/replace; the remaining
/// fields default so partial entries can be recorded. Any `user_id` in the
/// payload is ignored: ownership comes from the presented token.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct SaleWriteRequest {
    /// Calendar date, `YYYY-MM-DD`; zero padding optional.
    #[serde(default)]
    pub date: Option<String>,
    /// Product label.
    #[serde(default)]
    pub product: Option<String>,
    /// Units sold; must be non-negative.
    #[serde(default)]
    pub sales_number: Option<i64>,
    /// Revenue amount.
    #[serde(default)]
    pub revenue: Option<f64>,
}

fn field_error(message: &str, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

fn parse_date(raw: &str) -> Result<SaleDate, Error> {
    SaleDate::parse(raw).map_err(|_| {
        field_error(
            "date must be a calendar date in YYYY-MM-DD form",
            "date",
            "invalid_date",
        )
    })
}

fn parse_units(raw: i64) -> Result<u32, Error> {
    u32::try_from(raw).map_err(|_| {
        field_error(
            "sales_number must be a non-negative integer",
            "sales_number",
            "out_of_range",
        )
    })
}

impl SaleWriteRequest {
    fn into_draft(self) -> Result<SaleDraft, Error> {
        let Some(date) = self.date else {
            return Err(field_error("date is required", "date", "required"));
        };
        Ok(SaleDraft {
            date: parse_date(&date)?,
            product: self.product.unwrap_or_default(),
            sales_number: self.sales_number.map(parse_units).transpose()?.unwrap_or(0),
            revenue: self.revenue.unwrap_or_default(),
        })
    }

    fn into_patch(self) -> Result<SalePatch, Error> {
        Ok(SalePatch {
            date: self.date.as_deref().map(parse_date).transpose()?,
            product: self.product,
            sales_number: self.sales_number.map(parse_units).transpose()?,
            revenue: self.revenue,
        })
    }
}

/// Every sale in the table, in insertion order.
#[utoipa::path(
    get,
    path = "/sales/",
    responses(
        (status = 200, description = "All sales", body = [Sale]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["sales"],
    operation_id = "listSales"
)]
#[get("/sales/")]
pub async fn list_sales(
    state: web::Data<HttpState>,
    credential: TokenCredential,
) -> ApiResult<web::Json<Vec<Sale>>> {
    state.auth.resolve(credential.require()?).await?;
    let sales = state.sales.list().await?;
    Ok(web::Json(sales))
}

/// Record a sale owned by the caller.
#[utoipa::path(
    post,
    path = "/sales/",
    request_body = SaleWriteRequest,
    responses(
        (status = 201, description = "Created sale", body = Sale),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["sales"],
    operation_id = "createSale"
)]
#[post("/sales/")]
pub async fn create_sale(
    state: web::Data<HttpState>,
    credential: TokenCredential,
    payload: web::Json<SaleWriteRequest>,
) -> ApiResult<HttpResponse> {
    let caller = state.auth.resolve(credential.require()?).await?;
    let draft = payload.into_inner().into_draft()?;
    let sale = state.sales.create(caller.id, draft).await?;
    Ok(HttpResponse::Created().json(sale))
}

/// Fetch one sale; readable by any authenticated user.
#[utoipa::path(
    get,
    path = "/sales/{id}/",
    params(("id" = i64, Path, description = "Sale identifier")),
    responses(
        (status = 200, description = "Sale", body = Sale),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["sales"],
    operation_id = "getSale"
)]
#[get("/sales/{id}/")]
pub async fn get_sale(
    state: web::Data<HttpState>,
    credential: TokenCredential,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Sale>> {
    state.auth.resolve(credential.require()?).await?;
    let sale = state.sales.fetch(SaleId::new(path.into_inner())).await?;
    Ok(web::Json(sale))
}

/// Fully replace a sale; owner only.
#[utoipa::path(
    put,
    path = "/sales/{id}/",
    params(("id" = i64, Path, description = "Sale identifier")),
    request_body = SaleWriteRequest,
    responses(
        (status = 200, description = "Replaced sale", body = Sale),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["sales"],
    operation_id = "replaceSale"
)]
#[put("/sales/{id}/")]
pub async fn replace_sale(
    state: web::Data<HttpState>,
    credential: TokenCredential,
    path: web::Path<i64>,
    payload: web::Json<SaleWriteRequest>,
) -> ApiResult<web::Json<Sale>> {
    let caller = state.auth.resolve(credential.require()?).await?;
    let draft = payload.into_inner().into_draft()?;
    let sale = state
        .sales
        .replace(caller.id, SaleId::new(path.into_inner()), draft)
        .await?;
    Ok(web::Json(sale))
}

/// Partially update a sale; owner only.
#[utoipa::path(
    patch,
    path = "/sales/{id}/",
    params(("id" = i64, Path, description = "Sale identifier")),
    request_body = SaleWriteRequest,
    responses(
        (status = 200, description = "Updated sale", body = Sale),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["sales"],
    operation_id = "patchSale"
)]
#[patch("/sales/{id}/")]
pub async fn patch_sale(
    state: web::Data<HttpState>,
    credential: TokenCredential,
    path: web::Path<i64>,
    payload: web::Json<SaleWriteRequest>,
) -> ApiResult<web::Json<Sale>> {
    let caller = state.auth.resolve(credential.require()?).await?;
    let patch = payload.into_inner().into_patch()?;
    let sale = state
        .sales
        .amend(caller.id, SaleId::new(path.into_inner()), patch)
        .await?;
    Ok(web::Json(sale))
}

/// Hard-delete a sale; owner only.
#[utoipa::path(
    delete,
    path = "/sales/{id}/",
    params(("id" = i64, Path, description = "Sale identifier")),
    responses(
        (status = 204, description = "Sale deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["sales"],
    operation_id = "deleteSale"
)]
#[delete("/sales/{id}/")]
pub async fn delete_sale(
    state: web::Data<HttpState>,
    credential: TokenCredential,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let caller = state.auth.resolve(credential.require()?).await?;
    state
        .sales
        .remove(caller.id, SaleId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
