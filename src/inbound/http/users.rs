//! Authentication and profile handlers.
//!
//! ```text
//! POST /login/ {"email":"user1@gmail.com","password":"user1_pass"}
//! POST /logout/
//! GET /user/{id}/
//! PATCH /user/{id}/
//! ```

use actix_web::{get, patch, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Error, LoginCredentials, ProfileUpdate, TokenKey, User, UserId, WRONG_CREDENTIALS,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::token::TokenCredential;

/// Login request body for `POST /login/`.
///
/// Both fields are optional at the deserialization layer: an absent field
/// is a credential failure like any other, answered 401, never a 400.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Successful login body: the token to present and the account it names.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: UserId,
}

/// Logout acknowledgement body.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LogoutResponse {
    pub message: String,
    pub success: bool,
}

async fn authenticated(state: &HttpState, credential: &TokenCredential) -> Result<User, Error> {
    let key: &TokenKey = credential.require()?;
    state.auth.resolve(key).await
}

/// Exchange credentials for the account's token.
///
/// Every failure mode answers with the same generic message so callers
/// cannot probe which emails exist.
#[utoipa::path(
    post,
    path = "/login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login/")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let payload = payload.into_inner();
    let email = payload.email.as_deref().unwrap_or_default();
    let password = payload.password.as_deref().unwrap_or_default();
    let credentials = LoginCredentials::try_from_parts(email, password)
        .map_err(|_| Error::unauthorized(WRONG_CREDENTIALS))?;
    let grant = state.auth.login(&credentials).await?;
    Ok(web::Json(LoginResponse {
        token: grant.token.into(),
        user_id: grant.user_id,
    }))
}

/// Revoke the caller's token.
#[utoipa::path(
    post,
    path = "/logout/",
    responses(
        (status = 200, description = "Token revoked", body = LogoutResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "logout"
)]
#[post("/logout/")]
pub async fn logout(
    state: web::Data<HttpState>,
    credential: TokenCredential,
) -> ApiResult<web::Json<LogoutResponse>> {
    let caller = authenticated(&state, &credential).await?;
    state.auth.logout(caller.id).await?;
    Ok(web::Json(LogoutResponse {
        message: "Logout successfully".to_owned(),
        success: true,
    }))
}

/// Fetch a profile; only its owner may read it.
#[utoipa::path(
    get,
    path = "/user/{id}/",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Profile", body = User),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the profile owner", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{id}/")]
pub async fn get_user(
    state: web::Data<HttpState>,
    credential: TokenCredential,
    path: web::Path<i64>,
) -> ApiResult<web::Json<User>> {
    let caller = authenticated(&state, &credential).await?;
    let target = UserId::new(path.into_inner());
    let profile = state.profiles.profile(caller.id, target).await?;
    Ok(web::Json(profile))
}

/// Patch a profile; only its owner may change it.
#[utoipa::path(
    patch,
    path = "/user/{id}/",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = ProfileUpdate,
    responses(
        (status = 200, description = "Updated profile", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the profile owner", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "patchUser"
)]
#[patch("/user/{id}/")]
pub async fn patch_user(
    state: web::Data<HttpState>,
    credential: TokenCredential,
    path: web::Path<i64>,
    payload: web::Json<ProfileUpdate>,
) -> ApiResult<web::Json<User>> {
    let caller = authenticated(&state, &credential).await?;
    let target = UserId::new(path.into_inner());
    let profile = state
        .profiles
        .update_profile(caller.id, target, payload.into_inner())
        .await?;
    Ok(web::Json(profile))
}
