//! Bearer-token extraction for protected endpoints.
//!
//! Both `Authorization: Token <key>` and `Authorization: Bearer <key>` are
//! accepted. Extraction itself never fails; handlers call
//! [`TokenCredential::require`] so the missing-credential response carries
//! the shared error envelope.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::header::{self, HeaderValue};
use actix_web::{FromRequest, HttpRequest};

use crate::domain::{Error, TokenKey};

const MISSING_CREDENTIALS: &str = "authentication credentials were not provided";

/// Token key presented on the request, if any.
#[derive(Debug, Clone)]
pub struct TokenCredential(Option<TokenKey>);

impl TokenCredential {
    fn from_header(value: Option<&HeaderValue>) -> Self {
        let Some(raw) = value.and_then(|header| header.to_str().ok()) else {
            return Self(None);
        };
        let Some((scheme, key)) = raw.split_once(' ') else {
            return Self(None);
        };
        let scheme_ok =
            scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer");
        let key = key.trim();
        if !scheme_ok || key.is_empty() {
            return Self(None);
        }
        Self(Some(TokenKey::from_presented(key)))
    }

    /// The presented key, or an unauthorized error when absent.
    pub fn require(&self) -> Result<&TokenKey, Error> {
        self.0
            .as_ref()
            .ok_or_else(|| Error::unauthorized(MISSING_CREDENTIALS))
    }
}

impl FromRequest for TokenCredential {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_header(
            req.headers().get(header::AUTHORIZATION),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn header(raw: &str) -> HeaderValue {
        HeaderValue::from_str(raw).expect("valid header value")
    }

    #[rstest]
    #[case("Token abc123")]
    #[case("token abc123")]
    #[case("Bearer abc123")]
    #[case("BEARER abc123")]
    fn accepted_schemes_yield_the_key(#[case] raw: &str) {
        let value = header(raw);
        let credential = TokenCredential::from_header(Some(&value));
        let key = credential.require().expect("key present");
        assert_eq!(key.as_str(), "abc123");
    }

    #[rstest]
    #[case::no_header(None)]
    #[case::no_scheme(Some("abc123"))]
    #[case::wrong_scheme(Some("Basic abc123"))]
    #[case::empty_key(Some("Token  "))]
    fn missing_or_malformed_headers_require_auth(#[case] raw: Option<&str>) {
        let value = raw.map(header);
        let credential = TokenCredential::from_header(value.as_ref());
        let err = credential.require().expect_err("credential absent");
        assert_eq!(err.message(), MISSING_CREDENTIALS);
    }
}
