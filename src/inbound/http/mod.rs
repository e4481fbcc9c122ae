//! HTTP inbound adapter exposing the REST endpoints.

pub mod countries;
pub mod error;
pub mod sales;
pub mod state;
pub mod statistics;
#[cfg(test)]
pub mod test_utils;
pub mod token;
pub mod users;

pub use error::ApiResult;
