//! Domain model for the sales tracker.
//!
//! Transport-agnostic entities, validation, services, and the ports that
//! connect them to the outside world. Inbound adapters map these types onto
//! HTTP; outbound adapters implement the driven ports.

pub mod auth;
pub mod auth_service;
pub mod country_service;
pub mod error;
pub mod location;
pub mod ports;
pub mod profile_service;
pub mod sale;
pub mod sale_service;
pub mod statistics;
pub mod statistics_service;
pub mod user;

pub use auth::{LoginCredentials, LoginGrant, LoginValidationError, TokenKey};
pub use auth_service::{AuthService, WRONG_CREDENTIALS, hash_password};
pub use country_service::CountryService;
pub use error::{Error, ErrorCode};
pub use location::{City, CityId, Country, CountryId};
pub use profile_service::ProfileService;
pub use sale::{Sale, SaleDate, SaleDateParseError, SaleDraft, SaleId, SalePatch};
pub use sale_service::SaleService;
pub use statistics::{ProductWinner, SaleStatistics, TopRevenueSale, compile_statistics};
pub use statistics_service::StatisticsService;
pub use user::{ProfileUpdate, User, UserAccount, UserId};
