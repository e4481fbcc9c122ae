//! Country and city reference data.
//!
//! Read-only from the API surface; populated by the seeding utility.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable country identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct CountryId(i64);

impl CountryId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the underlying integer.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

/// Stable city identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct CityId(i64);

impl CityId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the underlying integer.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

/// City belonging to exactly one country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct City {
    /// Stable identifier.
    pub id: CityId,
    /// Display name.
    pub name: String,
}

/// Country with its nested cities, as served by the countries listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Country {
    /// Stable identifier.
    pub id: CountryId,
    /// Display name.
    pub name: String,
    /// Cities belonging to this country.
    pub cities: Vec<City>,
}
