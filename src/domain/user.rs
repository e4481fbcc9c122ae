//! User data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::location::{CityId, CountryId};

/// Stable user identifier.
///
/// The wire format exposes sequential integer ids, so the newtype wraps an
/// `i64` rather than a UUID.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the underlying integer.
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Application user profile as exposed over the API.
///
/// `country` and `city` are reference-data ids and are omitted from the
/// serialized form when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Login handle; mirrors `email` for imported accounts.
    pub username: String,
    /// Given name, possibly empty.
    #[serde(default)]
    pub first_name: String,
    /// Family name, possibly empty.
    #[serde(default)]
    pub last_name: String,
    /// Contact address and login identifier.
    pub email: String,
    /// Optional free-text demographic attribute.
    #[serde(default)]
    pub gender: Option<String>,
    /// Optional age in years.
    #[serde(default)]
    pub age: Option<i32>,
    /// Optional home country reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<CountryId>,
    /// Optional home city reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<CityId>,
}

impl User {
    /// Minimal profile with identity fields only; demographics unset.
    pub fn with_identity(id: UserId, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: email.into(),
            gender: None,
            age: None,
            country: None,
            city: None,
        }
    }
}

/// Stored account: the public profile plus the password hash.
///
/// The hash never crosses the API boundary; only the identity store and the
/// authentication service see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    /// Public profile served to the owner.
    pub profile: User,
    /// Argon2 PHC-format password hash.
    pub password_hash: String,
}

/// Partial profile update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct ProfileUpdate {
    /// Replacement login handle.
    #[serde(default)]
    pub username: Option<String>,
    /// Replacement given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Replacement family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Replacement contact address.
    #[serde(default)]
    pub email: Option<String>,
    /// Replacement demographic attribute.
    #[serde(default)]
    pub gender: Option<String>,
    /// Replacement age.
    #[serde(default)]
    pub age: Option<i32>,
    /// Replacement country reference.
    #[serde(default)]
    pub country: Option<CountryId>,
    /// Replacement city reference.
    #[serde(default)]
    pub city: Option<CityId>,
}

impl ProfileUpdate {
    /// Apply the supplied fields onto an existing profile.
    pub fn apply_to(&self, profile: &mut User) {
        if let Some(username) = &self.username {
            profile.username = username.clone();
        }
        if let Some(first_name) = &self.first_name {
            profile.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            profile.last_name = last_name.clone();
        }
        if let Some(email) = &self.email {
            profile.email = email.clone();
        }
        if let Some(gender) = &self.gender {
            profile.gender = Some(gender.clone());
        }
        if let Some(age) = self.age {
            profile.age = Some(age);
        }
        if let Some(country) = self.country {
            profile.country = Some(country);
        }
        if let Some(city) = self.city {
            profile.city = Some(city);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn fixture_user() -> User {
        User::with_identity(UserId::new(1), "user1@gmail.com", "user1@gmail.com")
    }

    #[rstest]
    fn serialized_profile_omits_absent_location() {
        let value = serde_json::to_value(fixture_user()).expect("user serializes");
        assert_eq!(
            value,
            json!({
                "id": 1,
                "username": "user1@gmail.com",
                "first_name": "",
                "last_name": "",
                "email": "user1@gmail.com",
                "gender": null,
                "age": null,
            })
        );
    }

    #[rstest]
    fn serialized_profile_includes_location_when_set() {
        let mut user = fixture_user();
        user.country = Some(CountryId::new(3));
        user.city = Some(CityId::new(7));
        let value = serde_json::to_value(user).expect("user serializes");
        assert_eq!(value.get("country"), Some(&json!(3)));
        assert_eq!(value.get("city"), Some(&json!(7)));
    }

    #[rstest]
    fn partial_update_touches_only_supplied_fields() {
        let mut user = fixture_user();
        user.age = Some(30);
        let update = ProfileUpdate {
            last_name: Some("Test".into()),
            ..ProfileUpdate::default()
        };

        update.apply_to(&mut user);

        assert_eq!(user.last_name, "Test");
        assert_eq!(user.age, Some(30));
        assert_eq!(user.username, "user1@gmail.com");
    }

    #[rstest]
    fn update_deserializes_from_sparse_json() {
        let update: ProfileUpdate =
            serde_json::from_value(json!({ "age": 41 })).expect("sparse patch parses");
        assert_eq!(update.age, Some(41));
        assert_eq!(update.username, None);
    }
}
