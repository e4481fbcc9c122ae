//! Self-scoped profile read and update.
//!
//! A user may view and change only their own profile; mismatches are
//! `Forbidden`, not `NotFound`, so object existence is disclosed by design.

use std::sync::Arc;

use async_trait::async_trait;

use super::error::Error;
use super::ports::{ProfileAccess, UserRepository, map_store_error};
use super::user::{ProfileUpdate, User, UserId};

/// Profile service over the user repository.
#[derive(Clone)]
pub struct ProfileService<U> {
    users: Arc<U>,
}

impl<U> ProfileService<U> {
    /// Create a new service with the given repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U> ProfileService<U>
where
    U: UserRepository,
{
    fn authorize_self(caller: UserId, target: UserId) -> Result<(), Error> {
        if caller == target {
            Ok(())
        } else {
            Err(Error::forbidden("profile belongs to another user"))
        }
    }

    async fn load(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("no user with id {id}")))
    }
}

#[async_trait]
impl<U> ProfileAccess for ProfileService<U>
where
    U: UserRepository,
{
    async fn profile(&self, caller: UserId, target: UserId) -> Result<User, Error> {
        Self::authorize_self(caller, target)?;
        self.load(target).await
    }

    async fn update_profile(
        &self,
        caller: UserId,
        target: UserId,
        update: ProfileUpdate,
    ) -> Result<User, Error> {
        Self::authorize_self(caller, target)?;
        let mut profile = self.load(target).await?;
        update.apply_to(&mut profile);

        let stored = self
            .users
            .update_profile(&profile)
            .await
            .map_err(map_store_error)?;
        if !stored {
            return Err(Error::not_found(format!("no user with id {target}")));
        }
        Ok(profile)
    }
}
