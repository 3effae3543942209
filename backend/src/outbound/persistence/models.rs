//! Internal document shapes for the user collection.
//!
//! These types never leave the persistence layer; the repository converts
//! them to domain values and reports invariant violations as decode errors.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::ports::UserPersistenceError;
use crate::domain::{User, UserId, UserProfile};

/// Stored form of a user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub location: String,
    pub title: String,
}

impl UserDocument {
    pub fn from_profile(id: &UserId, profile: &UserProfile) -> Self {
        Self {
            id: *id.as_object_id(),
            name: profile.name().to_owned(),
            location: profile.location().to_owned(),
            title: profile.title().to_owned(),
        }
    }

    pub fn into_domain(self) -> Result<User, UserPersistenceError> {
        let Self {
            id,
            name,
            location,
            title,
        } = self;
        let profile = UserProfile::new(name, location, title).map_err(|err| {
            UserPersistenceError::decode(format!("document {}: {err}", id.to_hex()))
        })?;
        Ok(User::new(UserId::from_object_id(id), profile))
    }
}
