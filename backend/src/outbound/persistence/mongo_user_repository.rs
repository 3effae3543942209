//! MongoDB-backed `UserRepository` adapter.
//!
//! Each port method issues exactly one driver call against the user
//! collection. Driver failures are classified by kind: unreachable servers
//! become connection errors, undecodable documents become decode errors, and
//! everything else is a query error.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Document, doc};
use mongodb::error::{Error as DriverError, ErrorKind};
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, UserProfile};

use super::models::UserDocument;
use super::store::UserStore;

/// User repository over a MongoDB collection.
#[derive(Clone, Debug)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
}

impl MongoUserRepository {
    /// Build a repository over the store's configured collection.
    #[must_use]
    pub fn new(store: &UserStore) -> Self {
        Self {
            collection: store.users(),
        }
    }
}

fn by_id(id: &UserId) -> Document {
    doc! { "_id": *id.as_object_id() }
}

fn map_driver_error(error: DriverError) -> UserPersistenceError {
    let message = error.to_string();
    match error.kind.as_ref() {
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
            UserPersistenceError::connection(message)
        }
        ErrorKind::BsonDeserialization(_) => UserPersistenceError::decode(message),
        _ => UserPersistenceError::query(message),
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let documents: Vec<UserDocument> = self
            .collection
            .find(doc! {})
            .await
            .map_err(map_driver_error)?
            .try_collect()
            .await
            .map_err(map_driver_error)?;
        debug!(count = documents.len(), "fetched user documents");
        documents
            .into_iter()
            .map(UserDocument::into_domain)
            .collect()
    }

    async fn insert(&self, profile: &UserProfile) -> Result<UserId, UserPersistenceError> {
        let id = UserId::generate();
        let document = UserDocument::from_profile(&id, profile);
        self.collection
            .insert_one(&document)
            .await
            .map_err(map_driver_error)?;
        Ok(id)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.collection
            .find_one(by_id(id))
            .await
            .map_err(map_driver_error)?
            .map(UserDocument::into_domain)
            .transpose()
    }

    async fn update(
        &self,
        id: &UserId,
        profile: &UserProfile,
    ) -> Result<u64, UserPersistenceError> {
        let changes = doc! {
            "$set": {
                "name": profile.name(),
                "location": profile.location(),
                "title": profile.title(),
            }
        };
        let outcome = self
            .collection
            .update_one(by_id(id), changes)
            .await
            .map_err(map_driver_error)?;
        Ok(outcome.matched_count)
    }

    async fn delete(&self, id: &UserId) -> Result<u64, UserPersistenceError> {
        let outcome = self
            .collection
            .delete_one(by_id(id))
            .await
            .map_err(map_driver_error)?;
        Ok(outcome.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn filter_targets_the_object_id() {
        let id = UserId::parse("507f1f77bcf86cd799439011").expect("valid id");
        let filter = by_id(&id);

        assert_eq!(
            filter.get_object_id("_id").expect("_id present"),
            *id.as_object_id()
        );
        assert_eq!(filter.len(), 1);
    }

    #[rstest]
    fn io_failures_map_to_connection_errors() {
        let driver = DriverError::from(ErrorKind::Io(Arc::new(io::Error::new(
            io::ErrorKind::ConnectionRefused,
            "refused",
        ))));

        let mapped = map_driver_error(driver);
        assert!(matches!(mapped, UserPersistenceError::Connection { .. }));
        assert!(mapped.to_string().contains("refused"));
    }

    #[rstest]
    fn other_failures_map_to_query_errors() {
        let driver = DriverError::custom(String::from("bad filter"));

        let mapped = map_driver_error(driver);
        assert!(matches!(mapped, UserPersistenceError::Query { .. }));
        assert!(mapped.to_string().contains("bad filter"));
    }
}
