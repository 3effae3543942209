//! Driven port for user record persistence.
//!
//! Each method maps onto exactly one atomic store call; composing calls
//! (insert then re-read, update then re-read) is the domain service's job.

use async_trait::async_trait;

use crate::domain::{User, UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserPersistenceError {
        /// The store could not be reached.
        Connection { message: String } => "user store connection failed: {message}",
        /// A query or mutation was rejected or failed mid-flight.
        Query { message: String } => "user store query failed: {message}",
        /// A stored document does not satisfy the user invariants.
        Decode { message: String } => "user document could not be decoded: {message}",
    }
}

/// Persistence for user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every user, in store-native order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Persist a new record under a freshly assigned identifier.
    async fn insert(&self, profile: &UserProfile) -> Result<UserId, UserPersistenceError>;

    /// The record with `id`, if one exists.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Overwrite the mutable fields of the matching record, returning the
    /// number of matched records (0 or 1).
    async fn update(
        &self,
        id: &UserId,
        profile: &UserProfile,
    ) -> Result<u64, UserPersistenceError>;

    /// Remove at most one record, returning the number deleted.
    async fn delete(&self, id: &UserId) -> Result<u64, UserPersistenceError>;
}
