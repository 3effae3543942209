//! Driving port for the user CRUD use-cases.
//!
//! HTTP handlers depend on this trait only, so they can be exercised against
//! any implementation without touching a store.

use async_trait::async_trait;

use crate::domain::{DomainError, User, UserId, UserProfile};

/// The five CRUD use-cases over user records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Every user, in store order.
    async fn list_users(&self) -> Result<Vec<User>, DomainError>;

    /// Persist a new user and return it as stored.
    async fn create_user(&self, profile: UserProfile) -> Result<User, DomainError>;

    /// The user with `id`, or not-found.
    async fn fetch_user(&self, id: &UserId) -> Result<User, DomainError>;

    /// Replace the mutable fields and return the stored result.
    async fn update_user(&self, id: &UserId, profile: UserProfile) -> Result<User, DomainError>;

    /// Remove the user with `id`, or report not-found.
    async fn delete_user(&self, id: &UserId) -> Result<(), DomainError>;
}
