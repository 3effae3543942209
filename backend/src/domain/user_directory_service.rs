//! User directory service implementing the driving port.
//!
//! Every use-case runs its store calls under a single deadline. Store failures
//! and deadline expiry both surface as internal errors carrying the raw
//! failure text; a missing record surfaces as not-found.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::domain::ports::{UserDirectory, UserPersistenceError, UserRepository};
use crate::domain::{DomainError, User, UserId, UserProfile};

/// Message returned whenever an identifier matches no record.
pub const USER_NOT_FOUND: &str = "User with specified ID not found!";

/// Default per-operation store deadline.
pub const DEFAULT_STORE_DEADLINE: Duration = Duration::from_secs(15);

/// Directory service over a [`UserRepository`].
pub struct UserDirectoryService<R: ?Sized> {
    repository: Arc<R>,
    deadline: Duration,
}

impl<R: ?Sized> Clone for UserDirectoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            deadline: self.deadline,
        }
    }
}

impl<R: ?Sized> UserDirectoryService<R> {
    /// Create a service whose operations are abandoned after `deadline`.
    #[must_use]
    pub const fn new(repository: Arc<R>, deadline: Duration) -> Self {
        Self {
            repository,
            deadline,
        }
    }

    /// Per-operation store deadline.
    #[must_use]
    pub const fn deadline(&self) -> Duration {
        self.deadline
    }
}

impl<R> UserDirectoryService<R>
where
    R: UserRepository + ?Sized,
{
    async fn within_deadline<T, Fut>(&self, operation: &'static str, fut: Fut) -> Result<T, DomainError>
    where
        Fut: Future<Output = Result<T, DomainError>>,
    {
        match timeout(self.deadline, fut).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(
                    operation,
                    deadline_ms = u64::try_from(self.deadline.as_millis()).unwrap_or(u64::MAX),
                    "user store operation timed out"
                );
                Err(DomainError::internal(format!(
                    "{operation} did not complete within {:?}",
                    self.deadline
                )))
            }
        }
    }

    fn map_persistence_error(operation: &'static str, error: UserPersistenceError) -> DomainError {
        warn!(operation, error = %error, "user store call failed");
        DomainError::internal(error.to_string())
    }

    fn not_found(id: &UserId) -> DomainError {
        DomainError::not_found(USER_NOT_FOUND).with_details(json!({ "userId": id.to_string() }))
    }

    async fn reread(&self, operation: &'static str, id: &UserId) -> Result<User, DomainError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|err| Self::map_persistence_error(operation, err))?
            .ok_or_else(|| DomainError::internal(format!("user {id} vanished after {operation}")))
    }
}

#[async_trait]
impl<R> UserDirectory for UserDirectoryService<R>
where
    R: UserRepository + ?Sized + 'static,
{
    async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.within_deadline("list users", async {
            let users = self
                .repository
                .list()
                .await
                .map_err(|err| Self::map_persistence_error("list users", err))?;
            debug!(count = users.len(), "listed users");
            Ok(users)
        })
        .await
    }

    async fn create_user(&self, profile: UserProfile) -> Result<User, DomainError> {
        self.within_deadline("create user", async {
            let id = self
                .repository
                .insert(&profile)
                .await
                .map_err(|err| Self::map_persistence_error("create user", err))?;
            let stored = self.reread("create user", &id).await?;
            info!(user_id = %id, "user created");
            Ok(stored)
        })
        .await
    }

    async fn fetch_user(&self, id: &UserId) -> Result<User, DomainError> {
        self.within_deadline("fetch user", async {
            self.repository
                .find_by_id(id)
                .await
                .map_err(|err| Self::map_persistence_error("fetch user", err))?
                .ok_or_else(|| Self::not_found(id))
        })
        .await
    }

    async fn update_user(&self, id: &UserId, profile: UserProfile) -> Result<User, DomainError> {
        self.within_deadline("update user", async {
            let matched = self
                .repository
                .update(id, &profile)
                .await
                .map_err(|err| Self::map_persistence_error("update user", err))?;
            if matched == 0 {
                debug!(user_id = %id, "update matched no user");
                return Err(Self::not_found(id));
            }
            let stored = self.reread("update user", id).await?;
            info!(user_id = %id, "user updated");
            Ok(stored)
        })
        .await
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), DomainError> {
        self.within_deadline("delete user", async {
            let deleted = self
                .repository
                .delete(id)
                .await
                .map_err(|err| Self::map_persistence_error("delete user", err))?;
            if deleted == 0 {
                return Err(Self::not_found(id));
            }
            info!(user_id = %id, "user deleted");
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
#[path = "user_directory_service_tests.rs"]
mod tests;
