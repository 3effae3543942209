//! In-process `UserRepository` used by tests and local runs without a store.
//!
//! Records are kept in insertion order behind a Tokio `RwLock`, so every port
//! call is atomic with respect to the others.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, UserProfile};

/// Volatile user repository.
#[derive(Clone, Debug, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    /// An empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with existing records, keeping their order.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users.into_iter().collect())),
        }
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether no records are held.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.users.read().await.clone())
    }

    async fn insert(&self, profile: &UserProfile) -> Result<UserId, UserPersistenceError> {
        let id = UserId::generate();
        self.users
            .write()
            .await
            .push(User::new(id, profile.clone()));
        Ok(id)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.id() == id)
            .cloned())
    }

    async fn update(
        &self,
        id: &UserId,
        profile: &UserProfile,
    ) -> Result<u64, UserPersistenceError> {
        let mut users = self.users.write().await;
        let matched = users.iter_mut().find(|user| user.id() == id).map_or(0, |slot| {
            *slot = slot.clone().with_profile(profile.clone());
            1
        });
        Ok(matched)
    }

    async fn delete(&self, id: &UserId) -> Result<u64, UserPersistenceError> {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|user| user.id() != id);
        let removed = before.saturating_sub(users.len());
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }
}
