//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on the
//! driving port, so they can be exercised without a store.

use std::sync::Arc;

use crate::domain::ports::UserDirectory;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User CRUD use-cases.
    pub users: Arc<dyn UserDirectory>,
}

impl HttpState {
    /// Construct state from the user directory port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use user_directory::domain::{DEFAULT_STORE_DEADLINE, UserDirectoryService};
    /// use user_directory::inbound::http::state::HttpState;
    /// use user_directory::outbound::persistence::InMemoryUserRepository;
    ///
    /// let service = UserDirectoryService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     DEFAULT_STORE_DEADLINE,
    /// );
    /// let _state = HttpState::new(Arc::new(service));
    /// ```
    #[must_use]
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }
}
