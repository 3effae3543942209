//! MongoDB connection bootstrap.
//!
//! Startup parses the URI, applies the connect deadline to both connection
//! establishment and server selection, then pings the target database. Any
//! failure is returned to the caller, which treats it as fatal.

use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use tracing::info;

use super::models::UserDocument;

/// Default collection holding user documents.
pub const DEFAULT_COLLECTION: &str = "users";

/// Default deadline for reaching the store at startup.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

const APP_NAME: &str = "user-directory";

/// Errors raised while establishing the store connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The connection string could not be parsed.
    #[error("invalid MongoDB connection string: {message}")]
    InvalidUri {
        /// Driver parse failure.
        message: String,
    },

    /// The driver rejected the client options.
    #[error("failed to build MongoDB client: {message}")]
    Client {
        /// Driver failure.
        message: String,
    },

    /// The database did not answer the startup ping.
    #[error("MongoDB database {database} is unreachable: {message}")]
    Unreachable {
        /// Database that was pinged.
        database: String,
        /// Driver failure.
        message: String,
    },
}

/// Connection settings for the user store.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use user_directory::outbound::persistence::StoreConfig;
///
/// let config = StoreConfig::new("mongodb://localhost:27017", "directory")
///     .with_collection("people")
///     .with_connect_timeout(Duration::from_secs(5));
/// assert_eq!(config.collection(), "people");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    uri: String,
    database: String,
    collection: String,
    connect_timeout: Duration,
}

impl StoreConfig {
    /// Create a configuration with the default collection and deadline.
    #[must_use]
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
            collection: DEFAULT_COLLECTION.to_owned(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Use `collection` instead of `users`.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Override the startup connection deadline.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// MongoDB connection string.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Target database name.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Collection holding user documents.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Startup connection deadline.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

/// Live handle on the user store.
///
/// Cloning is cheap; the driver pools connections internally.
#[derive(Clone, Debug)]
pub struct UserStore {
    database: Database,
    collection: String,
}

impl UserStore {
    pub(crate) fn users(&self) -> Collection<UserDocument> {
        self.database.collection(&self.collection)
    }

    /// Name of the connected database.
    #[must_use]
    pub fn database_name(&self) -> &str {
        self.database.name()
    }
}

/// Connect to the store described by `config` and verify it answers.
///
/// # Errors
///
/// Returns [`StoreError`] when the URI is malformed, the client cannot be
/// built, or the ping does not succeed within the connect deadline.
pub async fn connect(config: &StoreConfig) -> Result<UserStore, StoreError> {
    let mut options = ClientOptions::parse(config.uri())
        .await
        .map_err(|err| StoreError::InvalidUri {
            message: err.to_string(),
        })?;
    options.connect_timeout = Some(config.connect_timeout());
    options.server_selection_timeout = Some(config.connect_timeout());
    options.app_name = Some(APP_NAME.to_owned());

    let client = Client::with_options(options).map_err(|err| StoreError::Client {
        message: err.to_string(),
    })?;
    let database = client.database(config.database());
    database
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|err| StoreError::Unreachable {
            database: config.database().to_owned(),
            message: err.to_string(),
        })?;

    info!(
        database = config.database(),
        collection = config.collection(),
        "connected to user store"
    );
    Ok(UserStore {
        database,
        collection: config.collection().to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn store_config_defaults() {
        let config = StoreConfig::new("mongodb://localhost:27017", "directory");

        assert_eq!(config.uri(), "mongodb://localhost:27017");
        assert_eq!(config.database(), "directory");
        assert_eq!(config.collection(), DEFAULT_COLLECTION);
        assert_eq!(config.connect_timeout(), Duration::from_secs(15));
    }

    #[rstest]
    fn store_config_builder_overrides() {
        let config = StoreConfig::new("mongodb://db", "directory")
            .with_collection("staff")
            .with_connect_timeout(Duration::from_secs(2));

        assert_eq!(config.collection(), "staff");
        assert_eq!(config.connect_timeout(), Duration::from_secs(2));
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_uri_is_rejected_before_dialling() {
        let config = StoreConfig::new("postgres://not-mongo", "directory");

        let err = connect(&config).await.expect_err("scheme is not mongodb");
        assert!(matches!(err, StoreError::InvalidUri { .. }));
        assert!(err.to_string().starts_with("invalid MongoDB connection string"));
    }

    #[rstest]
    fn unreachable_error_names_the_database() {
        let err = StoreError::Unreachable {
            database: "directory".to_owned(),
            message: "server selection timeout".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "MongoDB database directory is unreachable: server selection timeout"
        );
    }
}
