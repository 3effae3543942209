//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `USER_DIRECTORY_*` environment variables, configuration
//! files, or CLI flags. The store URI and database name have no defaults;
//! [`AppSettings::store_config`] reports their absence.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_STORE_DEADLINE;
use crate::outbound::persistence::{DEFAULT_COLLECTION, DEFAULT_CONNECT_TIMEOUT, StoreConfig};

/// Environment variable prefix shared by every setting.
pub const ENV_PREFIX: &str = "USER_DIRECTORY_";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:6000";

/// Invalid or incomplete configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing required configuration value {key}")]
    Missing {
        /// Full environment variable name.
        key: String,
    },

    /// The bind address is not a socket address.
    #[error("invalid bind address {value:?}: {message}")]
    InvalidBindAddr {
        /// Rejected value.
        value: String,
        /// Parser failure.
        message: String,
    },

    /// A deadline was configured as zero seconds.
    #[error("{key} must be greater than zero")]
    ZeroTimeout {
        /// Full environment variable name.
        key: String,
    },
}

impl ConfigError {
    fn missing(field: &str) -> Self {
        Self::Missing {
            key: env_key(field),
        }
    }

    fn zero_timeout(field: &str) -> Self {
        Self::ZeroTimeout {
            key: env_key(field),
        }
    }
}

fn env_key(field: &str) -> String {
    format!("{ENV_PREFIX}{field}")
}

/// Settings for the user directory service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_DIRECTORY")]
pub struct AppSettings {
    /// MongoDB connection string.
    pub mongo_uri: Option<String>,
    /// Database holding the user collection.
    pub mongo_database: Option<String>,
    /// Collection holding user documents.
    pub collection: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Per-operation store deadline, in seconds.
    #[ortho_config(default = DEFAULT_STORE_DEADLINE.as_secs())]
    pub request_timeout_secs: u64,
    /// Startup connection deadline, in seconds.
    #[ortho_config(default = DEFAULT_CONNECT_TIMEOUT.as_secs())]
    pub connect_timeout_secs: u64,
}

impl AppSettings {
    /// Collection name, falling back to `users`.
    #[must_use]
    pub fn collection(&self) -> &str {
        self.collection.as_deref().unwrap_or(DEFAULT_COLLECTION)
    }

    /// Parsed bind address, falling back to `127.0.0.1:6000`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBindAddr`] if the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| {
            ConfigError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            }
        })
    }

    /// Per-operation store deadline, 15 seconds unless configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] when configured as zero.
    pub fn request_timeout(&self) -> Result<Duration, ConfigError> {
        positive_secs(self.request_timeout_secs, "REQUEST_TIMEOUT_SECS")
    }

    /// Startup connection deadline, 15 seconds unless configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] when configured as zero.
    pub fn connect_timeout(&self) -> Result<Duration, ConfigError> {
        positive_secs(self.connect_timeout_secs, "CONNECT_TIMEOUT_SECS")
    }

    /// Store connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming the first absent required
    /// variable, or a timeout error from [`Self::connect_timeout`].
    pub fn store_config(&self) -> Result<StoreConfig, ConfigError> {
        let uri = required(self.mongo_uri.as_deref(), "MONGO_URI")?;
        let database = required(self.mongo_database.as_deref(), "MONGO_DATABASE")?;
        Ok(StoreConfig::new(uri, database)
            .with_collection(self.collection())
            .with_connect_timeout(self.connect_timeout()?))
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, ConfigError> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| ConfigError::missing(field))
}

fn positive_secs(secs: u64, field: &str) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::zero_timeout(field));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    //! Environment-driven configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "USER_DIRECTORY_MONGO_URI",
        "USER_DIRECTORY_MONGO_DATABASE",
        "USER_DIRECTORY_COLLECTION",
        "USER_DIRECTORY_BIND_ADDR",
        "USER_DIRECTORY_REQUEST_TIMEOUT_SECS",
        "USER_DIRECTORY_CONNECT_TIMEOUT_SECS",
    ];

    fn load_with(overrides: &[(&str, &str)]) -> AppSettings {
        let vars = VARS.map(|name| {
            let value = overrides
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned());
            (name, value)
        });
        let _guard = lock_env(vars);
        AppSettings::load_from_iter([OsString::from("user-directory")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let settings = load_with(&[]);

        assert_eq!(settings.collection(), "users");
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "127.0.0.1:6000".parse::<SocketAddr>().expect("literal")
        );
        assert_eq!(
            settings.request_timeout().expect("default"),
            Duration::from_secs(15)
        );
        assert_eq!(
            settings.connect_timeout().expect("default"),
            Duration::from_secs(15)
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let settings = load_with(&[
            ("USER_DIRECTORY_MONGO_URI", "mongodb://db:27017"),
            ("USER_DIRECTORY_MONGO_DATABASE", "directory"),
            ("USER_DIRECTORY_COLLECTION", "staff"),
            ("USER_DIRECTORY_BIND_ADDR", "0.0.0.0:8080"),
            ("USER_DIRECTORY_REQUEST_TIMEOUT_SECS", "3"),
            ("USER_DIRECTORY_CONNECT_TIMEOUT_SECS", "7"),
        ]);

        let store = settings.store_config().expect("store settings");
        assert_eq!(store.uri(), "mongodb://db:27017");
        assert_eq!(store.database(), "directory");
        assert_eq!(store.collection(), "staff");
        assert_eq!(store.connect_timeout(), Duration::from_secs(7));
        assert_eq!(
            settings.bind_addr().expect("address").port(),
            8080
        );
        assert_eq!(
            settings.request_timeout().expect("timeout"),
            Duration::from_secs(3)
        );
    }

    #[rstest]
    #[case(&[], "USER_DIRECTORY_MONGO_URI")]
    #[case(&[("USER_DIRECTORY_MONGO_URI", "mongodb://db")], "USER_DIRECTORY_MONGO_DATABASE")]
    fn missing_required_values_are_named(
        #[case] overrides: &[(&str, &str)],
        #[case] expected_key: &str,
    ) {
        let settings = load_with(overrides);

        let err = settings.store_config().expect_err("required value absent");
        assert_eq!(
            err,
            ConfigError::Missing {
                key: expected_key.to_owned()
            }
        );
        assert!(err.to_string().contains(expected_key));
    }

    #[rstest]
    fn empty_environment_still_loads_and_names_the_uri() {
        let settings = load_with(&[]);

        assert!(settings.mongo_uri.is_none());
        assert_eq!(settings.request_timeout_secs, 15);
        assert_eq!(settings.connect_timeout_secs, 15);
        assert_eq!(
            settings
                .store_config()
                .expect_err("uri absent")
                .to_string(),
            "missing required configuration value USER_DIRECTORY_MONGO_URI"
        );
    }

    #[rstest]
    fn zero_timeouts_are_rejected() {
        let settings = load_with(&[("USER_DIRECTORY_REQUEST_TIMEOUT_SECS", "0")]);

        let err = settings.request_timeout().expect_err("zero deadline");
        assert_eq!(
            err.to_string(),
            "USER_DIRECTORY_REQUEST_TIMEOUT_SECS must be greater than zero"
        );
    }

    #[rstest]
    fn malformed_bind_address_is_rejected() {
        let settings = load_with(&[("USER_DIRECTORY_BIND_ADDR", "localhost")]);

        assert!(matches!(
            settings.bind_addr(),
            Err(ConfigError::InvalidBindAddr { .. })
        ));
    }
}
