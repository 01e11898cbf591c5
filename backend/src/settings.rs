//! Adapter configuration loaded via OrthoConfig.
//!
//! Values layer command-line flags over `PROFILES_*` environment variables
//! over configuration files. Only adapters read these settings; the domain
//! receives what it needs through constructors.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::ErrorExposure;
use crate::outbound::persistence::PoolConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("database_url is not configured (set PROFILES_DATABASE_URL)")]
    MissingDatabaseUrl,
}

/// Connection pool and error exposure settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PROFILES")]
pub struct PersistenceSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Idle connections kept open.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    #[ortho_config(default = 30)]
    pub connection_timeout_secs: u64,
    /// Return internal error messages and details to HTTP clients. Unset
    /// means redacted.
    pub expose_error_details: Option<bool>,
}

impl PersistenceSettings {
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    pub fn to_pool_config(&self) -> Result<PoolConfig, SettingsError> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.pool_max_size)
            .with_min_idle(self.pool_min_idle)
            .with_connection_timeout(Duration::from_secs(self.connection_timeout_secs)))
    }

    pub fn error_exposure(&self) -> ErrorExposure {
        if self.expose_error_details.unwrap_or(false) {
            ErrorExposure::Debug
        } else {
            ErrorExposure::Redacted
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for persistence settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> PersistenceSettings {
        PersistenceSettings::load_from_iter([OsString::from("profiles")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("PROFILES_DATABASE_URL", None::<String>),
            ("PROFILES_POOL_MAX_SIZE", None::<String>),
            ("PROFILES_POOL_MIN_IDLE", None::<String>),
            ("PROFILES_CONNECTION_TIMEOUT_SECS", None::<String>),
            ("PROFILES_EXPOSE_ERROR_DETAILS", None::<String>),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(settings.pool_max_size, 10);
        assert_eq!(settings.connection_timeout_secs, 30);
        assert_eq!(settings.error_exposure(), ErrorExposure::Redacted);
        assert_eq!(
            settings.to_pool_config().map(|_| ()),
            Err(SettingsError::MissingDatabaseUrl)
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "PROFILES_DATABASE_URL",
                Some("postgres://localhost/profiles".to_owned()),
            ),
            ("PROFILES_POOL_MAX_SIZE", Some("4".to_owned())),
            ("PROFILES_POOL_MIN_IDLE", Some("1".to_owned())),
            ("PROFILES_CONNECTION_TIMEOUT_SECS", Some("5".to_owned())),
            ("PROFILES_EXPOSE_ERROR_DETAILS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        let pool = settings.to_pool_config().expect("database url is set");

        assert_eq!(pool.database_url(), "postgres://localhost/profiles");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(pool.min_idle(), Some(1));
        assert_eq!(pool.connection_timeout(), Duration::from_secs(5));
        assert_eq!(settings.error_exposure(), ErrorExposure::Debug);
    }

    #[rstest]
    #[case("true", ErrorExposure::Debug)]
    #[case("false", ErrorExposure::Redacted)]
    fn error_exposure_follows_the_environment(
        #[case] raw: &str,
        #[case] expected: ErrorExposure,
    ) {
        let _guard = lock_env([
            ("PROFILES_DATABASE_URL", None::<String>),
            ("PROFILES_EXPOSE_ERROR_DETAILS", Some(raw.to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(settings.expose_error_details, Some(raw == "true"));
        assert_eq!(settings.error_exposure(), expected);
    }
}
