//! Application configuration loaded via OrthoConfig.
//!
//! Settings come from CLI flags, `BANNER_*` environment variables, or a config
//! file, merged by `ortho_config`. Loaded once at startup; everything else
//! receives values (or ready store handles) from the bootstrap.

use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HTTP_PORT: u16 = 8080;
const DEFAULT_SERVICE_NAME: &str = "banner-service";
const DEFAULT_ENVIRONMENT: &str = "development";

/// Selects the banner storage backend at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackendKind {
    /// Mutex-guarded in-memory map. No database required.
    #[default]
    Memory,
    /// Raw parameterized SQL via sqlx.
    Sqlx,
    /// Query-builder SQL via Diesel.
    Diesel,
    /// ORM-mapped SQL via SeaORM.
    SeaOrm,
}

/// Raised when the configured backend name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown storage backend {value:?}; expected memory, sqlx, diesel, or sea-orm")]
pub struct UnknownStorageBackend {
    /// The rejected configuration value.
    pub value: String,
}

impl FromStr for StorageBackendKind {
    type Err = UnknownStorageBackend;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "memory" => Ok(Self::Memory),
            "sqlx" => Ok(Self::Sqlx),
            "diesel" => Ok(Self::Diesel),
            "sea-orm" => Ok(Self::SeaOrm),
            other => Err(UnknownStorageBackend {
                value: other.to_owned(),
            }),
        }
    }
}

/// Process-wide configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BANNER")]
pub struct AppConfig {
    /// Port the HTTP server listens on.
    pub http_port: Option<u16>,
    /// PostgreSQL connection URL. Required for the SQL backends.
    pub database_url: Option<String>,
    /// Storage backend selector: memory, sqlx, diesel, or sea-orm.
    pub storage_backend: Option<String>,
    /// Service name tag attached to log context.
    pub service_name: Option<String>,
    /// Deployment environment tag attached to log context.
    pub environment: Option<String>,
}

impl AppConfig {
    /// Configured HTTP port, falling back to the default.
    pub fn http_port(&self) -> u16 {
        self.http_port.unwrap_or(DEFAULT_HTTP_PORT)
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.http_port()))
    }

    /// Selected storage backend, falling back to the in-memory store.
    pub fn storage_backend(&self) -> Result<StorageBackendKind, UnknownStorageBackend> {
        self.storage_backend
            .as_deref()
            .map_or(Ok(StorageBackendKind::default()), str::parse)
    }

    /// Configured service name, falling back to the default.
    pub fn service_name(&self) -> &str {
        self.service_name.as_deref().unwrap_or(DEFAULT_SERVICE_NAME)
    }

    /// Configured environment, falling back to the default.
    pub fn environment(&self) -> &str {
        self.environment.as_deref().unwrap_or(DEFAULT_ENVIRONMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use env_lock::lock_env;
    use rstest::rstest;
    use std::ffi::OsString;

    fn load_from_empty_args() -> AppConfig {
        AppConfig::load_from_iter([OsString::from("backend")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env([
            ("BANNER_HTTP_PORT", None::<String>),
            ("BANNER_DATABASE_URL", None::<String>),
            ("BANNER_STORAGE_BACKEND", None::<String>),
            ("BANNER_SERVICE_NAME", None::<String>),
            ("BANNER_ENVIRONMENT", None::<String>),
        ]);

        let config = load_from_empty_args();
        assert_eq!(config.http_port(), 8080);
        assert_eq!(config.bind_addr().port(), 8080);
        assert_eq!(
            config.storage_backend().expect("valid backend"),
            StorageBackendKind::Memory
        );
        assert_eq!(config.service_name(), "banner-service");
        assert_eq!(config.environment(), "development");
        assert!(config.database_url.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("BANNER_HTTP_PORT", Some("9000".to_owned())),
            (
                "BANNER_DATABASE_URL",
                Some("postgres://localhost/banners".to_owned()),
            ),
            ("BANNER_STORAGE_BACKEND", Some("diesel".to_owned())),
            ("BANNER_SERVICE_NAME", Some("banner-svc".to_owned())),
            ("BANNER_ENVIRONMENT", Some("production".to_owned())),
        ]);

        let config = load_from_empty_args();
        assert_eq!(config.http_port(), 9000);
        assert_eq!(
            config.storage_backend().expect("valid backend"),
            StorageBackendKind::Diesel
        );
        assert_eq!(config.service_name(), "banner-svc");
        assert_eq!(config.environment(), "production");
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/banners")
        );
    }

    #[rstest]
    #[case("memory", StorageBackendKind::Memory)]
    #[case("sqlx", StorageBackendKind::Sqlx)]
    #[case("diesel", StorageBackendKind::Diesel)]
    #[case("sea-orm", StorageBackendKind::SeaOrm)]
    fn backend_names_parse(#[case] name: &str, #[case] expected: StorageBackendKind) {
        assert_eq!(name.parse::<StorageBackendKind>(), Ok(expected));
    }

    #[rstest]
    fn unknown_backend_names_are_rejected() {
        let err = "mongodb"
            .parse::<StorageBackendKind>()
            .expect_err("unknown backend");
        assert_eq!(err.value, "mongodb");
    }
}
