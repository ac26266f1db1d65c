//! Service entry point: config, storage backend selection, HTTP server.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::config::{AppConfig, StorageBackendKind};
use backend::domain::ports::{BannerRepository, WordService};
use backend::inbound::rest::HealthState;
use backend::outbound::persistence::{
    DbPool, DieselBannerRepository, PoolConfig, SeaOrmBannerRepository, SqlxBannerRepository,
};
use backend::outbound::{MemoryBannerRepository, ReverseWordService};

use server::ServerConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("loading configuration: {err}")))?;

    info!(
        service = config.service_name(),
        environment = config.environment(),
        "initializing service"
    );

    let banners = build_banner_repository(&config).await?;
    let words: Arc<dyn WordService> = Arc::new(ReverseWordService);

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(
        health_state,
        ServerConfig::new(config.bind_addr(), banners, words),
    )?;

    info!(addr = %config.bind_addr(), "service initialized");
    server.await
}

/// Select and construct the banner storage backend.
///
/// The choice is explicit configuration; each SQL variant opens its pool
/// exactly once here and hands the core a ready store handle.
async fn build_banner_repository(
    config: &AppConfig,
) -> std::io::Result<Arc<dyn BannerRepository>> {
    let kind = config
        .storage_backend()
        .map_err(|err| std::io::Error::other(err.to_string()))?;

    let repository: Arc<dyn BannerRepository> = match kind {
        StorageBackendKind::Memory => {
            info!(backend = "memory", "using in-memory banner store");
            Arc::new(MemoryBannerRepository::new())
        }
        StorageBackendKind::Sqlx => {
            info!(backend = "sqlx", "connecting banner store");
            Arc::new(
                SqlxBannerRepository::connect(require_database_url(config)?)
                    .await
                    .map_err(|err| std::io::Error::other(err.to_string()))?,
            )
        }
        StorageBackendKind::Diesel => {
            info!(backend = "diesel", "connecting banner store");
            let pool = DbPool::new(PoolConfig::new(require_database_url(config)?))
                .await
                .map_err(|err| std::io::Error::other(err.to_string()))?;
            Arc::new(DieselBannerRepository::new(pool))
        }
        StorageBackendKind::SeaOrm => {
            info!(backend = "sea-orm", "connecting banner store");
            Arc::new(
                SeaOrmBannerRepository::connect(require_database_url(config)?)
                    .await
                    .map_err(|err| std::io::Error::other(err.to_string()))?,
            )
        }
    };

    Ok(repository)
}

fn require_database_url(config: &AppConfig) -> std::io::Result<&str> {
    config
        .database_url
        .as_deref()
        .ok_or_else(|| std::io::Error::other("BANNER_DATABASE_URL must be set for SQL backends"))
}
