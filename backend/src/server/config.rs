//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use backend::domain::ports::{BannerRepository, WordService};

/// Everything `create_server` needs: the bind address and the service
/// dependencies the bootstrap selected.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) banners: Arc<dyn BannerRepository>,
    pub(crate) words: Arc<dyn WordService>,
}

impl ServerConfig {
    /// Bundle the bind address with the selected service implementations.
    #[must_use]
    pub fn new(
        bind_addr: SocketAddr,
        banners: Arc<dyn BannerRepository>,
        words: Arc<dyn WordService>,
    ) -> Self {
        Self {
            bind_addr,
            banners,
            words,
        }
    }
}
