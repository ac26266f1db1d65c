//! Twirp-style RPC façade.
//!
//! Methods are exposed as `POST /twirp/<Service>/<Method>` routes speaking
//! Twirp's JSON encoding; failures use the Twirp error envelope. The
//! handlers translate wire requests into port calls and marshal results
//! back, and no business logic lives here.

use std::sync::Arc;

use actix_web::{get, web, HttpResponse, Scope};

use crate::domain::ports::{BannerRepository, WordService};

pub mod banners;
pub mod error;
pub mod hello;

pub use error::{TwirpError, TwirpErrorCode};

/// Shared handler dependencies, injected once at startup.
pub struct RpcState {
    /// Active banner storage backend.
    pub banners: Arc<dyn BannerRepository>,
    /// Word manipulation service.
    pub words: Arc<dyn WordService>,
}

/// Build the `/twirp` scope with every RPC method mounted and malformed
/// request bodies answered in the Twirp error shape.
pub fn twirp_scope() -> Scope {
    web::scope("/twirp")
        .app_data(
            web::JsonConfig::default()
                .error_handler(|err, _req| TwirpError::malformed(err.to_string()).into()),
        )
        .service(banners::add_banner)
        .service(banners::delete_banner)
        .service(banners::update_banner)
        .service(banners::get_banner)
        .service(banners::list_banners)
        .service(hello::hello_name)
        .service(hello::reverse_name)
}

/// Plain-text liveness check used by load balancers and the RPC test CLI.
#[get("/_ping")]
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}
