//! OpenAPI documentation for the REST surface.
//!
//! Covers the demo endpoints and health probes. The Twirp routes follow
//! their own wire contract and are deliberately not described here.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};

/// OpenAPI document served by Swagger UI in debug builds.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Banner sample service",
        description = "Demo REST endpoints and health probes of the banner sample service."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::rest::demo::base,
        crate::inbound::rest::demo::hello,
        crate::inbound::rest::demo::echo,
        crate::inbound::rest::demo::long_op,
        crate::inbound::rest::demo::panic_endpoint,
        crate::inbound::rest::health::ready,
        crate::inbound::rest::health::live,
    ),
    components(schemas(Error, ErrorCode)),
    tags(
        (name = "demo", description = "Example endpoints"),
        (name = "health", description = "Health checks")
    )
)]
pub struct ApiDoc;
