//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};

use backend::inbound::rest::demo::{base, echo, hello, long_op, panic_endpoint};
use backend::inbound::rest::{live, ready, HealthState};
use backend::inbound::rpc::{ping, twirp_scope, RpcState};
use backend::{Recovery, RequestTrace};

#[cfg(debug_assertions)]
use backend::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    rpc_state: web::Data<RpcState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    // Middleware runs in reverse registration order: RequestTrace is the
    // outermost layer so even panicking requests get a log line and id.
    let app = App::new()
        .app_data(health_state)
        .app_data(rpc_state)
        .wrap(Recovery)
        .wrap(RequestTrace)
        .service(twirp_scope())
        .service(ping)
        .service(base)
        .service(hello)
        .service(echo)
        .service(long_op)
        .service(panic_endpoint)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the HTTP server serving both façades on one port.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        banners,
        words,
    } = config;

    let rpc_state = web::Data::new(RpcState { banners, words });
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), rpc_state.clone())
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
