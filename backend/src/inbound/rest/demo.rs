//! Example REST handlers.
//!
//! ```text
//! GET  /         fixed example body
//! GET  /hello    canned greeting
//! POST /echo     echoes the JSON request body
//! GET  /long-op  spawns a worker and reports its run time
//! GET  /panic    panics; the recovery boundary answers with a 500
//! ```
//!
//! Pure glue over the web framework; none of these touch storage.

use std::time::{Duration, Instant};

use actix_web::{get, post, web, HttpResponse};
use rand::Rng;
use tracing::debug;

use crate::domain::{ApiResult, Error};

/// Root example endpoint.
#[utoipa::path(
    get,
    path = "/",
    tags = ["demo"],
    responses((status = 200, description = "Example body"))
)]
#[get("/")]
pub async fn base() -> HttpResponse {
    HttpResponse::Ok().body("Example response.")
}

/// Canned greeting.
#[utoipa::path(
    get,
    path = "/hello",
    tags = ["demo"],
    responses((status = 200, description = "Greeting"))
)]
#[get("/hello")]
pub async fn hello() -> HttpResponse {
    HttpResponse::Ok().body("Hello world!")
}

/// Echo the JSON request body back to the caller.
#[utoipa::path(
    post,
    path = "/echo",
    tags = ["demo"],
    responses(
        (status = 200, description = "The request body, echoed"),
        (status = 400, description = "Body is not valid JSON")
    )
)]
#[post("/echo")]
pub async fn echo(payload: web::Json<serde_json::Value>) -> web::Json<serde_json::Value> {
    payload
}

/// Simulate a long-running operation on a worker task and report how long
/// it took. Mostly useful for watching request-time variation in logs.
#[utoipa::path(
    get,
    path = "/long-op",
    tags = ["demo"],
    responses(
        (status = 200, description = "Elapsed time report"),
        (status = 500, description = "Worker failed", body = Error)
    )
)]
#[get("/long-op")]
pub async fn long_op() -> ApiResult<HttpResponse> {
    let start = Instant::now();

    let millis = rand::thread_rng().gen_range(0..100_u64);
    debug!(millis, "spawning long-op worker");

    let worker = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    });

    worker
        .await
        .map_err(|err| Error::internal(format!("long-op worker failed: {err}")))?;

    Ok(HttpResponse::Ok().body(format!(
        "Long operation executed in {:?}",
        start.elapsed()
    )))
}

/// Panic on purpose to demonstrate the recovery boundary.
#[utoipa::path(
    get,
    path = "/panic",
    tags = ["demo"],
    responses((status = 500, description = "Always panics", body = Error))
)]
#[get("/panic")]
pub async fn panic_endpoint() -> HttpResponse {
    panic!("/panic endpoint called")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test as actix_test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn base_and_hello_return_fixed_bodies() {
        let app = actix_test::init_service(App::new().service(base).service(hello)).await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;
        assert_eq!(&actix_test::read_body(res).await[..], b"Example response.");

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/hello").to_request(),
        )
        .await;
        assert_eq!(&actix_test::read_body(res).await[..], b"Hello world!");
    }

    #[actix_web::test]
    async fn echo_round_trips_json() {
        let app = actix_test::init_service(App::new().service(echo)).await;
        let payload = json!({ "nested": { "value": [1, 2, 3] }, "ok": true });

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/echo")
                .set_json(&payload)
                .to_request(),
        )
        .await;

        assert!(res.status().is_success());
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body, payload);
    }

    #[actix_web::test]
    async fn echo_rejects_non_json_bodies() {
        let app = actix_test::init_service(App::new().service(echo)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/echo")
                .insert_header(("content-type", "application/json"))
                .set_payload("definitely not json")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn long_op_reports_elapsed_time() {
        let app = actix_test::init_service(App::new().service(long_op)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/long-op").to_request(),
        )
        .await;

        assert!(res.status().is_success());
        let body = actix_test::read_body(res).await;
        let text = std::str::from_utf8(&body).expect("utf8 body");
        assert!(text.starts_with("Long operation executed in"));
    }
}
