//! Panic recovery boundary.
//!
//! Wraps each request's handling in `catch_unwind`: a panicking handler is
//! reported through the log and answered with a generic 500 instead of
//! tearing down the connection. The report itself is best-effort; nothing
//! is re-raised.

use std::panic::AssertUnwindSafe;
use std::task::{Context, Poll};

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use futures_util::FutureExt;
use tracing::error;

use crate::domain;

/// Middleware converting handler panics into generic 500 responses.
#[derive(Clone, Copy, Default)]
pub struct Recovery;

impl<S, B> Transform<S, ServiceRequest> for Recovery
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = RecoveryMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RecoveryMiddleware { service }))
    }
}

/// Service wrapper produced by [`Recovery`].
pub struct RecoveryMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RecoveryMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Keep a handle on the request so a response can still be built
        // after the downstream future has been consumed by the panic.
        let (http_req, payload) = req.into_parts();
        let downstream = ServiceRequest::from_parts(http_req.clone(), payload);

        let fut = AssertUnwindSafe(self.service.call(downstream)).catch_unwind();
        Box::pin(async move {
            match fut.await {
                Ok(Ok(res)) => Ok(res.map_into_boxed_body()),
                Ok(Err(err)) => Err(err),
                Err(panic) => {
                    error!(
                        method = %http_req.method(),
                        path = %http_req.path(),
                        panic = panic_message(panic.as_ref()),
                        "request handler panicked"
                    );

                    let response = HttpResponse::InternalServerError()
                        .json(domain::Error::internal("Internal server error"));
                    Ok(ServiceResponse::new(http_req, response))
                }
            }
        })
    }
}

/// Best-effort extraction of a panic payload's message.
fn panic_message(panic: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}
