//! Actix middleware: request tracing and the panic recovery boundary.

pub mod recovery;
pub mod request_trace;

pub use recovery::Recovery;
pub use request_trace::RequestTrace;
