//! Banner sample service library modules.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod transitions;

pub use doc::ApiDoc;
pub use middleware::{Recovery, RequestTrace};
