//! REST façade: demo endpoints, health probes, and the HTTP error mapping.

pub mod demo;
mod error;
pub mod health;

pub use health::{live, ready, HealthState};
