//! Domain entities, errors, and ports.
//!
//! Types here are transport agnostic. Inbound adapters map them to HTTP
//! responses or RPC envelopes; outbound adapters persist them. Nothing in
//! this module depends on a concrete storage backend or web framework.

pub mod banner;
pub mod error;
pub mod ports;
pub mod word;

pub use self::banner::{Banner, BannerPatch, BannerType, UnknownBannerType};
pub use self::error::{Error, ErrorCode};
pub use self::word::Word;

/// Convenient result alias for façade handlers.
pub type ApiResult<T> = Result<T, Error>;
