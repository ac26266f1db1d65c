//! Port abstraction for banner persistence backends and their errors.
//!
//! Every backend (the in-memory map and the three SQL variants) must
//! satisfy this contract identically in observable behaviour. The façades
//! depend only on this trait; the concrete backend is chosen once at
//! process startup.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Banner, BannerPatch, BannerType};

/// Persistence errors raised by banner repository backends.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BannerRepositoryError {
    /// No banner exists at the requested id.
    #[error("no banner found with id {id}")]
    NotFound { id: i64 },
    /// The backing store could not be reached or a transaction failed.
    #[error("banner store connection failed: {message}")]
    Connection { message: String },
    /// A statement failed during execution.
    #[error("banner store query failed: {message}")]
    Query { message: String },
}

impl BannerRepositoryError {
    /// Create a not-found error for the given id.
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Operations to interact with stored banners.
///
/// ## Contract
///
/// - `add` allocates a fresh id, stamps the creation time, and returns the
///   full stored record.
/// - `delete`, `update`, and `get` fail with [`BannerRepositoryError::NotFound`]
///   when no record exists at the id; `update` never creates a record.
/// - `update` applies only the fields present in the patch and returns the
///   resulting record.
/// - `list(None)` returns every stored banner, order unspecified.
///   `list(Some(ids))` returns exactly `ids.len()` entries where entry `i`
///   corresponds to `ids[i]`; unknown ids yield `None` at their position
///   rather than shortening the sequence.
///
/// Backends must tolerate concurrent calls: racing readers observe either
/// the pre- or post-mutation record, never a partially written one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BannerRepository: Send + Sync {
    /// Persist a new banner and return the stored record.
    async fn add(
        &self,
        banner_type: BannerType,
        expires_at: Option<DateTime<Utc>>,
        message: &str,
    ) -> Result<Banner, BannerRepositoryError>;

    /// Delete the banner with the given id.
    async fn delete(&self, id: i64) -> Result<(), BannerRepositoryError>;

    /// Apply the patch to the banner at `id` and return the updated record.
    async fn update(&self, id: i64, patch: BannerPatch) -> Result<Banner, BannerRepositoryError>;

    /// Retrieve the banner with the given id.
    async fn get(&self, id: i64) -> Result<Banner, BannerRepositoryError>;

    /// Retrieve banners by id, positionally aligned with the input, or every
    /// banner when `ids` is `None`.
    async fn list(
        &self,
        ids: Option<Vec<i64>>,
    ) -> Result<Vec<Option<Banner>>, BannerRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn error_constructors_accept_str_for_string_fields() {
        let err = BannerRepositoryError::connection("connection refused");
        assert_eq!(
            err.to_string(),
            "banner store connection failed: connection refused"
        );
    }

    #[rstest]
    fn not_found_names_the_id() {
        assert_eq!(
            BannerRepositoryError::not_found(42).to_string(),
            "no banner found with id 42"
        );
    }
}
