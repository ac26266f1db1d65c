//! Internal Diesel row structs for the banners table.
//!
//! Implementation details of the Diesel backend; never exposed to the
//! domain. Conversions into domain types live here so the repository stays
//! a thin translation layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::ports::BannerRepositoryError;
use crate::domain::{Banner, BannerPatch, BannerType};

use super::schema::banners;

/// Row struct for reading from the banners table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = banners)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BannerRow {
    pub id: i64,
    pub banner_type: i16,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub repository_id: i64,
    pub creator_id: i64,
    pub message: String,
}

impl BannerRow {
    /// Convert the row into a domain banner.
    ///
    /// A stored type value outside the known set surfaces as a query error
    /// rather than a panic; it means the table was written by something
    /// newer or broken.
    pub(crate) fn into_domain(self) -> Result<Banner, BannerRepositoryError> {
        let banner_type = BannerType::try_from(self.banner_type)
            .map_err(|err| BannerRepositoryError::query(err.to_string()))?;

        Ok(Banner {
            id: self.id,
            banner_type,
            expires_at: self.expires_at,
            created_at: self.created_at,
            repository_id: self.repository_id,
            creator_id: self.creator_id,
            message: self.message,
        })
    }
}

/// Insertable struct for creating new banner records. The id is assigned by
/// the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = banners)]
pub(crate) struct NewBannerRow<'a> {
    pub banner_type: i16,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub repository_id: i64,
    pub creator_id: i64,
    pub message: &'a str,
}

/// Changeset applying only the fields the caller populated.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = banners)]
pub(crate) struct BannerChangeset<'a> {
    pub expires_at: Option<DateTime<Utc>>,
    pub message: Option<&'a str>,
}

impl<'a> From<&'a BannerPatch> for BannerChangeset<'a> {
    fn from(patch: &'a BannerPatch) -> Self {
        Self {
            expires_at: patch.expires_at,
            message: patch.message.as_deref(),
        }
    }
}
