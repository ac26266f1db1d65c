//! Raw-SQL banner backend using sqlx.
//!
//! Statements are written by hand and rows are scanned column by column.
//! The generated id is read back with `RETURNING id`; a failed read-back
//! surfaces as an error instead of producing an incomplete record. Partial
//! updates go through `COALESCE` so unset fields keep their stored value.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::ports::{BannerRepository, BannerRepositoryError};
use crate::domain::{Banner, BannerPatch, BannerType};

use super::align_by_id;

const SELECT_COLUMNS: &str =
    "SELECT id, type, expires_at, created_at, repository_id, creator_id, message FROM banners";

/// sqlx-backed implementation of the [`BannerRepository`] port.
#[derive(Clone)]
pub struct SqlxBannerRepository {
    pool: PgPool,
}

impl SqlxBannerRepository {
    /// Open a bounded connection pool and build the repository on it.
    ///
    /// Called once per process by the bootstrap. The bounds match the other
    /// SQL backends: at most 20 connections, each rotated after 5 minutes.
    ///
    /// # Errors
    ///
    /// Returns [`BannerRepositoryError::Connection`] when the pool cannot be
    /// established.
    pub async fn connect(database_url: &str) -> Result<Self, BannerRepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .max_lifetime(Duration::from_secs(300))
            .connect(database_url)
            .await
            .map_err(|err| BannerRepositoryError::connection(err.to_string()))?;

        Ok(Self { pool })
    }

    async fn fetch(&self, id: i64) -> Result<Banner, BannerRepositoryError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        match row {
            Some(row) => scan_banner(&row),
            None => Err(BannerRepositoryError::not_found(id)),
        }
    }
}

/// Map sqlx errors to repository errors.
fn map_sqlx_error(error: sqlx::Error) -> BannerRepositoryError {
    match error {
        sqlx::Error::Io(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Tls(_) => BannerRepositoryError::connection(error.to_string()),
        other => BannerRepositoryError::query(other.to_string()),
    }
}

/// Scan one result row into a domain banner, column by column.
fn scan_banner(row: &PgRow) -> Result<Banner, BannerRepositoryError> {
    let raw_type: i16 = row.try_get("type").map_err(map_sqlx_error)?;
    let banner_type = BannerType::try_from(raw_type)
        .map_err(|err| BannerRepositoryError::query(err.to_string()))?;

    Ok(Banner {
        id: row.try_get("id").map_err(map_sqlx_error)?,
        banner_type,
        expires_at: row.try_get("expires_at").map_err(map_sqlx_error)?,
        created_at: row.try_get("created_at").map_err(map_sqlx_error)?,
        repository_id: row.try_get("repository_id").map_err(map_sqlx_error)?,
        creator_id: row.try_get("creator_id").map_err(map_sqlx_error)?,
        message: row.try_get("message").map_err(map_sqlx_error)?,
    })
}

#[async_trait]
impl BannerRepository for SqlxBannerRepository {
    async fn add(
        &self,
        banner_type: BannerType,
        expires_at: Option<DateTime<Utc>>,
        message: &str,
    ) -> Result<Banner, BannerRepositoryError> {
        let created_at = Some(Utc::now());

        // Read the generated id back in the same statement; losing it would
        // leave the caller with an incomplete record.
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO banners (type, expires_at, created_at, repository_id, creator_id, message) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(banner_type.as_i16())
        .bind(expires_at)
        .bind(created_at)
        .bind(0_i64)
        .bind(0_i64)
        .bind(message)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(Banner {
            id,
            banner_type,
            expires_at,
            created_at,
            repository_id: 0,
            creator_id: 0,
            message: message.to_owned(),
        })
    }

    async fn delete(&self, id: i64) -> Result<(), BannerRepositoryError> {
        let result = sqlx::query("DELETE FROM banners WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(BannerRepositoryError::not_found(id));
        }
        Ok(())
    }

    async fn update(&self, id: i64, patch: BannerPatch) -> Result<Banner, BannerRepositoryError> {
        if patch.is_empty() {
            return self.fetch(id).await;
        }

        let result = sqlx::query(
            "UPDATE banners SET expires_at = COALESCE($1, expires_at), \
             message = COALESCE($2, message) WHERE id = $3",
        )
        .bind(patch.expires_at)
        .bind(patch.message.as_deref())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(BannerRepositoryError::not_found(id));
        }

        self.fetch(id).await
    }

    async fn get(&self, id: i64) -> Result<Banner, BannerRepositoryError> {
        self.fetch(id).await
    }

    async fn list(
        &self,
        ids: Option<Vec<i64>>,
    ) -> Result<Vec<Option<Banner>>, BannerRepositoryError> {
        match ids {
            None => {
                let rows = sqlx::query(SELECT_COLUMNS)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                rows.iter().map(|row| scan_banner(row).map(Some)).collect()
            }
            Some(ids) => {
                let rows = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = ANY($1)"))
                    .bind(ids.clone())
                    .fetch_all(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                let found = rows
                    .iter()
                    .map(scan_banner)
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(align_by_id(&ids, found))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_exhaustion_maps_to_connection_error() {
        let err = map_sqlx_error(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, BannerRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn row_level_failures_map_to_query_errors() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, BannerRepositoryError::Query { .. }));
    }
}
