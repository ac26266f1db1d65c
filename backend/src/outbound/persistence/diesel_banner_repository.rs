//! Query-builder banner backend using the Diesel DSL.
//!
//! Statements are assembled through Diesel's typed query builder: partial
//! updates come from an `AsChangeset` struct that skips unset fields,
//! deletes check the affected-row count, and list-by-ids issues a single
//! `IN` query whose rows are re-aligned with the caller's id order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{BannerRepository, BannerRepositoryError};
use crate::domain::{Banner, BannerPatch, BannerType};

use super::align_by_id;
use super::models::{BannerChangeset, BannerRow, NewBannerRow};
use super::pool::{DbPool, PoolError};
use super::schema::banners;

/// Diesel-backed implementation of the [`BannerRepository`] port.
#[derive(Clone)]
pub struct DieselBannerRepository {
    pool: DbPool,
}

impl DieselBannerRepository {
    /// Create a new repository on top of the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: i64) -> Result<Banner, BannerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<BannerRow> = banners::table
            .find(id)
            .select(BannerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.ok_or_else(|| BannerRepositoryError::not_found(id))?
            .into_domain()
    }
}

/// Map pool errors to repository errors.
fn map_pool_error(error: PoolError) -> BannerRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            BannerRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to repository errors.
fn map_diesel_error(error: diesel::result::Error) -> BannerRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            BannerRepositoryError::connection("database connection closed")
        }
        DieselError::DatabaseError(_, info) => BannerRepositoryError::query(info.message()),
        other => BannerRepositoryError::query(other.to_string()),
    }
}

#[async_trait]
impl BannerRepository for DieselBannerRepository {
    async fn add(
        &self,
        banner_type: BannerType,
        expires_at: Option<DateTime<Utc>>,
        message: &str,
    ) -> Result<Banner, BannerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewBannerRow {
            banner_type: banner_type.as_i16(),
            expires_at,
            created_at: Some(Utc::now()),
            repository_id: 0,
            creator_id: 0,
            message,
        };

        let row: BannerRow = diesel::insert_into(banners::table)
            .values(&new_row)
            .returning(BannerRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row.into_domain()
    }

    async fn delete(&self, id: i64) -> Result<(), BannerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(banners::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if deleted == 0 {
            return Err(BannerRepositoryError::not_found(id));
        }
        Ok(())
    }

    async fn update(&self, id: i64, patch: BannerPatch) -> Result<Banner, BannerRepositoryError> {
        // An empty patch has nothing to write; just return the stored record.
        if patch.is_empty() {
            return self.fetch(id).await;
        }

        {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let changeset = BannerChangeset::from(&patch);

            let updated = diesel::update(banners::table.find(id))
                .set(&changeset)
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;

            if updated == 0 {
                return Err(BannerRepositoryError::not_found(id));
            }
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
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        match ids {
            None => {
                let rows: Vec<BannerRow> = banners::table
                    .select(BannerRow::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;

                rows.into_iter()
                    .map(|row| row.into_domain().map(Some))
                    .collect()
            }
            Some(ids) => {
                let rows: Vec<BannerRow> = banners::table
                    .filter(banners::id.eq_any(ids.iter().copied()))
                    .select(BannerRow::as_select())
                    .load(&mut conn)
                    .await
                    .map_err(map_diesel_error)?;

                let found = rows
                    .into_iter()
                    .map(BannerRow::into_domain)
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
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(err, BannerRepositoryError::Connection { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn bare_diesel_errors_map_to_query_errors() {
        let err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(err, BannerRepositoryError::Query { .. }));
    }
}
