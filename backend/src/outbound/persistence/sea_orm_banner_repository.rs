//! ORM-mapped banner backend using SeaORM.
//!
//! Mutations run inside an explicit transaction and locate the target row
//! with a preceding lookup, so a missing id fails before anything is
//! written; a transaction dropped without commit rolls back. List-by-ids
//! issues one lookup per id, which keeps the result naturally aligned with
//! the input sequence.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database, DatabaseConnection, DbErr,
    EntityTrait, ModelTrait, TransactionTrait,
};

use crate::domain::ports::{BannerRepository, BannerRepositoryError};
use crate::domain::{Banner, BannerPatch, BannerType};

use super::banner_entity::{ActiveModel, Entity as Banners, Model};

/// SeaORM-backed implementation of the [`BannerRepository`] port.
#[derive(Clone)]
pub struct SeaOrmBannerRepository {
    db: DatabaseConnection,
}

impl SeaOrmBannerRepository {
    /// Open a bounded connection pool and build the repository on it.
    ///
    /// Called once per process by the bootstrap; the bounds match the other
    /// SQL backends (20 connections, 5 minute lifetime).
    ///
    /// # Errors
    ///
    /// Returns [`BannerRepositoryError::Connection`] when the database is
    /// unreachable.
    pub async fn connect(database_url: &str) -> Result<Self, BannerRepositoryError> {
        let mut options = ConnectOptions::new(database_url.to_owned());
        options
            .max_connections(20)
            .max_lifetime(Duration::from_secs(300));

        let db = Database::connect(options).await.map_err(map_db_error)?;
        Ok(Self { db })
    }
}

/// Map SeaORM errors to repository errors.
fn map_db_error(error: DbErr) -> BannerRepositoryError {
    match error {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
            BannerRepositoryError::connection(error.to_string())
        }
        other => BannerRepositoryError::query(other.to_string()),
    }
}

/// Convert an entity model into a domain banner.
fn model_to_banner(model: Model) -> Result<Banner, BannerRepositoryError> {
    let banner_type = BannerType::try_from(model.banner_type)
        .map_err(|err| BannerRepositoryError::query(err.to_string()))?;

    Ok(Banner {
        id: model.id,
        banner_type,
        expires_at: model.expires_at,
        created_at: model.created_at,
        repository_id: model.repository_id,
        creator_id: model.creator_id,
        message: model.message,
    })
}

#[async_trait]
impl BannerRepository for SeaOrmBannerRepository {
    async fn add(
        &self,
        banner_type: BannerType,
        expires_at: Option<DateTime<Utc>>,
        message: &str,
    ) -> Result<Banner, BannerRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_error)?;

        let model = ActiveModel {
            banner_type: Set(banner_type.as_i16()),
            expires_at: Set(expires_at),
            created_at: Set(Some(Utc::now())),
            repository_id: Set(0),
            creator_id: Set(0),
            message: Set(message.to_owned()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(map_db_error)?;

        txn.commit().await.map_err(map_db_error)?;
        model_to_banner(model)
    }

    async fn delete(&self, id: i64) -> Result<(), BannerRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_error)?;

        let model = Banners::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| BannerRepositoryError::not_found(id))?;

        model.delete(&txn).await.map_err(map_db_error)?;
        txn.commit().await.map_err(map_db_error)?;
        Ok(())
    }

    async fn update(&self, id: i64, patch: BannerPatch) -> Result<Banner, BannerRepositoryError> {
        let txn = self.db.begin().await.map_err(map_db_error)?;

        let model = Banners::find_by_id(id)
            .one(&txn)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| BannerRepositoryError::not_found(id))?;

        if patch.is_empty() {
            txn.commit().await.map_err(map_db_error)?;
            return model_to_banner(model);
        }

        let mut active: ActiveModel = model.into();
        if let Some(expires_at) = patch.expires_at {
            active.expires_at = Set(Some(expires_at));
        }
        if let Some(message) = patch.message {
            active.message = Set(message);
        }

        let updated = active.update(&txn).await.map_err(map_db_error)?;
        txn.commit().await.map_err(map_db_error)?;
        model_to_banner(updated)
    }

    async fn get(&self, id: i64) -> Result<Banner, BannerRepositoryError> {
        let model = Banners::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_error)?
            .ok_or_else(|| BannerRepositoryError::not_found(id))?;

        model_to_banner(model)
    }

    async fn list(
        &self,
        ids: Option<Vec<i64>>,
    ) -> Result<Vec<Option<Banner>>, BannerRepositoryError> {
        match ids {
            None => {
                let models = Banners::find().all(&self.db).await.map_err(map_db_error)?;
                models
                    .into_iter()
                    .map(|model| model_to_banner(model).map(Some))
                    .collect()
            }
            Some(ids) => {
                let mut result = Vec::with_capacity(ids.len());
                for id in ids {
                    let model = Banners::find_by_id(id)
                        .one(&self.db)
                        .await
                        .map_err(map_db_error)?;
                    result.push(model.map(model_to_banner).transpose()?);
                }
                Ok(result)
            }
        }
    }
}
