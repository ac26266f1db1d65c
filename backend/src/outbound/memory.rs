//! In-memory banner backend.
//!
//! A single id-to-banner map guarded by one mutex held for the duration of
//! each operation, with ids drawn from a monotonically increasing counter
//! starting at 1. Deleted ids are never reused. Suitable for demos and
//! tests, not a caching layer.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{BannerRepository, BannerRepositoryError};
use crate::domain::{Banner, BannerPatch, BannerType};

/// Map-backed implementation of the [`BannerRepository`] port.
pub struct MemoryBannerRepository {
    next_id: AtomicI64,
    banners: Mutex<HashMap<i64, Banner>>,
}

impl MemoryBannerRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            banners: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<i64, Banner>> {
        // A poisoned lock only means another operation panicked mid-write;
        // the map itself is still a consistent snapshot of whole records.
        self.banners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for MemoryBannerRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BannerRepository for MemoryBannerRepository {
    async fn add(
        &self,
        banner_type: BannerType,
        expires_at: Option<DateTime<Utc>>,
        message: &str,
    ) -> Result<Banner, BannerRepositoryError> {
        let banner = Banner {
            id: self.next_id(),
            banner_type,
            expires_at,
            created_at: Some(Utc::now()),
            repository_id: 0,
            creator_id: 0,
            message: message.to_owned(),
        };

        self.lock().insert(banner.id, banner.clone());
        Ok(banner)
    }

    async fn delete(&self, id: i64) -> Result<(), BannerRepositoryError> {
        match self.lock().remove(&id) {
            Some(_) => Ok(()),
            None => Err(BannerRepositoryError::not_found(id)),
        }
    }

    async fn update(&self, id: i64, patch: BannerPatch) -> Result<Banner, BannerRepositoryError> {
        let mut banners = self.lock();
        let banner = banners
            .get_mut(&id)
            .ok_or_else(|| BannerRepositoryError::not_found(id))?;

        if let Some(expires_at) = patch.expires_at {
            banner.expires_at = Some(expires_at);
        }
        if let Some(message) = patch.message {
            banner.message = message;
        }

        Ok(banner.clone())
    }

    async fn get(&self, id: i64) -> Result<Banner, BannerRepositoryError> {
        self.lock()
            .get(&id)
            .cloned()
            .ok_or_else(|| BannerRepositoryError::not_found(id))
    }

    async fn list(
        &self,
        ids: Option<Vec<i64>>,
    ) -> Result<Vec<Option<Banner>>, BannerRepositoryError> {
        let banners = self.lock();

        let result = match ids {
            None => banners.values().cloned().map(Some).collect(),
            Some(ids) => ids.iter().map(|id| banners.get(id).cloned()).collect(),
        };

        Ok(result)
    }
}
