//! SQL persistence adapters for the banner repository port.
//!
//! Three interchangeable variants satisfy the same contract and differ only
//! in how they talk to PostgreSQL:
//!
//! - [`SqlxBannerRepository`]: hand-written parameterized SQL, rows
//!   scanned column by column.
//! - [`DieselBannerRepository`]: statements assembled through Diesel's
//!   typed query builder, pooled via `bb8`/`diesel-async`.
//! - [`SeaOrmBannerRepository`]: entity/active-model mapping with explicit
//!   transactions around mutations.
//!
//! All variants are thin translation layers: no business logic lives here,
//! database errors are mapped to the port's error type, and the positional
//! list contract is restored after `IN`-style fetches via [`align_by_id`].

mod banner_entity;
mod diesel_banner_repository;
mod models;
mod pool;
mod schema;
mod sea_orm_banner_repository;
mod sqlx_banner_repository;

pub use diesel_banner_repository::DieselBannerRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
pub use sea_orm_banner_repository::SeaOrmBannerRepository;
pub use sqlx_banner_repository::SqlxBannerRepository;

use std::collections::HashMap;

use crate::domain::Banner;

/// Re-align fetched banners with the caller's id sequence.
///
/// The result has exactly one entry per input id: the fetched banner when
/// present, `None` otherwise. A single `IN` query returns rows in physical
/// order, so this restores the positional contract the repository port
/// promises.
pub(crate) fn align_by_id(ids: &[i64], banners: Vec<Banner>) -> Vec<Option<Banner>> {
    let by_id: HashMap<i64, Banner> = banners
        .into_iter()
        .map(|banner| (banner.id, banner))
        .collect();

    ids.iter().map(|id| by_id.get(id).cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BannerType;
    use rstest::rstest;

    fn banner(id: i64) -> Banner {
        Banner {
            id,
            banner_type: BannerType::Info,
            expires_at: None,
            created_at: None,
            repository_id: 0,
            creator_id: 0,
            message: format!("banner {id}"),
        }
    }

    #[rstest]
    fn alignment_preserves_input_order_and_length() {
        let aligned = align_by_id(&[3, 1, 2], vec![banner(1), banner(2), banner(3)]);

        let ids: Vec<Option<i64>> = aligned
            .iter()
            .map(|entry| entry.as_ref().map(|banner| banner.id))
            .collect();
        assert_eq!(ids, vec![Some(3), Some(1), Some(2)]);
    }

    #[rstest]
    fn missing_ids_become_none_entries() {
        let aligned = align_by_id(&[5, 404, 6], vec![banner(5), banner(6)]);

        assert_eq!(aligned.len(), 3);
        assert!(aligned[1].is_none());
        assert_eq!(aligned[2].as_ref().map(|banner| banner.id), Some(6));
    }

    #[rstest]
    fn repeated_ids_each_receive_the_record() {
        let aligned = align_by_id(&[7, 7], vec![banner(7)]);

        assert_eq!(aligned.len(), 2);
        assert!(aligned.iter().all(Option::is_some));
    }
}
