//! SeaORM entity for the banners table.
//!
//! Internal to the ORM-mapped backend; the repository converts between this
//! model and the domain banner.

use sea_orm::entity::prelude::*;

/// Banner row as SeaORM sees it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "banners")]
pub struct Model {
    /// Primary key, assigned by the database on insert.
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display category, stored as 0/1/2 (Error/Info/Warning).
    #[sea_orm(column_name = "type")]
    pub banner_type: i16,
    /// Optional expiry; null means the banner never expires.
    pub expires_at: Option<DateTimeUtc>,
    /// Creation timestamp, written once on insert.
    pub created_at: Option<DateTimeUtc>,
    /// Foreign key placeholder; unused in logic.
    pub repository_id: i64,
    /// Foreign key placeholder; unused in logic.
    pub creator_id: i64,
    /// Banner message shown in the UI.
    pub message: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
