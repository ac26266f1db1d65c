//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `migrations/` exactly.
//! The `type` column is mapped to `banner_type` because `type` is a reserved
//! word in Rust.

diesel::table! {
    /// Banner records.
    banners (id) {
        /// Primary key, assigned by the database on insert.
        id -> BigInt,
        /// Display category, stored as 0/1/2 (Error/Info/Warning).
        #[sql_name = "type"]
        banner_type -> SmallInt,
        /// Optional expiry; null means the banner never expires.
        expires_at -> Nullable<Timestamptz>,
        /// Creation timestamp, written once on insert.
        created_at -> Nullable<Timestamptz>,
        /// Foreign key placeholder; unused in logic.
        repository_id -> BigInt,
        /// Foreign key placeholder; unused in logic.
        creator_id -> BigInt,
        /// Banner message shown in the UI.
        message -> Text,
    }
}
