//! Banner entity and its type enumeration.
//!
//! A banner is a timed UI notification: a message, a display type hint, and
//! an optional expiry. Identifiers are assigned by the active storage
//! backend on creation and never change afterwards.

use chrono::{DateTime, Utc};

/// Display category of a banner. Influences how a UI presents the banner,
/// nothing else.
///
/// Stored as a `SMALLINT` (0 = Error, 1 = Info, 2 = Warning) by the SQL
/// backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BannerType {
    /// Something is broken.
    #[default]
    Error,
    /// Neutral announcement.
    Info,
    /// Something needs attention soon.
    Warning,
}

/// Raised when a stored banner type value does not map onto [`BannerType`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown banner type value {value}")]
pub struct UnknownBannerType {
    /// The raw stored value.
    pub value: i16,
}

impl BannerType {
    /// Storage representation of the type.
    pub fn as_i16(self) -> i16 {
        match self {
            Self::Error => 0,
            Self::Info => 1,
            Self::Warning => 2,
        }
    }
}

impl TryFrom<i16> for BannerType {
    type Error = UnknownBannerType;

    fn try_from(value: i16) -> Result<Self, UnknownBannerType> {
        match value {
            0 => Ok(Self::Error),
            1 => Ok(Self::Info),
            2 => Ok(Self::Warning),
            other => Err(UnknownBannerType { value: other }),
        }
    }
}

/// A stored banner record.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    /// Identifier assigned by the store on creation; immutable after.
    pub id: i64,
    /// Display category.
    pub banner_type: BannerType,
    /// When the banner stops being presented. `None` means it never expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the banner was created. Set exactly once by the store.
    pub created_at: Option<DateTime<Utc>>,
    /// Foreign key placeholder for the owning repository; unused in logic.
    pub repository_id: i64,
    /// Foreign key placeholder for the creating user; unused in logic.
    pub creator_id: i64,
    /// The message shown in the UI.
    pub message: String,
}

/// Fields a caller may change on an existing banner.
///
/// `None` leaves the stored value untouched; `Some` overwrites it. Only the
/// expiry and message are mutable; identifiers, creation time, and the
/// placeholder foreign keys never change through updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BannerPatch {
    /// New expiry, when set.
    pub expires_at: Option<DateTime<Utc>>,
    /// New message, when set.
    pub message: Option<String>,
}

impl BannerPatch {
    /// Whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.expires_at.is_none() && self.message.is_none()
    }
}
