//! List filters and pagination bounds.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Optional constraints for the list view. Every `None` means "no constraint";
/// the supplied ones combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterFilter {
    /// Substring of the display name.
    pub q: Option<String>,
    pub rarity: Option<i32>,
    pub attribute_id: Option<i64>,
    pub tribe_id: Option<i64>,
    pub battle_type_id: Option<i64>,
}

impl MonsterFilter {
    /// The name needle, or `None` when `q` is absent or blank.
    pub fn name_needle(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.trim().is_empty())
    }
}

/// A clamped page request: `page >= 0`, `size` in `[1, MAX_PAGE_SIZE]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    pub fn clamped(page: i64, size: i64) -> Self {
        Self {
            page: page.max(0),
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }
}
