//! Category domain model.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never changes.
//! - `name` uniqueness is advisory; callers check `exists_by_name` before
//!   inserting when they need it.

use serde::{Deserialize, Serialize};

/// Backend-assigned identifier of a category row.
pub type CategoryId = i64;

/// Named classification entity held by the catalog store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Display name, compared exactly by name lookups.
    pub name: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. Bumped by every rename.
    pub updated_at: i64,
}

impl Category {
    /// Returns a copy carrying a new name and the same identity.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}
