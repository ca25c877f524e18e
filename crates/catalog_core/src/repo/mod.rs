//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage contract category lookups are executed against.
//! - Make query semantics explicit through predicate values.
//! - Isolate SQLite query details from the lookup service.
//!
//! # Invariants
//! - Absence is `Ok(None)` / `Ok(false)`, never an error.
//! - Backend failures are returned as `RepoError::Db` without rewriting.

pub mod category_store;
pub mod predicate;
