//! Catalog domain model.
//!
//! # Invariants
//! - Every record is identified by a backend-assigned `CategoryId`.
//! - Ids are never reused, even after deletion.

pub mod category;
