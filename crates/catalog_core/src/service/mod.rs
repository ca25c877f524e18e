//! Core use-case services.
//!
//! # Responsibility
//! - Translate named lookups into store predicates.
//! - Keep callers decoupled from storage details.

pub mod category_lookup;
