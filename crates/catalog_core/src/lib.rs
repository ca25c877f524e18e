//! Core lookup logic for the category catalog.
//! Owns the category storage contract and the read-side lookup service.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use model::category::{Category, CategoryId};
pub use repo::category_store::{CategoryStore, RepoError, RepoResult, SqliteCategoryStore};
pub use repo::predicate::CategoryPredicate;
pub use service::category_lookup::{CategoryLookup, CategoryLookupService};
