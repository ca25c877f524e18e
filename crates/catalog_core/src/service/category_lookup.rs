//! Category lookup service.
//!
//! # Responsibility
//! - Expose name lookup, fragment search and existence checks.
//! - Bind each operation to an explicit [`CategoryPredicate`].
//!
//! # Invariants
//! - Read-only; holds no state beyond the store handle.
//! - Store results and errors are returned unchanged. No retries.
//! - Log events carry metadata only, never category names or fragments.

use crate::model::category::Category;
use crate::repo::category_store::{CategoryStore, RepoResult};
use crate::repo::predicate::CategoryPredicate;
use log::{debug, warn};

/// Read-side category lookups.
pub trait CategoryLookup {
    /// Returns the category named exactly `name`, `None` when absent.
    ///
    /// Matching is case-sensitive.
    fn get_by_name(&self, name: &str) -> RepoResult<Option<Category>>;

    /// Returns every category whose name contains `fragment`, ignoring case.
    ///
    /// An empty fragment returns all categories. Results are ordered by id.
    fn search_by_name_fragment(&self, fragment: &str) -> RepoResult<Vec<Category>>;

    /// Returns whether a category named exactly `name` exists.
    fn exists_by_name(&self, name: &str) -> RepoResult<bool>;
}

/// [`CategoryLookup`] backed by a [`CategoryStore`].
pub struct CategoryLookupService<S: CategoryStore> {
    store: S,
}

impl<S: CategoryStore> CategoryLookupService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Gives access to the underlying store for write paths.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: CategoryStore> CategoryLookup for CategoryLookupService<S> {
    fn get_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        let predicate = CategoryPredicate::name_equals(name);
        let result = self.store.find_one(&predicate);
        match &result {
            Ok(found) => debug!(
                "event=category_lookup module=service op=get_by_name status=ok found={}",
                found.is_some()
            ),
            Err(err) => warn!(
                "event=category_lookup module=service op=get_by_name status=error error={err}"
            ),
        }
        result
    }

    fn search_by_name_fragment(&self, fragment: &str) -> RepoResult<Vec<Category>> {
        let predicate = CategoryPredicate::name_contains_ignore_case(fragment);
        let result = self.store.find_all(&predicate);
        match &result {
            Ok(hits) => debug!(
                "event=category_lookup module=service op=search status=ok fragment_chars={} hits={}",
                fragment.chars().count(),
                hits.len()
            ),
            Err(err) => {
                warn!("event=category_lookup module=service op=search status=error error={err}")
            }
        }
        result
    }

    fn exists_by_name(&self, name: &str) -> RepoResult<bool> {
        let predicate = CategoryPredicate::name_equals(name);
        let result = self.store.exists(&predicate);
        match &result {
            Ok(exists) => debug!(
                "event=category_lookup module=service op=exists_by_name status=ok exists={exists}"
            ),
            Err(err) => warn!(
                "event=category_lookup module=service op=exists_by_name status=error error={err}"
            ),
        }
        result
    }
}
