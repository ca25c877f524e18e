//! Explicit query predicates over category records.
//!
//! Every predicate has two equivalent evaluations: a parameterized SQL
//! `WHERE` fragment for the SQLite store, and [`CategoryPredicate::matches`]
//! for in-process stores.

use crate::db::casefold;
use crate::model::category::{Category, CategoryId};
use rusqlite::types::Value;

/// Filter handed to a [`CategoryStore`](super::category_store::CategoryStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryPredicate {
    /// Every category.
    All,
    /// Exact identifier match.
    IdEquals(CategoryId),
    /// Exact, case-sensitive name match.
    NameEquals(String),
    /// Name contains the fragment after case folding both sides.
    ///
    /// An empty fragment matches every category.
    NameContainsIgnoreCase(String),
}

impl CategoryPredicate {
    pub fn name_equals(name: impl Into<String>) -> Self {
        Self::NameEquals(name.into())
    }

    pub fn name_contains_ignore_case(fragment: impl Into<String>) -> Self {
        Self::NameContainsIgnoreCase(fragment.into())
    }

    /// Evaluates the predicate against one record.
    pub fn matches(&self, category: &Category) -> bool {
        match self {
            Self::All => true,
            Self::IdEquals(id) => category.id == *id,
            Self::NameEquals(name) => category.name == *name,
            Self::NameContainsIgnoreCase(fragment) => {
                casefold(&category.name).contains(&casefold(fragment))
            }
        }
    }

    /// Returns the SQL condition and its positional bind values.
    ///
    /// Containment uses `instr()` instead of `LIKE`, so `%` and `_` in a
    /// fragment are literal characters.
    pub(crate) fn to_sql(&self) -> (&'static str, Vec<Value>) {
        match self {
            Self::All => ("1 = 1", Vec::new()),
            Self::IdEquals(id) => ("id = ?", vec![Value::Integer(*id)]),
            Self::NameEquals(name) => ("name = ?", vec![Value::Text(name.clone())]),
            Self::NameContainsIgnoreCase(fragment) => (
                "instr(casefold(name), casefold(?)) > 0",
                vec![Value::Text(fragment.clone())],
            ),
        }
    }

    /// Short label used in log events. Never contains user input.
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::IdEquals(_) => "id_equals",
            Self::NameEquals(_) => "name_equals",
            Self::NameContainsIgnoreCase(_) => "name_contains_ignore_case",
        }
    }
}
