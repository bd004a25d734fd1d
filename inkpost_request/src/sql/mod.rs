//! # SQL
//!
//! Renders query plans into SQL fragments for relational entity stores.

use std::collections::BTreeMap;

pub use filter::SqlFilterBuilder;
pub use ordering::SqlOrderingBuilder;
pub use query::{QuerySqlBuilder, QuerySqlStatement};

mod filter;
mod ordering;
mod query;
pub mod utility;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    Postgres,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlArgumentStyle {
    /// `$1`, `$2`, ...
    Indexed { prefix: String },
    /// `?` for every argument.
    Positional { symbol: String },
}

/// Maps schema member names onto column names.
#[derive(Debug, Clone, Default)]
pub struct SqlRenameMap {
    pub members: BTreeMap<String, String>,
}

impl SqlRenameMap {
    pub fn new(members: BTreeMap<String, String>) -> Self {
        Self { members }
    }

    pub fn rename_member(&self, name: &str) -> String {
        self.members
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.into())
    }
}

impl Default for SqlArgumentStyle {
    fn default() -> Self {
        Self::Indexed { prefix: "$".into() }
    }
}
