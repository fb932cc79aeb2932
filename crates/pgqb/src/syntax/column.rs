use super::table::Table;
use serde::{Deserialize, Serialize};

/// A column reference, optionally bound to a table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    name: String,
    alias: Option<String>,
    table: Option<Table>,
}

impl Column {
    /// Create a column bound to `table` (or unqualified when `None`).
    pub fn new(name: impl Into<String>, table: Option<Table>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            table,
        }
    }

    /// Create a column qualified by `table`.
    pub fn of(table: impl Into<Table>, name: impl Into<String>) -> Self {
        Self::new(name, Some(table.into()))
    }

    /// Create an unqualified column.
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    /// Check if this is the `*` wildcard.
    pub fn is_all(&self) -> bool {
        self.name == "*"
    }
}
