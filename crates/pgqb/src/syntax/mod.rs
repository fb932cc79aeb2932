//! Identifier model: tables, columns, and the factory that qualifies bare
//! column names against a table binding.

pub mod column;
pub mod ident;
pub mod table;

pub use column::Column;
pub use table::Table;

use crate::statement::Select;
use serde::{Deserialize, Serialize};

/// The subject of a condition: a column, or a nested SELECT used as a scalar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnRef {
    Column(Column),
    Subquery(Box<Select>),
}

impl ColumnRef {
    /// Column name, if this is a column reference.
    pub fn column_name(&self) -> Option<&str> {
        match self {
            ColumnRef::Column(column) => Some(column.name()),
            ColumnRef::Subquery(_) => None,
        }
    }

    pub fn as_column(&self) -> Option<&Column> {
        match self {
            ColumnRef::Column(column) => Some(column),
            ColumnRef::Subquery(_) => None,
        }
    }

    pub fn as_subquery(&self) -> Option<&Select> {
        match self {
            ColumnRef::Column(_) => None,
            ColumnRef::Subquery(select) => Some(select),
        }
    }
}

/// Resolve an input into a [`ColumnRef`] against a table binding.
///
/// Bare names are wrapped into a [`Column`] qualified by `table`; dotted names
/// (`table.column`, `schema.table.column`) carry their own qualifier.
/// Structured identifiers and nested SELECTs pass through unchanged.
pub trait IntoColumnRef {
    fn into_column_ref(self, table: Option<&Table>) -> ColumnRef;

    /// The column as the caller named it, independent of any table binding.
    fn key(&self) -> Option<String> {
        None
    }
}

/// Build a column from a possibly dotted name.
///
/// Names with empty segments, quotes, or more than three parts are kept whole.
fn parse_column(name: &str, table: Option<&Table>) -> Column {
    if name.contains('"') {
        return Column::new(name, table.cloned());
    }
    let parts: Vec<&str> = name.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Column::new(name, table.cloned());
    }
    match parts.as_slice() {
        [table_name, column] => Column::of(*table_name, *column),
        [schema, table_name, column] => {
            Column::new(*column, Some(Table::new(*table_name).with_schema(*schema)))
        }
        _ => Column::new(name, table.cloned()),
    }
}

fn column_key(column: &Column) -> String {
    match column.table() {
        Some(table) => format!("{}.{}", table.qualifier(), column.name()),
        None => column.name().to_string(),
    }
}

impl IntoColumnRef for &str {
    fn into_column_ref(self, table: Option<&Table>) -> ColumnRef {
        ColumnRef::Column(parse_column(self, table))
    }

    fn key(&self) -> Option<String> {
        Some((*self).to_string())
    }
}

impl IntoColumnRef for String {
    fn into_column_ref(self, table: Option<&Table>) -> ColumnRef {
        self.as_str().into_column_ref(table)
    }

    fn key(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl IntoColumnRef for &String {
    fn into_column_ref(self, table: Option<&Table>) -> ColumnRef {
        self.as_str().into_column_ref(table)
    }

    fn key(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoColumnRef for Column {
    fn into_column_ref(self, _table: Option<&Table>) -> ColumnRef {
        ColumnRef::Column(self)
    }

    fn key(&self) -> Option<String> {
        Some(column_key(self))
    }
}

impl IntoColumnRef for &Column {
    fn into_column_ref(self, _table: Option<&Table>) -> ColumnRef {
        ColumnRef::Column(self.clone())
    }

    fn key(&self) -> Option<String> {
        Some(column_key(self))
    }
}

impl IntoColumnRef for ColumnRef {
    fn into_column_ref(self, _table: Option<&Table>) -> ColumnRef {
        self
    }

    fn key(&self) -> Option<String> {
        self.as_column().map(column_key)
    }
}

impl IntoColumnRef for Select {
    fn into_column_ref(self, _table: Option<&Table>) -> ColumnRef {
        ColumnRef::Subquery(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_is_bound_to_table() {
        let users = Table::new("users");
        let col = "email".into_column_ref(Some(&users));
        let column = col.as_column().unwrap();
        assert_eq!(column.name(), "email");
        assert_eq!(column.table(), Some(&users));
    }

    #[test]
    fn bare_name_without_binding_is_unqualified() {
        let col = "email".into_column_ref(None);
        assert_eq!(col.as_column().unwrap().table(), None);
    }

    #[test]
    fn structured_column_passes_through() {
        let orders = Table::new("orders");
        let column = Column::of("users", "id");
        let col = column.clone().into_column_ref(Some(&orders));
        assert_eq!(col, ColumnRef::Column(column));
    }

    #[test]
    fn dotted_name_carries_its_own_table() {
        let orders = Table::new("orders");
        let col = "u.id".into_column_ref(Some(&orders));
        let column = col.as_column().unwrap();
        assert_eq!(column.name(), "id");
        assert_eq!(column.table(), Some(&Table::new("u")));
    }

    #[test]
    fn schema_qualified_name_is_split() {
        let col = "app.users.id".into_column_ref(None);
        let column = col.as_column().unwrap();
        assert_eq!(column.name(), "id");
        assert_eq!(column.table(), Some(&Table::new("users").with_schema("app")));
    }

    #[test]
    fn malformed_dotted_name_is_kept_whole() {
        let users = Table::new("users");
        for name in ["a..b", ".id", "id.", "a.b.c.d"] {
            let col = name.into_column_ref(Some(&users));
            let column = col.as_column().unwrap();
            assert_eq!(column.name(), name);
            assert_eq!(column.table(), Some(&users));
        }
    }

    #[test]
    fn key_is_the_name_as_written() {
        assert_eq!("x".key().as_deref(), Some("x"));
        assert_eq!("u.id".key().as_deref(), Some("u.id"));
        assert_eq!(Column::of("users", "id").key().as_deref(), Some("users.id"));
        assert_eq!(Column::bare("id").key().as_deref(), Some("id"));
        assert_eq!(Select::new("orders").key(), None);
    }

    #[test]
    fn select_becomes_subquery() {
        let col = Select::new("orders").into_column_ref(Some(&Table::new("users")));
        assert!(col.as_subquery().is_some());
        assert_eq!(col.column_name(), None);
    }
}
