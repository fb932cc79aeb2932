//! SELECT statement.

use crate::error::{QueryError, QueryResult};
use crate::render::{Render, SqlWriter};
use crate::syntax::{ColumnRef, IntoColumnRef, Table};
use crate::where_clause::Where;
use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

/// One ORDER BY item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: ColumnRef,
    pub order: Order,
}

/// SELECT statement.
///
/// Column arguments are qualified against the table binding current at the
/// time they are added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Select {
    pub(super) table: Option<Table>,
    columns: Vec<ColumnRef>,
    pub(super) where_tree: Option<Where>,
    order_by: Vec<OrderBy>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl Select {
    /// Create a SELECT over `table`.
    pub fn new(table: impl Into<Table>) -> Self {
        Self {
            table: Some(table.into()),
            ..Self::default()
        }
    }

    /// Change the table binding. Already-added columns and conditions keep
    /// the binding they were resolved with.
    pub fn set_table(&mut self, table: impl Into<Table>) -> &mut Self {
        self.table = Some(table.into());
        self
    }

    /// Replace the SELECT list.
    pub fn columns<I>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: IntoColumnRef,
    {
        self.columns.clear();
        for column in columns {
            self.add_column(column);
        }
        self
    }

    /// Append one column (or scalar subquery) to the SELECT list.
    pub fn add_column(&mut self, column: impl IntoColumnRef) -> &mut Self {
        let column = column.into_column_ref(self.table.as_ref());
        self.columns.push(column);
        self
    }

    /// Add ORDER BY column ASC/DESC.
    pub fn order_by(&mut self, column: impl IntoColumnRef, order: Order) -> &mut Self {
        let column = column.into_column_ref(self.table.as_ref());
        self.order_by.push(OrderBy { column, order });
        self
    }

    /// Set LIMIT.
    pub fn limit(&mut self, n: u64) -> &mut Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET.
    pub fn offset(&mut self, n: u64) -> &mut Self {
        self.offset = Some(n);
        self
    }

    pub fn get_columns(&self) -> &[ColumnRef] {
        &self.columns
    }

    pub fn get_order_by(&self) -> &[OrderBy] {
        &self.order_by
    }

    pub fn get_limit(&self) -> Option<u64> {
        self.limit
    }

    pub fn get_offset(&self) -> Option<u64> {
        self.offset
    }
}

impl Render for Select {
    fn render(&self, out: &mut SqlWriter) -> QueryResult<()> {
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| QueryError::validation("SELECT requires a table"))?;

        out.push("SELECT ");
        if self.columns.is_empty() {
            out.push("*");
        }
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                out.push(", ");
            }
            out.push_column_ref(column)?;
            if let Some(alias) = column.as_column().and_then(|c| c.alias()) {
                out.push(" AS ");
                out.push_ident(alias);
            }
        }

        out.push(" FROM ");
        out.push_table(table);

        if let Some(tree) = self.where_tree.as_ref().filter(|w| w.has_clauses()) {
            out.push(" WHERE ");
            tree.render(out)?;
        }

        for (i, item) in self.order_by.iter().enumerate() {
            out.push(if i == 0 { " ORDER BY " } else { ", " });
            out.push_column_ref(&item.column)?;
            out.push(" ");
            out.push(item.order.as_str());
        }

        if let Some(limit) = self.limit {
            out.push(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            out.push(&format!(" OFFSET {offset}"));
        }

        Ok(())
    }
}
