//! INSERT statement.

use crate::error::{QueryError, QueryResult};
use crate::render::{Render, SqlWriter};
use crate::syntax::Table;
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// `column = value` pair of an INSERT or UPDATE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub column: String,
    pub value: Value,
}

/// Insert or replace the assignment for `column` (last write wins).
pub(super) fn assign(values: &mut Vec<Assignment>, column: &str, value: Value) {
    match values.iter_mut().find(|a| a.column == column) {
        Some(existing) => existing.value = value,
        None => values.push(Assignment {
            column: column.to_string(),
            value,
        }),
    }
}

pub(super) fn write_assignment_columns(values: &[Assignment], out: &mut SqlWriter) {
    for (i, assignment) in values.iter().enumerate() {
        if i > 0 {
            out.push(", ");
        }
        out.push_ident(&assignment.column);
    }
}

/// INSERT statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    table: Table,
    values: Vec<Assignment>,
    ignore: bool,
}

impl Insert {
    pub fn new(table: impl Into<Table>) -> Self {
        Self {
            table: table.into(),
            values: Vec::new(),
            ignore: false,
        }
    }

    /// Set a column value.
    pub fn set(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        assign(&mut self.values, column, value.into());
        self
    }

    /// Skip rows that conflict with existing ones (`ON CONFLICT DO NOTHING`).
    pub fn ignore(&mut self, ignore: bool) -> &mut Self {
        self.ignore = ignore;
        self
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn values(&self) -> &[Assignment] {
        &self.values
    }

    pub fn is_ignore(&self) -> bool {
        self.ignore
    }
}

impl Render for Insert {
    fn render(&self, out: &mut SqlWriter) -> QueryResult<()> {
        if self.values.is_empty() {
            return Err(QueryError::validation("INSERT requires at least one value"));
        }

        out.push("INSERT INTO ");
        out.push_ident(self.table.name());
        out.push(" (");
        write_assignment_columns(&self.values, out);
        out.push(") VALUES (");
        for (i, assignment) in self.values.iter().enumerate() {
            if i > 0 {
                out.push(", ");
            }
            out.push_param(&assignment.value);
        }
        out.push(")");

        if self.ignore {
            out.push(" ON CONFLICT DO NOTHING");
        }
        Ok(())
    }
}
