//! UPDATE statement.

use super::insert::{assign, Assignment};
use crate::error::{QueryError, QueryResult};
use crate::render::{Render, SqlWriter};
use crate::syntax::Table;
use crate::value::Value;
use crate::where_clause::Where;
use serde::{Deserialize, Serialize};

/// UPDATE statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub(super) table: Option<Table>,
    values: Vec<Assignment>,
    pub(super) where_tree: Option<Where>,
}

impl Update {
    pub fn new(table: impl Into<Table>) -> Self {
        Self {
            table: Some(table.into()),
            ..Self::default()
        }
    }

    pub fn set_table(&mut self, table: impl Into<Table>) -> &mut Self {
        self.table = Some(table.into());
        self
    }

    /// Set `column = value`. Setting the same column twice keeps the last value.
    pub fn set(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        assign(&mut self.values, column, value.into());
        self
    }

    pub fn values(&self) -> &[Assignment] {
        &self.values
    }
}

impl Render for Update {
    fn render(&self, out: &mut SqlWriter) -> QueryResult<()> {
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| QueryError::validation("UPDATE requires a table"))?;
        if self.values.is_empty() {
            return Err(QueryError::validation("UPDATE requires at least one SET"));
        }

        out.push("UPDATE ");
        out.push_table(table);
        out.push(" SET ");
        for (i, assignment) in self.values.iter().enumerate() {
            if i > 0 {
                out.push(", ");
            }
            out.push_ident(&assignment.column);
            out.push(" = ");
            out.push_param(&assignment.value);
        }

        if let Some(tree) = self.where_tree.as_ref().filter(|w| w.has_clauses()) {
            out.push(" WHERE ");
            tree.render(out)?;
        }
        Ok(())
    }
}
