//! DELETE statement.

use crate::error::{QueryError, QueryResult};
use crate::render::{Render, SqlWriter};
use crate::syntax::Table;
use crate::where_clause::Where;
use serde::{Deserialize, Serialize};

/// DELETE statement.
///
/// Without conditions it renders `WHERE 1=0` unless
/// [`allow_delete_all`](Self::allow_delete_all) was enabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    pub(super) table: Option<Table>,
    pub(super) where_tree: Option<Where>,
    allow_delete_all: bool,
}

impl Delete {
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

    /// Allow rendering an unconditional DELETE.
    pub fn allow_delete_all(&mut self, allow: bool) -> &mut Self {
        self.allow_delete_all = allow;
        self
    }

    pub fn deletes_all(&self) -> bool {
        self.allow_delete_all
    }
}

impl Render for Delete {
    fn render(&self, out: &mut SqlWriter) -> QueryResult<()> {
        let table = self
            .table
            .as_ref()
            .ok_or_else(|| QueryError::validation("DELETE requires a table"))?;

        out.push("DELETE FROM ");
        out.push_table(table);

        match self.where_tree.as_ref().filter(|w| w.has_clauses()) {
            Some(tree) => {
                out.push(" WHERE ");
                tree.render(out)?;
            }
            None if !self.allow_delete_all => out.push(" WHERE 1=0"),
            None => {}
        }
        Ok(())
    }
}
