//! SQL text accumulator shared by every [`Render`](super::Render) impl.

use super::config::{IdentQuoting, Placeholder, RenderConfig};
use super::BuiltQuery;
use crate::condition::Operand;
use crate::error::QueryResult;
use crate::render::Render;
use crate::statement::Select;
use crate::syntax::{ident, Column, ColumnRef, Table};
use crate::value::Value;

/// Accumulates SQL text and bind values in output order.
///
/// Nested SELECTs render into the same writer, so an outer query and all of
/// its subqueries share one placeholder sequence.
#[derive(Debug)]
pub struct SqlWriter {
    sql: String,
    params: Vec<Value>,
    config: RenderConfig,
}

impl SqlWriter {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// SQL written so far.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Number of bind values collected so far.
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Append raw SQL text.
    pub fn push(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Append a placeholder and collect `value`.
    pub fn push_param(&mut self, value: &Value) {
        self.params.push(value.clone());
        match self.config.placeholder {
            Placeholder::Dollar => {
                self.sql.push('$');
                self.sql.push_str(&self.params.len().to_string());
            }
            Placeholder::QuestionMark => self.sql.push('?'),
        }
    }

    /// Append comma-separated placeholders for `values`.
    pub fn push_param_list(&mut self, values: &[Value]) {
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.push_param(value);
        }
    }

    /// Append a single identifier, quoted per the configured policy.
    pub fn push_ident(&mut self, name: &str) {
        let always = self.config.quoting == IdentQuoting::Always;
        ident::write_ident(&mut self.sql, name, always);
    }

    /// Append a table reference for a FROM/INTO/UPDATE position:
    /// `[schema.]name [AS alias]`.
    pub fn push_table(&mut self, table: &Table) {
        if let Some(schema) = table.schema() {
            self.push_ident(schema);
            self.push(".");
        }
        self.push_ident(table.name());
        if let Some(alias) = table.alias() {
            self.push(" AS ");
            self.push_ident(alias);
        }
    }

    /// Append a column qualified by its table binding, if any.
    pub fn push_column(&mut self, column: &Column) {
        if let Some(table) = column.table() {
            if table.alias().is_none() {
                if let Some(schema) = table.schema() {
                    self.push_ident(schema);
                    self.push(".");
                }
            }
            self.push_ident(table.qualifier());
            self.push(".");
        }
        self.push_ident(column.name());
    }

    /// Append a column or a parenthesized scalar subquery.
    pub fn push_column_ref(&mut self, column: &ColumnRef) -> QueryResult<()> {
        match column {
            ColumnRef::Column(column) => {
                self.push_column(column);
                Ok(())
            }
            ColumnRef::Subquery(select) => self.push_subquery(select),
        }
    }

    /// Append the target of a comparison.
    pub fn push_operand(&mut self, operand: &Operand) -> QueryResult<()> {
        match operand {
            Operand::Value(value) => {
                self.push_param(value);
                Ok(())
            }
            Operand::Column(column) => {
                self.push_column(column);
                Ok(())
            }
            Operand::Subquery(select) => self.push_subquery(select),
        }
    }

    /// Append `(SELECT ...)`.
    pub fn push_subquery(&mut self, select: &Select) -> QueryResult<()> {
        self.push("(");
        select.render(self)?;
        self.push(")");
        Ok(())
    }

    pub fn finish(self) -> BuiltQuery {
        BuiltQuery::new(self.sql, self.params)
    }
}
