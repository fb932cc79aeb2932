//! Rendering statements and predicate trees to SQL text plus bind values.
//!
//! Rendering is a read-only traversal: every [`Render`] impl walks the public
//! accessors of its type and writes into a [`SqlWriter`]. Placeholders are
//! numbered in output order, so parameters of nested subqueries interleave
//! correctly with those of the outer statement.

mod config;
mod writer;

pub use config::{IdentQuoting, Placeholder, RenderConfig};
pub use writer::SqlWriter;

use crate::error::QueryResult;
use crate::value::Value;
use tokio_postgres::types::ToSql;

/// Write `self` as SQL into `out`.
pub trait Render {
    fn render(&self, out: &mut SqlWriter) -> QueryResult<()>;
}

/// Build helpers available on everything that can be rendered.
pub trait SqlQuery: Render {
    /// Render with an explicit configuration.
    fn build_with(&self, config: &RenderConfig) -> QueryResult<BuiltQuery> {
        let mut out = SqlWriter::new(config.clone());
        self.render(&mut out)?;
        let built = out.finish();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sql = %truncate_sql(built.sql(), config.max_logged_sql),
            params = built.params().len(),
            "built SQL"
        );

        Ok(built)
    }

    /// Render with the default configuration.
    fn build(&self) -> QueryResult<BuiltQuery> {
        self.build_with(&RenderConfig::default())
    }

    /// Debug helper to get the SQL string.
    fn to_sql(&self) -> QueryResult<String> {
        Ok(self.build()?.into_parts().0)
    }
}

impl<T: Render + ?Sized> SqlQuery for T {}

/// The result of rendering: SQL text and its bind values in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    sql: String,
    params: Vec<Value>,
}

impl BuiltQuery {
    pub fn new(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Get parameters as references for tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|v| v as &(dyn ToSql + Sync))
            .collect()
    }

    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

/// Cut `sql` to at most `max` bytes on a char boundary, marking the cut.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
pub(crate) fn truncate_sql(sql: &str, max: Option<usize>) -> String {
    match max {
        Some(max) if sql.len() > max => {
            let mut end = max;
            while !sql.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &sql[..end])
        }
        _ => sql.to_string(),
    }
}

#[cfg(test)]
mod tests;
