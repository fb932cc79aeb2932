//! UNION / UNION ALL / INTERSECT / EXCEPT over SELECT statements.

use super::Select;
use crate::error::{QueryError, QueryResult};
use crate::render::{Render, SqlWriter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetOperator {
    Union,
    UnionAll,
    Intersect,
    /// `MINUS` in some dialects; rendered as `EXCEPT`.
    Except,
}

impl SetOperator {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SetOperator::Union => "UNION",
            SetOperator::UnionAll => "UNION ALL",
            SetOperator::Intersect => "INTERSECT",
            SetOperator::Except => "EXCEPT",
        }
    }
}

/// A set operation over two or more SELECTs. Each member is parenthesized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetOperation {
    operator: SetOperator,
    selects: Vec<Select>,
}

impl SetOperation {
    pub fn new(operator: SetOperator) -> Self {
        Self {
            operator,
            selects: Vec::new(),
        }
    }

    /// Append a member SELECT.
    pub fn add(&mut self, select: Select) -> &mut Self {
        self.selects.push(select);
        self
    }

    pub fn operator(&self) -> SetOperator {
        self.operator
    }

    pub fn selects(&self) -> &[Select] {
        &self.selects
    }
}

impl Render for SetOperation {
    fn render(&self, out: &mut SqlWriter) -> QueryResult<()> {
        if self.selects.len() < 2 {
            return Err(QueryError::validation(format!(
                "{} requires at least two SELECT statements",
                self.operator.as_str()
            )));
        }

        for (i, select) in self.selects.iter().enumerate() {
            if i > 0 {
                out.push(" ");
                out.push(self.operator.as_str());
                out.push(" ");
            }
            out.push_subquery(select)?;
        }
        Ok(())
    }
}
