//! Predicate entry types stored in a [`Where`](crate::Where) tree.
//!
//! Every structured entry carries a subject that was resolved against the
//! tree's table binding when the entry was added; nothing here is re-resolved
//! at render time.

use crate::error::{QueryError, QueryResult};
use crate::statement::Select;
use crate::syntax::{Column, ColumnRef};
use crate::value::Value;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Boolean combinator joining the clauses of one predicate node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Conjunction {
    #[default]
    And,
    Or,
    AndNot,
    OrNot,
}

impl Conjunction {
    /// SQL keyword(s) for this conjunction.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Conjunction::And => "AND",
            Conjunction::Or => "OR",
            Conjunction::AndNot => "AND NOT",
            Conjunction::OrNot => "OR NOT",
        }
    }

    /// Separator placed between rendered clauses.
    pub const fn separator(&self) -> &'static str {
        match self {
            Conjunction::And => " AND ",
            Conjunction::Or => " OR ",
            Conjunction::AndNot => " AND NOT ",
            Conjunction::OrNot => " OR NOT ",
        }
    }

    /// Parse `AND`, `OR`, `AND NOT` or `OR NOT`.
    ///
    /// Matching ignores ASCII case and collapses runs of whitespace, so
    /// `"and  not"` parses as [`Conjunction::AndNot`].
    pub fn parse(operator: &str) -> QueryResult<Self> {
        let normalized = operator
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();

        match normalized.as_str() {
            "AND" => Ok(Conjunction::And),
            "OR" => Ok(Conjunction::Or),
            "AND NOT" => Ok(Conjunction::AndNot),
            "OR NOT" => Ok(Conjunction::OrNot),
            _ => Err(QueryError::invalid_conjunction(operator)),
        }
    }
}

impl fmt::Display for Conjunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Conjunction {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Conjunction::parse(s)
    }
}

/// Convert an input into a [`Conjunction`], validating strings.
pub trait IntoConjunction {
    fn into_conjunction(self) -> QueryResult<Conjunction>;
}

impl IntoConjunction for Conjunction {
    fn into_conjunction(self) -> QueryResult<Conjunction> {
        Ok(self)
    }
}

impl IntoConjunction for &str {
    fn into_conjunction(self) -> QueryResult<Conjunction> {
        Conjunction::parse(self)
    }
}

impl IntoConjunction for String {
    fn into_conjunction(self) -> QueryResult<Conjunction> {
        Conjunction::parse(&self)
    }
}

/// Comparison operator of a structured comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Like,
    NotLike,
}

impl Operator {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "<>",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full-text search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    Natural,
    Boolean,
    QueryExpansion,
}

impl MatchMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Natural => "natural",
            MatchMode::Boolean => "boolean",
            MatchMode::QueryExpansion => "query_expansion",
        }
    }

    /// Modifier appended inside `AGAINST(...)`.
    pub const fn modifier(&self) -> &'static str {
        match self {
            MatchMode::Natural => "",
            MatchMode::Boolean => " IN BOOLEAN MODE",
            MatchMode::QueryExpansion => " WITH QUERY EXPANSION",
        }
    }
}

/// Right-hand side of a structured comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Value(Value),
    Column(Column),
    Subquery(Box<Select>),
}

/// Convert an input into an [`Operand`].
///
/// Plain values become bind parameters; columns and nested SELECTs are kept
/// as structured targets.
pub trait IntoOperand {
    fn into_operand(self) -> Operand;
}

impl IntoOperand for Operand {
    fn into_operand(self) -> Operand {
        self
    }
}

impl IntoOperand for Value {
    fn into_operand(self) -> Operand {
        Operand::Value(self)
    }
}

impl IntoOperand for Column {
    fn into_operand(self) -> Operand {
        Operand::Column(self)
    }
}

impl IntoOperand for &Column {
    fn into_operand(self) -> Operand {
        Operand::Column(self.clone())
    }
}

impl IntoOperand for Select {
    fn into_operand(self) -> Operand {
        Operand::Subquery(Box::new(self))
    }
}

impl<T: Into<Value>> IntoOperand for Option<T> {
    fn into_operand(self) -> Operand {
        Operand::Value(self.into())
    }
}

macro_rules! impl_into_operand {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoOperand for $t {
                fn into_operand(self) -> Operand {
                    Operand::Value(Value::from(self))
                }
            }
        )*
    };
}

impl_into_operand!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    f32,
    f64,
    &str,
    String,
    &String,
    Vec<u8>,
    Uuid,
    DateTime<Utc>,
    serde_json::Value,
);

/// `{subject, operator, target}` triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub subject: ColumnRef,
    pub operator: Operator,
    pub target: Operand,
}

/// One entry of the comparisons bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComparisonEntry {
    Structured(Comparison),
    /// Raw SQL inserted verbatim, unescaped.
    Literal(String),
}

impl ComparisonEntry {
    pub fn as_structured(&self) -> Option<&Comparison> {
        match self {
            ComparisonEntry::Structured(cmp) => Some(cmp),
            ComparisonEntry::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            ComparisonEntry::Structured(_) => None,
            ComparisonEntry::Literal(sql) => Some(sql),
        }
    }
}

/// `subject [NOT] BETWEEN lower AND upper`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub subject: ColumnRef,
    pub lower: Value,
    pub upper: Value,
}

/// `subject IS [NOT] NULL`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullCheck {
    pub subject: ColumnRef,
}

/// Bit/boolean flag test of `subject` against `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BitClause {
    pub subject: ColumnRef,
    pub value: Value,
}

/// Full-text search over `columns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullTextMatch {
    pub columns: Vec<ColumnRef>,
    pub values: Vec<Value>,
    pub mode: MatchMode,
}

/// `subject [NOT] IN (values...)`
///
/// `key` is the column as the caller named it; one node holds at most one
/// entry per key. Subquery subjects have no key and match by equality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetMembership {
    pub subject: ColumnRef,
    pub key: Option<String>,
    pub values: Vec<Value>,
}
