//! # pgqb
//!
//! A SQL statement builder centered on a composable WHERE predicate tree.
//!
//! ## Features
//!
//! - **Predicate tree**: comparisons, ranges, null checks, set membership,
//!   full-text matches, EXISTS subqueries and nested groups, each group with
//!   its own conjunction (`AND`, `OR`, `AND NOT`, `OR NOT`)
//! - **Fluent builder**: [`WhereBuilder`] borrows its statement, descends into
//!   sub-groups, and `end()` hands the statement back
//! - **Binding at insertion**: bare column names are qualified against the
//!   current table when a condition is added
//! - **Parameterized output**: values never appear in SQL text; rendering yields
//!   `$n` placeholders plus [`Value`]s that implement `tokio_postgres` `ToSql`
//! - **Safe defaults**: DELETE without conditions is a no-op, UPDATE requires SET
//!
//! ## Example
//!
//! ```rust
//! use pgqb::prelude::*;
//!
//! let mut query = select("users");
//! query
//!     .columns(["id", "email"])
//!     .where_clause()
//!     .eq("status", "active")
//!     .sub_where("OR")?
//!     .less_than("age", 18)
//!     .in_list("role", ["admin", "owner"])
//!     .end()
//!     .order_by("id", Order::Desc)
//!     .limit(20);
//!
//! let built = query.build()?;
//! assert_eq!(
//!     built.sql(),
//!     "SELECT users.id, users.email FROM users WHERE (users.status = $1) \
//!      AND ((users.role IN ($2, $3)) OR (users.age < $4)) ORDER BY users.id DESC LIMIT 20"
//! );
//! assert_eq!(built.params().len(), 4);
//! # Ok::<(), pgqb::QueryError>(())
//! ```

pub mod condition;
pub mod error;
pub mod prelude;
pub mod render;
pub mod statement;
pub mod syntax;
pub mod value;
pub mod where_clause;

pub use condition::{
    BitClause, Comparison, ComparisonEntry, Conjunction, FullTextMatch, IntoConjunction,
    IntoOperand, MatchMode, NullCheck, Operand, Operator, Range, SetMembership,
};
pub use error::{QueryError, QueryResult};
pub use render::{BuiltQuery, IdentQuoting, Placeholder, Render, RenderConfig, SqlQuery, SqlWriter};
pub use statement::{
    Assignment, Delete, Insert, Order, OrderBy, Select, SetOperation, SetOperator, Statement,
    Update, delete, insert, intersect, minus, select, union, union_all, update,
};
pub use syntax::{Column, ColumnRef, IntoColumnRef, Table};
pub use value::Value;
pub use where_clause::{Where, WhereBuilder};
