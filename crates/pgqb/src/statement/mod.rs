//! Statement model: SELECT, INSERT, UPDATE, DELETE and set operations.
//!
//! SELECT, UPDATE and DELETE own zero-or-one [`Where`] tree and implement
//! [`Statement`], which is what a [`WhereBuilder`] needs from its owner: the
//! table binding, access to the tree, and a return target for `end()`.
//!
//! # Usage
//!
//! ```rust
//! use pgqb::prelude::*;
//!
//! let mut active = select("orders");
//! active.where_clause().eq("status", "open").end();
//!
//! let mut query = select("users");
//! query.columns(["id", "email"]).where_clause().exists(active).end();
//!
//! assert_eq!(
//!     query.to_sql()?,
//!     "SELECT users.id, users.email FROM users WHERE EXISTS (SELECT * FROM orders WHERE (orders.status = $1))"
//! );
//! # Ok::<(), pgqb::QueryError>(())
//! ```

mod delete;
mod insert;
mod select;
mod set_operation;
mod update;

pub use delete::Delete;
pub use insert::{Assignment, Insert};
pub use select::{Order, OrderBy, Select};
pub use set_operation::{SetOperation, SetOperator};
pub use update::Update;

use crate::syntax::Table;
use crate::where_clause::{Where, WhereBuilder};

/// A statement that owns a predicate tree.
pub trait Statement {
    /// Table binding used to qualify bare column names.
    fn table(&self) -> Option<&Table>;

    /// The predicate tree, if one was ever requested or attached.
    fn get_where(&self) -> Option<&Where>;

    /// The predicate tree, created empty on first access.
    fn where_mut(&mut self) -> &mut Where;

    /// Replace the predicate tree.
    fn set_where(&mut self, tree: Where);

    /// Start (or continue) adding conditions; `end()` returns this statement.
    fn where_clause(&mut self) -> WhereBuilder<'_, Self>
    where
        Self: Sized,
    {
        WhereBuilder::new(self)
    }
}

macro_rules! impl_statement {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Statement for $ty {
                fn table(&self) -> Option<&Table> {
                    self.table.as_ref()
                }

                fn get_where(&self) -> Option<&Where> {
                    self.where_tree.as_ref()
                }

                fn where_mut(&mut self) -> &mut Where {
                    self.where_tree.get_or_insert_with(Where::new)
                }

                fn set_where(&mut self, tree: Where) {
                    self.where_tree = Some(tree);
                }
            }
        )*
    };
}

impl_statement!(Select, Update, Delete);

/// Create a SELECT statement for the given table.
///
/// # Example
/// ```rust
/// let query = pgqb::select("users");
/// ```
pub fn select(table: impl Into<Table>) -> Select {
    Select::new(table)
}

/// Create an INSERT statement for the given table.
pub fn insert(table: impl Into<Table>) -> Insert {
    Insert::new(table)
}

/// Create an UPDATE statement for the given table.
pub fn update(table: impl Into<Table>) -> Update {
    Update::new(table)
}

/// Create a DELETE statement for the given table.
///
/// # Safety
/// By default, DELETE without WHERE conditions renders `WHERE 1=0` (no-op).
/// Use `allow_delete_all(true)` to allow deleting all rows.
pub fn delete(table: impl Into<Table>) -> Delete {
    Delete::new(table)
}

/// Create an empty `UNION`.
pub fn union() -> SetOperation {
    SetOperation::new(SetOperator::Union)
}

/// Create an empty `UNION ALL`.
pub fn union_all() -> SetOperation {
    SetOperation::new(SetOperator::UnionAll)
}

/// Create an empty `INTERSECT`.
pub fn intersect() -> SetOperation {
    SetOperation::new(SetOperator::Intersect)
}

/// Create `first MINUS second` (rendered as `EXCEPT`).
pub fn minus(first: Select, second: Select) -> SetOperation {
    let mut op = SetOperation::new(SetOperator::Except);
    op.add(first).add(second);
    op
}
