//! Fluent handle for adding conditions to a statement's predicate tree.

use super::Where;
use crate::condition::{
    BitClause, Comparison, ComparisonEntry, Conjunction, FullTextMatch, IntoConjunction,
    IntoOperand, MatchMode, NullCheck, Operator, Range,
};
use crate::error::{QueryError, QueryResult};
use crate::statement::{Select, Statement};
use crate::syntax::{ColumnRef, IntoColumnRef, Table};
use crate::value::Value;

/// Chainable builder positioned on one node of a statement's [`Where`] tree.
///
/// The builder borrows the owning statement mutably for its whole lifetime and
/// remembers the path of sub-group indices leading to its node. Each mutator
/// resolves column arguments against the node's table binding *at call time*,
/// stores the entry, and returns the builder. [`sub_where`](Self::sub_where)
/// moves the builder into a new child group; [`end`](Self::end) hands back
/// the statement.
///
/// # Example
///
/// ```rust
/// use pgqb::prelude::*;
///
/// let mut query = select("users");
/// query
///     .where_clause()
///     .eq("status", "active")
///     .sub_where("OR")?
///     .greater_than_or_equal("age", 18)
///     .is_not_null("flag")
///     .end()
///     .limit(10);
///
/// let built = query.build()?;
/// assert_eq!(
///     built.sql(),
///     "SELECT * FROM users WHERE (users.status = $1) AND ((users.age >= $2) OR (users.flag IS NOT NULL)) LIMIT 10"
/// );
/// # Ok::<(), pgqb::QueryError>(())
/// ```
#[must_use = "a WhereBuilder does nothing until conditions are added; call `end()` to resume the statement"]
pub struct WhereBuilder<'s, S: Statement> {
    statement: &'s mut S,
    path: Vec<usize>,
}

impl<'s, S: Statement> WhereBuilder<'s, S> {
    /// Create a builder on the root of `statement`'s tree, creating the tree if needed.
    pub fn new(statement: &'s mut S) -> Self {
        statement.where_mut();
        Self {
            statement,
            path: Vec::new(),
        }
    }

    fn node(&self) -> &Where {
        static DETACHED: Where = Where::new();
        self.statement
            .get_where()
            .map_or(&DETACHED, |tree| tree.descend(&self.path))
    }

    fn node_mut(&mut self) -> &mut Where {
        self.statement.where_mut().descend_mut(&self.path)
    }

    /// Table binding used to qualify bare column names on this node: the
    /// node's explicit binding, else the owning statement's table.
    pub fn table(&self) -> Option<Table> {
        self.node()
            .table()
            .or_else(|| self.statement.table())
            .cloned()
    }

    /// The node this builder is positioned on.
    pub fn current(&self) -> &Where {
        self.node()
    }

    /// Depth below the root tree (0 at the root).
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    fn resolve(&self, column: impl IntoColumnRef) -> ColumnRef {
        let table = self.table();
        column.into_column_ref(table.as_ref())
    }

    // ==================== Comparisons ====================

    fn compare(mut self, column: impl IntoColumnRef, operator: Operator, target: impl IntoOperand) -> Self {
        let subject = self.resolve(column);
        self.node_mut()
            .push_comparison(ComparisonEntry::Structured(Comparison {
                subject,
                operator,
                target: target.into_operand(),
            }));
        self
    }

    /// Add: column = value
    pub fn equals(self, column: impl IntoColumnRef, value: impl IntoOperand) -> Self {
        self.compare(column, Operator::Equal, value)
    }

    /// Alias for [`equals`](Self::equals).
    pub fn eq(self, column: impl IntoColumnRef, value: impl IntoOperand) -> Self {
        self.equals(column, value)
    }

    /// Add: column <> value
    pub fn not_equals(self, column: impl IntoColumnRef, value: impl IntoOperand) -> Self {
        self.compare(column, Operator::NotEqual, value)
    }

    /// Add: column > value
    pub fn greater_than(self, column: impl IntoColumnRef, value: impl IntoOperand) -> Self {
        self.compare(column, Operator::GreaterThan, value)
    }

    /// Add: column >= value
    pub fn greater_than_or_equal(self, column: impl IntoColumnRef, value: impl IntoOperand) -> Self {
        self.compare(column, Operator::GreaterThanOrEqual, value)
    }

    /// Add: column < value
    pub fn less_than(self, column: impl IntoColumnRef, value: impl IntoOperand) -> Self {
        self.compare(column, Operator::LessThan, value)
    }

    /// Add: column <= value
    pub fn less_than_or_equal(self, column: impl IntoColumnRef, value: impl IntoOperand) -> Self {
        self.compare(column, Operator::LessThanOrEqual, value)
    }

    /// Add: column LIKE pattern
    pub fn like(self, column: impl IntoColumnRef, pattern: impl IntoOperand) -> Self {
        self.compare(column, Operator::Like, pattern)
    }

    /// Add: column NOT LIKE pattern
    pub fn not_like(self, column: impl IntoColumnRef, pattern: impl IntoOperand) -> Self {
        self.compare(column, Operator::NotLike, pattern)
    }

    /// Add a raw SQL condition to the comparisons sequence.
    ///
    /// # Safety
    ///
    /// The text is rendered verbatim. The caller must ensure it is safe.
    pub fn as_literal(mut self, literal: impl Into<String>) -> Self {
        self.node_mut()
            .push_comparison(ComparisonEntry::Literal(literal.into()));
        self
    }

    // ==================== Full-text ====================

    fn full_text<C, V>(mut self, columns: C, values: V, mode: MatchMode) -> Self
    where
        C: IntoIterator,
        C::Item: IntoColumnRef,
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        let table = self.table();
        let columns = columns
            .into_iter()
            .map(|c| c.into_column_ref(table.as_ref()))
            .collect();
        let values = values.into_iter().map(Into::into).collect();
        self.node_mut().push_match(FullTextMatch {
            columns,
            values,
            mode,
        });
        self
    }

    /// Add a natural-language full-text match.
    ///
    /// Column and value counts are checked when the statement is rendered.
    pub fn match_against<C, V>(self, columns: C, values: V) -> Self
    where
        C: IntoIterator,
        C::Item: IntoColumnRef,
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        self.full_text(columns, values, MatchMode::Natural)
    }

    /// Add a boolean-mode full-text match.
    pub fn match_boolean<C, V>(self, columns: C, values: V) -> Self
    where
        C: IntoIterator,
        C::Item: IntoColumnRef,
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        self.full_text(columns, values, MatchMode::Boolean)
    }

    /// Add a full-text match with query expansion.
    pub fn match_with_query_expansion<C, V>(self, columns: C, values: V) -> Self
    where
        C: IntoIterator,
        C::Item: IntoColumnRef,
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        self.full_text(columns, values, MatchMode::QueryExpansion)
    }

    // ==================== Set membership ====================

    fn membership<V>(mut self, column: impl IntoColumnRef, values: V, negated: bool) -> Self
    where
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        let key = column.key();
        let subject = self.resolve(column);
        let values = values.into_iter().map(Into::into).collect();
        self.node_mut().put_membership(subject, key, values, negated);
        self
    }

    /// Set: column IN (values...)
    ///
    /// A second call for the same column replaces its values. An empty list
    /// is accepted and renders as an always-false clause.
    pub fn in_list<V>(self, column: impl IntoColumnRef, values: V) -> Self
    where
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        self.membership(column, values, false)
    }

    /// Set: column NOT IN (values...)
    ///
    /// An empty list renders as an always-true clause.
    pub fn not_in<V>(self, column: impl IntoColumnRef, values: V) -> Self
    where
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        self.membership(column, values, true)
    }

    // ==================== Ranges, nulls, flags ====================

    fn range(mut self, column: impl IntoColumnRef, lower: impl Into<Value>, upper: impl Into<Value>, negated: bool) -> Self {
        let subject = self.resolve(column);
        self.node_mut().push_between(
            Range {
                subject,
                lower: lower.into(),
                upper: upper.into(),
            },
            negated,
        );
        self
    }

    /// Add: column BETWEEN a AND b (bounds are not reordered).
    pub fn between(self, column: impl IntoColumnRef, a: impl Into<Value>, b: impl Into<Value>) -> Self {
        self.range(column, a, b, false)
    }

    /// Add: column NOT BETWEEN a AND b
    pub fn not_between(self, column: impl IntoColumnRef, a: impl Into<Value>, b: impl Into<Value>) -> Self {
        self.range(column, a, b, true)
    }

    /// Add: column IS NULL
    pub fn is_null(mut self, column: impl IntoColumnRef) -> Self {
        let subject = self.resolve(column);
        self.node_mut().push_null_check(NullCheck { subject }, false);
        self
    }

    /// Add: column IS NOT NULL
    pub fn is_not_null(mut self, column: impl IntoColumnRef) -> Self {
        let subject = self.resolve(column);
        self.node_mut().push_null_check(NullCheck { subject }, true);
        self
    }

    /// Add a bit/boolean flag test.
    pub fn add_bit_clause(mut self, column: impl IntoColumnRef, value: impl Into<Value>) -> Self {
        let subject = self.resolve(column);
        self.node_mut().push_bit_clause(BitClause {
            subject,
            value: value.into(),
        });
        self
    }

    // ==================== Subqueries ====================

    /// Add: EXISTS (select)
    pub fn exists(mut self, select: Select) -> Self {
        self.node_mut().push_exists(select, false);
        self
    }

    /// Add: NOT EXISTS (select)
    pub fn not_exists(mut self, select: Select) -> Self {
        self.node_mut().push_exists(select, true);
        self
    }

    // ==================== Grouping ====================

    fn open_group(mut self, conjunction: Conjunction) -> Self {
        let mut child = Where::new();
        child.conjunction = conjunction;
        child.table = self.table();

        let index = self.node_mut().push_sub_where(child);
        self.path.push(index);
        self
    }

    /// Open a nested group joined by `operator` and move the builder into it.
    ///
    /// The child is bound to this node's resolved table. An invalid operator
    /// fails before anything is added.
    pub fn sub_where(self, operator: impl IntoConjunction) -> QueryResult<Self> {
        let conjunction = operator.into_conjunction().inspect_err(|_err| {
            #[cfg(feature = "tracing")]
            tracing::trace!(error = %_err, "rejected sub-group conjunction");
        })?;
        Ok(self.open_group(conjunction))
    }

    /// Open a nested `OR` group.
    pub fn sub_where_or(self) -> Self {
        self.open_group(Conjunction::Or)
    }

    /// Move into the existing sub-group at `index` of this node.
    pub fn sub_group(mut self, index: usize) -> QueryResult<Self> {
        let count = self.node().sub_wheres().len();
        if index >= count {
            return Err(QueryError::validation(format!(
                "sub-group index {index} out of range ({count} groups)"
            )));
        }
        self.path.push(index);
        Ok(self)
    }

    /// Move back to the enclosing group (no-op on the root).
    pub fn parent(mut self) -> Self {
        self.path.pop();
        self
    }

    /// Set this node's conjunction.
    ///
    /// Fails with [`QueryError::InvalidConjunction`](crate::QueryError::InvalidConjunction)
    /// and leaves the node unchanged for anything but `AND`, `OR`, `AND NOT`, `OR NOT`.
    pub fn conjunction(mut self, operator: impl IntoConjunction) -> QueryResult<Self> {
        let conjunction = operator.into_conjunction().inspect_err(|_err| {
            #[cfg(feature = "tracing")]
            tracing::trace!(error = %_err, "rejected conjunction");
        })?;
        self.node_mut().conjunction = conjunction;
        Ok(self)
    }

    /// Bind this node to an explicit table for subsequently added conditions.
    pub fn set_table(mut self, table: impl Into<Table>) -> Self {
        self.node_mut().set_table(table);
        self
    }

    /// Finish predicate construction and return the owning statement.
    pub fn end(self) -> &'s mut S {
        self.statement
    }
}
