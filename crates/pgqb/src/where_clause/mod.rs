//! The WHERE predicate tree.
//!
//! [`Where`] is plain owned data: one bucket per condition category, the
//! node's [`Conjunction`], an optional explicit table binding, and owned child
//! groups. Conditions are added through a [`WhereBuilder`], which also carries
//! the back-link to the owning statement.
//!
//! Because every bucket owns its entries (including nested SELECTs and child
//! groups), `Clone` is a full structural copy: a cloned tree never observes
//! mutations of the original, and vice versa.

mod builder;
mod render;

pub use builder::WhereBuilder;

use crate::condition::{
    BitClause, ComparisonEntry, Conjunction, FullTextMatch, IntoConjunction, NullCheck, Range,
    SetMembership,
};
use crate::error::QueryResult;
use crate::statement::Select;
use crate::syntax::{ColumnRef, Table};
use crate::value::Value;
use serde::{Deserialize, Serialize};

/// A predicate node and, through `sub_wheres`, the tree below it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Where {
    conjunction: Conjunction,
    comparisons: Vec<ComparisonEntry>,
    betweens: Vec<Range>,
    not_betweens: Vec<Range>,
    is_null: Vec<NullCheck>,
    is_not_null: Vec<NullCheck>,
    booleans: Vec<BitClause>,
    matches: Vec<FullTextMatch>,
    ins: Vec<SetMembership>,
    not_ins: Vec<SetMembership>,
    exists: Vec<Select>,
    not_exists: Vec<Select>,
    sub_wheres: Vec<Where>,
    table: Option<Table>,
}

impl Where {
    /// Create an empty tree with the `AND` conjunction and no explicit binding.
    pub const fn new() -> Self {
        Self {
            conjunction: Conjunction::And,
            comparisons: Vec::new(),
            betweens: Vec::new(),
            not_betweens: Vec::new(),
            is_null: Vec::new(),
            is_not_null: Vec::new(),
            booleans: Vec::new(),
            matches: Vec::new(),
            ins: Vec::new(),
            not_ins: Vec::new(),
            exists: Vec::new(),
            not_exists: Vec::new(),
            sub_wheres: Vec::new(),
            table: None,
        }
    }

    /// Check if no bucket holds an entry.
    ///
    /// Every accumulating bucket counts, including full-text matches, raw
    /// literals and NOT EXISTS subqueries. A tree whose only content is empty
    /// sub-groups is not empty, though it renders to nothing.
    pub fn is_empty(&self) -> bool {
        self.comparisons.is_empty()
            && self.booleans.is_empty()
            && self.betweens.is_empty()
            && self.not_betweens.is_empty()
            && self.is_null.is_empty()
            && self.is_not_null.is_empty()
            && self.matches.is_empty()
            && self.ins.is_empty()
            && self.not_ins.is_empty()
            && self.exists.is_empty()
            && self.not_exists.is_empty()
            && self.sub_wheres.is_empty()
    }

    /// Check if rendering this tree produces at least one clause.
    pub fn has_clauses(&self) -> bool {
        !self.comparisons.is_empty()
            || !self.booleans.is_empty()
            || !self.betweens.is_empty()
            || !self.not_betweens.is_empty()
            || !self.is_null.is_empty()
            || !self.is_not_null.is_empty()
            || !self.matches.is_empty()
            || !self.ins.is_empty()
            || !self.not_ins.is_empty()
            || !self.exists.is_empty()
            || !self.not_exists.is_empty()
            || self.sub_wheres.iter().any(Where::has_clauses)
    }

    // ==================== Accessors ====================

    pub fn get_conjunction(&self) -> Conjunction {
        self.conjunction
    }

    /// Explicit table binding of this node, if any.
    ///
    /// Root trees usually have none and resolve through their statement; see
    /// [`WhereBuilder::table`].
    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn comparisons(&self) -> &[ComparisonEntry] {
        &self.comparisons
    }

    pub fn betweens(&self) -> &[Range] {
        &self.betweens
    }

    pub fn not_betweens(&self) -> &[Range] {
        &self.not_betweens
    }

    pub fn nulls(&self) -> &[NullCheck] {
        &self.is_null
    }

    pub fn not_nulls(&self) -> &[NullCheck] {
        &self.is_not_null
    }

    pub fn booleans(&self) -> &[BitClause] {
        &self.booleans
    }

    pub fn matches(&self) -> &[FullTextMatch] {
        &self.matches
    }

    pub fn ins(&self) -> &[SetMembership] {
        &self.ins
    }

    pub fn not_ins(&self) -> &[SetMembership] {
        &self.not_ins
    }

    /// Values of the `IN` entry for `name`, matched against the column as it
    /// was passed to `in_list`, then against the bare column name.
    pub fn in_values(&self, name: &str) -> Option<&[Value]> {
        find_membership(&self.ins, name)
    }

    /// Values of the `NOT IN` entry for `name`; see [`in_values`](Self::in_values).
    pub fn not_in_values(&self, name: &str) -> Option<&[Value]> {
        find_membership(&self.not_ins, name)
    }

    pub fn exists(&self) -> &[Select] {
        &self.exists
    }

    pub fn not_exists(&self) -> &[Select] {
        &self.not_exists
    }

    pub fn sub_wheres(&self) -> &[Where] {
        &self.sub_wheres
    }

    // ==================== Node settings ====================

    /// Set this node's conjunction.
    ///
    /// Fails with [`QueryError::InvalidConjunction`](crate::QueryError::InvalidConjunction)
    /// for anything but `AND`, `OR`, `AND NOT`, `OR NOT`; the previous
    /// conjunction is kept in that case.
    pub fn set_conjunction(&mut self, operator: impl IntoConjunction) -> QueryResult<&mut Self> {
        self.conjunction = operator.into_conjunction()?;
        Ok(self)
    }

    /// Bind this node to an explicit table.
    pub fn set_table(&mut self, table: impl Into<Table>) -> &mut Self {
        self.table = Some(table.into());
        self
    }

    // ==================== Bucket writes (used by WhereBuilder) ====================

    pub(crate) fn push_comparison(&mut self, entry: ComparisonEntry) {
        self.comparisons.push(entry);
    }

    pub(crate) fn push_between(&mut self, range: Range, negated: bool) {
        if negated {
            self.not_betweens.push(range);
        } else {
            self.betweens.push(range);
        }
    }

    pub(crate) fn push_null_check(&mut self, check: NullCheck, negated: bool) {
        if negated {
            self.is_not_null.push(check);
        } else {
            self.is_null.push(check);
        }
    }

    pub(crate) fn push_bit_clause(&mut self, clause: BitClause) {
        self.booleans.push(clause);
    }

    pub(crate) fn push_match(&mut self, entry: FullTextMatch) {
        self.matches.push(entry);
    }

    /// Insert or replace the membership keyed by `key` (last write wins).
    ///
    /// A replaced entry keeps its position and takes the new subject, so a
    /// table change between writes renders against the latest binding.
    pub(crate) fn put_membership(
        &mut self,
        subject: ColumnRef,
        key: Option<String>,
        values: Vec<Value>,
        negated: bool,
    ) {
        let bucket = if negated {
            &mut self.not_ins
        } else {
            &mut self.ins
        };
        let existing = bucket.iter_mut().find(|m| match (&m.key, &key) {
            (Some(a), Some(b)) => a == b,
            (None, None) => m.subject == subject,
            _ => false,
        });
        match existing {
            Some(entry) => {
                entry.subject = subject;
                entry.values = values;
            }
            None => bucket.push(SetMembership {
                subject,
                key,
                values,
            }),
        }
    }

    pub(crate) fn push_exists(&mut self, select: Select, negated: bool) {
        if negated {
            self.not_exists.push(select);
        } else {
            self.exists.push(select);
        }
    }

    /// Append a child group and return its index.
    pub(crate) fn push_sub_where(&mut self, child: Where) -> usize {
        self.sub_wheres.push(child);
        self.sub_wheres.len() - 1
    }

    /// Walk `path` (sub-group indices) down from this node.
    ///
    /// Paths are only produced by [`WhereBuilder`] from indices returned by
    /// `push_sub_where`, and groups are never removed, so every step is valid.
    pub(crate) fn descend(&self, path: &[usize]) -> &Where {
        let mut node = self;
        for &index in path {
            node = &node.sub_wheres[index];
        }
        node
    }

    pub(crate) fn descend_mut(&mut self, path: &[usize]) -> &mut Where {
        let mut node = self;
        for &index in path {
            node = &mut node.sub_wheres[index];
        }
        node
    }
}

fn find_membership<'a>(bucket: &'a [SetMembership], name: &str) -> Option<&'a [Value]> {
    bucket
        .iter()
        .find(|m| m.key.as_deref() == Some(name))
        .or_else(|| {
            bucket
                .iter()
                .find(|m| m.subject.column_name() == Some(name))
        })
        .map(|m| m.values.as_slice())
}
