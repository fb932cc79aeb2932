//! SQL rendering of a predicate tree.
//!
//! Clauses of one node are written in a fixed category order (matches, IN,
//! NOT IN, BETWEEN, NOT BETWEEN, comparisons, IS NULL, IS NOT NULL, bit
//! clauses, EXISTS, NOT EXISTS, sub-groups) and joined with the node's
//! conjunction.

use super::Where;
use crate::condition::{ComparisonEntry, FullTextMatch, Range, SetMembership};
use crate::error::{QueryError, QueryResult};
use crate::render::{Render, SqlWriter};

/// Writes the conjunction between clauses of one node.
struct Clauses<'a> {
    separator: &'a str,
    written: usize,
}

impl Clauses<'_> {
    fn next(&mut self, out: &mut SqlWriter) {
        if self.written > 0 {
            out.push(self.separator);
        }
        self.written += 1;
    }
}

impl Render for Where {
    /// Render the predicate without the leading `WHERE` keyword.
    ///
    /// A tree without clauses renders nothing.
    fn render(&self, out: &mut SqlWriter) -> QueryResult<()> {
        let mut clauses = Clauses {
            separator: self.get_conjunction().separator(),
            written: 0,
        };

        for entry in self.matches() {
            clauses.next(out);
            write_match(entry, out)?;
        }
        for entry in self.ins() {
            clauses.next(out);
            write_membership(entry, false, out)?;
        }
        for entry in self.not_ins() {
            clauses.next(out);
            write_membership(entry, true, out)?;
        }
        for range in self.betweens() {
            clauses.next(out);
            write_range(range, false, out)?;
        }
        for range in self.not_betweens() {
            clauses.next(out);
            write_range(range, true, out)?;
        }
        for entry in self.comparisons() {
            clauses.next(out);
            match entry {
                ComparisonEntry::Structured(cmp) => {
                    out.push("(");
                    out.push_column_ref(&cmp.subject)?;
                    out.push(" ");
                    out.push(cmp.operator.as_str());
                    out.push(" ");
                    out.push_operand(&cmp.target)?;
                    out.push(")");
                }
                ComparisonEntry::Literal(sql) => {
                    out.push("(");
                    out.push(sql);
                    out.push(")");
                }
            }
        }
        for check in self.nulls() {
            clauses.next(out);
            out.push("(");
            out.push_column_ref(&check.subject)?;
            out.push(" IS NULL)");
        }
        for check in self.not_nulls() {
            clauses.next(out);
            out.push("(");
            out.push_column_ref(&check.subject)?;
            out.push(" IS NOT NULL)");
        }
        for clause in self.booleans() {
            clauses.next(out);
            out.push("(COALESCE(");
            out.push_column_ref(&clause.subject)?;
            out.push(", 0) = ");
            out.push_param(&clause.value);
            out.push(")");
        }
        for select in self.exists() {
            clauses.next(out);
            out.push("EXISTS ");
            out.push_subquery(select)?;
        }
        for select in self.not_exists() {
            clauses.next(out);
            out.push("NOT EXISTS ");
            out.push_subquery(select)?;
        }
        for sub in self.sub_wheres().iter().filter(|w| w.has_clauses()) {
            clauses.next(out);
            out.push("(");
            sub.render(out)?;
            out.push(")");
        }

        Ok(())
    }
}

fn write_match(entry: &FullTextMatch, out: &mut SqlWriter) -> QueryResult<()> {
    if entry.columns.is_empty() || entry.columns.len() != entry.values.len() {
        return Err(QueryError::MatchArity {
            columns: entry.columns.len(),
            values: entry.values.len(),
        });
    }

    out.push("(MATCH(");
    for (i, column) in entry.columns.iter().enumerate() {
        if i > 0 {
            out.push(", ");
        }
        out.push_column_ref(column)?;
    }
    out.push(") AGAINST(");
    out.push_param_list(&entry.values);
    out.push(entry.mode.modifier());
    out.push("))");
    Ok(())
}

fn write_membership(entry: &SetMembership, negated: bool, out: &mut SqlWriter) -> QueryResult<()> {
    if entry.values.is_empty() {
        // Empty IN list - always false / true
        out.push(if negated { "1=1" } else { "1=0" });
        return Ok(());
    }

    out.push("(");
    out.push_column_ref(&entry.subject)?;
    out.push(if negated { " NOT IN (" } else { " IN (" });
    out.push_param_list(&entry.values);
    out.push("))");
    Ok(())
}

fn write_range(range: &Range, negated: bool, out: &mut SqlWriter) -> QueryResult<()> {
    out.push("(");
    out.push_column_ref(&range.subject)?;
    out.push(if negated { " NOT BETWEEN " } else { " BETWEEN " });
    out.push_param(&range.lower);
    out.push(" AND ");
    out.push_param(&range.upper);
    out.push(")");
    Ok(())
}
