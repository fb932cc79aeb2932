//! Convenient imports for typical `pgqb` usage.
//!
//! ```rust
//! use pgqb::prelude::*;
//! ```

pub use crate::{
    Column, Conjunction, Order, QueryError, QueryResult, Render, SqlQuery, Statement, Table, Value,
    Where, WhereBuilder, delete, insert, intersect, minus, select, union, union_all, update,
};
