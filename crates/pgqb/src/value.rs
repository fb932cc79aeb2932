//! Owned bind values.
//!
//! [`Value`] is the payload of every comparison target, range bound, set member
//! and full-text term. It is plain owned data, so cloning a predicate tree copies
//! its values instead of sharing them, and it implements [`ToSql`] so rendered
//! parameters can be handed straight to `tokio-postgres`.

use crate::error::QueryError;
use bytes::BytesMut;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use tokio_postgres::types::{IsNull, ToSql, Type};
use uuid::Uuid;

/// A SQL bind value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Json(serde_json::Value),
}

impl Value {
    /// Check if this is SQL `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Value {
    /// Encode through the variant's own `ToSql`, type-checked when `checked`.
    fn encode(
        &self,
        ty: &Type,
        out: &mut BytesMut,
        checked: bool,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(v) => put(v, ty, out, checked),
            Value::Int(v) => {
                if *ty == Type::INT2 {
                    let narrowed = i16::try_from(*v).map_err(|_| out_of_range(*v, ty))?;
                    put(&narrowed, ty, out, checked)
                } else if *ty == Type::INT4 {
                    let narrowed = i32::try_from(*v).map_err(|_| out_of_range(*v, ty))?;
                    put(&narrowed, ty, out, checked)
                } else {
                    put(v, ty, out, checked)
                }
            }
            Value::Float(v) => {
                if *ty == Type::FLOAT4 {
                    put(&(*v as f32), ty, out, checked)
                } else {
                    put(v, ty, out, checked)
                }
            }
            Value::Text(v) => put(v, ty, out, checked),
            Value::Bytes(v) => put(&v.as_slice(), ty, out, checked),
            Value::Uuid(v) => put(v, ty, out, checked),
            Value::Timestamp(v) => {
                if *ty == Type::TIMESTAMP {
                    put(&v.naive_utc(), ty, out, checked)
                } else {
                    put(v, ty, out, checked)
                }
            }
            Value::Json(v) => put(v, ty, out, checked),
        }
    }
}

fn put<T: ToSql>(
    value: &T,
    ty: &Type,
    out: &mut BytesMut,
    checked: bool,
) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
    if checked {
        value.to_sql_checked(ty, out)
    } else {
        value.to_sql(ty, out)
    }
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        self.encode(ty, out, false)
    }

    /// NULL binds to any type, so acceptance depends on the variant and is
    /// decided in [`to_sql_checked`](ToSql::to_sql_checked).
    fn accepts(_ty: &Type) -> bool {
        true
    }

    fn to_sql_checked(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        self.encode(ty, out, true)
    }
}

fn out_of_range(v: i64, ty: &Type) -> QueryError {
    QueryError::Param(format!("{v} is out of range for {ty}"))
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_postgres::types::WrongType;

    #[test]
    fn integers_widen_to_int() {
        assert_eq!(Value::from(7u8), Value::Int(7));
        assert_eq!(Value::from(-3i32), Value::Int(-3));
        assert_eq!(Value::from(u32::MAX), Value::Int(i64::from(u32::MAX)));
    }

    #[test]
    fn option_none_is_null() {
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
    }

    #[test]
    fn null_encodes_as_sql_null() {
        let mut buf = BytesMut::new();
        let is_null = Value::Null.to_sql(&Type::INT4, &mut buf).unwrap();
        assert!(matches!(is_null, IsNull::Yes));
        assert!(buf.is_empty());
    }

    #[test]
    fn int_narrows_to_column_width() {
        let mut buf = BytesMut::new();
        Value::Int(42).to_sql(&Type::INT4, &mut buf).unwrap();
        assert_eq!(buf.len(), 4);

        let mut buf = BytesMut::new();
        Value::Int(42).to_sql(&Type::INT8, &mut buf).unwrap();
        assert_eq!(buf.len(), 8);
    }

    #[test]
    fn int_out_of_range_is_rejected() {
        let mut buf = BytesMut::new();
        match Value::Int(i64::from(i32::MAX) + 1).to_sql(&Type::INT4, &mut buf) {
            Err(err) => assert!(err.to_string().contains("out of range")),
            Ok(_) => panic!("expected out of range error"),
        }
    }

    #[test]
    fn checked_encoding_rejects_mismatched_type() {
        for (value, ty) in [
            (Value::Int(5), Type::TEXT),
            (Value::from("abc"), Type::INT8),
            (Value::Float(1.5), Type::NUMERIC),
            (Value::Bool(true), Type::INT4),
        ] {
            let mut buf = BytesMut::new();
            match value.to_sql_checked(&ty, &mut buf) {
                Err(err) => assert!(err.downcast_ref::<WrongType>().is_some(), "{err}"),
                Ok(_) => panic!("{value:?} accepted for {ty}"),
            }
        }
    }

    #[test]
    fn checked_encoding_accepts_matching_type() {
        let mut buf = BytesMut::new();
        Value::Int(5).to_sql_checked(&Type::INT4, &mut buf).unwrap();
        assert_eq!(buf.len(), 4);

        let mut buf = BytesMut::new();
        Value::from("abc").to_sql_checked(&Type::TEXT, &mut buf).unwrap();
        assert_eq!(&buf[..], b"abc");

        let at = Value::Timestamp(Utc::now());
        for ty in [Type::TIMESTAMP, Type::TIMESTAMPTZ] {
            let mut buf = BytesMut::new();
            at.to_sql_checked(&ty, &mut buf).unwrap();
            assert_eq!(buf.len(), 8);
        }

        let mut buf = BytesMut::new();
        let is_null = Value::Null.to_sql_checked(&Type::UUID, &mut buf).unwrap();
        assert!(matches!(is_null, IsNull::Yes));
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(Value::Int(5)).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "int", "value": 5 }));
    }
}
