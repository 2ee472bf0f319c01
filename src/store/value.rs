//! Typed parameter values for positional binding
//!
//! A [`Value`] is one bound parameter in a query. Booleans are stored as 0/1
//! integers and timestamps as unix seconds, matching how the rest of the
//! pipeline reads them back through the row accessors.

use chrono::{DateTime, Utc};
use rusqlite::types::{ToSqlOutput, Value as SqlValue, ValueRef};
use rusqlite::ToSql;

/// A typed parameter value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 64-bit signed integer.
    Integer(i64),
    /// UTF-8 text.
    Text(String),
    /// Stored as integer 0 or 1.
    Bool(bool),
    /// Binary blob.
    Blob(Vec<u8>),
    /// Stored as unix seconds (whole-second precision).
    Timestamp(DateTime<Utc>),
    /// SQL NULL.
    Null,
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Value::Integer(v) => ToSqlOutput::from(*v),
            Value::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Value::Bool(b) => ToSqlOutput::from(*b as i64),
            Value::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
            Value::Timestamp(t) => ToSqlOutput::from(t.timestamp()),
            Value::Null => ToSqlOutput::Owned(SqlValue::Null),
        })
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
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

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Blob(v.to_vec())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(42i64), Value::Integer(42));
        assert_eq!(Value::from(7i32), Value::Integer(7));
        assert_eq!(Value::from("hello"), Value::Text("hello".to_string()));
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(vec![1u8, 2, 3]), Value::Blob(vec![1, 2, 3]));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
    }

    #[test]
    fn test_bool_binds_as_integer() {
        let out = Value::Bool(true).to_sql().unwrap();
        assert_eq!(out, ToSqlOutput::Owned(SqlValue::Integer(1)));
        let out = Value::Bool(false).to_sql().unwrap();
        assert_eq!(out, ToSqlOutput::Owned(SqlValue::Integer(0)));
    }

    #[test]
    fn test_timestamp_binds_as_unix_seconds() {
        let ts = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let value = Value::Timestamp(ts);
        let out = value.to_sql().unwrap();
        assert_eq!(out, ToSqlOutput::Owned(SqlValue::Integer(1_700_000_000)));
    }
}
