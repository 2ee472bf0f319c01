//! Typed row access
//!
//! A [`Row`] is an ephemeral view over one result tuple, handed to the row
//! callback during statement execution. It is only valid for the duration of
//! the callback invocation; `string`, `data`, and `timestamp` return
//! independent copies that are safe to retain afterwards.
//!
//! Getters apply SQLite's type-affinity coercion rules rather than strict
//! driver typing: a stored integer read as bool is a nonzero test, a stored
//! text column read as int is a numeric-prefix parse, and so on.

use chrono::{DateTime, Utc};
use rusqlite::types::ValueRef;

use super::error::StoreError;

/// A read-only typed view over one result row, addressed by zero-based
/// column position.
pub struct Row<'stmt> {
    inner: &'stmt rusqlite::Row<'stmt>,
}

impl<'stmt> Row<'stmt> {
    pub(crate) fn new(inner: &'stmt rusqlite::Row<'stmt>) -> Self {
        Row { inner }
    }

    /// Number of columns in this row.
    pub fn column_count(&self) -> usize {
        self.inner.as_ref().column_count()
    }

    fn value_ref(&self, at: usize) -> Result<ValueRef<'_>, StoreError> {
        self.inner.get_ref(at).map_err(|_| StoreError::ColumnIndex {
            index: at,
            count: self.column_count(),
        })
    }

    /// Read the column as a 64-bit integer.
    ///
    /// Reals are truncated, text is parsed by its numeric prefix (0 when
    /// non-numeric), blobs and NULL read as 0.
    pub fn int(&self, at: usize) -> Result<i64, StoreError> {
        Ok(match self.value_ref(at)? {
            ValueRef::Integer(v) => v,
            ValueRef::Real(v) => v as i64,
            ValueRef::Text(t) => text_to_i64(t),
            ValueRef::Blob(_) | ValueRef::Null => 0,
        })
    }

    /// Read the column as a boolean: the nonzero test over [`Row::int`].
    pub fn bool(&self, at: usize) -> Result<bool, StoreError> {
        Ok(self.int(at)? != 0)
    }

    /// Read the column as text, or `None` for NULL.
    ///
    /// Numeric columns are rendered, blobs are decoded as lossy UTF-8. The
    /// returned string is an independent copy.
    pub fn string(&self, at: usize) -> Result<Option<String>, StoreError> {
        Ok(match self.value_ref(at)? {
            ValueRef::Text(t) | ValueRef::Blob(t) => {
                Some(String::from_utf8_lossy(t).into_owned())
            }
            ValueRef::Integer(v) => Some(v.to_string()),
            ValueRef::Real(v) => Some(v.to_string()),
            ValueRef::Null => None,
        })
    }

    /// Read the column as a binary blob, or `None` for NULL.
    ///
    /// Text columns are returned as their UTF-8 bytes, numeric columns as the
    /// bytes of their rendered form. The returned buffer is an independent
    /// copy.
    pub fn data(&self, at: usize) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(match self.value_ref(at)? {
            ValueRef::Blob(b) | ValueRef::Text(b) => Some(b.to_vec()),
            ValueRef::Integer(v) => Some(v.to_string().into_bytes()),
            ValueRef::Real(v) => Some(v.to_string().into_bytes()),
            ValueRef::Null => None,
        })
    }

    /// Read the column as a timestamp stored as unix seconds, or `None` for
    /// NULL.
    pub fn timestamp(&self, at: usize) -> Result<Option<DateTime<Utc>>, StoreError> {
        if matches!(self.value_ref(at)?, ValueRef::Null) {
            return Ok(None);
        }
        let secs = self.int(at)?;
        match DateTime::from_timestamp(secs, 0) {
            Some(ts) => Ok(Some(ts)),
            None => Err(StoreError::execution(format!(
                "column {at} holds out-of-range timestamp {secs}"
            ))),
        }
    }
}

/// Numeric-prefix parse matching SQLite's text-to-integer coercion: leading
/// whitespace is skipped, an optional sign and the longest run of digits are
/// consumed, and anything else yields 0.
fn text_to_i64(text: &[u8]) -> i64 {
    let s = String::from_utf8_lossy(text);
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1i64, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let mut value: i64 = 0;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        value = value
            .saturating_mul(10)
            .saturating_add((b - b'0') as i64);
    }
    sign * value
}
