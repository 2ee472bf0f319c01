//! Error taxonomy for store operations
//!
//! Every failure surfaced by this crate is one of the variants below. The
//! split matters to callers: `StorageUnavailable` means the connection is
//! unusable and new writes should be dropped or diverted, `QuerySyntax` and
//! `ParameterBinding` are programmer errors that must not be retried, and
//! `Execution` covers runtime failures where the caller decides between
//! retrying (transient I/O) and dropping (constraint violations).

use std::path::{Path, PathBuf};

/// Errors produced by [`Connection`](crate::store::Connection) operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store file cannot be created, opened, or configured, or the
    /// connection handle is not open. Fatal for this `Connection` instance;
    /// construct a new one to resume access.
    #[error("storage unavailable at '{}': {reason}", path.display())]
    StorageUnavailable { path: PathBuf, reason: String },

    /// The query text failed to compile. Not retriable.
    #[error("query syntax error: {0}")]
    QuerySyntax(String),

    /// Parameter count or type does not match the query's placeholders.
    /// Not retriable.
    #[error("parameter binding error: {0}")]
    ParameterBinding(String),

    /// The statement failed during execution, e.g. a constraint violation
    /// or an I/O failure while stepping.
    #[error("execution error: {0}")]
    Execution(String),

    /// A typed row accessor was called with a column position outside the
    /// row's column count. This is a programming error at the call site and
    /// is surfaced as a distinct variant rather than a silently wrong value.
    #[error("column index {index} out of range (row has {count} columns)")]
    ColumnIndex { index: usize, count: usize },
}

impl StoreError {
    pub(crate) fn unavailable(path: &Path, reason: impl ToString) -> Self {
        StoreError::StorageUnavailable {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn syntax(err: impl ToString) -> Self {
        StoreError::QuerySyntax(err.to_string())
    }

    pub(crate) fn binding(err: impl ToString) -> Self {
        StoreError::ParameterBinding(err.to_string())
    }

    pub(crate) fn execution(err: impl ToString) -> Self {
        StoreError::Execution(err.to_string())
    }

    /// True if this error means the connection itself is unusable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::StorageUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_path() {
        let err = StoreError::unavailable(Path::new("/tmp/events.db"), "disk full");
        let msg = err.to_string();
        assert!(msg.contains("/tmp/events.db"));
        assert!(msg.contains("disk full"));
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_column_index_display() {
        let err = StoreError::ColumnIndex { index: 4, count: 3 };
        assert_eq!(
            err.to_string(),
            "column index 4 out of range (row has 3 columns)"
        );
        assert!(!err.is_unavailable());
    }
}
