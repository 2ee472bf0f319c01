//! Store connection management
//!
//! This module provides the core connection wrapper: one [`Connection`] owns
//! one on-disk store file and serializes all statement execution against it.
//!
//! A connection moves through three states: unopened (bound to a path,
//! filesystem untouched), open (native handle established), and closed. A
//! closed connection is never revived; construct a fresh `Connection` against
//! the same path to resume access. The file itself is the sole source of
//! truth: everything committed before `close` is visible to the next
//! connection on the same path.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::error::StoreError;
use super::row::Row;
use super::value::Value;

enum State {
    Unopened,
    Open(rusqlite::Connection),
    Closed,
}

/// An owned handle to one embedded store file.
///
/// All operations execute synchronously on the calling thread and one
/// statement at a time; `perform` takes `&mut self` so re-entrant execution
/// from inside a row callback is a compile error. Callers sharing one
/// connection across threads must serialize access themselves, and two
/// connections must not write the same path concurrently.
pub struct Connection {
    path: PathBuf,
    state: State,
}

impl Connection {
    /// Create an unopened connection bound to `path`.
    ///
    /// Does not touch the filesystem; call [`Connection::connect`] to open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Connection {
            path: path.into(),
            state: State::Unopened,
        }
    }

    /// Path of the store file this connection is bound to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if the native handle is currently established.
    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Open(_))
    }

    /// Establish the native handle, creating the store file if absent.
    ///
    /// Succeeds identically whether the file is freshly created or already
    /// present, and is a no-op on an already-open connection. Fails with
    /// [`StoreError::StorageUnavailable`] if the path cannot be created or
    /// written, if the existing file is not a valid store, or if this
    /// connection has been closed.
    pub fn connect(&mut self) -> Result<(), StoreError> {
        match self.state {
            State::Open(_) => return Ok(()),
            State::Closed => {
                return Err(StoreError::unavailable(
                    &self.path,
                    "connection is closed; construct a new one to reopen",
                ))
            }
            State::Unopened => {}
        }

        let conn = rusqlite::Connection::open(&self.path)
            .map_err(|e| StoreError::unavailable(&self.path, e))?;
        Self::configure(&conn).map_err(|e| StoreError::unavailable(&self.path, e))?;

        debug!(path = %self.path.display(), "store opened");
        self.state = State::Open(conn);
        Ok(())
    }

    /// Apply the standard pragma configuration to a fresh handle.
    ///
    /// A corrupt or non-store file passes `open` but fails here with
    /// `SQLITE_NOTADB`, which is how corruption surfaces at connect time.
    fn configure(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
        // WAL keeps readers unblocked during queue drains
        let _: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;

        conn.execute("PRAGMA synchronous=NORMAL", [])?;

        // SQLite does not enforce foreign keys by default
        conn.execute("PRAGMA foreign_keys=ON", [])?;

        Ok(())
    }

    fn handle(&self) -> Result<&rusqlite::Connection, StoreError> {
        match &self.state {
            State::Open(conn) => Ok(conn),
            State::Unopened => Err(StoreError::unavailable(&self.path, "connection not opened")),
            State::Closed => Err(StoreError::unavailable(&self.path, "connection is closed")),
        }
    }

    /// Compile and execute one statement with positional parameters,
    /// discarding any result rows.
    ///
    /// Only the first statement of a multi-statement text is executed.
    pub fn perform(&mut self, query: &str, parameters: &[Value]) -> Result<(), StoreError> {
        self.perform_with(query, parameters, |_| Ok(()))
    }

    /// Compile and execute one statement, invoking `row_callback`
    /// synchronously for each result row before advancing.
    ///
    /// The [`Row`] view is only valid inside the callback; copy out anything
    /// that must be retained. An error returned by the callback aborts the
    /// remaining iteration and propagates to the caller.
    pub fn perform_with<F>(
        &mut self,
        query: &str,
        parameters: &[Value],
        row_callback: F,
    ) -> Result<(), StoreError>
    where
        F: FnMut(&Row<'_>) -> Result<(), StoreError>,
    {
        let conn = self.handle()?;
        let mut statement = super::statement::Statement::prepare(conn, query)?;
        statement.bind(parameters)?;
        statement.step_until_done(row_callback)
    }

    /// Release the native handle.
    ///
    /// Safe to call multiple times; the second call is a no-op. All row views
    /// produced by this connection are invalid afterwards, and the connection
    /// cannot be reopened.
    pub fn close(&mut self) {
        if let State::Open(conn) = std::mem::replace(&mut self.state, State::Closed) {
            if let Err((_, e)) = conn.close() {
                warn!(path = %self.path.display(), error = %e, "error while closing store");
            }
            debug!(path = %self.path.display(), "store closed");
        }
    }

    /// Close the connection and delete the store file.
    pub fn destroy(mut self) -> Result<(), StoreError> {
        self.close();
        std::fs::remove_file(&self.path).map_err(|e| StoreError::unavailable(&self.path, e))?;
        info!(path = %self.path.display(), "store destroyed");
        Ok(())
    }

    /// Check whether a table exists in the store.
    pub fn table_exists(&mut self, table_name: &str) -> Result<bool, StoreError> {
        let mut count = 0;
        self.perform_with(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            &[Value::from(table_name)],
            |row| {
                count = row.int(0)?;
                Ok(())
            },
        )?;
        Ok(count > 0)
    }

    /// Row count of a table.
    pub fn table_count(&mut self, table_name: &str) -> Result<u64, StoreError> {
        let query = format!("SELECT COUNT(*) FROM {}", table_name);
        let mut count = 0;
        self.perform_with(&query, &[], |row| {
            count = row.int(0)?;
            Ok(())
        })?;
        Ok(count as u64)
    }

    /// Read `PRAGMA user_version`, for caller-managed schema migrations.
    pub fn user_version(&mut self) -> Result<i64, StoreError> {
        let mut version = 0;
        self.perform_with("PRAGMA user_version", &[], |row| {
            version = row.int(0)?;
            Ok(())
        })?;
        Ok(version)
    }

    /// Set `PRAGMA user_version`.
    pub fn set_user_version(&mut self, version: i64) -> Result<(), StoreError> {
        let conn = self.handle()?;
        conn.pragma_update(None, "user_version", version)
            .map_err(StoreError::execution)
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}
