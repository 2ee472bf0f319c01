#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! Eventstash - a durable local queue substrate for analytics records
//!
//! Eventstash is the embedded storage layer of an analytics pipeline: a
//! crash-safe, SQLite-backed store for durably queueing structured records
//! (events, session state) on device before an uploader drains them. It is
//! deliberately schema-free: callers define their own tables through plain
//! SQL, and eventstash provides the connection lifecycle, typed parameter
//! binding, and typed row access underneath.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - **[`store`]**: The storage core
//!   - `Connection`: lifecycle of one store file (connect, perform, close)
//!   - `Row`: typed, position-addressed view over one result row
//!   - `Value`: typed positional parameters
//!   - `StoreError`: the error taxonomy
//!
//! - **[`config`]**: Store location resolution (data directory, file name)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use eventstash::{Connection, Value};
//!
//! # fn main() -> Result<(), eventstash::StoreError> {
//! let mut conn = Connection::new("/tmp/events.db");
//! conn.connect()?;
//!
//! conn.perform(
//!     "CREATE TABLE IF NOT EXISTS pending (
//!         id INTEGER PRIMARY KEY AUTOINCREMENT,
//!         name TEXT,
//!         payload BLOB
//!     )",
//!     &[],
//! )?;
//!
//! conn.perform(
//!     "INSERT INTO pending (name, payload) VALUES (?, ?)",
//!     &[Value::from("session_start"), Value::from(vec![0u8; 16])],
//! )?;
//!
//! conn.perform_with("SELECT id, name FROM pending ORDER BY id ASC", &[], |row| {
//!     println!("{}: {:?}", row.int(0)?, row.string(1)?);
//!     Ok(())
//! })?;
//!
//! conn.close();
//! # Ok(())
//! # }
//! ```
//!
//! # Durability and reopening
//!
//! The store file is the sole source of truth. A closed `Connection` is never
//! reused; construct a fresh one against the same path and everything
//! committed before the close is visible:
//!
//! ```rust,no_run
//! use eventstash::Connection;
//!
//! # fn main() -> Result<(), eventstash::StoreError> {
//! let mut conn = Connection::new("/tmp/events.db");
//! conn.connect()?;
//! // ... write queued records ...
//! conn.close();
//!
//! let mut conn = Connection::new("/tmp/events.db");
//! conn.connect()?;
//! // previously committed rows are visible here
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency contract
//!
//! A `Connection` executes synchronously on the calling thread, one statement
//! at a time. It is not safe for concurrent invocation; callers sharing one
//! connection (typically the event writer and the upload drainer) must
//! serialize access behind their own queue or lock, and two connections must
//! not write the same path concurrently.

pub mod config;
pub mod store;

pub use config::StashConfig;
pub use store::{Connection, Row, StoreError, Value};
