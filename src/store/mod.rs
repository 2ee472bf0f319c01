//! Embedded store infrastructure
//!
//! This module provides the durable local storage substrate:
//! - [`Connection`]: lifecycle of one store file plus statement execution
//! - [`Row`]: typed, position-addressed access to one result row
//! - [`Value`]: typed parameter values for positional binding
//! - [`StoreError`]: the error taxonomy for all of the above
//!
//! The schema is entirely caller-defined: the store imposes no tables of its
//! own, and callers issue plain SQL through [`Connection::perform`].

mod connection;
mod error;
mod row;
mod statement;
mod value;

pub use connection::Connection;
pub use error::StoreError;
pub use row::Row;
pub use value::Value;
