//! Prepared statement execution
//!
//! A [`Statement`] is the compiled, parameter-bound form of one query text.
//! Execution is pull-based: each step either yields a row (delivered to the
//! caller's callback) or completes. Statements are created per `perform` call
//! and never pooled; compiled resources are released when the statement drops.
//!
//! Only the first statement of a semicolon-separated text block is compiled
//! and executed. This mirrors the underlying engine and is a documented
//! limitation, not a batching feature.

use super::error::StoreError;
use super::row::Row;
use super::value::Value;

pub(crate) struct Statement<'conn> {
    stmt: rusqlite::Statement<'conn>,
}

impl<'conn> Statement<'conn> {
    /// Compile one statement from `query`. Compilation failures are always
    /// syntax errors from the caller's perspective.
    pub(crate) fn prepare(
        conn: &'conn rusqlite::Connection,
        query: &str,
    ) -> Result<Self, StoreError> {
        let stmt = conn.prepare(query).map_err(StoreError::syntax)?;
        Ok(Statement { stmt })
    }

    /// Bind `parameters` by position, 1-based as the engine counts them.
    ///
    /// The number of values must match the number of placeholders exactly;
    /// unbound slots and surplus values are both usage errors.
    pub(crate) fn bind(&mut self, parameters: &[Value]) -> Result<(), StoreError> {
        let expected = self.stmt.parameter_count();
        if parameters.len() != expected {
            return Err(StoreError::binding(format!(
                "query expects {expected} parameters, {} provided",
                parameters.len()
            )));
        }
        for (index, value) in parameters.iter().enumerate() {
            self.stmt
                .raw_bind_parameter(index + 1, value)
                .map_err(StoreError::binding)?;
        }
        Ok(())
    }

    /// Step through the result set, invoking `row_callback` for each row
    /// before advancing. A callback error aborts the remaining iteration and
    /// propagates; step failures (constraint violations, I/O) surface as
    /// execution errors.
    pub(crate) fn step_until_done<F>(mut self, mut row_callback: F) -> Result<(), StoreError>
    where
        F: FnMut(&Row<'_>) -> Result<(), StoreError>,
    {
        let mut rows = self.stmt.raw_query();
        loop {
            match rows.next() {
                Ok(Some(row)) => row_callback(&Row::new(row))?,
                Ok(None) => return Ok(()),
                Err(e) => return Err(StoreError::execution(e)),
            }
        }
    }
}
