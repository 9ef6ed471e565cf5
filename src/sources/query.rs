//! Query-result adapter.

use tracing::{debug, instrument};

use super::{Bindings, RowSet, TabularSource};
use crate::error::Error;
use crate::value::Value;
use crate::Result;

/// A query-execution capability provided by the caller.
///
/// The crate does not ship a relational client; callers wrap whatever
/// engine they already use. The contract is narrow: run the query text,
/// return a list of rows, each row indexable by column position.
pub trait QueryEngine {
    type Error: std::error::Error + Send + Sync + 'static;

    fn run_query(&mut self, query: &str) -> core::result::Result<Vec<Vec<Value>>, Self::Error>;
}

/// Adapter accumulating result rows from a [`QueryEngine`].
#[derive(Debug, derive_new::new)]
pub struct QuerySource<E> {
    engine: E,
    #[new(default)]
    rows: RowSet,
    #[new(default)]
    bindings: Bindings,
}

impl<E: QueryEngine> QuerySource<E> {
    /// Executes `query` and appends every returned row to the row set.
    ///
    /// May be called repeatedly; rows accumulate across calls. The row
    /// shape is not validated against earlier results, so a query with a
    /// different column count surfaces as an out-of-range column on a
    /// later bind rather than here.
    #[instrument(skip(self, query), err)]
    pub fn run_query(&mut self, query: &str) -> Result<()> {
        let returned = self
            .engine
            .run_query(query)
            .map_err(|error| Error::QueryExecution(Box::new(error)))?;

        debug!(rows = returned.len(), total = self.rows.len(), "query appended rows");

        for row in returned {
            self.rows.push_row(row);
        }

        Ok(())
    }
}

impl<E> TabularSource for QuerySource<E> {
    fn row_set(&self) -> &RowSet {
        &self.rows
    }

    fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }
}
