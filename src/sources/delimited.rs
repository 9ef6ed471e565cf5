//! Delimited text file adapter.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, instrument};

use super::{Bindings, RowSet, TabularSource};
use crate::value::Value;
use crate::Result;

/// Adapter over a semicolon-delimited text file.
///
/// The whole file is parsed eagerly at construction. Fields are taken
/// verbatim with no quote character, so a field containing the delimiter
/// cannot be represented. Every field is ingested as text; the delimited
/// format carries no type information.
#[derive(Debug, Clone)]
pub struct DelimitedFileSource {
    rows: RowSet,
    bindings: Bindings,
}

impl DelimitedFileSource {
    /// Parses the file at `path`, skipping a leading header row when
    /// `has_header` is set.
    #[instrument(skip(path), err)]
    pub fn from_path<P: AsRef<Path>>(path: P, has_header: bool) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b';')
            .quoting(false)
            .has_headers(has_header)
            .flexible(true)
            .from_path(path.as_ref())?;

        let mut rows = RowSet::new();
        for record in reader.records() {
            let record = record?;
            rows.push_row(record.iter().map(Value::from).collect());
        }

        debug!(
            path = %path.as_ref().display(),
            rows = rows.len(),
            "parsed delimited source"
        );

        Ok(Self {
            rows,
            bindings: Bindings::default(),
        })
    }
}

impl TabularSource for DelimitedFileSource {
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
