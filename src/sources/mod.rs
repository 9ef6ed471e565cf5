//! Source adapters presenting a uniform column-data interface to the
//! document layer.
//!
//! Both adapter variants own a raw [`RowSet`] and a set of [`Bindings`];
//! the shared contract (bind a column, read the cached data, list bound
//! attributes, scan for distinct values) is provided once by
//! [`TabularSource`].

use std::collections::HashMap;

use tracing::debug;

use crate::attribute::Attribute;
use crate::error::Error;
use crate::value::Value;
use crate::Result;

mod delimited;
mod query;

pub use delimited::DelimitedFileSource;
pub use query::{QueryEngine, QuerySource};

/// Selects one column of the underlying row set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSelector {
    /// A zero-based column position.
    Index(usize),
    /// The final column of each row, whatever its position. Useful for
    /// pulling a trailing label column without knowing the row width.
    Last,
}

impl From<usize> for ColumnSelector {
    fn from(index: usize) -> Self {
        ColumnSelector::Index(index)
    }
}

/// A rectangular set of raw rows, each indexable by column position.
///
/// Column extraction is the single place where bounds are checked; a row
/// narrower than the requested index surfaces as
/// [`Error::ColumnIndexOutOfRange`] with that row's width.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    rows: Vec<Vec<Value>>,
}

impl RowSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Extracts the selected column across every row, in row order.
    pub fn column(&self, selector: ColumnSelector) -> Result<Vec<Value>> {
        self.rows
            .iter()
            .map(|row| {
                let index = match selector {
                    ColumnSelector::Index(index) => index,
                    ColumnSelector::Last => match row.len().checked_sub(1) {
                        Some(index) => index,
                        None => {
                            return Err(Error::ColumnIndexOutOfRange { index: 0, width: 0 })
                        }
                    },
                };

                row.get(index).cloned().ok_or(Error::ColumnIndexOutOfRange {
                    index,
                    width: row.len(),
                })
            })
            .collect()
    }

    /// Returns the distinct values of the selected column in first-seen
    /// order. Dedup is a linear scan so insertion order is preserved.
    pub fn unique_values(&self, selector: ColumnSelector) -> Result<Vec<Value>> {
        let mut unique = Vec::new();

        for value in self.column(selector)? {
            if !unique.contains(&value) {
                unique.push(value);
            }
        }

        Ok(unique)
    }
}

/// Bind-order attribute list plus the columns cached for them at bind time.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    attributes: Vec<Attribute>,
    columns: HashMap<String, Vec<Value>>,
}

/// The capability shared by all source adapters.
///
/// Implementors expose their row set and binding state; the contract
/// itself is implemented once in the provided methods.
pub trait TabularSource {
    /// The underlying raw row set.
    fn row_set(&self) -> &RowSet;

    fn bindings(&self) -> &Bindings;

    fn bindings_mut(&mut self) -> &mut Bindings;

    /// Binds `attribute` to the selected column, eagerly extracting and
    /// caching every row's value at that position.
    fn bind_attribute(&mut self, attribute: Attribute, column: ColumnSelector) -> Result<()> {
        let values = self.row_set().column(column)?;

        debug!(
            attribute = attribute.name(),
            ?column,
            rows = values.len(),
            "bound column to attribute"
        );

        let bindings = self.bindings_mut();
        bindings.columns.insert(attribute.name().to_string(), values);
        bindings.attributes.push(attribute);

        Ok(())
    }

    /// Returns the column cached for `attribute` at bind time.
    fn data(&self, attribute: &Attribute) -> Result<&[Value]> {
        self.bindings()
            .columns
            .get(attribute.name())
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownAttribute(attribute.name().to_string()))
    }

    /// The bound attributes, in bind order.
    fn attributes(&self) -> &[Attribute] {
        &self.bindings().attributes
    }

    /// Distinct raw values of the selected column, in first-seen order.
    /// Intended to pre-populate categorical choices before binding.
    fn unique_values(&self, column: ColumnSelector) -> Result<Vec<Value>> {
        self.row_set().unique_values(column)
    }

    /// Replaces the cached column for an already-bound attribute. The
    /// replacement must match the cached column's length; on failure the
    /// original column is left untouched.
    fn override_column(&mut self, attribute: &Attribute, values: Vec<Value>) -> Result<()> {
        let expected = self
            .bindings()
            .columns
            .get(attribute.name())
            .map(Vec::len)
            .ok_or_else(|| Error::UnknownAttribute(attribute.name().to_string()))?;

        if values.len() != expected {
            return Err(Error::RowCountMismatch {
                expected,
                actual: values.len(),
            });
        }

        self.bindings_mut()
            .columns
            .insert(attribute.name().to_string(), values);

        Ok(())
    }
}
