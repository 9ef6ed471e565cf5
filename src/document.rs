//! Relation document assembly and serialization.

use std::collections::HashMap;
use std::io::Write as _;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::attribute::Attribute;
use crate::error::Error;
use crate::sources::TabularSource;
use crate::value::Value;
use crate::Result;

/// An ARFF document under assembly: a named relation, its ordered
/// attribute declarations and the column data backing them.
///
/// Attribute order is the authoritative column order for serialization.
/// The first successful [`add_data`](Document::add_data) call establishes
/// the document's row count; every later column must match it exactly.
#[derive(Debug, Clone, derive_new::new)]
pub struct Document {
    #[new(into)]
    relation_name: String,
    #[new(default)]
    attributes: Vec<Attribute>,
    #[new(default)]
    column_data: HashMap<String, Vec<Value>>,
    #[new(default)]
    row_count: Option<usize>,
}

impl Document {
    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn row_count(&self) -> Option<usize> {
        self.row_count
    }

    /// Appends an attribute declaration. No dedup check is made;
    /// registering the same attribute twice yields two declarations
    /// sharing one column of data.
    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Stores `values` as the column for `attribute`, replacing any prior
    /// data under that name.
    ///
    /// Fails with [`Error::RowCountMismatch`] if a row count is already
    /// established and the lengths differ, and with
    /// [`Error::UnknownAttribute`] if the attribute was never registered.
    /// Both checks run before any mutation, so a failed call leaves the
    /// document unchanged.
    pub fn add_data<I, V>(&mut self, attribute: &Attribute, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();

        if let Some(expected) = self.row_count {
            if values.len() != expected {
                return Err(Error::RowCountMismatch {
                    expected,
                    actual: values.len(),
                });
            }
        }

        if !self
            .attributes
            .iter()
            .any(|registered| registered.name() == attribute.name())
        {
            return Err(Error::UnknownAttribute(attribute.name().to_string()));
        }

        self.row_count.get_or_insert(values.len());
        self.column_data
            .insert(attribute.name().to_string(), values);

        Ok(())
    }

    /// Pulls every attribute bound on `source`, registering it and copying
    /// its extracted column, in the source's bind order. This is the sole
    /// integration point between the source layer and the document; the
    /// document owns its copy of the data afterwards.
    #[instrument(skip(self, source), err)]
    pub fn bind_source<S: TabularSource>(&mut self, source: &S) -> Result<()> {
        for attribute in source.attributes() {
            let values = source.data(attribute)?.to_vec();

            debug!(attribute = attribute.name(), rows = values.len(), "binding column");

            self.add_attribute(attribute.clone());
            self.add_data(attribute, values)?;
        }

        Ok(())
    }

    /// Assembles the full textual document: the relation declaration, one
    /// attribute declaration per line in registration order, then the
    /// `@DATA` section with one comma-joined line per row.
    pub fn serialize(&self) -> Result<String> {
        let mut out = format!("@RELATION {}\n\n", self.relation_name);

        for attribute in &self.attributes {
            out.push_str(&attribute.declaration());
            out.push('\n');
        }

        out.push_str("\n@DATA\n");

        for row in 0..self.row_count.unwrap_or(0) {
            let mut fields = Vec::with_capacity(self.attributes.len());

            for attribute in &self.attributes {
                let value = self
                    .column_data
                    .get(attribute.name())
                    .and_then(|column| column.get(row))
                    .ok_or_else(|| Error::MissingRowData {
                        attribute: attribute.name().to_string(),
                        row,
                    })?;

                fields.push(value.to_string());
            }

            out.push_str(&fields.join(","));
            out.push('\n');
        }

        Ok(out)
    }

    /// Serializes the document and writes it to `destination`.
    ///
    /// The text is written to a temporary file beside the destination and
    /// renamed into place, so a failed write never leaves a truncated
    /// document at the destination.
    #[instrument(skip(self, destination), err)]
    pub fn export<P: AsRef<Path>>(&self, destination: P) -> Result<()> {
        let destination = destination.as_ref();
        let contents = self.serialize()?;

        let parent = destination
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut file = tempfile::NamedTempFile::new_in(parent).map_err(Error::Write)?;
        file.write_all(contents.as_bytes()).map_err(Error::Write)?;
        file.persist(destination)
            .map_err(|error| Error::Write(error.error))?;

        info!(
            relation = %self.relation_name,
            destination = %destination.display(),
            "exported document"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Document {
        let a = Attribute::new("a");
        let b = Attribute::new("b");
        let c = Attribute::categorical("c", ["choice1", "choice2", "choice3"]);

        let mut doc = Document::new("sample");
        doc.add_attribute(a.clone());
        doc.add_attribute(b.clone());
        doc.add_attribute(c.clone());

        doc.add_data(&a, [4, 3, 2, 1]).unwrap();
        doc.add_data(&b, [1, 2, 3, 4]).unwrap();
        doc.add_data(&c, ["choice1", "choice2", "choice1", "choice2"])
            .unwrap();

        doc
    }

    #[test]
    fn test_first_add_data_establishes_row_count() {
        let a = Attribute::new("a");
        let mut doc = Document::new("test");
        doc.add_attribute(a.clone());

        assert_eq!(doc.row_count(), None);
        doc.add_data(&a, [1, 2, 3]).unwrap();
        assert_eq!(doc.row_count(), Some(3));
    }

    #[test]
    fn test_row_count_mismatch_leaves_existing_data_unchanged() {
        let mut doc = sample_document();
        let b = Attribute::new("b");

        let err = doc.add_data(&b, [9, 9, 9]).unwrap_err();
        assert!(matches!(
            err,
            Error::RowCountMismatch {
                expected: 4,
                actual: 3
            }
        ));

        // The failed call must not clobber the column stored earlier.
        let serialized = doc.serialize().unwrap();
        assert!(serialized.contains("4,1,choice1"));
    }

    #[test]
    fn test_add_data_for_unregistered_attribute_fails() {
        let mut doc = Document::new("test");
        let ghost = Attribute::new("ghost");

        let err = doc.add_data(&ghost, [1, 2]).unwrap_err();
        assert!(matches!(err, Error::UnknownAttribute(name) if name == "ghost"));
        assert_eq!(doc.row_count(), None);
    }

    #[test]
    fn test_replacing_a_column_keeps_the_row_count() {
        let a = Attribute::new("a");
        let mut doc = Document::new("test");
        doc.add_attribute(a.clone());

        doc.add_data(&a, [1, 2]).unwrap();
        doc.add_data(&a, [3, 4]).unwrap();

        assert_eq!(doc.row_count(), Some(2));
        assert!(doc.serialize().unwrap().ends_with("@DATA\n3\n4\n"));
    }

    #[test]
    fn test_serialized_layout() {
        let doc = sample_document();
        let serialized = doc.serialize().unwrap();

        let expected = "@RELATION sample\n\n\
                        @ATTRIBUTE a\tNUMERIC\n\
                        @ATTRIBUTE b\tNUMERIC\n\
                        @ATTRIBUTE c\t{choice1,choice2,choice3}\n\
                        \n\
                        @DATA\n\
                        4,1,choice1\n\
                        3,2,choice2\n\
                        2,3,choice1\n\
                        1,4,choice2\n";

        assert_eq!(serialized, expected);
    }

    #[test]
    fn test_data_section_row_and_column_order() {
        let doc = sample_document();
        let serialized = doc.serialize().unwrap();

        let data_section = serialized.split_once("@DATA\n").unwrap().1;
        assert_eq!(
            data_section,
            "4,1,choice1\n3,2,choice2\n2,3,choice1\n1,4,choice2\n"
        );
    }

    #[test]
    fn test_attribute_without_data_fails_at_serialize_time() {
        let a = Attribute::new("a");
        let b = Attribute::new("b");

        let mut doc = Document::new("test");
        doc.add_attribute(a.clone());
        doc.add_attribute(b);
        doc.add_data(&a, [1, 2]).unwrap();

        let err = doc.serialize().unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRowData { attribute, row: 0 } if attribute == "b"
        ));
    }

    #[test]
    fn test_document_without_data_serializes_headers_only() {
        let mut doc = Document::new("empty");
        doc.add_attribute(Attribute::new("a"));

        let serialized = doc.serialize().unwrap();
        assert_eq!(
            serialized,
            "@RELATION empty\n\n@ATTRIBUTE a\tNUMERIC\n\n@DATA\n"
        );
    }

    #[test]
    fn test_export_writes_serialized_text() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("sample.arff");

        let doc = sample_document();
        doc.export(&destination).unwrap();

        let written = std::fs::read_to_string(&destination).unwrap();
        assert_eq!(written, doc.serialize().unwrap());
    }

    #[test]
    fn test_export_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("sample.arff");
        std::fs::write(&destination, "stale contents").unwrap();

        let doc = sample_document();
        doc.export(&destination).unwrap();

        let written = std::fs::read_to_string(&destination).unwrap();
        assert!(written.starts_with("@RELATION sample"));
    }

    #[test]
    fn test_failed_export_leaves_no_destination_file() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("sample.arff");

        let a = Attribute::new("a");
        let mut doc = Document::new("broken");
        doc.add_attribute(a.clone());
        doc.add_attribute(Attribute::new("no_data"));
        doc.add_data(&a, [1]).unwrap();

        assert!(doc.export(&destination).is_err());
        assert!(!destination.exists());
    }
}
