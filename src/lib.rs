//! Convert tabular data into ARFF relation documents.
//!
//! Three kinds of input feed the same assembly path: a semicolon-delimited
//! text file ([`DelimitedFileSource`]), the result set of a relational
//! query ([`QuerySource`] over a caller-provided [`QueryEngine`]), or
//! columns built by hand. An [`Attribute`] is numeric until a categorical
//! choice is added; a [`Document`] registers attributes, collects their
//! columns (directly or by pulling a bound source) and serializes the
//! `@RELATION` / `@ATTRIBUTE` / `@DATA` layout.
//!
//! ```
//! use arff_export::prelude::*;
//!
//! # fn main() -> arff_export::Result<()> {
//! let a = Attribute::new("column1");
//! let b = Attribute::new("column2");
//! let c = Attribute::categorical("column3", ["choice1", "choice2", "choice3"]);
//!
//! let mut doc = Document::new("sample");
//! doc.add_attribute(a.clone());
//! doc.add_attribute(b.clone());
//! doc.add_attribute(c.clone());
//!
//! doc.add_data(&a, [4, 3, 2, 1])?;
//! doc.add_data(&b, [1, 2, 3, 4])?;
//! doc.add_data(&c, ["choice1", "choice2", "choice1", "choice2"])?;
//!
//! let text = doc.serialize()?;
//! assert!(text.starts_with("@RELATION sample"));
//! # Ok(())
//! # }
//! ```

pub mod attribute;
pub mod document;
pub mod error;
pub mod sources;
pub mod value;

/// Prelude to import all relevant models and functions
pub mod prelude {
    pub use crate::attribute::{Attribute, AttributeKind};
    pub use crate::document::Document;
    pub use crate::error::Error;
    pub use crate::sources::{
        ColumnSelector, DelimitedFileSource, QueryEngine, QuerySource, RowSet, TabularSource,
    };
    pub use crate::value::Value;
}

pub use attribute::{Attribute, AttributeKind};
pub use document::Document;
pub use error::Error;
pub use sources::{ColumnSelector, DelimitedFileSource, QueryEngine, QuerySource, TabularSource};
pub use value::Value;

pub type Result<T> = core::result::Result<T, error::Error>;
