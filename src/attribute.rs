use serde::{Deserialize, Serialize};
use std::fmt;

/// The two supported attribute types.
///
/// Every attribute starts out numeric and flips to categorical as soon as a
/// choice is added. The transition is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Numeric,
    Categorical,
}

/// A named column descriptor of the relation being exported.
///
/// The name is the attribute's identity for its whole lifetime; uniqueness
/// within a document is not enforced. Categorical choices keep insertion
/// order and are not deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
    #[serde(default)]
    choices: Vec<String>,
}

impl Attribute {
    /// Create a numeric attribute named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Numeric,
            choices: Vec::new(),
        }
    }

    /// Create an attribute pre-populated with categorical choices.
    pub fn categorical<I, S>(name: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut attribute = Self::new(name);
        attribute.add_choices(choices);
        attribute
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Appends a categorical choice, flipping a numeric attribute to
    /// categorical permanently. Duplicates are kept.
    pub fn add_choice(&mut self, choice: impl Into<String>) {
        self.kind = AttributeKind::Categorical;
        self.choices.push(choice.into());
    }

    /// Appends every choice in order. An empty sequence adds nothing and
    /// leaves the kind untouched.
    pub fn add_choices<I, S>(&mut self, choices: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for choice in choices {
            self.add_choice(choice);
        }
    }

    /// Renders the `@ATTRIBUTE` declaration line for this attribute.
    pub fn declaration(&self) -> String {
        match self.kind {
            AttributeKind::Numeric => format!("@ATTRIBUTE {}\tNUMERIC", self.name),
            AttributeKind::Categorical => {
                format!("@ATTRIBUTE {}\t{{{}}}", self.name, self.choices.join(","))
            }
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.declaration())
    }
}
