use crate::table::ColumnBinding;
use serde::{Deserialize, Serialize};

/// A model leaf.
///
/// The value comes from a column (`ref`), a literal (`value`), or both, in
/// which case the literal is the default used when the column is missing from
/// the connected table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub dmtype: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmrole: Option<String>,

    /// Column identifier the value is read from.
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    /// Literal value, or the text read from the current row in a row view.
    #[serde(default, rename = "value", skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Column position the attribute was bound to. Set by the bind pass.
    #[serde(skip)]
    pub binding: Option<ColumnBinding>,
}

/// Where an attribute takes its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource<'a> {
    Literal(&'a str),
    ColumnRef(&'a str),
    Unbound,
}

impl Attribute {
    pub fn new(dmtype: impl Into<String>) -> Self {
        Self {
            dmtype: dmtype.into(),
            dmrole: None,
            column: None,
            literal: None,
            unit: None,
            binding: None,
        }
    }

    pub fn dmrole(mut self, dmrole: impl Into<String>) -> Self {
        self.dmrole = Some(dmrole.into());
        self
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn literal(mut self, literal: impl Into<String>) -> Self {
        self.literal = Some(literal.into());
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// A column reference takes precedence over a literal.
    pub fn value_source(&self) -> ValueSource<'_> {
        match (&self.column, &self.literal) {
            (Some(column), _) => ValueSource::ColumnRef(column),
            (None, Some(literal)) => ValueSource::Literal(literal),
            (None, None) => ValueSource::Unbound,
        }
    }

    pub fn position(&self) -> Option<usize> {
        self.binding.as_ref().map(|binding| binding.position)
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }
}
