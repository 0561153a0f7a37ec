use crate::Value;
use serde::{Deserialize, Serialize};

use std::ops;

/// A table row: one value per field, in field order.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    pub fn from_vec(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Text of the cell at `position`, or `None` past the end of the row.
    pub fn text_at(&self, position: usize) -> Option<String> {
        self.values.get(position).map(Value::to_text)
    }
}

impl ops::Deref for Row {
    type Target = [Value];

    fn deref(&self) -> &Self::Target {
        &self.values[..]
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Self { values }
    }
}

impl<const N: usize> From<[Value; N]> for Row {
    fn from(values: [Value; N]) -> Self {
        Self {
            values: values.into(),
        }
    }
}
