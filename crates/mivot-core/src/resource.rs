use crate::{mapping::MappingBlock, table::Table, Result};
use serde::{Deserialize, Serialize};

use std::path::Path;

/// A parsed document: the mapping block (if any) and the tables it annotates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<MappingBlock>,

    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Resource {
    pub fn new(mapping: MappingBlock) -> Self {
        Self {
            mapping: Some(mapping),
            tables: vec![],
        }
    }

    pub fn table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    pub fn from_json(src: &str) -> Result<Self> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    /// Finds a table by declared id, then by name.
    pub fn find_table(&self, table_ref: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|table| table.id.as_deref() == Some(table_ref))
            .or_else(|| {
                self.tables
                    .iter()
                    .find(|table| table.name.as_deref() == Some(table_ref))
            })
    }
}
