use super::MappingNode;
use crate::Result;
use serde::{Deserialize, Serialize};

/// The declarative description binding a data model to table columns.
///
/// This is the already-parsed form handed over by the mapping-file reader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingBlock {
    /// Data models the block refers to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<ModelDecl>,

    /// GLOBALS and TEMPLATES sections, in document order.
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// `MODEL` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDecl {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Section {
    /// Row-independent declarations.
    Globals {
        #[serde(default)]
        children: Vec<MappingNode>,
    },

    /// Row-dependent declarations for one table.
    Templates {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tableref: Option<String>,

        #[serde(default)]
        children: Vec<MappingNode>,
    },
}

impl MappingBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(src: &str) -> Result<Self> {
        Ok(serde_json::from_str(src)?)
    }

    pub fn model(mut self, name: impl Into<String>, url: Option<&str>) -> Self {
        self.models.push(ModelDecl {
            name: name.into(),
            url: url.map(String::from),
        });
        self
    }

    pub fn globals(mut self, children: Vec<MappingNode>) -> Self {
        self.sections.push(Section::Globals { children });
        self
    }

    pub fn templates(mut self, tableref: Option<&str>, children: Vec<MappingNode>) -> Self {
        self.sections.push(Section::Templates {
            tableref: tableref.map(String::from),
            children,
        });
        self
    }
}
