use super::MappingNode;
use serde::{Deserialize, Serialize};

/// An ordered sequence of instances or attributes whose length and order are
/// fixed by the mapping block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmrole: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmid: Option<String>,

    #[serde(default)]
    pub items: Vec<MappingNode>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dmrole(mut self, dmrole: impl Into<String>) -> Self {
        self.dmrole = Some(dmrole.into());
        self
    }

    pub fn dmid(mut self, dmid: impl Into<String>) -> Self {
        self.dmid = Some(dmid.into());
        self
    }

    pub fn item(mut self, item: impl Into<MappingNode>) -> Self {
        self.items.push(item.into());
        self
    }
}
