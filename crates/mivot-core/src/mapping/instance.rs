use super::MappingNode;
use serde::{Deserialize, Serialize};

/// A declared object of the data model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub dmtype: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmrole: Option<String>,

    /// Globally unique declaration key, target of `dmref`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmid: Option<String>,

    /// Keys identifying this instance inside a GLOBALS collection.
    #[serde(
        default,
        rename = "primary_key",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub primary_keys: Vec<PrimaryKey>,

    #[serde(default)]
    pub children: Vec<MappingNode>,
}

/// `PRIMARY_KEY` marker of a collection item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryKey {
    #[serde(default)]
    pub dmtype: Option<String>,

    /// Literal key value.
    #[serde(default)]
    pub value: Option<String>,

    /// Column holding the key value, for row-dependent keys.
    #[serde(default, rename = "ref")]
    pub column: Option<String>,
}

impl Instance {
    pub fn new(dmtype: impl Into<String>) -> Self {
        Self {
            dmtype: dmtype.into(),
            dmrole: None,
            dmid: None,
            primary_keys: vec![],
            children: vec![],
        }
    }

    pub fn dmrole(mut self, dmrole: impl Into<String>) -> Self {
        self.dmrole = Some(dmrole.into());
        self
    }

    pub fn dmid(mut self, dmid: impl Into<String>) -> Self {
        self.dmid = Some(dmid.into());
        self
    }

    pub fn primary_key(mut self, value: impl Into<String>) -> Self {
        self.primary_keys.push(PrimaryKey {
            dmtype: None,
            value: Some(value.into()),
            column: None,
        });
        self
    }

    pub fn child(mut self, child: impl Into<MappingNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Returns `true` if one of this instance's literal primary keys equals
    /// `key`.
    pub fn has_primary_key(&self, key: &str) -> bool {
        self.primary_keys
            .iter()
            .any(|pk| pk.value.as_deref() == Some(key))
    }
}
