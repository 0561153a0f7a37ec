use super::{NodeTag, TagKind};
use serde::{Deserialize, Serialize};

/// Row-join metadata.
///
/// Joins are parked aside when a table is connected and never expanded by the
/// engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    #[serde(skip, default = "Join::placeholder_tag")]
    pub tag: NodeTag,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmrole: Option<String>,

    #[serde(default, rename = "sourceref", skip_serializing_if = "Option::is_none")]
    pub source_ref: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmref: Option<String>,

    #[serde(default, rename = "where", skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<JoinCondition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinCondition {
    pub primary_key: String,
    pub foreign_key: String,
}

impl Join {
    fn placeholder_tag() -> NodeTag {
        NodeTag::placeholder(TagKind::Join)
    }

    pub fn new(source_ref: impl Into<String>) -> Self {
        Self {
            tag: Self::placeholder_tag(),
            dmrole: None,
            source_ref: Some(source_ref.into()),
            dmref: None,
            conditions: vec![],
        }
    }

    pub fn dmrole(mut self, dmrole: impl Into<String>) -> Self {
        self.dmrole = Some(dmrole.into());
        self
    }

    pub fn on(mut self, primary_key: impl Into<String>, foreign_key: impl Into<String>) -> Self {
        self.conditions.push(JoinCondition {
            primary_key: primary_key.into(),
            foreign_key: foreign_key.into(),
        });
        self
    }
}
