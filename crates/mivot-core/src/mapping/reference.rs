use super::{NodeTag, TagKind};
use serde::{Deserialize, Serialize};

/// Placeholder for an object declared elsewhere.
///
/// Resolved either directly through `dmref`, or by primary key inside the
/// GLOBALS collection named by `source_ref`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(skip, default = "Reference::placeholder_tag")]
    pub tag: NodeTag,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmrole: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dmref: Option<String>,

    #[serde(default, rename = "sourceref", skip_serializing_if = "Option::is_none")]
    pub source_ref: Option<String>,

    #[serde(
        default,
        rename = "foreign_key",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub foreign_keys: Vec<ForeignKey>,
}

/// `FOREIGN_KEY` marker of a collection lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Column holding the key for row-dependent lookups.
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    /// Literal key value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Reference {
    fn placeholder_tag() -> NodeTag {
        NodeTag::placeholder(TagKind::Reference)
    }

    /// A reference to the object declared with `dmid`.
    pub fn to(dmref: impl Into<String>) -> Self {
        Self {
            tag: Self::placeholder_tag(),
            dmrole: None,
            dmref: Some(dmref.into()),
            source_ref: None,
            foreign_keys: vec![],
        }
    }

    /// A lookup of `key` in the GLOBALS collection `source_ref`.
    pub fn by_key(source_ref: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            tag: Self::placeholder_tag(),
            dmrole: None,
            dmref: None,
            source_ref: Some(source_ref.into()),
            foreign_keys: vec![ForeignKey {
                column: None,
                value: Some(key.into()),
            }],
        }
    }

    /// A lookup in the GLOBALS collection `source_ref` keyed by the value of
    /// `column` in the current row.
    pub fn by_column(source_ref: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            tag: Self::placeholder_tag(),
            dmrole: None,
            dmref: None,
            source_ref: Some(source_ref.into()),
            foreign_keys: vec![ForeignKey {
                column: Some(column.into()),
                value: None,
            }],
        }
    }

    pub fn dmrole(mut self, dmrole: impl Into<String>) -> Self {
        self.dmrole = Some(dmrole.into());
        self
    }

    /// Returns `true` if the lookup key is read from a row, which makes the
    /// reference unresolvable until a row is loaded.
    pub fn is_dynamic(&self) -> bool {
        self.dmref.is_none() && self.foreign_keys.iter().any(|fk| fk.column.is_some())
    }

    /// The literal foreign-key value, if any.
    pub fn key_value(&self) -> Option<&str> {
        self.foreign_keys.iter().find_map(|fk| fk.value.as_deref())
    }

    /// The column holding the foreign-key value, if any.
    pub fn key_column(&self) -> Option<&str> {
        self.foreign_keys.iter().find_map(|fk| fk.column.as_deref())
    }
}
