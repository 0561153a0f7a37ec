use super::{Attribute, Collection, Instance, Join, Reference};
use serde::{Deserialize, Serialize};

/// A node of the mapping tree.
///
/// Serializes externally tagged with the element names of the mapping
/// grammar, e.g. `{"INSTANCE": {"dmtype": "meas:Position", "children": []}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MappingNode {
    Instance(Instance),
    Attribute(Attribute),
    Collection(Collection),
    Reference(Reference),
    Join(Join),
}

impl MappingNode {
    pub fn dmrole(&self) -> Option<&str> {
        match self {
            Self::Instance(node) => node.dmrole.as_deref(),
            Self::Attribute(node) => node.dmrole.as_deref(),
            Self::Collection(node) => node.dmrole.as_deref(),
            Self::Reference(node) => node.dmrole.as_deref(),
            Self::Join(node) => node.dmrole.as_deref(),
        }
    }

    pub fn set_dmrole(&mut self, dmrole: Option<String>) {
        let slot = match self {
            Self::Instance(node) => &mut node.dmrole,
            Self::Attribute(node) => &mut node.dmrole,
            Self::Collection(node) => &mut node.dmrole,
            Self::Reference(node) => &mut node.dmrole,
            Self::Join(node) => &mut node.dmrole,
        };
        *slot = dmrole;
    }

    pub fn dmid(&self) -> Option<&str> {
        match self {
            Self::Instance(node) => node.dmid.as_deref(),
            Self::Collection(node) => node.dmid.as_deref(),
            _ => None,
        }
    }

    pub fn dmtype(&self) -> Option<&str> {
        match self {
            Self::Instance(node) => Some(&node.dmtype),
            Self::Attribute(node) => Some(&node.dmtype),
            _ => None,
        }
    }

    /// Element name of the node in the mapping grammar.
    pub fn element_name(&self) -> &'static str {
        match self {
            Self::Instance(_) => "INSTANCE",
            Self::Attribute(_) => "ATTRIBUTE",
            Self::Collection(_) => "COLLECTION",
            Self::Reference(_) => "REFERENCE",
            Self::Join(_) => "JOIN",
        }
    }

    pub fn is_instance(&self) -> bool {
        matches!(self, Self::Instance(_))
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Self::Instance(node) => Some(node),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_instance(&self) -> &Instance {
        match self {
            Self::Instance(node) => node,
            _ => panic!("expected INSTANCE; actual={self:#?}"),
        }
    }

    pub fn as_attribute(&self) -> Option<&Attribute> {
        match self {
            Self::Attribute(node) => Some(node),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_attribute(&self) -> &Attribute {
        match self {
            Self::Attribute(node) => node,
            _ => panic!("expected ATTRIBUTE; actual={self:#?}"),
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Self::Collection(node) => Some(node),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_collection(&self) -> &Collection {
        match self {
            Self::Collection(node) => node,
            _ => panic!("expected COLLECTION; actual={self:#?}"),
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(node) => Some(node),
            _ => None,
        }
    }

    /// Child nodes of an INSTANCE or items of a COLLECTION.
    pub fn children(&self) -> &[MappingNode] {
        match self {
            Self::Instance(node) => &node.children,
            Self::Collection(node) => &node.items,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<MappingNode>> {
        match self {
            Self::Instance(node) => Some(&mut node.children),
            Self::Collection(node) => Some(&mut node.items),
            _ => None,
        }
    }

    /// Iterates over this node and all its descendants, parents before
    /// children, in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator returned by [`MappingNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a MappingNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a MappingNode;

    fn next(&mut self) -> Option<&'a MappingNode> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

impl From<Instance> for MappingNode {
    fn from(value: Instance) -> Self {
        Self::Instance(value)
    }
}

impl From<Attribute> for MappingNode {
    fn from(value: Attribute) -> Self {
        Self::Attribute(value)
    }
}

impl From<Collection> for MappingNode {
    fn from(value: Collection) -> Self {
        Self::Collection(value)
    }
}

impl From<Reference> for MappingNode {
    fn from(value: Reference) -> Self {
        Self::Reference(value)
    }
}

impl From<Join> for MappingNode {
    fn from(value: Join) -> Self {
        Self::Join(value)
    }
}
