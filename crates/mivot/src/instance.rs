mod build;
mod dict;
mod key;
mod update;

use indexmap::IndexMap;
use mivot_core::Value;

/// A materialized, row-updatable object tree.
///
/// The graph is built once from a resolved template and then only updated
/// in place as rows are read: its keys, collection lengths, dmtypes and units
/// never change after [`build`](InstanceGraph::build).
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceGraph {
    key: String,
    root: Node,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Instance(Instance),
    Collection(Collection),
    Attribute(Attribute),
}

/// A keyed object. Fields are keyed by role and kept in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    pub dmtype: String,
    pub dmrole: Option<String>,
    pub dmid: Option<String>,
    fields: IndexMap<String, Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub dmrole: Option<String>,
    pub items: Vec<Node>,
}

/// A leaf holding a typed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub dmtype: String,
    pub dmrole: Option<String>,
    pub value: Value,
    pub unit: Option<String>,

    /// Column identifier the value comes from.
    pub column: Option<String>,

    /// Column position refreshed by [`InstanceGraph::update`].
    pub position: Option<usize>,
}

impl InstanceGraph {
    /// Key of the root node: its role's terminal segment, or `root`.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_instance(&self) -> Option<&Instance> {
        self.root.as_instance()
    }

    /// Follows a dotted path of field keys from the root. Numeric segments
    /// index into collections.
    ///
    /// ```ignore
    /// graph.at("coords.longitude")
    /// graph.at("photometry.0.value")
    /// ```
    pub fn at(&self, path: &str) -> Option<&Node> {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .try_fold(&self.root, |node, segment| match node {
                Node::Instance(instance) => instance.get(segment),
                Node::Collection(collection) => collection.items.get(segment.parse::<usize>().ok()?),
                Node::Attribute(_) => None,
            })
    }

    /// Shortcut for `at(path)` on a leaf.
    pub fn attribute(&self, path: &str) -> Option<&Attribute> {
        self.at(path)?.as_attribute()
    }

    /// All nodes, parents before children.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.root.descendants()
    }

    /// dmtypes of every instance and attribute, de-duplicated, in document
    /// order.
    pub fn dmtypes(&self) -> Vec<&str> {
        let mut dmtypes = vec![];
        for dmtype in self.nodes().filter_map(Node::dmtype) {
            if !dmtypes.contains(&dmtype) {
                dmtypes.push(dmtype);
            }
        }
        dmtypes
    }

    /// Instances whose dmtype contains `pattern`.
    pub fn find_by_dmtype(&self, pattern: &str) -> Vec<&Instance> {
        self.nodes()
            .filter_map(Node::as_instance)
            .filter(|instance| instance.dmtype.contains(pattern))
            .collect()
    }
}

impl Node {
    /// `None` for collections.
    pub fn dmtype(&self) -> Option<&str> {
        match self {
            Self::Instance(instance) => Some(&instance.dmtype),
            Self::Attribute(attribute) => Some(&attribute.dmtype),
            Self::Collection(_) => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Self::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_instance(&self) -> &Instance {
        match self {
            Self::Instance(instance) => instance,
            _ => panic!("expected instance; actual={self:#?}"),
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_collection(&self) -> &Collection {
        match self {
            Self::Collection(collection) => collection,
            _ => panic!("expected collection; actual={self:#?}"),
        }
    }

    pub fn as_attribute(&self) -> Option<&Attribute> {
        match self {
            Self::Attribute(attribute) => Some(attribute),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_attribute(&self) -> &Attribute {
        match self {
            Self::Attribute(attribute) => attribute,
            _ => panic!("expected attribute; actual={self:#?}"),
        }
    }

    /// This node and all its descendants, parents before children.
    pub fn descendants(&self) -> impl Iterator<Item = &Node> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            match node {
                Self::Instance(instance) => stack.extend(instance.fields.values().rev()),
                Self::Collection(collection) => stack.extend(collection.items.iter().rev()),
                Self::Attribute(_) => {}
            }
            Some(node)
        })
    }
}

impl Instance {
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.fields.get(key)
    }

    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.get(key)?.as_attribute()
    }

    pub fn instance(&self, key: &str) -> Option<&Instance> {
        self.get(key)?.as_instance()
    }

    pub fn collection(&self, key: &str) -> Option<&Collection> {
        self.get(key)?.as_collection()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Node)> + '_ {
        self.fields.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Collection {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.items.iter()
    }
}

impl Attribute {
    /// Unit, treating an empty unit as absent.
    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref().filter(|unit| !unit.is_empty())
    }
}
