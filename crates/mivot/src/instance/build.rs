use super::{key, Attribute, Collection, Instance, InstanceGraph, Node};
use mivot_core::{mapping, value::cast, Error, MappingNode, Result, Value};

use indexmap::IndexMap;

impl InstanceGraph {
    /// Materializes a resolved mapping sub-tree.
    ///
    /// Attribute values are cast from their literal text per dmtype; bound
    /// attributes keep their column position for later updates. The tree
    /// must not contain REFERENCE or JOIN nodes.
    pub fn build(view: &MappingNode) -> Result<InstanceGraph> {
        Ok(InstanceGraph {
            key: key::root_key(view),
            root: build_node(view)?,
        })
    }
}

fn build_node(node: &MappingNode) -> Result<Node> {
    Ok(match node {
        MappingNode::Instance(instance) => Node::Instance(build_instance(instance)?),
        MappingNode::Collection(collection) => Node::Collection(Collection {
            dmrole: collection.dmrole.clone(),
            items: collection
                .items
                .iter()
                .map(build_node)
                .collect::<Result<_>>()?,
        }),
        MappingNode::Attribute(attribute) => Node::Attribute(build_attribute(attribute)),
        MappingNode::Reference(reference) => {
            return Err(Error::configuration(format!(
                "{} must be resolved before materialization",
                reference.tag
            )))
        }
        MappingNode::Join(join) => {
            return Err(Error::configuration(format!(
                "{} cannot be materialized",
                join.tag
            )))
        }
    })
}

fn build_instance(instance: &mapping::Instance) -> Result<Instance> {
    let keys = key::child_keys(&instance.children);
    let mut fields = IndexMap::with_capacity(keys.len());

    for (key, child) in keys.into_iter().zip(&instance.children) {
        fields.insert(key, build_node(child)?);
    }

    Ok(Instance {
        dmtype: instance.dmtype.clone(),
        dmrole: instance.dmrole.clone(),
        dmid: instance.dmid.clone(),
        fields,
    })
}

fn build_attribute(attribute: &mapping::Attribute) -> Attribute {
    Attribute {
        dmtype: attribute.dmtype.clone(),
        dmrole: attribute.dmrole.clone(),
        value: attribute
            .literal
            .as_deref()
            .map(|text| cast(text, &attribute.dmtype))
            .unwrap_or(Value::Null),
        unit: attribute.unit.clone().filter(|unit| !unit.is_empty()),
        column: attribute.column.clone(),
        position: attribute.position(),
    }
}
