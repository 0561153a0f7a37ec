use mivot_core::mapping::{MappingNode, NodeTag};

/// A JOIN or dynamic REFERENCE taken out of a template.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkedNode {
    pub tag: NodeTag,

    /// Roles (or dmtypes, for role-less nodes) of the ancestors the node was
    /// removed from, outermost first.
    pub path: Vec<String>,

    pub node: MappingNode,
}

/// Removes JOIN nodes and dynamic REFERENCE nodes from `nodes`, at any depth.
pub(crate) fn park(nodes: &mut Vec<MappingNode>) -> Vec<ParkedNode> {
    let mut parked = vec![];
    park_in(nodes, &mut vec![], &mut parked);
    parked
}

fn park_in(nodes: &mut Vec<MappingNode>, path: &mut Vec<String>, parked: &mut Vec<ParkedNode>) {
    let (kept, removed): (Vec<_>, Vec<_>) = std::mem::take(nodes)
        .into_iter()
        .partition(|node| parked_tag(node).is_none());

    for node in removed {
        let Some(tag) = parked_tag(&node) else {
            continue;
        };
        tracing::debug!(%tag, path = ?path, "parked row-dependent node");
        parked.push(ParkedNode {
            tag,
            path: path.clone(),
            node,
        });
    }

    *nodes = kept;

    for node in nodes.iter_mut() {
        let label = node
            .dmrole()
            .or(node.dmtype())
            .unwrap_or(node.element_name())
            .to_string();

        if let Some(children) = node.children_mut() {
            path.push(label);
            park_in(children, path, parked);
            path.pop();
        }
    }
}

fn parked_tag(node: &MappingNode) -> Option<NodeTag> {
    match node {
        MappingNode::Join(join) => Some(join.tag),
        MappingNode::Reference(reference) if reference.is_dynamic() => Some(reference.tag),
        _ => None,
    }
}
