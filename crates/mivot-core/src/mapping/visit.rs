#![allow(unused_variables)]

use super::{Attribute, Collection, Instance, Join, MappingNode, Reference};

/// Read-only walk over a mapping tree, in document order.
pub trait Visit {
    fn visit_node(&mut self, i: &MappingNode) {
        visit_node(self, i);
    }

    fn visit_instance(&mut self, i: &Instance) {
        visit_instance(self, i);
    }

    fn visit_attribute(&mut self, i: &Attribute) {}

    fn visit_collection(&mut self, i: &Collection) {
        visit_collection(self, i);
    }

    fn visit_reference(&mut self, i: &Reference) {}

    fn visit_join(&mut self, i: &Join) {}
}

pub fn visit_node<V>(v: &mut V, node: &MappingNode)
where
    V: Visit + ?Sized,
{
    match node {
        MappingNode::Instance(node) => v.visit_instance(node),
        MappingNode::Attribute(node) => v.visit_attribute(node),
        MappingNode::Collection(node) => v.visit_collection(node),
        MappingNode::Reference(node) => v.visit_reference(node),
        MappingNode::Join(node) => v.visit_join(node),
    }
}

pub fn visit_instance<V>(v: &mut V, node: &Instance)
where
    V: Visit + ?Sized,
{
    for child in &node.children {
        v.visit_node(child);
    }
}

pub fn visit_collection<V>(v: &mut V, node: &Collection)
where
    V: Visit + ?Sized,
{
    for item in &node.items {
        v.visit_node(item);
    }
}

/// Calls `f` for every node of every tree in `nodes`, parents before
/// children.
pub fn for_each_node<'a, F>(nodes: impl IntoIterator<Item = &'a MappingNode>, f: F)
where
    F: FnMut(&MappingNode),
{
    struct ForEach<F> {
        f: F,
    }

    impl<F> Visit for ForEach<F>
    where
        F: FnMut(&MappingNode),
    {
        fn visit_node(&mut self, node: &MappingNode) {
            (self.f)(node);
            visit_node(self, node);
        }
    }

    let mut visit = ForEach { f };
    for node in nodes {
        visit.visit_node(node);
    }
}
