#![allow(unused_variables)]

use super::{Attribute, Collection, Instance, Join, MappingNode, Reference};

/// Mutating walk over a mapping tree, in document order.
///
/// Visitors rewrite node contents in place; they never add or remove
/// siblings while the parent's children are being iterated.
pub trait VisitMut {
    fn visit_node_mut(&mut self, i: &mut MappingNode) {
        visit_node_mut(self, i);
    }

    fn visit_instance_mut(&mut self, i: &mut Instance) {
        visit_instance_mut(self, i);
    }

    fn visit_attribute_mut(&mut self, i: &mut Attribute) {}

    fn visit_collection_mut(&mut self, i: &mut Collection) {
        visit_collection_mut(self, i);
    }

    fn visit_reference_mut(&mut self, i: &mut Reference) {}

    fn visit_join_mut(&mut self, i: &mut Join) {}
}

pub fn visit_node_mut<V>(v: &mut V, node: &mut MappingNode)
where
    V: VisitMut + ?Sized,
{
    match node {
        MappingNode::Instance(node) => v.visit_instance_mut(node),
        MappingNode::Attribute(node) => v.visit_attribute_mut(node),
        MappingNode::Collection(node) => v.visit_collection_mut(node),
        MappingNode::Reference(node) => v.visit_reference_mut(node),
        MappingNode::Join(node) => v.visit_join_mut(node),
    }
}

pub fn visit_instance_mut<V>(v: &mut V, node: &mut Instance)
where
    V: VisitMut + ?Sized,
{
    for child in &mut node.children {
        v.visit_node_mut(child);
    }
}

pub fn visit_collection_mut<V>(v: &mut V, node: &mut Collection)
where
    V: VisitMut + ?Sized,
{
    for item in &mut node.items {
        v.visit_node_mut(item);
    }
}

/// Calls `f` for every ATTRIBUTE of every tree in `nodes`.
pub fn for_each_attribute_mut<'a, F>(nodes: impl IntoIterator<Item = &'a mut MappingNode>, f: F)
where
    F: FnMut(&mut Attribute),
{
    struct ForEach<F> {
        f: F,
    }

    impl<F> VisitMut for ForEach<F>
    where
        F: FnMut(&mut Attribute),
    {
        fn visit_attribute_mut(&mut self, i: &mut Attribute) {
            (self.f)(i);
        }
    }

    let mut visit = ForEach { f };
    for node in nodes {
        visit.visit_node_mut(node);
    }
}
