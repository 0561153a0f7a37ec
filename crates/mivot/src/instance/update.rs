use super::{InstanceGraph, Node};
use mivot_core::table::Row;

impl InstanceGraph {
    /// Overwrites the value of every column-bound leaf from `row`.
    ///
    /// Structure, dmtypes and units are left untouched. Returns the number of
    /// leaves updated.
    pub fn update(&mut self, row: &Row) -> usize {
        let mut updated = 0;
        update_node(&mut self.root, row, &mut updated);
        updated
    }
}

fn update_node(node: &mut Node, row: &Row, updated: &mut usize) {
    match node {
        Node::Instance(instance) => {
            for child in instance.fields.values_mut() {
                update_node(child, row, updated);
            }
        }
        Node::Collection(collection) => {
            for item in &mut collection.items {
                update_node(item, row, updated);
            }
        }
        Node::Attribute(attribute) => {
            let Some(position) = attribute.position else {
                return;
            };

            match row.get(position) {
                Some(cell) => {
                    attribute.value = cell.cast(&attribute.dmtype);
                    *updated += 1;
                }
                None => tracing::warn!(
                    position,
                    len = row.len(),
                    column = ?attribute.column,
                    "row is shorter than the bound column position"
                ),
            }
        }
    }
}
