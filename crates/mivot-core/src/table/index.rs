use super::Table;

use std::collections::HashMap;

/// Where an attribute's value is read from in each row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnBinding {
    /// The field's declared id, or its name when it declares none.
    pub declared_id: String,

    /// The field's alternate `ref`, if any.
    pub alt_ref: Option<String>,

    /// Zero-based column position.
    pub position: usize,

    /// Unit declared by the field.
    pub unit: Option<String>,
}

/// Static column lookups over one table.
///
/// Identifiers resolve against declared field ids first and fall back to
/// field names. Rebuilt whenever the engine connects to a different table.
#[derive(Debug, Clone)]
pub struct TableIndex {
    bindings: Vec<ColumnBinding>,
    by_id: HashMap<String, usize>,
    by_name: HashMap<String, usize>,
}

impl TableIndex {
    pub fn new(table: &Table) -> Self {
        let mut bindings = Vec::with_capacity(table.fields.len());
        let mut by_id = HashMap::new();
        let mut by_name = HashMap::new();

        for (position, field) in table.fields.iter().enumerate() {
            bindings.push(ColumnBinding {
                declared_id: field.declared_id().to_string(),
                alt_ref: field.reference.clone(),
                position,
                unit: field.unit.clone(),
            });

            if let Some(id) = &field.id {
                by_id.entry(id.clone()).or_insert(position);
            }
            by_name.entry(field.name.clone()).or_insert(position);
        }

        tracing::debug!(table = table.label(), columns = bindings.len(), "indexed table");

        Self {
            bindings,
            by_id,
            by_name,
        }
    }

    fn position_of(&self, identifier: &str) -> Option<usize> {
        self.by_id
            .get(identifier)
            .or_else(|| self.by_name.get(identifier))
            .copied()
    }

    pub fn binding_for(&self, identifier: &str) -> Option<&ColumnBinding> {
        self.position_of(identifier).map(|position| &self.bindings[position])
    }

    pub fn unit_for(&self, identifier: &str) -> Option<&str> {
        self.binding_for(identifier)?.unit.as_deref()
    }

    pub fn num_columns(&self) -> usize {
        self.bindings.len()
    }
}
