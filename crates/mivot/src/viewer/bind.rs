use mivot_core::{
    mapping::{Attribute, MappingNode},
    Error, Result, TableIndex,
};

/// Binds every ATTRIBUTE of `nodes` to its column position and unit.
///
/// Returns the number of attributes bound to a column.
pub(crate) fn bind(nodes: &mut [MappingNode], index: &TableIndex, strict: bool) -> Result<usize> {
    let mut bound = 0;

    for node in nodes {
        match node {
            MappingNode::Attribute(attribute) => {
                if bind_attribute(attribute, index, strict)? {
                    bound += 1;
                }
            }
            node => {
                if let Some(children) = node.children_mut() {
                    bound += bind(children, index, strict)?;
                }
            }
        }
    }

    Ok(bound)
}

fn bind_attribute(attribute: &mut Attribute, index: &TableIndex, strict: bool) -> Result<bool> {
    let Some(column) = attribute.column.as_deref() else {
        if attribute.literal.is_none() {
            return Err(Error::unmappable_attribute(
                attribute.dmrole.as_deref(),
                &attribute.dmtype,
                None,
            ));
        }
        return Ok(false);
    };

    if let Some(binding) = index.binding_for(column) {
        // The field's unit wins; a unit declared on the attribute only fills
        // in for fields that declare none.
        let unit = binding
            .unit
            .clone()
            .or_else(|| attribute.unit.take())
            .unwrap_or_default();

        attribute.unit = Some(unit);
        attribute.binding = Some(binding.clone());
        return Ok(true);
    }

    if attribute.literal.is_none() || strict {
        return Err(Error::unmappable_attribute(
            attribute.dmrole.as_deref(),
            &attribute.dmtype,
            Some(column),
        ));
    }

    tracing::warn!(
        column,
        role = ?attribute.dmrole,
        "column not found; keeping the literal default"
    );
    attribute.column = None;
    Ok(false)
}
