use super::{bind::bind, park::park, ParkedNode};
use crate::{Config, InstanceGraph, Resolver};

use mivot_core::{
    mapping::{visit_mut, LookupScope, MappingNode},
    table::Row,
    Error, MappingIndex, Result, Table, TableIndex, Value,
};

/// A TEMPLATES block prepared for one table.
///
/// Built once per connected table: row-dependent nodes are parked, static
/// references are resolved and attributes are bound to their columns. The
/// result is row-independent and shared by every session over the table.
#[derive(Debug)]
pub struct ResolvedTemplate {
    table_ref: Option<String>,

    /// Resolved and bound top-level TEMPLATES nodes.
    nodes: Vec<MappingNode>,

    /// Position of the head node in `nodes`.
    head: usize,

    /// Row-dependent nodes, one per tag, in document order.
    parked: Vec<ParkedNode>,

    table_index: TableIndex,

    /// Graph built from the head before any row is read.
    graph: InstanceGraph,

    num_resolved: usize,
    num_bound: usize,
}

impl ResolvedTemplate {
    pub(crate) fn new(
        index: &MappingIndex,
        table_ref: Option<&str>,
        table: &Table,
        config: &Config,
    ) -> Result<ResolvedTemplate> {
        let children = index.templates_for(table_ref).ok_or_else(|| {
            Error::configuration(format!(
                "no TEMPLATES block for table `{}`",
                table_ref.unwrap_or(table.label())
            ))
        })?;

        let mut nodes = children.to_vec();
        let mut parked = park(&mut nodes);

        let num_resolved = Resolver::new(index, LookupScope::Templates(table_ref))
            .resolve_all(&mut nodes, config.max_resolve_passes)?;

        // Targets spliced in from GLOBALS may carry their own row-dependent
        // nodes. A target spliced into several places parks the same tag
        // once per copy; the first copy is kept.
        for node in park(&mut nodes) {
            if !parked.iter().any(|kept| kept.tag == node.tag) {
                parked.push(node);
            }
        }

        let table_index = TableIndex::new(table);
        let num_bound = bind(&mut nodes, &table_index, config.strict_bindings)?;

        let head = nodes
            .iter()
            .position(|node| node.is_instance() || node.is_collection())
            .ok_or_else(|| {
                Error::configuration(format!(
                    "no mappable root: TEMPLATES for table `{}` has no INSTANCE or COLLECTION",
                    table.label()
                ))
            })?;

        let graph = InstanceGraph::build(&nodes[head])?;

        tracing::debug!(
            table = table.label(),
            tableref = ?table_ref,
            resolved = num_resolved,
            bound = num_bound,
            parked = parked.len(),
            "resolved template"
        );

        Ok(ResolvedTemplate {
            table_ref: table_ref.map(String::from),
            nodes,
            head,
            parked,
            table_index,
            graph,
            num_resolved,
            num_bound,
        })
    }

    /// The `tableref` of the TEMPLATES block, `None` for the unnamed block.
    pub fn table_ref(&self) -> Option<&str> {
        self.table_ref.as_deref()
    }

    /// The first INSTANCE or COLLECTION of the block.
    pub fn head(&self) -> &MappingNode {
        &self.nodes[self.head]
    }

    pub fn nodes(&self) -> &[MappingNode] {
        &self.nodes
    }

    pub fn parked(&self) -> &[ParkedNode] {
        &self.parked
    }

    pub fn table_index(&self) -> &TableIndex {
        &self.table_index
    }

    /// The value-less instance graph every session starts from.
    pub fn graph(&self) -> &InstanceGraph {
        &self.graph
    }

    pub fn num_resolved(&self) -> usize {
        self.num_resolved
    }

    pub fn num_bound(&self) -> usize {
        self.num_bound
    }

    /// A copy of the head where every bound attribute carries the text of its
    /// column in `row` as its literal. A null cell leaves no literal, so the
    /// view materializes to the same values [`InstanceGraph::update`] sets.
    pub fn view(&self, row: &Row) -> MappingNode {
        let mut view = self.head().clone();

        visit_mut::for_each_attribute_mut(std::iter::once(&mut view), |attribute| {
            if let Some(cell) = attribute.position().and_then(|position| row.get(position)) {
                attribute.literal = match cell {
                    Value::Null => None,
                    cell => Some(cell.to_text()),
                };
            }
        });

        view
    }
}
