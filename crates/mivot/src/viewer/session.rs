use super::{ParkedNode, ResolvedTemplate};
use crate::{cursor::RowFilter, resolve::lookup_key, InstanceGraph, Resolver, RowCursor};

use mivot_core::{
    mapping::{LookupScope, MappingNode, NodeTag},
    table::Row,
    Error, MappingIndex, Result, Table,
};

use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Connected, no row under the cursor.
    Idle,

    /// Connected, the instance graph holds the values of the current row.
    RowLoaded,
}

/// Row-by-row materialization over one connected table.
///
/// A session owns its cursor and its instance graph. The resolved template,
/// the table and the mapping index are shared read-only.
#[derive(Debug)]
pub struct Session {
    index: Arc<MappingIndex>,
    template: Arc<ResolvedTemplate>,
    cursor: RowCursor,
    graph: InstanceGraph,
    state: SessionState,
    max_resolve_passes: usize,
}

impl Session {
    pub(crate) fn new(
        index: Arc<MappingIndex>,
        template: Arc<ResolvedTemplate>,
        table: Arc<Table>,
        max_resolve_passes: usize,
    ) -> Session {
        Session {
            graph: template.graph().clone(),
            index,
            template,
            cursor: RowCursor::new(table),
            state: SessionState::Idle,
            max_resolve_passes,
        }
    }

    /// Advances to the next row and refreshes the instance graph from it.
    ///
    /// Returns `None`, and goes idle, once the table is exhausted.
    pub fn next_row(&mut self) -> Option<&Row> {
        if self.cursor.next().is_none() {
            self.state = SessionState::Idle;
            return None;
        }

        let row = self.cursor.current()?;
        let updated = self.graph.update(row);
        self.state = SessionState::RowLoaded;

        tracing::trace!(row = ?self.cursor.position(), updated, "row loaded");
        Some(row)
    }

    /// Restarts before the first row. The resolved template is kept.
    pub fn rewind(&mut self) {
        self.cursor.rewind();
        self.state = SessionState::Idle;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The instance graph of the current row.
    pub fn current_instance(&self) -> Option<&InstanceGraph> {
        match self.state {
            SessionState::RowLoaded => Some(&self.graph),
            SessionState::Idle => None,
        }
    }

    /// The dictionary form of [`current_instance`](Self::current_instance).
    pub fn current_instance_as_dict(&self, literal: bool) -> Option<serde_json::Value> {
        self.current_instance().map(|graph| graph.to_dict(literal))
    }

    /// The head of the resolved template carrying the current row's column
    /// text on every bound attribute.
    pub fn current_view(&self) -> Option<MappingNode> {
        self.cursor.current().map(|row| self.template.view(row))
    }

    pub fn current_row(&self) -> Option<&Row> {
        self.cursor.current()
    }

    /// JOIN and dynamic REFERENCE nodes left out of the template.
    pub fn parked(&self) -> &[ParkedNode] {
        self.template.parked()
    }

    /// Resolves the parked dynamic REFERENCE `tag` for the current row.
    ///
    /// The reference's foreign-key column is read from the current row and
    /// looked up in its GLOBALS collection; the matching item is returned
    /// with its own references resolved. The instance graph is not touched.
    pub fn resolve_dynamic_reference(&self, tag: NodeTag) -> Result<MappingNode> {
        let reference = self
            .parked()
            .iter()
            .filter(|parked| parked.tag == tag)
            .find_map(|parked| parked.node.as_reference())
            .ok_or_else(|| {
                Error::configuration(format!("{tag} is not a parked dynamic reference"))
            })?;

        let row = self
            .cursor
            .current()
            .ok_or_else(|| Error::configuration(format!("{tag} requires a current row")))?;

        let (Some(source_ref), Some(column)) = (&reference.source_ref, reference.key_column())
        else {
            return Err(Error::configuration(format!(
                "{tag} has no sourceref or no foreign-key column"
            )));
        };

        let binding = self.template.table_index().binding_for(column).ok_or_else(|| {
            Error::unmappable_attribute(
                reference.dmrole.as_deref(),
                tag.to_string(),
                Some(column),
            )
        })?;

        let key = row.text_at(binding.position).unwrap_or_default();

        let target = lookup_key(&self.index, source_ref, &key)
            .map_err(|err| err.context(format!("resolving {tag}")))?;

        let mut nodes = vec![target];
        Resolver::new(&self.index, LookupScope::Templates(self.template.table_ref()))
            .resolve_all(&mut nodes, self.max_resolve_passes)?;

        let mut node = nodes
            .pop()
            .ok_or_else(|| Error::configuration(format!("{tag} resolved to nothing")))?;

        if reference.dmrole.is_some() {
            node.set_dmrole(reference.dmrole.clone());
        }

        tracing::trace!(%tag, key = %key, "resolved dynamic reference");
        Ok(node)
    }

    /// A new session over the same table, starting before the first row.
    ///
    /// The fork shares the resolved template and indexes and has its own
    /// cursor and instance graph. The row filter is kept.
    pub fn fork(&self) -> Session {
        let mut cursor = self.cursor.clone();
        cursor.rewind();

        Session {
            index: self.index.clone(),
            template: self.template.clone(),
            cursor,
            graph: self.template.graph().clone(),
            state: SessionState::Idle,
            max_resolve_passes: self.max_resolve_passes,
        }
    }

    /// Only read rows accepted by `filter`; `None` removes the filter.
    pub fn set_row_filter(&mut self, filter: Option<RowFilter>) {
        self.cursor.set_filter(filter);
    }

    pub fn template(&self) -> &Arc<ResolvedTemplate> {
        &self.template
    }

    pub fn table(&self) -> &Arc<Table> {
        self.cursor.table()
    }
}
